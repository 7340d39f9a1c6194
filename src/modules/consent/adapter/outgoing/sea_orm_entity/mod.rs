pub mod consent_records;
