pub mod faq;
pub mod query;
