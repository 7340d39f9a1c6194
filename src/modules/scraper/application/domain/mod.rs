pub mod catalogue;
pub mod scraped;
