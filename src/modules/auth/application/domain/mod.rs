pub mod entities;
pub mod saved_search;
