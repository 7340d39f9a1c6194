pub mod article_search;

pub use article_search::{ArticleSearch, ArticleSearchError};
