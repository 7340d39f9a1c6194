pub mod post_article_search;

pub use post_article_search::PostArticleSearch;
