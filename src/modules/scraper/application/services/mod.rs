pub mod parser;

pub use parser::{pagination_urls, parse_date, parse_post_content, parse_post_list};
