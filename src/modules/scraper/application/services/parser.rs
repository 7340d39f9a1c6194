//! HTML extraction for the agency's WordPress pages.
//!
//! Every function degrades to "nothing found" rather than failing: a
//! changed theme yields empty results that show up in the scrape log.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Url;
use ::scraper::{ElementRef, Html, Node, Selector};

use crate::scraper::application::domain::scraped::{ListedPost, PostContent, ScrapedAttachment};

const ATTACHMENT_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "xls", "xlsx"];

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// First element matching any of `candidates`, tried in order.
fn first_match<'a>(root: ElementRef<'a>, candidates: &[&str]) -> Option<ElementRef<'a>> {
    candidates
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| root.select(&sel).next())
}

fn all_matches<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => root.select(&sel).collect(),
        None => Vec::new(),
    }
}

fn collapse_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Resolves `href` against `base_url`; `None` for unusable links.
fn absolute_url(base_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(String::from)
}

/// Text of `el` with `script` and `style` contents left out, one line per
/// text node.
fn visible_text(el: ElementRef<'_>) -> String {
    el.descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style"))
            });
            let trimmed = text.trim();
            (!hidden && !trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Posts listed on a category page.
pub fn parse_post_list(html: &str, base_url: &str) -> Vec<ListedPost> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut articles = all_matches(root, "article");
    if articles.is_empty() {
        articles = all_matches(root, "div.post");
    }

    articles
        .into_iter()
        .filter_map(|article| {
            let link = first_match(article, &["h3.entry-title a", "h2.entry-title a"])?;
            let url = absolute_url(base_url, link.value().attr("href")?)?;
            let title = non_empty(collapse_text(link))?;

            let excerpt = first_match(article, &["div.entry-summary", ".excerpt"])
                .map(collapse_text)
                .and_then(non_empty);

            let publish_date = first_match(article, &["time", "span.date"]).and_then(|el| {
                let raw = el
                    .value()
                    .attr("datetime")
                    .map(str::to_string)
                    .unwrap_or_else(|| collapse_text(el));
                parse_date(&raw)
            });

            Some(ListedPost {
                url,
                title,
                excerpt,
                publish_date,
            })
        })
        .collect()
}

/// Body, attachments, meta description and tags of a post page.
pub fn parse_post_content(html: &str, base_url: &str) -> PostContent {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let content = first_match(root, &["div.entry-content", ".post-content", "article"])
        .map(visible_text)
        .and_then(non_empty);

    let mut attachments: Vec<ScrapedAttachment> = Vec::new();
    for link in all_matches(root, "a[href]") {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let path = href.split(['?', '#']).next().unwrap_or(href);
        let Some(extension) = path.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()) else {
            continue;
        };
        if !ATTACHMENT_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        let Some(file_url) = absolute_url(base_url, href) else {
            continue;
        };
        if attachments.iter().any(|a| a.file_url == file_url) {
            continue;
        }

        let file_name = non_empty(collapse_text(link)).unwrap_or_else(|| {
            path.rsplit('/').next().unwrap_or(path).to_string()
        });
        attachments.push(ScrapedAttachment {
            file_url,
            file_name,
            file_type: extension,
        });
    }

    let meta_description = selector(r#"meta[name="description"]"#)
        .and_then(|sel| document.select(&sel).next())
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .and_then(non_empty);

    let tags = first_match(root, &["div.tags", ".post-tags"])
        .map(|container| {
            all_matches(container, "a")
                .into_iter()
                .map(collapse_text)
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    PostContent {
        content,
        attachments,
        meta_description,
        tags,
    }
}

/// Accepts ISO-8601 (with or without time and offset) and the numeric
/// day-first and year-first forms the agency uses. Dates without an
/// offset are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
        }
    }

    None
}

fn page_number(url: &str) -> u32 {
    url.rsplit(|c: char| !c.is_ascii_digit())
        .find(|part| !part.is_empty())
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// Links to further listing pages, de-duplicated and ordered by page number.
pub fn pagination_urls(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let Some(container) =
        first_match(root, &["div.basel-pagination", ".pagination", "nav.pagination"])
    else {
        return Vec::new();
    };

    let mut urls: Vec<String> = Vec::new();
    for link in all_matches(container, "a[href]") {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.contains("page") {
            continue;
        }
        if let Some(url) = absolute_url(base_url, href) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }

    urls.sort_by(|a, b| page_number(a).cmp(&page_number(b)).then_with(|| a.cmp(b)));
    urls
}
