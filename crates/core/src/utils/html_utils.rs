//! HTML helpers built on `scraper`.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use super::text_utils::collapse_whitespace;

/// Class prefix carrying the attachment id of an inline image.
const ATTACHMENT_CLASS_PREFIX: &str = "wp-image-";

/// An `<img>` found in rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub url: Url,
    pub attachment_id: Option<u64>,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// Visible text of an HTML fragment, whitespace collapsed.
pub fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    collapse_whitespace(&text)
}

/// Resolve `raw` to an absolute http(s) URL.
///
/// Relative references need `base`; anything else (data URIs, other
/// schemes, garbage) yields `None`.
pub fn http_url(raw: &str, base: Option<&Url>) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("data:") {
        return None;
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(raw).ok()?,
        Err(_) => return None,
    };

    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// All distinct `<img src>` images of an HTML fragment, in document order.
pub fn extract_images(html: &str, base: Option<&Url>) -> Vec<InlineImage> {
    let mut out = Vec::new();
    let selector = match Selector::parse("img[src]") {
        Ok(s) => s,
        Err(_) => return out,
    };

    let fragment = Html::parse_fragment(html);
    let mut seen = HashSet::new();

    for img in fragment.select(&selector) {
        let element = img.value();
        let Some(url) = element.attr("src").and_then(|src| http_url(src, base)) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }

        let attachment_id = element
            .classes()
            .find_map(|class| class.strip_prefix(ATTACHMENT_CLASS_PREFIX))
            .and_then(|id| id.parse::<u64>().ok());
        let dimension = |name: &str| {
            element
                .attr(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };

        out.push(InlineImage {
            attachment_id,
            alt: element.attr("alt").map(str::trim).unwrap_or_default().to_string(),
            width: dimension("width"),
            height: dimension("height"),
            url,
        });
    }
    out
}
