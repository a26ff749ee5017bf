use crate::constants::ELLIPSIS;

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shortens `text` to at most `max_chars` characters, cutting on a word
/// boundary and appending an ellipsis when anything was removed.
///
/// A single word longer than the limit is cut mid-word.
pub fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let budget = max_chars - ELLIPSIS.chars().count();
    let head: String = text.chars().take(budget + 1).collect();

    // `head` holds one extra char so a word ending exactly at the budget is kept.
    let cut = match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &head[..pos],
        _ => {
            let end = head
                .char_indices()
                .nth(budget)
                .map(|(i, _)| i)
                .unwrap_or(head.len());
            &head[..end]
        }
    };

    let cut = cut.trim_end_matches(|c: char| c.is_whitespace() || ",;:-".contains(c));
    format!("{}{}", cut, ELLIPSIS)
}

/// Normalizes free text into a description of at most `max_chars` chars.
pub fn summarize(text: &str, max_chars: usize) -> String {
    truncate_words(&collapse_whitespace(text), max_chars)
}

/// `"{title} {separator} {site}"`, or just `title` when there is no site name.
pub fn brand_title(title: &str, separator: &str, site: &str) -> String {
    let site = site.trim();
    if site.is_empty() || title.trim() == site {
        return title.to_string();
    }
    format!("{} {} {}", title, separator.trim(), site)
}
