use lazy_regex::regex_is_match;

pub(crate) const NO_TITLE: &str = "No title found";
const MULTIPLICATION_SIGN: char = '×';

/// Quest name is whatever precedes the first `|` of the page title.
pub(crate) fn quest_name_from_title(title: Option<&str>) -> String {
    let title = title.unwrap_or(NO_TITLE);
    title.split('|').next().unwrap_or_default().trim().to_string()
}

/// Strips surrounding whitespace and at most one `×` on each side.
pub(crate) fn normalize_count(raw: &str) -> String {
    let count = raw.trim();
    let count = count.strip_prefix(MULTIPLICATION_SIGN).unwrap_or(count);
    let count = count.strip_suffix(MULTIPLICATION_SIGN).unwrap_or(count);
    count.trim().to_string()
}

pub(crate) fn is_http_url(url: &str) -> bool {
    regex_is_match!(r"^https?://", url)
}
