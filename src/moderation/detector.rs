use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"(?i)(https?://|www\.)\S+").unwrap();
}

/// True when `content` carries an `http://`, `https://` or `www.` link anywhere.
pub fn contains_link(content: &str) -> bool {
    URL_PATTERN.is_match(content)
}
