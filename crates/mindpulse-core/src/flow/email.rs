use std::sync::OnceLock;

use regex::Regex;

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot with
/// text on both sides somewhere after it.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn is_valid_email(candidate: &str) -> bool {
    email_regex().is_match(candidate)
}
