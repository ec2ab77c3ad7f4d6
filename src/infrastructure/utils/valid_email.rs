use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Checks that an address has the loose `user@host.tld` shape. Deliberately
/// permissive; the webhook side owns any stricter verification.
pub fn valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
