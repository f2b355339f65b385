//! Owner email normalization.

/// Normalize an owner email for lookup: trim surrounding whitespace and
/// lower-case. No format check is applied; any address is accepted.
///
/// # Examples
///
/// ```
/// use valentine_core::email::normalize_email;
///
/// assert_eq!(normalize_email("  A@X.com "), "a@x.com");
/// ```
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_email("\tAlice@Example.COM \n"), "alice@example.com");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["A@X.com ", "  b@y.org", "MiXeD@CaSe.Io", "", "   ", "ünïcode@X.de"] {
            let once = normalize_email(raw);
            assert_eq!(normalize_email(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert!(normalize_email("   ").is_empty());
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        assert_eq!(normalize_email(" a b@x.com "), "a b@x.com");
    }
}
