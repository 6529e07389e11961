//! Domain Name and Email Address Checks
//!
//! Syntactic checks only. Deliverability is never verified here.

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (per RFC 5321)
pub const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

/// Maximum domain name length (per RFC 1035)
pub const DOMAIN_MAX_LENGTH: usize = 253;

/// Maximum label length (per RFC 1035)
pub const LABEL_MAX_LENGTH: usize = 63;

/// Special characters allowed in an email local part (RFC 5322 atext)
const LOCAL_SPECIAL_CHARS: &[char] = &[
    '!', '#', '$', '%', '&', '\'', '*', '+', '-', '/', '=', '?', '^', '_', '`', '{', '|', '}', '~',
];

/// Options shared by domain and email checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressOptions {
    /// Permit non-ASCII characters
    pub allow_unicode: bool,
    /// Minimum number of dot-separated domain segments
    pub min_domain_segments: usize,
}

impl Default for AddressOptions {
    fn default() -> Self {
        Self {
            allow_unicode: false,
            min_domain_segments: 2,
        }
    }
}

/// Check a domain name such as `example.com`
pub fn is_valid_domain(domain: &str, options: &AddressOptions) -> bool {
    if domain.is_empty() || domain.chars().count() > DOMAIN_MAX_LENGTH {
        return false;
    }

    if !options.allow_unicode && !domain.is_ascii() {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < options.min_domain_segments.max(1) {
        return false;
    }

    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    // Top level domain cannot be purely numeric
    labels
        .last()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
}

fn is_valid_label(label: &str) -> bool {
    let len = label.chars().count();
    if len == 0 || len > LABEL_MAX_LENGTH {
        return false;
    }

    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }

    label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || (!c.is_ascii() && c.is_alphanumeric()))
}

/// Check an email address such as `user@example.com`
pub fn is_valid_email(email: &str, options: &AddressOptions) -> bool {
    if email.chars().count() > EMAIL_MAX_LENGTH {
        return false;
    }

    // Must contain exactly one @
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    is_valid_local_part(local, options) && is_valid_domain(domain, options)
}

fn is_valid_local_part(local: &str, options: &AddressOptions) -> bool {
    if local.is_empty() || local.chars().count() > EMAIL_LOCAL_MAX_LENGTH {
        return false;
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    local.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || c == '.'
            || LOCAL_SPECIAL_CHARS.contains(&c)
            || (options.allow_unicode && !c.is_ascii() && !c.is_control() && !c.is_whitespace())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_valid() {
        let opts = AddressOptions::default();
        assert!(is_valid_domain("example.com", &opts));
        assert!(is_valid_domain("sub.example-site.co.jp", &opts));
    }

    #[test]
    fn test_domain_invalid() {
        let opts = AddressOptions::default();
        assert!(!is_valid_domain("", &opts));
        assert!(!is_valid_domain("localhost", &opts));
        assert!(!is_valid_domain("-bad.com", &opts));
        assert!(!is_valid_domain("bad-.com", &opts));
        assert!(!is_valid_domain("a..com", &opts));
        assert!(!is_valid_domain("example.123", &opts));
        assert!(!is_valid_domain("exa mple.com", &opts));
    }

    #[test]
    fn test_domain_segments() {
        let opts = AddressOptions {
            min_domain_segments: 1,
            ..Default::default()
        };
        assert!(is_valid_domain("localhost", &opts));

        let opts = AddressOptions {
            min_domain_segments: 3,
            ..Default::default()
        };
        assert!(!is_valid_domain("example.com", &opts));
    }

    #[test]
    fn test_domain_unicode() {
        assert!(!is_valid_domain("bücher.de", &AddressOptions::default()));
        let opts = AddressOptions {
            allow_unicode: true,
            ..Default::default()
        };
        assert!(is_valid_domain("bücher.de", &opts));
    }

    #[test]
    fn test_email_valid() {
        let opts = AddressOptions::default();
        assert!(is_valid_email("user@example.com", &opts));
        assert!(is_valid_email("user.name+tag@example.co.jp", &opts));
    }

    #[test]
    fn test_email_invalid() {
        let opts = AddressOptions::default();
        assert!(!is_valid_email("", &opts));
        assert!(!is_valid_email("userexample.com", &opts));
        assert!(!is_valid_email("user@", &opts));
        assert!(!is_valid_email("@example.com", &opts));
        assert!(!is_valid_email("user@@example.com", &opts));
        assert!(!is_valid_email("user@example", &opts));
        assert!(!is_valid_email(".user@example.com", &opts));
        assert!(!is_valid_email("us..er@example.com", &opts));
    }
}
