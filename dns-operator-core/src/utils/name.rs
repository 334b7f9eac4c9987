//! Domain name normalization (IDNA → ASCII)

use crate::error::{CoreError, CoreResult};

/// Maximum length of a full domain name in its ASCII form.
pub const MAX_NAME_LENGTH: usize = 253;

/// Maximum length of a single label in its ASCII form.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Normalized form of a `domain` / `subdomain` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// ASCII domain
    pub domain: String,
    /// ASCII subdomain, empty for the apex
    pub subdomain: String,
    /// `subdomain.domain`, or `domain` when `subdomain` is empty
    pub canonical: String,
}

fn invalid(name: &str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Check one ASCII label: `[a-z0-9_-]`, no leading or trailing `-`, or a
/// lone `*`.
fn check_label(name: &str, part: &str) -> CoreResult<()> {
    if part.is_empty() {
        return Err(invalid(name, "contains an empty label"));
    }
    if part.len() > MAX_LABEL_LENGTH {
        return Err(invalid(
            name,
            format!("label exceeds maximum length of {MAX_LABEL_LENGTH} characters"),
        ));
    }
    if part == "*" {
        return Ok(());
    }
    if let Some(c) = part
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(invalid(name, format!("label '{part}' contains invalid character {c:?}")));
    }
    if part.starts_with('-') || part.ends_with('-') {
        return Err(invalid(name, format!("label '{part}' starts or ends with a hyphen")));
    }
    Ok(())
}

/// Convert a user supplied name to its ASCII (Punycode) form.
///
/// Unicode labels are mapped per UTS #46 (which also lowercases) and
/// encoded to Punycode. Underscore and wildcard labels (`_dmarc`, `*`) are
/// accepted since they are common record owners. One trailing root dot is
/// dropped (`example.com.` → `example.com`).
pub fn normalize_label(label: &str) -> CoreResult<String> {
    let relative = label.strip_suffix('.').unwrap_or(label);
    if relative.is_empty() {
        return Err(invalid(label, "name is empty"));
    }

    let ascii = idna::domain_to_ascii(relative)
        .map_err(|_| invalid(label, "not a valid internationalized domain name"))?;

    if ascii.len() > MAX_NAME_LENGTH {
        return Err(invalid(
            label,
            format!(
                "exceeds maximum length of {MAX_NAME_LENGTH} characters (got {})",
                ascii.len()
            ),
        ));
    }
    for part in ascii.split('.') {
        check_label(label, part)?;
    }

    Ok(ascii)
}

/// Normalize a `domain` / `subdomain` pair and derive its canonical name.
///
/// `subdomain` is only passed through the converter when it is non-empty.
pub fn normalize_name(domain: &str, subdomain: &str) -> CoreResult<NormalizedName> {
    let domain = normalize_label(domain)?;

    if subdomain.is_empty() {
        return Ok(NormalizedName {
            canonical: domain.clone(),
            domain,
            subdomain: String::new(),
        });
    }

    let subdomain = normalize_label(subdomain)?;
    let canonical = format!("{subdomain}.{domain}");
    if canonical.len() > MAX_NAME_LENGTH {
        return Err(invalid(
            &canonical,
            format!("exceeds maximum length of {MAX_NAME_LENGTH} characters"),
        ));
    }

    Ok(NormalizedName {
        domain,
        subdomain,
        canonical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apex_canonical_name() {
        let n = normalize_name("Example.com", "").unwrap();
        assert_eq!(n.domain, "example.com");
        assert_eq!(n.subdomain, "");
        assert_eq!(n.canonical, "example.com");
    }

    #[test]
    fn subdomain_canonical_name() {
        let n = normalize_name("Example.com", "WWW").unwrap();
        assert_eq!(n.subdomain, "www");
        assert_eq!(n.canonical, "www.example.com");
    }

    #[test]
    fn unicode_is_punycoded() {
        let n = normalize_name("bücher.de", "").unwrap();
        assert_eq!(n.canonical, "xn--bcher-kva.de");
    }

    #[test]
    fn ascii_is_idempotent() {
        let once = normalize_label("api.example.com").unwrap();
        let twice = normalize_label(&once).unwrap();
        assert_eq!(once, "api.example.com");
        assert_eq!(once, twice);
    }

    #[test]
    fn underscore_and_wildcard_labels() {
        assert_eq!(
            normalize_name("example.com", "_dmarc").unwrap().canonical,
            "_dmarc.example.com"
        );
        assert_eq!(
            normalize_name("example.com", "*").unwrap().canonical,
            "*.example.com"
        );
    }

    #[test]
    fn overlong_label_rejected() {
        let label = "a".repeat(MAX_LABEL_LENGTH + 1);
        let err = normalize_name("example.com", &label).unwrap_err();
        assert!(matches!(err, CoreError::InvalidName { .. }));
    }

    #[test]
    fn forbidden_character_rejected() {
        for name in [
            "exa mple.com",
            "a/b",
            "foo@bar",
            "<x>",
            "a:b",
            "ex!ample",
            "a,b",
            "a*b.example.com",
        ] {
            let err = normalize_label(name).unwrap_err();
            assert!(matches!(err, CoreError::InvalidName { .. }), "{name}");
        }
    }

    #[test]
    fn edge_hyphen_rejected() {
        for name in ["-lead", "trail-", "ok.-lead.com"] {
            assert!(normalize_label(name).is_err(), "{name}");
        }
        assert_eq!(normalize_label("mid-dle").unwrap(), "mid-dle");
    }

    #[test]
    fn trailing_root_dot_is_dropped() {
        assert_eq!(normalize_label("Example.com.").unwrap(), "example.com");
        assert_eq!(
            normalize_name("example.com.", "www").unwrap().canonical,
            "www.example.com"
        );
        assert!(normalize_label(".").is_err());
        assert!(normalize_label("example.com..").is_err());
    }

    #[test]
    fn empty_domain_rejected() {
        assert!(normalize_name("", "www").is_err());
    }

    #[test]
    fn empty_inner_label_rejected() {
        assert!(normalize_label("example..com").is_err());
    }

    #[test]
    fn overlong_canonical_rejected() {
        let domain = format!("{}.com", "d".repeat(60));
        let subdomain = vec!["s".repeat(60); 4].join(".");
        let err = normalize_name(&domain, &subdomain).unwrap_err();
        assert!(matches!(err, CoreError::InvalidName { .. }));
    }
}
