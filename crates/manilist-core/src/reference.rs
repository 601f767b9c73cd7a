//! Image references (`[domain/]path[:tag][@digest]`).
//!
//! References are parsed as written: no default registry or `latest` tag is
//! filled in, so [`Reference::to_string`] returns the original input.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::ManifestError;
use crate::Result;

/// Maximum length of the repository name, including the domain.
pub const NAME_TOTAL_LENGTH_MAX: usize = 255;

const DOMAIN_COMPONENT: &str = r"(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
const PATH_COMPONENT: &str = r"[a-z0-9]+(?:(?:[._]|__|[-]+)[a-z0-9]+)*";
const TAG: &str = r"[\w][\w.-]{0,127}";
const DIGEST: &str = r"[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]{32,}";

#[allow(clippy::expect_used)]
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let domain = format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*(?::[0-9]+)?");
    let name = format!(r"(?:{domain}/)?{PATH_COMPONENT}(?:/{PATH_COMPONENT})*");
    let pattern = format!(r"^({name})(?::({TAG}))?(?:@({DIGEST}))?$");
    Regex::new(&pattern).expect("reference pattern is valid")
});

/// A parsed manifest list reference.
///
/// # Examples
///
/// ```
/// use manilist_core::Reference;
///
/// let reference: Reference = "registry.example.com:5000/team/app:v1.2".parse()?;
/// assert_eq!(reference.name(), "registry.example.com:5000/team/app");
/// assert_eq!(reference.tag(), Some("v1.2"));
/// assert_eq!(reference.digest(), None);
/// assert_eq!(reference.to_string(), "registry.example.com:5000/team/app:v1.2");
/// # Ok::<(), manilist_core::ManifestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    name: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl Reference {
    /// Parses a reference string.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidReference`] when the input is empty,
    /// contains uppercase repository characters, has a name longer than
    /// [`NAME_TOTAL_LENGTH_MAX`], or does not match the reference grammar.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason| ManifestError::InvalidReference {
            reference: input.to_string(),
            reason,
        };

        if input.is_empty() {
            return Err(invalid("repository name must have at least one component"));
        }

        let Some(caps) = REFERENCE_RE.captures(input) else {
            if REFERENCE_RE.is_match(&input.to_ascii_lowercase()) {
                return Err(invalid("repository name must be lowercase"));
            }
            return Err(invalid("invalid reference format"));
        };

        let name = caps.get(1).map_or("", |m| m.as_str());
        if name.len() > NAME_TOTAL_LENGTH_MAX {
            return Err(invalid("repository name must not be more than 255 characters"));
        }

        Ok(Self {
            name: name.to_string(),
            tag: caps.get(2).map(|m| m.as_str().to_string()),
            digest: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }

    /// Repository name, including the domain when one was given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag, if present.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Digest (`algorithm:hex`), if present.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl FromStr for Reference {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DIGEST_HEX: &str = "sha256:6c3c624b58dbbcd3c0dd82b4c53f04194d1247c6eebdaab7c610cf7d66709b3b";

    #[test]
    fn test_parse_name_only() {
        let r = Reference::parse("busybox").unwrap();
        assert_eq!(r.name(), "busybox");
        assert_eq!(r.tag(), None);
        assert_eq!(r.digest(), None);
        assert_eq!(r.to_string(), "busybox");
    }

    #[test]
    fn test_parse_tagged_with_domain_and_port() {
        let r = Reference::parse("localhost:5000/team/app:1.0").unwrap();
        assert_eq!(r.name(), "localhost:5000/team/app");
        assert_eq!(r.tag(), Some("1.0"));
    }

    #[test]
    fn test_parse_multi_component_names() {
        assert_eq!(Reference::parse("localhost/app").unwrap().name(), "localhost/app");
        let r = Reference::parse("library/busybox:latest").unwrap();
        assert_eq!(r.name(), "library/busybox");
        assert_eq!(r.tag(), Some("latest"));
    }

    #[test]
    fn test_parse_digest() {
        let input = format!("docker.io/library/alpine@{DIGEST_HEX}");
        let r = Reference::parse(&input).unwrap();
        assert_eq!(r.tag(), None);
        assert_eq!(r.digest(), Some(DIGEST_HEX));
        assert_eq!(r.to_string(), input);
    }

    #[test]
    fn test_parse_tag_and_digest() {
        let input = format!("example.com/app:v2@{DIGEST_HEX}");
        let r = Reference::parse(&input).unwrap();
        assert_eq!(r.tag(), Some("v2"));
        assert_eq!(r.digest(), Some(DIGEST_HEX));
        assert_eq!(r.to_string(), input);
    }

    #[test]
    fn test_reject_empty() {
        let err = Reference::parse("").unwrap_err();
        assert!(err.to_string().contains("at least one component"));
    }

    #[test]
    fn test_reject_uppercase() {
        let err = Reference::parse("example.com/MyApp:1.0").unwrap_err();
        assert!(err.to_string().contains("must be lowercase"));
    }

    #[test]
    fn test_reject_malformed() {
        for input in ["app:", ":tag", "app@sha256:abc", "a//b", "app:-bad", "-app"] {
            let err = Reference::parse(input).unwrap_err();
            assert!(
                err.to_string().contains("invalid reference format"),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_reject_long_name() {
        let input = format!("a/{}", "b".repeat(NAME_TOTAL_LENGTH_MAX));
        let err = Reference::parse(&input).unwrap_err();
        assert!(err.to_string().contains("255 characters"));
    }

    #[test]
    fn test_from_str() {
        let r: Reference = "quay.io/org/tool:2024.01".parse().unwrap();
        assert_eq!(r.name(), "quay.io/org/tool");
        assert_eq!(r.tag(), Some("2024.01"));
    }
}
