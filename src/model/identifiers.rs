//! Package URL helpers.
//!
//! Component labels, package coordinates and module attribution all need
//! the `namespace/name@version` parts of a purl. Parsing goes through the
//! `packageurl` crate; anything it rejects is treated as "no purl".

use packageurl::PackageUrl;
use std::str::FromStr;

/// Decomposed package URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurlParts {
    /// Purl type (`maven`, `npm`, ...), lowercased by the parser
    pub ty: String,
    /// Namespace; the Maven group id for `pkg:maven`
    pub namespace: Option<String>,
    /// Package name; the Maven artifact id for `pkg:maven`
    pub name: String,
    /// Version, if present
    pub version: Option<String>,
}

impl PurlParts {
    /// Parse a purl string. Returns `None` for malformed input.
    #[must_use]
    pub fn parse(purl: &str) -> Option<Self> {
        let parsed = PackageUrl::from_str(purl.trim()).ok()?;
        Some(Self {
            ty: parsed.ty().to_string(),
            namespace: parsed
                .namespace()
                .filter(|ns| !ns.is_empty())
                .map(ToString::to_string),
            name: parsed.name().to_string(),
            version: parsed
                .version()
                .filter(|v| !v.is_empty())
                .map(ToString::to_string),
        })
    }

    /// Whether this purl is in the Maven ecosystem.
    #[must_use]
    pub fn is_maven(&self) -> bool {
        self.ty == "maven"
    }

    /// Maven coordinates, when this is a `pkg:maven` purl with a group.
    #[must_use]
    pub fn maven_coordinates(&self) -> Option<MavenCoordinates> {
        if !self.is_maven() {
            return None;
        }
        Some(MavenCoordinates {
            group: self.namespace.clone()?,
            artifact: self.name.clone(),
            version: self.version.clone(),
        })
    }
}

/// `group:artifact:version` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinates {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl MavenCoordinates {
    /// Parse a `pkg:maven/group/artifact@version` purl.
    #[must_use]
    pub fn from_purl(purl: &str) -> Option<Self> {
        PurlParts::parse(purl)?.maven_coordinates()
    }

    /// Render as `group:artifact:version` (version omitted when absent).
    #[must_use]
    pub fn label(&self) -> String {
        match &self.version {
            Some(v) => format!("{}:{}:{}", self.group, self.artifact, v),
            None => format!("{}:{}", self.group, self.artifact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maven_purl() {
        let parts = PurlParts::parse("pkg:maven/org.apache.logging.log4j/log4j-core@2.14.1").unwrap();
        assert!(parts.is_maven());
        assert_eq!(parts.namespace.as_deref(), Some("org.apache.logging.log4j"));
        assert_eq!(parts.name, "log4j-core");
        assert_eq!(parts.version.as_deref(), Some("2.14.1"));
    }

    #[test]
    fn test_maven_label_with_qualifiers() {
        let coords = MavenCoordinates::from_purl("pkg:maven/com.acme/web@1.0?type=jar").unwrap();
        assert_eq!(coords.label(), "com.acme:web:1.0");
    }

    #[test]
    fn test_non_maven_has_no_coordinates() {
        assert!(MavenCoordinates::from_purl("pkg:npm/lodash@4.17.21").is_none());
        let parts = PurlParts::parse("pkg:npm/lodash@4.17.21").unwrap();
        assert_eq!(parts.name, "lodash");
        assert_eq!(parts.namespace, None);
    }

    #[test]
    fn test_malformed_purl() {
        assert!(PurlParts::parse("not a purl").is_none());
        assert!(PurlParts::parse("").is_none());
    }
}
