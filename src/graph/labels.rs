//! Display labels for graph nodes.
//!
//! Labels, not internal handles, are what dependency paths are made of, so
//! they have to be stable across SBOM regenerations: a `bom-ref` is often a
//! UUID, a Maven coordinate is not.

use crate::model::{Component, MavenCoordinates};

/// Label for a component.
///
/// Preference order:
/// 1. `group:artifact:version` parsed from a `pkg:maven/...` purl
/// 2. `group:name:version` from the component fields
/// 3. the raw component name (or the handle when the name is empty)
#[must_use]
pub fn component_label(component: &Component) -> String {
    if let Some(mut coords) = component.purl.as_deref().and_then(MavenCoordinates::from_purl) {
        if coords.version.is_none() {
            coords.version.clone_from(&component.version);
        }
        return coords.label();
    }

    match (component.group.as_deref(), component.version.as_deref()) {
        (Some(group), Some(version)) if !group.is_empty() && !component.name.is_empty() => {
            format!("{group}:{}:{version}", component.name)
        }
        _ if component.name.is_empty() => component.component_ref.clone(),
        _ => component.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_maven_purl() {
        let comp = Component::new("uuid-1", "ignored")
            .with_purl("pkg:maven/com.acme/web@1.0.0")
            .with_group("other")
            .with_version("9.9");
        assert_eq!(component_label(&comp), "com.acme:web:1.0.0");
    }

    #[test]
    fn test_label_maven_purl_without_version_uses_field() {
        let comp = Component::new("r", "web")
            .with_purl("pkg:maven/com.acme/web")
            .with_version("2.0");
        assert_eq!(component_label(&comp), "com.acme:web:2.0");
    }

    #[test]
    fn test_label_from_fields() {
        let comp = Component::new("r", "lodash")
            .with_purl("pkg:npm/lodash@4.17.21")
            .with_group("npmjs")
            .with_version("4.17.21");
        assert_eq!(component_label(&comp), "npmjs:lodash:4.17.21");
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let comp = Component::new("r", "openssl").with_version("3.0.0");
        assert_eq!(component_label(&comp), "openssl");
        let unnamed = Component::new("ref-42", "");
        assert_eq!(component_label(&unnamed), "ref-42");
    }
}
