//! Attribute kind specifications and registry.
//!
//! This module defines the closed set of attribute kinds and the schema-level
//! facts about each one: its wire name, its short name and how it merges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AttrError;

/// The concrete kind of an attribute.
///
/// Declaration order matches [`ATTRIBUTES`]. Serializes as the wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeKind {
    #[serde(rename = "LocationAttributes")]
    Location,
    #[serde(rename = "ArchitectureAttributes")]
    Architecture,
    #[serde(rename = "ComputeAttributes")]
    Compute,
    #[serde(rename = "HAAttributes")]
    HighAvailability,
    #[serde(rename = "MeteringAttributes")]
    Metering,
    #[serde(rename = "CounterPartyPropertyAttributes")]
    CounterpartyProperty,
    #[serde(rename = "PropertyAttributes")]
    Property,
    #[serde(rename = "MappedAttributes")]
    Mapped,
    #[serde(rename = "AgreementProtocolAttributes")]
    AgreementProtocol,
    #[serde(rename = "HTTPSBasicAuthAttributes")]
    HttpsBasicAuth,
}

/// How an attribute kind reacts to `update()`.
///
/// Fixed per kind; there is no way to change it at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Every update fails with `NotImplemented`.
    Reject,

    /// Keys of the incoming mapping are set on the receiver; other keys stay.
    UnionOverwrite,

    /// Every field of the receiver takes the incoming value, even if empty.
    FullReplace,
}

/// Specification for a single attribute kind.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub kind: AttributeKind,

    /// Name used as the `type` tag in serialized attributes
    pub wire_name: &'static str,

    /// Name accepted on the command line
    pub short_name: &'static str,

    pub merge_policy: MergePolicy,
}

impl AttributeSpec {
    const fn new(kind: AttributeKind, wire_name: &'static str, short_name: &'static str) -> Self {
        Self {
            kind,
            wire_name,
            short_name,
            merge_policy: MergePolicy::Reject,
        }
    }

    const fn union_overwrite(mut self) -> Self {
        self.merge_policy = MergePolicy::UnionOverwrite;
        self
    }

    const fn full_replace(mut self) -> Self {
        self.merge_policy = MergePolicy::FullReplace;
        self
    }
}

/// Registry of all attribute kinds.
///
/// Adding a kind means adding a variant to [`AttributeKind`] and an entry
/// here, at the same position.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new(AttributeKind::Location, "LocationAttributes", "location"),
    AttributeSpec::new(
        AttributeKind::Architecture,
        "ArchitectureAttributes",
        "architecture",
    ),
    AttributeSpec::new(AttributeKind::Compute, "ComputeAttributes", "compute"),
    AttributeSpec::new(AttributeKind::HighAvailability, "HAAttributes", "ha"),
    AttributeSpec::new(AttributeKind::Metering, "MeteringAttributes", "metering"),
    AttributeSpec::new(
        AttributeKind::CounterpartyProperty,
        "CounterPartyPropertyAttributes",
        "counterparty",
    ),
    AttributeSpec::new(AttributeKind::Property, "PropertyAttributes", "property"),
    AttributeSpec::new(AttributeKind::Mapped, "MappedAttributes", "mapped").union_overwrite(),
    AttributeSpec::new(
        AttributeKind::AgreementProtocol,
        "AgreementProtocolAttributes",
        "agreement-protocol",
    ),
    AttributeSpec::new(
        AttributeKind::HttpsBasicAuth,
        "HTTPSBasicAuthAttributes",
        "https-basic-auth",
    )
    .full_replace(),
];

/// Look up a kind spec by wire name or short name.
pub fn get_spec(name: &str) -> Option<&'static AttributeSpec> {
    ATTRIBUTES
        .iter()
        .find(|spec| spec.wire_name == name || spec.short_name.eq_ignore_ascii_case(name))
}

/// Kinds whose `update()` can succeed.
pub fn mergeable_kinds() -> impl Iterator<Item = AttributeKind> {
    ATTRIBUTES
        .iter()
        .filter(|spec| spec.merge_policy != MergePolicy::Reject)
        .map(|spec| spec.kind)
}

impl AttributeKind {
    pub fn spec(self) -> &'static AttributeSpec {
        &ATTRIBUTES[self as usize]
    }

    pub fn wire_name(self) -> &'static str {
        self.spec().wire_name
    }

    pub fn merge_policy(self) -> MergePolicy {
        self.spec().merge_policy
    }

    pub fn is_mergeable(self) -> bool {
        self.merge_policy() != MergePolicy::Reject
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AttributeKind {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        get_spec(s)
            .map(|spec| spec.kind)
            .ok_or_else(|| AttrError::Api(format!("Unknown attribute kind: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_kind_order() {
        for (i, spec) in ATTRIBUTES.iter().enumerate() {
            assert_eq!(spec.kind as usize, i, "{} is out of place", spec.wire_name);
        }
        assert_eq!(ATTRIBUTES.len(), 10);
    }

    #[test]
    fn lookup_by_wire_and_short_name() {
        assert_eq!(
            get_spec("HAAttributes").map(|s| s.kind),
            Some(AttributeKind::HighAvailability)
        );
        assert_eq!(
            get_spec("HA").map(|s| s.kind),
            Some(AttributeKind::HighAvailability)
        );
        assert!(get_spec("nonexistent").is_none());
    }

    #[test]
    fn only_mapped_and_basic_auth_merge() {
        let kinds: Vec<_> = mergeable_kinds().collect();
        assert_eq!(
            kinds,
            vec![AttributeKind::Mapped, AttributeKind::HttpsBasicAuth]
        );
        assert_eq!(
            AttributeKind::Mapped.merge_policy(),
            MergePolicy::UnionOverwrite
        );
        assert_eq!(
            AttributeKind::HttpsBasicAuth.merge_policy(),
            MergePolicy::FullReplace
        );
        assert!(!AttributeKind::Property.is_mergeable());
    }

    #[test]
    fn serializes_as_wire_name() {
        for spec in ATTRIBUTES {
            let json = serde_json::to_value(spec.kind).unwrap();
            assert_eq!(json, spec.wire_name);
        }
    }

    #[test]
    fn parses_and_displays() {
        let kind: AttributeKind = "counterparty".parse().unwrap();
        assert_eq!(kind, AttributeKind::CounterpartyProperty);
        assert_eq!(kind.to_string(), "CounterPartyPropertyAttributes");
        assert!("bogus".parse::<AttributeKind>().is_err());
    }
}
