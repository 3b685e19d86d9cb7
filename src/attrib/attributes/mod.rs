//! # Attribute Model
//!
//! An attribute is a typed configuration fact attached to a managed entity
//! (a device or a service instance). The set of kinds is closed:
//!
//! | Kind | Type | Projection keys | Update |
//! |------|------|-----------------|--------|
//! | Location | [`LocationAttributes`] | `lat`, `lon`, `user_provided_coords`, `use_gps` | rejected |
//! | Architecture | [`ArchitectureAttributes`] | `architecture` | rejected |
//! | Compute | [`ComputeAttributes`] | `cpus`, `ram` | rejected |
//! | HighAvailability | [`HaAttributes`] | `partnerID` | rejected |
//! | Metering | [`MeteringAttributes`] | `tokens`, `per_time_unit`, `notification_interval` | rejected |
//! | CounterpartyProperty | [`CounterpartyPropertyAttributes`] | `expression` | rejected |
//! | Property | [`PropertyAttributes`] | one per mapping key | rejected |
//! | Mapped | [`MappedAttributes`] | one per mapping key | union-overwrite |
//! | AgreementProtocol | [`AgreementProtocolAttributes`] | `protocols` | rejected |
//! | HTTPSBasicAuth | [`HttpsBasicAuthAttributes`] | `username`, `password` (masked) | full replace |
//!
//! Projection keys are an external contract: presentation and logging
//! layers consume them, so renaming one needs a compatibility note.
//!
//! ## The Contract
//!
//! Every kind implements [`AttributeFields`] (metadata access, generic
//! projection) and [`std::fmt::Display`]. The [`Attribute`] enum wraps one
//! value of any kind and dispatches by matching on the variant:
//!
//! - [`Attribute::meta`]: the owned metadata
//! - [`Attribute::generic_mappings`]: a fresh, independent projection
//! - [`Attribute::update`]: merge another attribute into this one
//! - `Display`: every field, passwords shown as `<withheld>`
//!
//! ## Update Rules
//!
//! 1. A kind whose [`MergePolicy`] is `Reject` fails with
//!    [`AttrError::NotImplemented`], whatever it is handed.
//! 2. A merging kind handed a different kind fails with
//!    [`AttrError::IncompatibleType`].
//! 3. Otherwise metadata merges first ([`AttributeMeta::update`]), then the
//!    fields merge by the kind's policy. A metadata conflict aborts the
//!    whole update and leaves the receiver as it was.
//!
//! ## Ownership
//!
//! Attributes are plain owned values. `update` takes `&mut self`, so the
//! caller must hold the only handle; sharing across threads needs the
//! caller's own lock.

mod auth;
mod filter;
mod placement;
mod policy;
mod property;
mod spec;
mod value;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{AttrError, Result};
use crate::meta::AttributeMeta;

pub use auth::{HttpsBasicAuthAttributes, OBFUSCATED_PASSWORD};
pub use filter::{AttrFilter, FilterOp};
pub use placement::{ArchitectureAttributes, ComputeAttributes, HaAttributes, LocationAttributes};
pub use policy::{AgreementProtocolAttributes, CounterpartyPropertyAttributes, MeteringAttributes};
pub use property::{MappedAttributes, PropertyAttributes};
pub use spec::{get_spec, mergeable_kinds, AttributeKind, AttributeSpec, MergePolicy, ATTRIBUTES};
pub use value::{AttrValue, GenericMappings};

/// Capability shared by every concrete attribute kind.
pub trait AttributeFields: fmt::Display {
    const KIND: AttributeKind;

    fn meta(&self) -> &AttributeMeta;

    fn meta_mut(&mut self) -> &mut AttributeMeta;

    /// Every meaningful field under its documented key. Composite values are
    /// copied, and sensitive values are masked.
    fn generic_mappings(&self) -> GenericMappings;
}

/// One attribute of any kind.
///
/// Serialized internally tagged: the `type` key holds the kind's wire name
/// and the remaining keys are the kind's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Attribute {
    #[serde(rename = "LocationAttributes")]
    Location(LocationAttributes),
    #[serde(rename = "ArchitectureAttributes")]
    Architecture(ArchitectureAttributes),
    #[serde(rename = "ComputeAttributes")]
    Compute(ComputeAttributes),
    #[serde(rename = "HAAttributes")]
    HighAvailability(HaAttributes),
    #[serde(rename = "MeteringAttributes")]
    Metering(MeteringAttributes),
    #[serde(rename = "CounterPartyPropertyAttributes")]
    CounterpartyProperty(CounterpartyPropertyAttributes),
    #[serde(rename = "PropertyAttributes")]
    Property(PropertyAttributes),
    #[serde(rename = "MappedAttributes")]
    Mapped(MappedAttributes),
    #[serde(rename = "AgreementProtocolAttributes")]
    AgreementProtocol(AgreementProtocolAttributes),
    #[serde(rename = "HTTPSBasicAuthAttributes")]
    HttpsBasicAuth(HttpsBasicAuthAttributes),
}

macro_rules! each_variant {
    ($value:expr, $attr:ident => $body:expr) => {
        match $value {
            Attribute::Location($attr) => $body,
            Attribute::Architecture($attr) => $body,
            Attribute::Compute($attr) => $body,
            Attribute::HighAvailability($attr) => $body,
            Attribute::Metering($attr) => $body,
            Attribute::CounterpartyProperty($attr) => $body,
            Attribute::Property($attr) => $body,
            Attribute::Mapped($attr) => $body,
            Attribute::AgreementProtocol($attr) => $body,
            Attribute::HttpsBasicAuth($attr) => $body,
        }
    };
}

fn kind_of<T: AttributeFields>(_: &T) -> AttributeKind {
    T::KIND
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        each_variant!(self, a => kind_of(a))
    }

    pub fn meta(&self) -> &AttributeMeta {
        each_variant!(self, a => a.meta())
    }

    pub fn meta_mut(&mut self) -> &mut AttributeMeta {
        each_variant!(self, a => a.meta_mut())
    }

    /// Shorthand for `meta().id`.
    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn generic_mappings(&self) -> GenericMappings {
        let mappings = each_variant!(self, a => a.generic_mappings());
        trace!(kind = %self.kind(), keys = mappings.len(), "projected attribute");
        mappings
    }

    /// Merge `other` into this attribute.
    ///
    /// On error the receiver is unchanged.
    pub fn update(&mut self, other: &Attribute) -> Result<()> {
        let receiver = self.kind();
        if !receiver.is_mergeable() {
            debug!(kind = %receiver, other = %other.kind(), "update rejected");
            return Err(AttrError::NotImplemented { kind: receiver });
        }

        let result = match (self, other) {
            (Attribute::Mapped(a), Attribute::Mapped(o)) => a.merge(o),
            (Attribute::HttpsBasicAuth(a), Attribute::HttpsBasicAuth(o)) => a.merge(o),
            _ => Err(AttrError::IncompatibleType {
                receiver,
                other: other.kind(),
            }),
        };

        match &result {
            Err(AttrError::MetaConflict(reason)) => {
                warn!(kind = %receiver, %reason, "update aborted on metadata conflict")
            }
            Err(e) => debug!(kind = %receiver, error = %e, "update refused"),
            Ok(()) => {}
        }
        result
    }

    pub fn as_ha(&self) -> Option<&HaAttributes> {
        match self {
            Attribute::HighAvailability(ha) => Some(ha),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each_variant!(self, a => fmt::Display::fmt(a, f))
    }
}

macro_rules! impl_from_variant {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Attribute {
                fn from(value: $ty) -> Self {
                    Attribute::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant! {
    LocationAttributes => Location,
    ArchitectureAttributes => Architecture,
    ComputeAttributes => Compute,
    HaAttributes => HighAvailability,
    MeteringAttributes => Metering,
    CounterpartyPropertyAttributes => CounterpartyProperty,
    PropertyAttributes => Property,
    MappedAttributes => Mapped,
    AgreementProtocolAttributes => AgreementProtocol,
    HttpsBasicAuthAttributes => HttpsBasicAuth,
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use std::collections::BTreeMap;

    use super::*;

    fn meta(id: &str) -> AttributeMeta {
        AttributeMeta::new().with_id(id)
    }

    pub fn location(id: &str, lat: &str, lon: &str) -> Attribute {
        LocationAttributes {
            meta: meta(id),
            lat: lat.into(),
            lon: lon.into(),
            user_provided_coords: true,
            use_gps: false,
        }
        .into()
    }

    pub fn architecture(id: &str, arch: &str) -> Attribute {
        ArchitectureAttributes {
            meta: meta(id),
            architecture: arch.into(),
        }
        .into()
    }

    pub fn compute(id: &str, cpus: i64, ram: i64) -> Attribute {
        ComputeAttributes {
            meta: meta(id),
            cpus,
            ram,
        }
        .into()
    }

    pub fn ha(id: &str, partners: &[&str]) -> Attribute {
        HaAttributes {
            meta: meta(id),
            partners: partners.iter().map(|p| p.to_string()).collect(),
        }
        .into()
    }

    pub fn metering(id: &str, tokens: u64, per_time_unit: &str) -> Attribute {
        MeteringAttributes {
            meta: meta(id),
            tokens,
            per_time_unit: per_time_unit.into(),
            notification_interval_seconds: 60,
        }
        .into()
    }

    pub fn counterparty(id: &str, key: &str, value: AttrValue) -> Attribute {
        CounterpartyPropertyAttributes {
            meta: meta(id),
            expression: BTreeMap::from([(key.to_string(), value)]),
        }
        .into()
    }

    pub fn property(id: &str, pairs: &[(&str, AttrValue)]) -> Attribute {
        PropertyAttributes {
            meta: meta(id),
            mappings: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
        .into()
    }

    pub fn mapped(id: &str, pairs: &[(&str, &str)]) -> Attribute {
        MappedAttributes {
            meta: meta(id),
            mappings: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
        .into()
    }

    pub fn agreement_protocol(id: &str, protocols: AttrValue) -> Attribute {
        AgreementProtocolAttributes {
            meta: meta(id),
            protocols,
        }
        .into()
    }

    pub fn basic_auth(id: &str, username: &str, password: &str) -> Attribute {
        HttpsBasicAuthAttributes {
            meta: meta(id),
            username: username.into(),
            password: password.into(),
        }
        .into()
    }

    /// One attribute of every kind, in registry order.
    pub fn one_of_each() -> Vec<Attribute> {
        vec![
            location("loc", "41.1", "-73.2"),
            architecture("arch", "arm64"),
            compute("compute", 4, 2048),
            ha("ha", &["dev-1", "dev-2"]),
            metering("meter", 10, "hour"),
            counterparty("cp", "gpu", AttrValue::Bool(true)),
            property("prop", &[("zone", AttrValue::from("east"))]),
            mapped("env", &[("HZN_ENV", "prod")]),
            agreement_protocol("proto", AttrValue::from(vec!["Basic".to_string()])),
            basic_auth("auth", "user", "secret"),
        ]
    }
}
