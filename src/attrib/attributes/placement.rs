//! Where and on what an entity runs: location, architecture, compute
//! capacity and high-availability partners.
//!
//! None of these kinds merge; an update to any of them is rejected by the
//! dispatcher in [`super::Attribute::update`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::spec::AttributeKind;
use super::value::{AttrValue, GenericMappings};
use super::AttributeFields;
use crate::meta::AttributeMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAttributes {
    pub meta: AttributeMeta,
    pub lat: String,
    pub lon: String,
    /// If true, lat and lon may have been edited by the user
    #[serde(default)]
    pub user_provided_coords: bool,
    /// A statement of preference; says nothing about GPS hardware
    #[serde(default)]
    pub use_gps: bool,
}

impl AttributeFields for LocationAttributes {
    const KIND: AttributeKind = AttributeKind::Location;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        GenericMappings::from([
            ("lat".to_string(), AttrValue::from(self.lat.clone())),
            ("lon".to_string(), AttrValue::from(self.lon.clone())),
            (
                "user_provided_coords".to_string(),
                AttrValue::from(self.user_provided_coords),
            ),
            ("use_gps".to_string(), AttrValue::from(self.use_gps)),
        ])
    }
}

impl fmt::Display for LocationAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meta: {}, lat: {}, lon: {}, user_provided_coords: {}, use_gps: {}",
            self.meta, self.lat, self.lon, self.user_provided_coords, self.use_gps
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureAttributes {
    pub meta: AttributeMeta,
    pub architecture: String,
}

impl AttributeFields for ArchitectureAttributes {
    const KIND: AttributeKind = AttributeKind::Architecture;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        GenericMappings::from([(
            "architecture".to_string(),
            AttrValue::from(self.architecture.clone()),
        )])
    }
}

impl fmt::Display for ArchitectureAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meta: {}, architecture: {}", self.meta, self.architecture)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeAttributes {
    pub meta: AttributeMeta,
    pub cpus: i64,
    /// Megabytes
    pub ram: i64,
}

impl AttributeFields for ComputeAttributes {
    const KIND: AttributeKind = AttributeKind::Compute;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        GenericMappings::from([
            ("cpus".to_string(), AttrValue::from(self.cpus)),
            ("ram".to_string(), AttrValue::from(self.ram)),
        ])
    }
}

impl fmt::Display for ComputeAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meta: {}, cpus: {}, ram: {}",
            self.meta, self.cpus, self.ram
        )
    }
}

/// High-availability partners of this entity, by partner id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaAttributes {
    pub meta: AttributeMeta,
    #[serde(default)]
    pub partners: Vec<String>,
}

impl HaAttributes {
    pub fn partners_contains(&self, id: &str) -> bool {
        self.partners.iter().any(|p| p == id)
    }
}

impl AttributeFields for HaAttributes {
    const KIND: AttributeKind = AttributeKind::HighAvailability;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        GenericMappings::from([(
            "partnerID".to_string(),
            AttrValue::from(self.partners.clone()),
        )])
    }
}

impl fmt::Display for HaAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meta: {}, partners: [{}]",
            self.meta,
            self.partners.join(", ")
        )
    }
}
