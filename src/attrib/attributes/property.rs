//! Free-form key/value attributes.
//!
//! [`PropertyAttributes`] holds arbitrary values and never merges.
//! [`MappedAttributes`] holds string values and merges by key: an update
//! sets every key it carries and leaves the rest alone.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::spec::AttributeKind;
use super::value::{write_map, AttrValue, GenericMappings};
use super::AttributeFields;
use crate::error::Result;
use crate::meta::AttributeMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    pub meta: AttributeMeta,
    #[serde(default)]
    pub mappings: BTreeMap<String, AttrValue>,
}

impl AttributeFields for PropertyAttributes {
    const KIND: AttributeKind = AttributeKind::Property;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        self.mappings
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl fmt::Display for PropertyAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meta: {}, mappings: ", self.meta)?;
        write_map(f, &self.mappings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedAttributes {
    pub meta: AttributeMeta,
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
}

impl MappedAttributes {
    /// Merge `other` into `self`: metadata first, then every key of `other`
    /// overwrites the same key here. Keys only present here are kept.
    ///
    /// A metadata conflict aborts before any mapping is touched.
    pub fn merge(&mut self, other: &MappedAttributes) -> Result<()> {
        self.meta.update(&other.meta)?;

        for (k, v) in &other.mappings {
            self.mappings.insert(k.clone(), v.clone());
        }
        debug!(
            id = %self.meta.id,
            keys = other.mappings.len(),
            "merged mapped attributes"
        );
        Ok(())
    }
}

impl AttributeFields for MappedAttributes {
    const KIND: AttributeKind = AttributeKind::Mapped;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        self.mappings
            .iter()
            .map(|(k, v)| (k.clone(), AttrValue::from(v.clone())))
            .collect()
    }
}

impl fmt::Display for MappedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meta: {}, mappings: ", self.meta)?;
        write_map(f, &self.mappings)
    }
}
