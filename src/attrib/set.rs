//! # Attribute Sets
//!
//! An [`AttributeSet`] is the collection of attributes registered for one
//! entity, keyed by metadata id and kept in insertion order. It is plain
//! in-memory data: loading and saving belong to [`crate::document`].
//!
//! ## Save or Update
//!
//! [`AttributeSet::save_or_update`] is how incoming attributes land in a set:
//!
//! | Existing id? | `allow_update` | Result |
//! |--------------|----------------|--------|
//! | no | any | inserted |
//! | yes | `true` | `existing.update(incoming)`, errors propagate |
//! | yes | `false` | existing replaced by incoming |
//!
//! With updates allowed, only the mergeable kinds (Mapped, HTTPSBasicAuth)
//! can change in place; the rest report `NotImplemented` and stay as they
//! were.
//!
//! ## Serialized Form
//!
//! A JSON array of tagged attributes. Duplicate ids are rejected on load.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::{AttrFilter, Attribute, AttributeKind};
use crate::error::{AttrError, Result};

/// What [`AttributeSet::save_or_update`] did with an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
    Replaced,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.id() == id)
    }

    /// Insert `attr`, replacing and returning any attribute with the same id.
    pub fn insert(&mut self, attr: Attribute) -> Option<Attribute> {
        match self.attributes.iter().position(|a| a.id() == attr.id()) {
            Some(pos) => Some(std::mem::replace(&mut self.attributes[pos], attr)),
            None => {
                self.attributes.push(attr);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<Attribute> {
        let pos = self
            .attributes
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| AttrError::AttributeNotFound(id.to_string()))?;
        Ok(self.attributes.remove(pos))
    }

    pub fn save_or_update(&mut self, attr: Attribute, allow_update: bool) -> Result<SaveOutcome> {
        let id = attr.id().to_string();
        let outcome = match self.get_mut(&id) {
            None => {
                self.attributes.push(attr);
                SaveOutcome::Inserted
            }
            Some(existing) if allow_update => {
                existing.update(&attr)?;
                SaveOutcome::Updated
            }
            Some(existing) => {
                *existing = attr;
                SaveOutcome::Replaced
            }
        };
        debug!(%id, ?outcome, "saved attribute");
        Ok(outcome)
    }

    /// Attributes whose metadata applies to the service at `service_url`.
    pub fn applicable<'a>(&'a self, service_url: &'a str) -> impl Iterator<Item = &'a Attribute> {
        self.attributes
            .iter()
            .filter(move |a| a.meta().applies_to(service_url))
    }

    pub fn of_kind(&self, kind: AttributeKind) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(move |a| a.kind() == kind)
    }

    pub fn filter<'a>(&'a self, filter: &'a AttrFilter) -> impl Iterator<Item = &'a Attribute> {
        self.attributes.iter().filter(move |a| filter.matches(a))
    }

    /// Partner ids from every HA attribute applicable to `service_url`,
    /// first occurrence wins.
    pub fn ha_partners(&self, service_url: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.applicable(service_url)
            .filter_map(Attribute::as_ha)
            .flat_map(|ha| ha.partners.iter())
            .filter(|p| seen.insert(p.as_str()))
            .cloned()
            .collect()
    }

    pub fn has_ha_partner(&self, service_url: &str, partner_id: &str) -> bool {
        self.applicable(service_url)
            .filter_map(Attribute::as_ha)
            .any(|ha| ha.partners_contains(partner_id))
    }
}

impl TryFrom<Vec<Attribute>> for AttributeSet {
    type Error = AttrError;

    fn try_from(attributes: Vec<Attribute>) -> Result<Self> {
        let mut ids = HashSet::new();
        for attr in &attributes {
            if !ids.insert(attr.id()) {
                return Err(AttrError::MetaConflict(format!(
                    "duplicate attribute id: {}",
                    attr.id()
                )));
            }
        }
        Ok(Self { attributes })
    }
}

impl From<AttributeSet> for Vec<Attribute> {
    fn from(set: AttributeSet) -> Self {
        set.attributes
    }
}

impl FromIterator<Attribute> for AttributeSet {
    /// Later attributes replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for attr in iter {
            set.insert(attr);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
