//! Attribute metadata.
//!
//! Every attribute owns one [`AttributeMeta`]: the identity and
//! classification record that travels with it. Metadata has its own merge
//! rule ([`AttributeMeta::update`]) which the mergeable attribute kinds run
//! before touching their own fields.
//!
//! ## Merge Rule
//!
//! Metadata merges sparsely: a field of the incoming record only replaces the
//! receiver's when it carries a value.
//!
//! | Field | Replaced when |
//! |-------|---------------|
//! | `id` | never (must match, or be empty on one side) |
//! | `sensor_urls` | incoming list is non-empty |
//! | `label` | incoming label is non-empty |
//! | `publishable` | incoming value is `Some` |
//! | `host_only` | incoming value is `Some` |
//!
//! Two records with different non-empty ids describe different attributes,
//! so merging them is refused with [`AttrError::MetaConflict`] and the
//! receiver is left untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AttrError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMeta {
    pub id: String,
    /// Service urls this attribute applies to. Empty means every service.
    #[serde(default)]
    pub sensor_urls: Vec<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub publishable: Option<bool>,
    #[serde(default)]
    pub host_only: Option<bool>,
}

impl Default for AttributeMeta {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeMeta {
    /// Fresh metadata with a random id and nothing else set.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sensor_urls: Vec::new(),
            label: String::new(),
            publishable: None,
            host_only: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_sensor_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensor_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn publishable(mut self, flag: bool) -> Self {
        self.publishable = Some(flag);
        self
    }

    pub fn host_only(mut self, flag: bool) -> Self {
        self.host_only = Some(flag);
        self
    }

    /// Whether this attribute applies to the service at `service_url`.
    pub fn applies_to(&self, service_url: &str) -> bool {
        self.sensor_urls.is_empty() || self.sensor_urls.iter().any(|u| u == service_url)
    }

    /// Merge `other` into `self` following the sparse rule above.
    ///
    /// Either the whole merge applies or nothing does.
    pub fn update(&mut self, other: &AttributeMeta) -> Result<()> {
        if !self.id.is_empty() && !other.id.is_empty() && self.id != other.id {
            return Err(AttrError::MetaConflict(format!(
                "cannot merge metadata of attribute {} into attribute {}",
                other.id, self.id
            )));
        }

        if self.id.is_empty() {
            self.id = other.id.clone();
        }
        if !other.sensor_urls.is_empty() {
            self.sensor_urls = other.sensor_urls.clone();
        }
        if !other.label.is_empty() {
            self.label = other.label.clone();
        }
        if other.publishable.is_some() {
            self.publishable = other.publishable;
        }
        if other.host_only.is_some() {
            self.host_only = other.host_only;
        }
        Ok(())
    }
}

impl fmt::Display for AttributeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {}, sensor_urls: [{}], label: {}, publishable: {}, host_only: {}}}",
            self.id,
            self.sensor_urls.join(", "),
            self.label,
            flag(self.publishable),
            flag(self.host_only)
        )
    }
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "unset",
    }
}
