//! HTTPS basic-auth credentials.
//!
//! The password is sensitive: projections replace it with
//! [`OBFUSCATED_PASSWORD`] and renderings with `<withheld>`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::spec::AttributeKind;
use super::value::{AttrValue, GenericMappings};
use super::AttributeFields;
use crate::error::Result;
use crate::meta::AttributeMeta;

/// Stands in for any non-empty password in a projection.
pub const OBFUSCATED_PASSWORD: &str = "**********";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpsBasicAuthAttributes {
    pub meta: AttributeMeta,
    pub username: String,
    pub password: String,
}

impl HttpsBasicAuthAttributes {
    /// Replace the credentials wholesale with `other`'s, empty fields
    /// included. Metadata merges first; a metadata conflict changes nothing.
    pub fn merge(&mut self, other: &HttpsBasicAuthAttributes) -> Result<()> {
        self.meta.update(&other.meta)?;

        self.username = other.username.clone();
        self.password = other.password.clone();
        debug!(id = %self.meta.id, "replaced basic auth credentials");
        Ok(())
    }
}

impl AttributeFields for HttpsBasicAuthAttributes {
    const KIND: AttributeKind = AttributeKind::HttpsBasicAuth;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        let obfuscated = if self.password.is_empty() {
            ""
        } else {
            OBFUSCATED_PASSWORD
        };
        GenericMappings::from([
            ("username".to_string(), AttrValue::from(self.username.clone())),
            ("password".to_string(), AttrValue::from(obfuscated)),
        ])
    }
}

impl fmt::Display for HttpsBasicAuthAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meta: {}, username: {}, password: <withheld>",
            self.meta, self.username
        )
    }
}

// Debug masks the password the same way Display does.
impl fmt::Debug for HttpsBasicAuthAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpsBasicAuthAttributes")
            .field("meta", &self.meta)
            .field("username", &self.username)
            .field("password", &"<withheld>")
            .finish()
    }
}
