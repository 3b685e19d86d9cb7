use serde::Serialize;

use crate::attributes::{Attribute, AttributeKind, GenericMappings};
use crate::config::AttribConfig;

pub mod apply;
pub mod check;
pub mod config;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// An attribute prepared for display: its rendering and its projection.
#[derive(Debug, Clone, Serialize)]
pub struct ShownAttribute {
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    pub id: String,
    #[serde(skip)]
    pub rendering: String,
    pub mappings: GenericMappings,
}

impl ShownAttribute {
    pub fn of(attr: &Attribute) -> Self {
        Self {
            kind: attr.kind(),
            id: attr.id().to_string(),
            rendering: attr.to_string(),
            mappings: attr.generic_mappings(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_attributes: Vec<Attribute>,
    pub shown_attributes: Vec<ShownAttribute>,
    pub config: Option<AttribConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.affected_attributes = attributes;
        self
    }

    pub fn with_shown_attributes(mut self, attributes: Vec<ShownAttribute>) -> Self {
        self.shown_attributes = attributes;
        self
    }

    pub fn with_config(mut self, config: AttribConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
