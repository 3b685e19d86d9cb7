use thiserror::Error;

use crate::attributes::AttributeKind;

#[derive(Error, Debug)]
pub enum AttrError {
    /// The receiver's kind never merges, whatever it is handed.
    #[error("Update not implemented for type: {kind}")]
    NotImplemented { kind: AttributeKind },

    #[error(
        "Concrete type of attribute ({other}) provided to update() is incompatible with this attribute's type ({receiver})"
    )]
    IncompatibleType {
        receiver: AttributeKind,
        other: AttributeKind,
    },

    #[error("Metadata conflict: {0}")]
    MetaConflict(String),

    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AttrError>;
