//! Attribute documents: JSON files holding an [`AttributeSet`].

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AttrError, Result};
use crate::set::AttributeSet;

/// Load an attribute document. A missing file is an error; an empty file is
/// an empty set.
pub fn load<P: AsRef<Path>>(path: P) -> Result<AttributeSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(AttrError::Io)?;
    if content.trim().is_empty() {
        return Ok(AttributeSet::new());
    }
    let set: AttributeSet = serde_json::from_str(&content).map_err(AttrError::Serialization)?;
    debug!(path = %path.display(), attributes = set.len(), "loaded document");
    Ok(set)
}

pub fn save<P: AsRef<Path>>(set: &AttributeSet, path: P, pretty: bool) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(AttrError::Io)?;
        }
    }

    let content = if pretty {
        serde_json::to_string_pretty(set)
    } else {
        serde_json::to_string(set)
    }
    .map_err(AttrError::Serialization)?;
    fs::write(path, content + "\n").map_err(AttrError::Io)?;
    debug!(path = %path.display(), attributes = set.len(), "saved document");
    Ok(())
}
