//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It turns file
//! paths into attribute sets, calls the matching command, and writes results
//! back where a command changes a document.
//!
//! ## What the API Does NOT Do
//!
//! - **Merge logic**: that lives on the attribute kinds themselves
//! - **Presentation**: results come back as `CmdResult`, never as strings
//!   printed to a terminal
//!
//! ## Testing Strategy
//!
//! API tests check that documents are read and written in the right places
//! and that configuration reaches the commands. Command behaviour is tested
//! in `commands/*.rs`.

use std::path::{Path, PathBuf};

use crate::commands;
use crate::config::AttribConfig;
use crate::document;
use crate::error::Result;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::show::ShowQuery;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, ShownAttribute};

/// The main API facade for attrib operations.
pub struct AttribApi {
    config_path: PathBuf,
    config: AttribConfig,
}

impl AttribApi {
    /// Open the API with the config stored at `config_path` (defaults if
    /// the file does not exist).
    pub fn open(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();
        let config = AttribConfig::load(&config_path)?;
        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn with_config(config_path: impl Into<PathBuf>, config: AttribConfig) -> Self {
        Self {
            config_path: config_path.into(),
            config,
        }
    }

    pub fn config(&self) -> &AttribConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn show(&self, doc: &Path, query: &ShowQuery) -> Result<CmdResult> {
        let set = document::load(doc)?;
        commands::show::run(&set, query)
    }

    /// Apply the attributes in `updates` to the document at `doc`.
    ///
    /// Merges in place when the config allows updates and `replace` is not
    /// set. The result goes to `out`, or back to `doc` when anything changed.
    pub fn apply(
        &self,
        doc: &Path,
        updates: &Path,
        replace: bool,
        out: Option<&Path>,
    ) -> Result<CmdResult> {
        let mut set = document::load(doc)?;
        let incoming = document::load(updates)?;
        let allow_update = self.config.allow_update && !replace;

        let result = commands::apply::run(&mut set, Vec::from(incoming), allow_update)?;

        match out {
            Some(path) => document::save(&set, path, self.config.pretty)?,
            None if !result.affected_attributes.is_empty() => {
                document::save(&set, doc, self.config.pretty)?
            }
            None => {}
        }
        Ok(result)
    }

    pub fn check(&self, doc: &Path, service_url: &str, partner: Option<&str>) -> Result<CmdResult> {
        let set = document::load(doc)?;
        commands::check::run(&set, service_url, partner)
    }

    /// Show or change configuration. Changes are saved to the config file
    /// before they take effect here.
    pub fn configure(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config, &action)?;
        if action.changes_config() {
            if let Some(changed) = &result.config {
                changed.save(&self.config_path)?;
                self.config = changed.clone();
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::fixtures;
    use crate::config::CONFIG_FILENAME;
    use crate::set::AttributeSet;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn write(&self, name: &str, set: &AttributeSet) -> PathBuf {
            let path = self.path(name);
            document::save(set, &path, true).unwrap();
            path
        }

        fn api(&self) -> AttribApi {
            AttribApi::open(self.path(CONFIG_FILENAME)).unwrap()
        }
    }

    #[test]
    fn show_reads_document() {
        let fx = Fixture::new();
        let doc = fx.write("doc.json", &AttributeSet::from_iter(fixtures::one_of_each()));
        let result = fx.api().show(&doc, &ShowQuery::default()).unwrap();
        assert_eq!(result.shown_attributes.len(), 10);
    }

    #[test]
    fn apply_writes_back_in_place() {
        let fx = Fixture::new();
        let doc = fx.write(
            "doc.json",
            &AttributeSet::from_iter([fixtures::mapped("env", &[("a", "1")])]),
        );
        let updates = fx.write(
            "updates.json",
            &AttributeSet::from_iter([fixtures::mapped("env", &[("b", "2")])]),
        );

        fx.api().apply(&doc, &updates, false, None).unwrap();

        let saved = document::load(&doc).unwrap();
        assert_eq!(
            saved.get("env"),
            Some(&fixtures::mapped("env", &[("a", "1"), ("b", "2")]))
        );
    }

    #[test]
    fn apply_with_out_leaves_source_alone() {
        let fx = Fixture::new();
        let original = AttributeSet::from_iter([fixtures::compute("c", 1, 1)]);
        let doc = fx.write("doc.json", &original);
        let updates = fx.write(
            "updates.json",
            &AttributeSet::from_iter([fixtures::compute("c", 2, 2)]),
        );
        let out = fx.path("out.json");

        fx.api().apply(&doc, &updates, true, Some(&out)).unwrap();

        assert_eq!(document::load(&doc).unwrap(), original);
        assert_eq!(
            document::load(&out).unwrap().get("c"),
            Some(&fixtures::compute("c", 2, 2))
        );
    }

    #[test]
    fn apply_respects_allow_update_config() {
        let fx = Fixture::new();
        let doc = fx.write(
            "doc.json",
            &AttributeSet::from_iter([fixtures::mapped("env", &[("a", "1")])]),
        );
        let updates = fx.write(
            "updates.json",
            &AttributeSet::from_iter([fixtures::mapped("env", &[("b", "2")])]),
        );
        let mut api = fx.api();
        api.configure(ConfigAction::Set("allow-update".into(), "false".into()))
            .unwrap();
        assert!(!api.config().allow_update);

        let result = api.apply(&doc, &updates, false, None).unwrap();

        assert_eq!(result.messages[0].content, "Replaced MappedAttributes env");
        assert_eq!(
            document::load(&doc).unwrap().get("env"),
            Some(&fixtures::mapped("env", &[("b", "2")]))
        );
    }

    #[test]
    fn failed_apply_does_not_rewrite_document() {
        let fx = Fixture::new();
        let doc = fx.write(
            "doc.json",
            &AttributeSet::from_iter([fixtures::compute("c", 1, 1)]),
        );
        let before = std::fs::read_to_string(&doc).unwrap();
        let updates = fx.write(
            "updates.json",
            &AttributeSet::from_iter([fixtures::compute("c", 2, 2)]),
        );

        let result = fx.api().apply(&doc, &updates, false, None).unwrap();

        assert!(result.has_errors());
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), before);
    }

    #[test]
    fn configure_persists_changes() {
        let fx = Fixture::new();
        let mut api = fx.api();
        api.configure(ConfigAction::Set("pretty".into(), "no".into()))
            .unwrap();

        assert!(!api.config().pretty);
        assert!(!AttribConfig::load(fx.path(CONFIG_FILENAME)).unwrap().pretty);
    }

    #[test]
    fn configure_error_writes_nothing() {
        let fx = Fixture::new();
        let mut api = fx.api();
        assert!(api
            .configure(ConfigAction::Set("log-level".into(), "loud".into()))
            .is_err());
        assert!(!fx.path(CONFIG_FILENAME).exists());
        assert_eq!(api.config(), &AttribConfig::default());
    }

    #[test]
    fn showing_config_writes_nothing() {
        let fx = Fixture::new();
        let mut api = fx.api();
        let result = api.configure(ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(AttribConfig::default()));
        assert!(!fx.path(CONFIG_FILENAME).exists());
    }

    #[test]
    fn check_reads_document() {
        let fx = Fixture::new();
        let doc = fx.write(
            "doc.json",
            &AttributeSet::from_iter([fixtures::ha("ha", &["dev-1"])]),
        );
        let result = fx.api().check(&doc, "svc/a", Some("dev-1")).unwrap();
        assert_eq!(result.messages[1].level, MessageLevel::Success);
    }
}
