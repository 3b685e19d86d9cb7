use crate::commands::{CmdMessage, CmdResult};
use crate::config::AttribConfig;
use crate::error::{AttrError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

impl ConfigAction {
    /// Whether the action produces a config that should be written back.
    pub fn changes_config(&self) -> bool {
        matches!(self, ConfigAction::Set(..))
    }
}

/// Read or change `config` without touching the file it came from.
///
/// `Set` returns the changed copy in `CmdResult::config`; the caller decides
/// where to persist it. An unknown key or an invalid value is an error and
/// yields no config.
pub fn run(config: &AttribConfig, action: &ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config.clone())),
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(key)
                .ok_or_else(|| AttrError::Config(format!("Unknown config key: {}", key)))?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut changed = config.clone();
            changed.set(key, value)?;
            let shown = changed.get(key).unwrap_or_else(|| value.clone());

            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result.with_config(changed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_all_returns_current_config() {
        let config = AttribConfig::default();
        let result = run(&config, &ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(config));
    }

    #[test]
    fn set_returns_changed_copy() {
        let config = AttribConfig::default();
        let result = run(
            &config,
            &ConfigAction::Set("allow-update".into(), "off".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].content, "allow-update set to false");
        assert!(!result.config.unwrap().allow_update);
        assert!(config.allow_update);
    }

    #[test]
    fn show_key_renders_normalized_value() {
        let mut config = AttribConfig::default();
        config.set("log-level", "DEBUG").unwrap();
        let result = run(&config, &ConfigAction::ShowKey("log-level".into())).unwrap();
        assert_eq!(result.messages[0].content, "log-level = debug");
    }

    #[test]
    fn invalid_value_is_an_error() {
        let err = run(
            &AttribConfig::default(),
            &ConfigAction::Set("pretty".into(), "sideways".into()),
        )
        .unwrap_err();
        assert!(matches!(err, AttrError::Config(_)));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = run(
            &AttribConfig::default(),
            &ConfigAction::ShowKey("color".into()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown config key: color"));
    }

    #[test]
    fn only_set_changes_config() {
        assert!(ConfigAction::Set("pretty".into(), "no".into()).changes_config());
        assert!(!ConfigAction::ShowAll.changes_config());
        assert!(!ConfigAction::ShowKey("pretty".into()).changes_config());
    }
}
