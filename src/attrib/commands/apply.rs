use crate::attributes::Attribute;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::set::{AttributeSet, SaveOutcome};

/// Apply each incoming attribute to `set` with `save_or_update`.
///
/// A failed attribute is reported as an error message and leaves its
/// counterpart in `set` untouched; the remaining attributes still apply.
pub fn run<I>(set: &mut AttributeSet, incoming: I, allow_update: bool) -> Result<CmdResult>
where
    I: IntoIterator<Item = Attribute>,
{
    let mut result = CmdResult::default();

    for attr in incoming {
        let id = attr.id().to_string();
        let label = format!("{} {}", attr.kind(), id);

        match set.save_or_update(attr, allow_update) {
            Ok(outcome) => {
                let verb = match outcome {
                    SaveOutcome::Inserted => "Inserted",
                    SaveOutcome::Updated => "Updated",
                    SaveOutcome::Replaced => "Replaced",
                };
                result.add_message(CmdMessage::success(format!("{} {}", verb, label)));
                if let Some(saved) = set.get(&id) {
                    result.affected_attributes.push(saved.clone());
                }
            }
            Err(e) => {
                result.add_message(CmdMessage::error(format!(
                    "Could not apply {}: {}",
                    label, e
                )));
            }
        }
    }

    if result.messages.is_empty() {
        result.add_message(CmdMessage::info("Nothing to apply."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::fixtures::*;
    use crate::commands::MessageLevel;

    #[test]
    fn merges_and_inserts() {
        let mut set = AttributeSet::from_iter([mapped("env", &[("a", "1")])]);
        let result = run(
            &mut set,
            [mapped("env", &[("b", "2")]), compute("c", 2, 512)],
            true,
        )
        .unwrap();

        assert!(!result.has_errors());
        assert_eq!(result.messages[0].content, "Updated MappedAttributes env");
        assert_eq!(result.messages[1].content, "Inserted ComputeAttributes c");
        assert_eq!(set.get("env"), Some(&mapped("env", &[("a", "1"), ("b", "2")])));
        assert_eq!(result.affected_attributes.len(), 2);
    }

    #[test]
    fn rejected_update_is_reported_and_others_still_apply() {
        let mut set = AttributeSet::from_iter([compute("c", 2, 512), mapped("env", &[])]);
        let result = run(
            &mut set,
            [compute("c", 8, 4096), mapped("env", &[("k", "v")])],
            true,
        )
        .unwrap();

        assert!(result.has_errors());
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0]
            .content
            .contains("Update not implemented for type: ComputeAttributes"));
        assert_eq!(set.get("c"), Some(&compute("c", 2, 512)));
        assert_eq!(set.get("env"), Some(&mapped("env", &[("k", "v")])));
        assert_eq!(result.affected_attributes.len(), 1);
    }

    #[test]
    fn replaces_when_updates_disabled() {
        let mut set = AttributeSet::from_iter([compute("c", 2, 512)]);
        let result = run(&mut set, [compute("c", 8, 4096)], false).unwrap();

        assert_eq!(result.messages[0].content, "Replaced ComputeAttributes c");
        assert_eq!(set.get("c"), Some(&compute("c", 8, 4096)));
    }

    #[test]
    fn empty_input_says_so() {
        let mut set = AttributeSet::new();
        let result = run(&mut set, Vec::<Attribute>::new(), true).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(set.is_empty());
    }
}
