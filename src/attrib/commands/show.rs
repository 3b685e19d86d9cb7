use crate::attributes::{AttrFilter, Attribute, AttributeKind};
use crate::commands::{CmdMessage, CmdResult, ShownAttribute};
use crate::error::{AttrError, Result};
use crate::set::AttributeSet;

/// Which attributes of a set to show. Empty means all of them.
#[derive(Debug, Clone, Default)]
pub struct ShowQuery {
    pub ids: Vec<String>,
    pub kind: Option<AttributeKind>,
    pub filters: Vec<AttrFilter>,
}

impl ShowQuery {
    fn accepts(&self, attr: &Attribute) -> bool {
        self.kind.map_or(true, |k| attr.kind() == k) && self.filters.iter().all(|f| f.matches(attr))
    }
}

pub fn run(set: &AttributeSet, query: &ShowQuery) -> Result<CmdResult> {
    let candidates: Vec<&Attribute> = if query.ids.is_empty() {
        set.iter().collect()
    } else {
        query
            .ids
            .iter()
            .map(|id| {
                set.get(id)
                    .ok_or_else(|| AttrError::AttributeNotFound(id.clone()))
            })
            .collect::<Result<_>>()?
    };

    let shown: Vec<ShownAttribute> = candidates
        .into_iter()
        .filter(|a| query.accepts(a))
        .map(ShownAttribute::of)
        .collect();

    let mut result = CmdResult::default();
    if shown.is_empty() {
        result.add_message(CmdMessage::info("No attributes found."));
    }
    Ok(result.with_shown_attributes(shown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{fixtures, OBFUSCATED_PASSWORD};

    fn set() -> AttributeSet {
        AttributeSet::from_iter(fixtures::one_of_each())
    }

    #[test]
    fn shows_everything_by_default() {
        let result = run(&set(), &ShowQuery::default()).unwrap();
        assert_eq!(result.shown_attributes.len(), 10);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn shows_requested_ids_in_request_order() {
        let query = ShowQuery {
            ids: vec!["ha".into(), "arch".into()],
            ..Default::default()
        };
        let result = run(&set(), &query).unwrap();
        let ids: Vec<_> = result.shown_attributes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ha", "arch"]);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let query = ShowQuery {
            ids: vec!["nope".into()],
            ..Default::default()
        };
        assert!(matches!(
            run(&set(), &query),
            Err(AttrError::AttributeNotFound(_))
        ));
    }

    #[test]
    fn filters_by_kind_and_projection() {
        let query = ShowQuery {
            kind: Some(AttributeKind::HighAvailability),
            filters: vec![AttrFilter::contains("partnerID", "dev-2")],
            ..Default::default()
        };
        let result = run(&set(), &query).unwrap();
        assert_eq!(result.shown_attributes.len(), 1);
        assert_eq!(result.shown_attributes[0].kind, AttributeKind::HighAvailability);
    }

    #[test]
    fn reports_when_nothing_matches() {
        let query = ShowQuery {
            filters: vec![AttrFilter::eq("architecture", "sparc")],
            ..Default::default()
        };
        let result = run(&set(), &query).unwrap();
        assert!(result.shown_attributes.is_empty());
        assert_eq!(result.messages[0].content, "No attributes found.");
    }

    #[test]
    fn shown_credentials_are_masked() {
        let query = ShowQuery {
            ids: vec!["auth".into()],
            ..Default::default()
        };
        let result = run(&set(), &query).unwrap();
        let shown = &result.shown_attributes[0];
        assert_eq!(shown.mappings["password"].as_str(), Some(OBFUSCATED_PASSWORD));
        assert!(!shown.rendering.contains("secret"));
    }
}
