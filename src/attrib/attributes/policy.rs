//! Agreement-facing policy attributes: metering, counterparty property
//! expressions and agreement protocol preferences.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::spec::AttributeKind;
use super::value::{write_map, AttrValue, GenericMappings};
use super::AttributeFields;
use crate::meta::AttributeMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteringAttributes {
    pub meta: AttributeMeta,
    pub tokens: u64,
    pub per_time_unit: String,
    #[serde(rename = "notification_interval")]
    pub notification_interval_seconds: i64,
}

impl AttributeFields for MeteringAttributes {
    const KIND: AttributeKind = AttributeKind::Metering;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        GenericMappings::from([
            ("tokens".to_string(), AttrValue::from(self.tokens)),
            (
                "per_time_unit".to_string(),
                AttrValue::from(self.per_time_unit.clone()),
            ),
            (
                "notification_interval".to_string(),
                AttrValue::from(self.notification_interval_seconds),
            ),
        ])
    }
}

impl fmt::Display for MeteringAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meta: {}, tokens: {}, per_time_unit: {}, notification_interval_seconds: {}",
            self.meta, self.tokens, self.per_time_unit, self.notification_interval_seconds
        )
    }
}

/// Property expression a counterparty must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyPropertyAttributes {
    pub meta: AttributeMeta,
    #[serde(default)]
    pub expression: BTreeMap<String, AttrValue>,
}

impl AttributeFields for CounterpartyPropertyAttributes {
    const KIND: AttributeKind = AttributeKind::CounterpartyProperty;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        let expression: BTreeMap<String, AttrValue> = self
            .expression
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        GenericMappings::from([("expression".to_string(), AttrValue::Map(expression))])
    }
}

impl fmt::Display for CounterpartyPropertyAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meta: {}, expression: ", self.meta)?;
        write_map(f, &self.expression)
    }
}

/// Agreement protocols this entity is willing to use.
///
/// Stored untyped: a single protocol name, a list of names, or a structured
/// document all occur in the wild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementProtocolAttributes {
    pub meta: AttributeMeta,
    #[serde(default)]
    pub protocols: AttrValue,
}

impl AttributeFields for AgreementProtocolAttributes {
    const KIND: AttributeKind = AttributeKind::AgreementProtocol;

    fn meta(&self) -> &AttributeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut AttributeMeta {
        &mut self.meta
    }

    fn generic_mappings(&self) -> GenericMappings {
        GenericMappings::from([("protocols".to_string(), self.protocols.clone())])
    }
}

impl fmt::Display for AgreementProtocolAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meta: {}, protocols: {}", self.meta, self.protocols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attribute;

    #[test]
    fn metering_uses_wire_key_for_interval() {
        let attr = MeteringAttributes {
            meta: AttributeMeta::new().with_id("m"),
            tokens: 5,
            per_time_unit: "hour".into(),
            notification_interval_seconds: 30,
        };
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["notification_interval"], 30);

        let mappings = attr.generic_mappings();
        assert_eq!(mappings["tokens"].as_u64(), Some(5));
        assert_eq!(mappings["per_time_unit"].as_str(), Some("hour"));
        assert_eq!(mappings["notification_interval"].as_i64(), Some(30));
    }

    #[test]
    fn counterparty_projection_is_a_copy() {
        let mut expression = BTreeMap::new();
        expression.insert("and".to_string(), AttrValue::from(vec!["a".to_string()]));
        let attr = CounterpartyPropertyAttributes {
            meta: AttributeMeta::new(),
            expression,
        };

        let mut mappings = attr.generic_mappings();
        if let Some(AttrValue::Map(inner)) = mappings.get_mut("expression") {
            inner.insert("or".to_string(), AttrValue::Null);
        }

        assert_eq!(attr.expression.len(), 1);
        assert!(!attr.expression.contains_key("or"));
    }

    #[test]
    fn agreement_protocols_keep_any_shape() {
        for raw in [
            r#""Basic""#,
            r#"["Basic", "Citizen Scientist"]"#,
            r#"[{"name": "Basic", "protocolVersion": 2}]"#,
        ] {
            let json = format!(r#"{{"meta": {{"id": "p"}}, "protocols": {}}}"#, raw);
            let attr: AgreementProtocolAttributes = serde_json::from_str(&json).unwrap();
            let expected: AttrValue = serde_json::from_str(raw).unwrap();
            assert_eq!(attr.generic_mappings()["protocols"], expected);
        }
    }

    #[test]
    fn agreement_protocols_may_be_omitted() {
        let attr: Attribute =
            serde_json::from_str(r#"{"type": "AgreementProtocolAttributes", "meta": {"id": "p"}}"#)
                .unwrap();
        match attr {
            Attribute::AgreementProtocol(a) => {
                assert!(a.protocols.is_null());
                assert_eq!(a.generic_mappings()["protocols"], AttrValue::Null);
            }
            other => panic!("unexpected kind: {}", other.kind()),
        }
    }

    #[test]
    fn counterparty_rendering_shows_expression() {
        let mut expression = BTreeMap::new();
        expression.insert("name".to_string(), AttrValue::from("gpu"));
        let attr = CounterpartyPropertyAttributes {
            meta: AttributeMeta::new().with_id("cp"),
            expression,
        };
        assert!(attr.to_string().ends_with("expression: {name: gpu}"));
    }
}
