//! Attribute filtering.
//!
//! `AttrFilter` expresses a condition on one key of an attribute's generic
//! projection, so the same filter works for every attribute kind that
//! projects that key. Filtering on the projection also means sensitive
//! values can never be matched against: filters only ever see the masked
//! form.

use super::value::AttrValue;
use super::Attribute;
use crate::error::{AttrError, Result};

/// Filter operation for comparing projected values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality match.
    Eq,
    /// Not equal.
    Ne,
    /// List contains the specified value (for list-valued keys).
    Contains,
    /// List contains ALL specified values (AND logic).
    ContainsAll,
    /// Value is truthy (see [`AttrValue::is_truthy`]).
    Truthy,
}

/// A filter condition on a projected key.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrFilter {
    /// Projection key (e.g. "architecture", "partnerID", "cpus")
    pub key: String,
    pub op: FilterOp,
    pub value: AttrValue,
}

impl AttrFilter {
    pub fn new(key: impl Into<String>, op: FilterOp, value: AttrValue) -> Self {
        Self {
            key: key.into(),
            op,
            value,
        }
    }

    pub fn eq(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(key, FilterOp::Eq, value.into())
    }

    pub fn ne(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(key, FilterOp::Ne, value.into())
    }

    pub fn contains(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(key, FilterOp::Contains, AttrValue::List(vec![value.into()]))
    }

    pub fn contains_all(key: impl Into<String>, values: Vec<AttrValue>) -> Self {
        Self::new(key, FilterOp::ContainsAll, AttrValue::List(values))
    }

    /// Truthy check: the projected value is non-null, non-zero and non-empty.
    pub fn truthy(key: impl Into<String>) -> Self {
        Self::new(key, FilterOp::Truthy, AttrValue::Null)
    }

    /// Parse `key=value`, `key!=value`, `key~value` (contains) or `key?`
    /// (truthy).
    ///
    /// The expression splits at its leftmost operator, so values may contain
    /// operator characters. The value is read as JSON when it parses as JSON
    /// and taken verbatim otherwise, so `cpus=4`, `use_gps=true` and
    /// `architecture=arm64` all do what they look like.
    pub fn parse(expr: &str) -> Result<Self> {
        let Some((pos, op, len)) = find_operator(expr) else {
            return match expr.strip_suffix('?') {
                Some(key) => Ok(Self::truthy(checked_key(key, expr)?)),
                None => Err(AttrError::Api(format!(
                    "Invalid filter '{}': expected key=value, key!=value, key~value or key?",
                    expr
                ))),
            };
        };

        let key = checked_key(&expr[..pos], expr)?;
        let raw = &expr[pos + len..];
        let value = serde_json::from_str::<AttrValue>(raw)
            .unwrap_or_else(|_| AttrValue::String(raw.to_string()));
        Ok(match (op, value) {
            (FilterOp::Contains, list @ AttrValue::List(_)) => {
                Self::new(key, FilterOp::Contains, list)
            }
            (FilterOp::Contains, value) => Self::contains(key, value),
            (op, value) => Self::new(key, op, value),
        })
    }

    /// Check if this filter matches the given attribute.
    ///
    /// Returns `false` if the attribute does not project the key.
    pub fn matches(&self, attr: &Attribute) -> bool {
        let mappings = attr.generic_mappings();
        let Some(projected) = mappings.get(&self.key) else {
            return false;
        };

        match &self.op {
            FilterOp::Eq => values_equal(projected, &self.value),
            FilterOp::Ne => !values_equal(projected, &self.value),
            FilterOp::Contains => list_contains_any(projected, &self.value),
            FilterOp::ContainsAll => list_contains_all(projected, &self.value),
            FilterOp::Truthy => projected.is_truthy(),
        }
    }
}

/// Position, operator and operator length of the leftmost operator.
fn find_operator(expr: &str) -> Option<(usize, FilterOp, usize)> {
    expr.char_indices().find_map(|(i, c)| match c {
        '!' if expr[i + 1..].starts_with('=') => Some((i, FilterOp::Ne, 2)),
        '~' => Some((i, FilterOp::Contains, 1)),
        '=' => Some((i, FilterOp::Eq, 1)),
        _ => None,
    })
}

fn checked_key<'a>(key: &'a str, expr: &str) -> Result<&'a str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AttrError::Api(format!("Invalid filter '{}': empty key", expr)));
    }
    Ok(key)
}

/// Equality that also lets a string match a scalar with the same rendering,
/// so a latitude stored as `"41.1"` matches a filter value parsed as `41.1`.
fn values_equal(a: &AttrValue, b: &AttrValue) -> bool {
    if a.loosely_eq(b) {
        return true;
    }
    match (a, b) {
        (AttrValue::String(s), other) | (other, AttrValue::String(s)) if is_scalar(other) => {
            *s == other.to_string()
        }
        _ => false,
    }
}

fn is_scalar(value: &AttrValue) -> bool {
    !matches!(
        value,
        AttrValue::List(_) | AttrValue::Map(_) | AttrValue::Null
    )
}

fn list_contains_any(projected: &AttrValue, wanted: &AttrValue) -> bool {
    let (Some(have), Some(wanted)) = (projected.as_list(), wanted.as_list()) else {
        return false;
    };
    wanted.iter().any(|w| have.iter().any(|h| values_equal(h, w)))
}

fn list_contains_all(projected: &AttrValue, wanted: &AttrValue) -> bool {
    let (Some(have), Some(wanted)) = (projected.as_list(), wanted.as_list()) else {
        return false;
    };
    wanted.iter().all(|w| have.iter().any(|h| values_equal(h, w)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::fixtures;

    #[test]
    fn eq_matches_projected_value() {
        let attr = fixtures::architecture("arch", "arm64");
        assert!(AttrFilter::eq("architecture", "arm64").matches(&attr));
        assert!(!AttrFilter::eq("architecture", "amd64").matches(&attr));
    }

    #[test]
    fn ne_inverts_eq() {
        let attr = fixtures::architecture("arch", "arm64");
        assert!(AttrFilter::ne("architecture", "amd64").matches(&attr));
        assert!(!AttrFilter::ne("architecture", "arm64").matches(&attr));
    }

    #[test]
    fn missing_key_never_matches() {
        let attr = fixtures::architecture("arch", "arm64");
        assert!(!AttrFilter::eq("cpus", 4i64).matches(&attr));
        assert!(!AttrFilter::ne("cpus", 4i64).matches(&attr));
    }

    #[test]
    fn contains_checks_list_membership() {
        let attr = fixtures::ha("ha", &["a", "b"]);
        assert!(AttrFilter::contains("partnerID", "b").matches(&attr));
        assert!(!AttrFilter::contains("partnerID", "c").matches(&attr));
    }

    #[test]
    fn contains_all_requires_every_value() {
        let attr = fixtures::ha("ha", &["a", "b"]);
        let both = AttrFilter::contains_all("partnerID", vec!["a".into(), "b".into()]);
        let extra = AttrFilter::contains_all("partnerID", vec!["a".into(), "z".into()]);
        assert!(both.matches(&attr));
        assert!(!extra.matches(&attr));
    }

    #[test]
    fn contains_on_scalar_is_false() {
        let attr = fixtures::architecture("arch", "arm64");
        assert!(!AttrFilter::contains("architecture", "arm64").matches(&attr));
    }

    #[test]
    fn parse_reads_json_scalars() {
        assert_eq!(
            AttrFilter::parse("cpus=4").unwrap(),
            AttrFilter::eq("cpus", 4i64)
        );
        assert_eq!(
            AttrFilter::parse("use_gps!=true").unwrap(),
            AttrFilter::ne("use_gps", true)
        );
        assert_eq!(
            AttrFilter::parse("partnerID~dev-2").unwrap(),
            AttrFilter::contains("partnerID", "dev-2")
        );
        assert_eq!(
            AttrFilter::parse("architecture=arm64").unwrap(),
            AttrFilter::eq("architecture", "arm64")
        );
    }

    #[test]
    fn parse_rejects_malformed_expressions() {
        assert!(AttrFilter::parse("cpus").is_err());
        assert!(AttrFilter::parse("=4").is_err());
        assert!(AttrFilter::parse("?").is_err());
    }

    #[test]
    fn parse_splits_at_leftmost_operator() {
        assert_eq!(
            AttrFilter::parse("HOME=/home/~bob").unwrap(),
            AttrFilter::eq("HOME", "/home/~bob")
        );
        assert_eq!(AttrFilter::parse("A=x=y").unwrap(), AttrFilter::eq("A", "x=y"));
        assert_eq!(AttrFilter::parse("A=b!=c").unwrap(), AttrFilter::eq("A", "b!=c"));
        assert_eq!(AttrFilter::parse("A!=b=c").unwrap(), AttrFilter::ne("A", "b=c"));
        assert_eq!(
            AttrFilter::parse("A~b!=c").unwrap(),
            AttrFilter::contains("A", "b!=c")
        );
        assert_eq!(AttrFilter::parse("a!b=c").unwrap(), AttrFilter::eq("a!b", "c"));
    }

    #[test]
    fn value_with_operator_characters_matches() {
        let attr = fixtures::mapped("env", &[("HOME", "/home/~bob")]);
        assert!(AttrFilter::parse("HOME=/home/~bob").unwrap().matches(&attr));
    }

    #[test]
    fn parse_contains_list_is_not_nested() {
        let filter = AttrFilter::parse(r#"partnerID~["dev-9","b"]"#).unwrap();
        assert_eq!(
            filter,
            AttrFilter::new(
                "partnerID",
                FilterOp::Contains,
                AttrValue::List(vec!["dev-9".into(), "b".into()])
            )
        );
        assert!(filter.matches(&fixtures::ha("ha", &["a", "b"])));
    }

    #[test]
    fn truthy_checks_projected_value() {
        let attr = fixtures::location("loc", "41.1", "-73.2");
        assert_eq!(
            AttrFilter::parse("user_provided_coords?").unwrap(),
            AttrFilter::truthy("user_provided_coords")
        );
        assert!(AttrFilter::parse("user_provided_coords?").unwrap().matches(&attr));
        assert!(!AttrFilter::parse("use_gps?").unwrap().matches(&attr));
        assert!(!AttrFilter::truthy("cpus").matches(&attr));
        assert!(!AttrFilter::truthy("partnerID").matches(&fixtures::ha("ha", &[])));
    }

    #[test]
    fn string_field_matches_numeric_looking_filter() {
        let attr = fixtures::location("loc", "41.1", "-73.2");
        assert!(AttrFilter::parse("lat=41.1").unwrap().matches(&attr));
        assert!(AttrFilter::parse("lon=-73.2").unwrap().matches(&attr));
    }

    #[test]
    fn masked_password_cannot_be_probed() {
        let attr = fixtures::basic_auth("auth", "user", "secret");
        assert!(!AttrFilter::eq("password", "secret").matches(&attr));
    }
}
