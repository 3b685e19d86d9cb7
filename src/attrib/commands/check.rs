use crate::commands::{CmdMessage, CmdResult, ShownAttribute};
use crate::error::Result;
use crate::set::AttributeSet;

/// Show the attributes that apply to `service_url` and, when `partner` is
/// given, whether it is one of that service's HA partners.
pub fn run(set: &AttributeSet, service_url: &str, partner: Option<&str>) -> Result<CmdResult> {
    let shown: Vec<ShownAttribute> = set
        .applicable(service_url)
        .map(ShownAttribute::of)
        .collect();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} of {} attributes apply to {}",
        shown.len(),
        set.len(),
        service_url
    )));

    if let Some(partner) = partner {
        if set.has_ha_partner(service_url, partner) {
            result.add_message(CmdMessage::success(format!(
                "{} is an HA partner for {}",
                partner, service_url
            )));
        } else {
            let partners = set.ha_partners(service_url);
            let known = if partners.is_empty() {
                "none".to_string()
            } else {
                partners.join(", ")
            };
            result.add_message(CmdMessage::warning(format!(
                "{} is not an HA partner for {} (partners: {})",
                partner, service_url, known
            )));
        }
    }

    Ok(result.with_shown_attributes(shown))
}
