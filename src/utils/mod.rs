use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Variant;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Name:\s*(?P<name>[^|]+)").unwrap());
static BANDWIDTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bandwidth:\s*(?P<bandwidth>[^|]+)").unwrap());
static RESOLUTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Resolution:\s*(?P<resolution>[^|]+)").unwrap());

fn capture(pattern: &Regex, label: &str, group: &str) -> Option<String> {
    pattern
        .captures(label)
        .and_then(|caps| caps.name(group))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract a [`Variant`] from a formatted display label.
///
/// Each field is matched independently: a label missing one literal still
/// yields a variant with that field empty. Only when all three literals are
/// absent is the label treated as "no variant selected".
pub fn parse_variant_label(label: &str) -> Option<Variant> {
    let name = capture(&NAME_PATTERN, label, "name");
    let bandwidth = capture(&BANDWIDTH_PATTERN, label, "bandwidth");
    let resolution = capture(&RESOLUTION_PATTERN, label, "resolution");

    if name.is_none() && bandwidth.is_none() && resolution.is_none() {
        return None;
    }

    Some(Variant {
        name: name.unwrap_or_default(),
        bandwidth: bandwidth.unwrap_or_default(),
        resolution: resolution.unwrap_or_default(),
    })
}

/// Canonical display form for a variant. [`parse_variant_label`] must be able
/// to re-parse this losslessly.
pub fn format_variant_label(variant: &Variant) -> String {
    format!(
        "Name: {} | Bandwidth: {} | Resolution: {}",
        variant.name, variant.bandwidth, variant.resolution
    )
}
