//! Attribution file rendering and parsing

use crate::types::Attribution;
use std::fmt::Write;

/// Labels of the attribution file, in file order
pub const ATTRIBUTION_LABELS: [&str; 5] = [
    "Title of work",
    "Link to work",
    "Revision",
    "License of the work",
    "Creator names",
];

/// Render the attribution file
///
/// Always exactly five `Label: value` lines in [`ATTRIBUTION_LABELS`] order,
/// each newline-terminated. Line breaks inside values are folded to spaces
/// so the line count never changes.
pub fn render_attribution(attribution: &Attribution) -> String {
    let values = [
        &attribution.title_of_work,
        &attribution.link_to_work,
        &attribution.revision,
        &attribution.license_of_the_work,
        &attribution.creator_names,
    ];

    let mut out = String::new();
    for (label, value) in ATTRIBUTION_LABELS.iter().zip(values) {
        let value = value.replace(['\r', '\n'], " ");
        let _ = writeln!(out, "{label}: {value}");
    }
    out
}

/// Parse an attribution file back into its fields
///
/// Labels are matched case-insensitively with whitespace folded to `_`.
/// Values may contain colons (URLs). Unknown labels are ignored.
pub fn parse_attribution(text: &str) -> Attribution {
    let mut attribution = Attribution::default();

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let value = value.trim().to_string();

        match key.as_str() {
            "title_of_work" => attribution.title_of_work = value,
            "link_to_work" => attribution.link_to_work = value,
            "revision" => attribution.revision = value,
            "license_of_the_work" => attribution.license_of_the_work = value,
            "creator_names" => attribution.creator_names = value,
            _ => {}
        }
    }

    attribution
}
