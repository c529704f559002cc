//! Terminal-aware table utilities.
//!
//! Provides a pre-configured comfy_table that respects terminal width,
//! preventing ugly line wrapping on narrow screens.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use formwright_fields::{FieldKind, FormData, Template};
use serde_json::Value;

/// Create a table pre-configured for terminal-width-aware output.
///
/// Uses crossterm to detect the actual terminal width, falling back to
/// 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
///
/// Safe for multi-byte (UTF-8) strings.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// One-line summary of a field's kind-specific attributes.
pub fn kind_details(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Label { size } => format!("size {}", format!("{size:?}").to_lowercase()),
        FieldKind::Text { placeholder, .. } => placeholder
            .as_ref()
            .map(|p| format!("placeholder \"{p}\""))
            .unwrap_or_default(),
        FieldKind::Number { min, max, .. } => match (min, max) {
            (Some(min), Some(max)) => format!("{min}..={max}"),
            (Some(min), None) => format!(">= {min}"),
            (None, Some(max)) => format!("<= {max}"),
            (None, None) => String::new(),
        },
        FieldKind::Boolean { variant, .. } => format!("{variant:?}").to_lowercase(),
        FieldKind::Enum { options, .. } => options
            .iter()
            .map(|o| format!("{}={}", o.value, o.label))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Render submitted values as `label: value` pairs, falling back to the
/// field id for fields no longer in the template.
pub fn data_summary(template: Option<&Template>, data: &FormData) -> String {
    data.iter()
        .map(|(id, value)| {
            let name = template
                .and_then(|t| t.field(id))
                .map(|f| f.label.clone())
                .unwrap_or_else(|| id.to_string());
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{name}: {value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
