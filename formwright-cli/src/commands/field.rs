//! `formwright field ...`

use anyhow::{bail, Context, Result};
use formwright_fields::{BooleanVariant, FieldKind, FieldOption, LabelSize};
use formwright_store::{FieldDraft, FieldUpdate, FormsContext};

use super::{applied, print_json, resolve_field, resolve_section, resolve_template, template};
use crate::cli::{FieldAttributes, FieldCommand};

pub fn run(command: FieldCommand, ctx: &mut FormsContext, json: bool) -> Result<()> {
    match command {
        FieldCommand::Add {
            template: reference,
            section,
            kind,
            label,
            required,
            attributes,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let section_id = resolve_section(template(ctx, &template_id)?, &section)?;
            let kind = build_kind(&kind, required, &attributes)?;
            let field_id = applied(
                ctx.templates_mut().add_field(
                    &template_id,
                    &section_id,
                    FieldDraft::new(label, kind),
                )?,
                format_args!("section {section_id}"),
            )?;
            if json {
                print_json(&template(ctx, &template_id)?.field(&field_id))
            } else {
                println!("Added field {field_id}");
                Ok(())
            }
        }
        FieldCommand::Update {
            template: reference,
            section,
            field,
            label,
            kind,
            required,
            attributes,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let current = template(ctx, &template_id)?;
            let section_id = resolve_section(current, &section)?;
            let field_id = resolve_field(current, &section_id, &field)?;
            let existing = current
                .field(&field_id)
                .with_context(|| format!("field {field_id} not found"))?;

            let new_kind = edit_kind(&existing.kind, kind.as_deref(), &attributes)?;
            let is_label = matches!(
                new_kind.as_ref().unwrap_or(&existing.kind),
                FieldKind::Label { .. }
            );
            if required == Some(true) && is_label {
                bail!("label fields cannot be required");
            }

            let mut update = FieldUpdate::new();
            if let Some(label) = label {
                update = update.with_label(label);
            }
            if let Some(kind) = new_kind {
                update = update.with_kind(kind);
            }
            if let Some(required) = required {
                update = update.with_required(required);
            }
            applied(
                ctx.templates_mut()
                    .update_field(&template_id, &section_id, &field_id, &update)?,
                format_args!("field {field_id}"),
            )?;
            if json {
                print_json(&template(ctx, &template_id)?.field(&field_id))
            } else {
                println!("Updated field {field_id}");
                Ok(())
            }
        }
        FieldCommand::Delete {
            template: reference,
            section,
            field,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let current = template(ctx, &template_id)?;
            let section_id = resolve_section(current, &section)?;
            let field_id = resolve_field(current, &section_id, &field)?;
            applied(
                ctx.templates_mut()
                    .delete_field(&template_id, &section_id, &field_id)?,
                format_args!("field {field_id}"),
            )?;
            if json {
                print_json(&serde_json::json!({ "deleted": field_id }))
            } else {
                println!("Deleted field {field_id}");
                Ok(())
            }
        }
        FieldCommand::Move {
            template: reference,
            section,
            from,
            to,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let section_id = resolve_section(template(ctx, &template_id)?, &section)?;
            applied(
                ctx.templates_mut()
                    .reorder_fields(&template_id, &section_id, from, to)?,
                format_args!("field at position {from}"),
            )?;
            let section = template(ctx, &template_id)?.section(&section_id);
            if json {
                print_json(&section.map(|s| s.sorted_fields()))
            } else {
                println!("Moved field {from} to {to}");
                Ok(())
            }
        }
    }
}

/// Build a new field kind from its name and the attribute flags.
pub fn build_kind(name: &str, required: bool, attributes: &FieldAttributes) -> Result<FieldKind> {
    let mut kind: FieldKind = name.parse()?;
    apply_attributes(&mut kind, attributes)?;
    if required && !kind.set_required(true) {
        bail!("--required does not apply to {name} fields");
    }
    Ok(kind)
}

/// Merge the attribute flags over an existing kind.
///
/// Switching to another kind starts from that kind's defaults and carries
/// the required flag across. Returns `None` when nothing would change.
pub fn edit_kind(
    current: &FieldKind,
    name: Option<&str>,
    attributes: &FieldAttributes,
) -> Result<Option<FieldKind>> {
    let mut kind = match name {
        Some(name) if name != current.name() => {
            let mut kind: FieldKind = name.parse()?;
            kind.set_required(current.required());
            kind
        }
        _ if attributes.is_empty() => return Ok(None),
        _ => current.clone(),
    };
    apply_attributes(&mut kind, attributes)?;
    Ok(Some(kind))
}

/// Apply the flags that were given, leaving the rest of `kind` as it is.
///
/// Flags that do not belong to the kind are rejected rather than dropped.
fn apply_attributes(kind: &mut FieldKind, attributes: &FieldAttributes) -> Result<()> {
    let name = kind.name();
    let allowed: &[&str] = match kind {
        FieldKind::Label { .. } => &["size"],
        FieldKind::Text { .. } => &["placeholder"],
        FieldKind::Number { .. } => &["placeholder", "min", "max"],
        FieldKind::Boolean { .. } => &["variant"],
        FieldKind::Enum { .. } => &["option"],
    };
    let given = [
        ("placeholder", attributes.placeholder.is_some()),
        ("min", attributes.min.is_some()),
        ("max", attributes.max.is_some()),
        ("size", attributes.size.is_some()),
        ("variant", attributes.variant.is_some()),
        ("option", !attributes.options.is_empty()),
    ];
    for (flag, present) in given {
        if present && !allowed.contains(&flag) {
            bail!("--{flag} does not apply to {name} fields");
        }
    }

    match kind {
        FieldKind::Label { size } => {
            if let Some(s) = &attributes.size {
                *size = s.parse::<LabelSize>()?;
            }
        }
        FieldKind::Text { placeholder, .. } => {
            if attributes.placeholder.is_some() {
                placeholder.clone_from(&attributes.placeholder);
            }
        }
        FieldKind::Number {
            placeholder,
            min,
            max,
            ..
        } => {
            for (flag, bound) in [("min", attributes.min), ("max", attributes.max)] {
                if let Some(value) = bound.filter(|b| !b.is_finite()) {
                    bail!("--{flag} must be a finite number, got {value}");
                }
            }
            if attributes.placeholder.is_some() {
                placeholder.clone_from(&attributes.placeholder);
            }
            if attributes.min.is_some() {
                *min = attributes.min;
            }
            if attributes.max.is_some() {
                *max = attributes.max;
            }
            if let (Some(lo), Some(hi)) = (*min, *max) {
                if lo > hi {
                    bail!("--min {lo} is greater than --max {hi}");
                }
            }
        }
        FieldKind::Boolean { variant, .. } => {
            if let Some(v) = &attributes.variant {
                *variant = v.parse::<BooleanVariant>()?;
            }
        }
        FieldKind::Enum { options, .. } => {
            if !attributes.options.is_empty() {
                *options = attributes
                    .options
                    .iter()
                    .map(|raw| parse_option(raw))
                    .collect::<Result<_>>()?;
            }
            if options.is_empty() {
                bail!("enum fields need at least one --option");
            }
        }
    }
    Ok(())
}

/// Parse `value=label`. A bare `value` uses itself as the label.
fn parse_option(raw: &str) -> Result<FieldOption> {
    let (value, label) = match raw.split_once('=') {
        Some((value, label)) => (value.trim(), label.trim()),
        None => (raw.trim(), raw.trim()),
    };
    if value.is_empty() {
        bail!("--option '{raw}' has an empty value");
    }
    Ok(FieldOption::new(value, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_defaults_to_h2() {
        let kind = build_kind("label", false, &FieldAttributes::default()).unwrap();
        assert_eq!(kind, FieldKind::Label { size: LabelSize::H2 });
    }

    #[test]
    fn test_boolean_defaults_to_checkbox() {
        let kind = build_kind("boolean", false, &FieldAttributes::default()).unwrap();
        assert_eq!(
            kind,
            FieldKind::Boolean {
                required: false,
                variant: BooleanVariant::Checkbox
            }
        );
    }

    #[test]
    fn test_number_with_bounds() {
        let attributes = FieldAttributes {
            min: Some(18.0),
            max: Some(65.0),
            ..Default::default()
        };
        let kind = build_kind("number", true, &attributes).unwrap();
        assert_eq!(
            kind,
            FieldKind::Number {
                required: true,
                placeholder: None,
                min: Some(18.0),
                max: Some(65.0),
            }
        );
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let attributes = FieldAttributes {
            min: Some(10.0),
            max: Some(1.0),
            ..Default::default()
        };
        assert!(build_kind("number", false, &attributes).is_err());
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        for (min, max) in [(Some(f64::NAN), None), (None, Some(f64::INFINITY))] {
            let attributes = FieldAttributes {
                min,
                max,
                ..Default::default()
            };
            let err = build_kind("number", false, &attributes).unwrap_err();
            assert!(err.to_string().contains("must be a finite number"));
        }
    }

    #[test]
    fn test_enum_options() {
        let attributes = FieldAttributes {
            options: vec!["red=Red".into(), "blue".into()],
            ..Default::default()
        };
        let FieldKind::Enum { options, .. } = build_kind("enum", false, &attributes).unwrap() else {
            panic!("expected enum kind");
        };
        let pairs: Vec<(&str, &str)> = options
            .iter()
            .map(|o| (o.value.as_str(), o.label.as_str()))
            .collect();
        assert_eq!(pairs, vec![("red", "Red"), ("blue", "blue")]);
        assert!(parse_option("=Nothing").is_err());
    }

    #[test]
    fn test_enum_without_options_rejected() {
        let err = build_kind("enum", true, &FieldAttributes::default()).unwrap_err();
        assert_eq!(err.to_string(), "enum fields need at least one --option");
    }

    #[test]
    fn test_foreign_flags_rejected() {
        let err = build_kind("label", true, &FieldAttributes::default()).unwrap_err();
        assert_eq!(err.to_string(), "--required does not apply to label fields");

        let attributes = FieldAttributes {
            size: Some("h1".into()),
            ..Default::default()
        };
        assert!(build_kind("text", false, &attributes).is_err());
    }

    #[test]
    fn test_unknown_kind_and_attribute() {
        assert!(build_kind("date", false, &FieldAttributes::default()).is_err());
        let attributes = FieldAttributes {
            variant: Some("radio".into()),
            ..Default::default()
        };
        assert!(build_kind("boolean", false, &attributes).is_err());
    }

    fn age_kind() -> FieldKind {
        FieldKind::Number {
            required: true,
            placeholder: Some("years".into()),
            min: Some(18.0),
            max: Some(65.0),
        }
    }

    #[test]
    fn test_edit_keeps_unmentioned_attributes() {
        let attributes = FieldAttributes {
            max: Some(120.0),
            ..Default::default()
        };
        let edited = edit_kind(&age_kind(), None, &attributes).unwrap();
        assert_eq!(
            edited,
            Some(FieldKind::Number {
                required: true,
                placeholder: Some("years".into()),
                min: Some(18.0),
                max: Some(120.0),
            })
        );
    }

    #[test]
    fn test_edit_without_changes_is_none() {
        let same_kind = edit_kind(&age_kind(), Some("number"), &FieldAttributes::default());
        assert_eq!(same_kind.unwrap(), None);
    }

    #[test]
    fn test_edit_checks_merged_bounds() {
        let attributes = FieldAttributes {
            min: Some(70.0),
            ..Default::default()
        };
        let err = edit_kind(&age_kind(), None, &attributes).unwrap_err();
        assert_eq!(err.to_string(), "--min 70 is greater than --max 65");
    }

    #[test]
    fn test_edit_switches_kind_and_keeps_required() {
        let attributes = FieldAttributes {
            options: vec!["a".into()],
            ..Default::default()
        };
        let edited = edit_kind(&age_kind(), Some("enum"), &attributes)
            .unwrap()
            .unwrap();
        assert_eq!(edited.name(), "enum");
        assert!(edited.required());

        // Number flags do not carry over to the new kind
        let attributes = FieldAttributes {
            max: Some(3.0),
            ..Default::default()
        };
        assert!(edit_kind(&age_kind(), Some("text"), &attributes).is_err());
    }
}
