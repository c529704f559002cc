//! `formwright form validate|submit`

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use formwright_fields::{Field, FieldId, FormData, Template, ValidationError};
use formwright_store::{validate_values, FormsContext, Submission};
use serde_json::{Map, Value};
use tracing::debug;

use super::{print_json, resolve_template, template};
use crate::cli::FormCommand;
use crate::table::{data_summary, new_table};

pub fn run(command: FormCommand, ctx: &mut FormsContext, json: bool) -> Result<()> {
    match command {
        FormCommand::Validate {
            template: reference,
            values,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let template = template(ctx, &template_id)?;
            let data = read_values(template, &values)?;
            let errors = validate_values(template, &data);
            report(&errors, json)
        }
        FormCommand::Submit {
            template: reference,
            values,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let data = read_values(template(ctx, &template_id)?, &values)?;
            let submission = ctx
                .submit(&template_id, &data)?
                .with_context(|| format!("template {template_id} not found"))?;
            match submission {
                Submission::Accepted(stored) => {
                    if json {
                        print_json(&stored)
                    } else {
                        println!("Stored submission {}", stored.id);
                        println!("{}", data_summary(ctx.templates().get(&template_id), &stored.data));
                        Ok(())
                    }
                }
                Submission::Rejected(errors) => report(&errors, json),
            }
        }
    }
}

/// Print validation errors. Any error makes the command fail.
fn report(errors: &[ValidationError], json: bool) -> Result<()> {
    if json {
        print_json(&serde_json::json!({ "valid": errors.is_empty(), "errors": errors }))?;
    } else if errors.is_empty() {
        println!("Valid");
    } else {
        let mut table = new_table();
        table.set_header(vec!["Field", "Error"]);
        for error in errors {
            table.add_row(vec![error.field_id.to_string(), error.message.clone()]);
        }
        println!("{table}");
    }

    if !errors.is_empty() {
        bail!("{} validation error(s)", errors.len());
    }
    Ok(())
}

/// Read a JSON object of values from `path`.
fn read_values(template: &Template, path: &Path) -> Result<FormData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let object: Map<String, Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} must contain a JSON object", path.display()))?;
    let data = key_values(template, object)?;
    debug!(path = %path.display(), values = data.len(), "read form values");
    Ok(data)
}

/// Key values by field id. Keys may be field ids or unique labels of
/// fields that take a value.
pub fn key_values(template: &Template, object: Map<String, Value>) -> Result<FormData> {
    let fields: Vec<&Field> = template
        .fields_in_order()
        .into_iter()
        .filter(|f| f.is_submittable())
        .collect();
    let mut data = FormData::new();
    for (key, value) in object {
        let id = match key.parse::<FieldId>() {
            Ok(id) => id,
            Err(_) => {
                let mut matches = fields.iter().filter(|f| f.label == key);
                match (matches.next(), matches.next()) {
                    (Some(f), None) => f.id,
                    (Some(_), Some(_)) => bail!("field label '{key}' is ambiguous, use its id"),
                    (None, _) => bail!("no field labelled '{key}' in '{}'", template.name),
                }
            }
        };
        data.insert(id, value);
    }
    Ok(data)
}
