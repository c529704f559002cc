//! Command handlers. Each takes the opened context and prints its result.

pub mod field;
pub mod form;
pub mod section;
pub mod submission;
pub mod template;

use std::fmt::Display;

use anyhow::{bail, Context, Result};
use formwright_fields::{FieldId, SectionId, Template, TemplateId};
use formwright_store::{FormsContext, Outcome};
use serde::Serialize;

use crate::cli::Commands;

/// Run one parsed command against the context.
pub fn dispatch(command: Commands, ctx: &mut FormsContext, json: bool) -> Result<()> {
    match command {
        Commands::Template { command } => template::run(command, ctx, json),
        Commands::Section { command } => section::run(command, ctx, json),
        Commands::Field { command } => field::run(command, ctx, json),
        Commands::Form { command } => form::run(command, ctx, json),
        Commands::Submission { command } => submission::run(command, ctx, json),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Find a template by id or by exact name.
pub(crate) fn resolve_template(ctx: &FormsContext, reference: &str) -> Result<TemplateId> {
    if let Ok(id) = reference.parse::<TemplateId>() {
        if ctx.templates().get(&id).is_some() {
            return Ok(id);
        }
    }
    let mut matches = ctx
        .templates()
        .templates()
        .iter()
        .filter(|t| t.name == reference);
    match (matches.next(), matches.next()) {
        (Some(t), None) => Ok(t.id),
        (Some(_), Some(_)) => bail!("template name '{reference}' is ambiguous, use its id"),
        (None, _) => bail!("template '{reference}' not found"),
    }
}

/// Find a section of `template` by id or by exact title.
pub(crate) fn resolve_section(template: &Template, reference: &str) -> Result<SectionId> {
    if let Ok(id) = reference.parse::<SectionId>() {
        if template.section(&id).is_some() {
            return Ok(id);
        }
    }
    let mut matches = template.sections.iter().filter(|s| s.title == reference);
    match (matches.next(), matches.next()) {
        (Some(s), None) => Ok(s.id),
        (Some(_), Some(_)) => bail!("section title '{reference}' is ambiguous, use its id"),
        (None, _) => bail!("section '{reference}' not found in '{}'", template.name),
    }
}

/// Find a field of a section by id or by exact label.
pub(crate) fn resolve_field(
    template: &Template,
    section: &SectionId,
    reference: &str,
) -> Result<FieldId> {
    let section = template
        .section(section)
        .with_context(|| format!("section {section} not found"))?;
    if let Ok(id) = reference.parse::<FieldId>() {
        if section.field(&id).is_some() {
            return Ok(id);
        }
    }
    let mut matches = section.fields.iter().filter(|f| f.label == reference);
    match (matches.next(), matches.next()) {
        (Some(f), None) => Ok(f.id),
        (Some(_), Some(_)) => bail!("field label '{reference}' is ambiguous, use its id"),
        (None, _) => bail!("field '{reference}' not found in '{}'", section.title),
    }
}

/// The template behind a resolved id.
pub(crate) fn template<'a>(ctx: &'a FormsContext, id: &TemplateId) -> Result<&'a Template> {
    ctx.templates()
        .get(id)
        .with_context(|| format!("template {id} not found"))
}

/// Turn an `Unchanged` outcome into an error naming what was missing.
pub(crate) fn applied<T>(outcome: Outcome<T>, target: impl Display) -> Result<T> {
    match outcome {
        Outcome::Applied(value) => Ok(value),
        Outcome::Unchanged => bail!("{target} not found, nothing changed"),
    }
}
