//! `formwright section ...`

use anyhow::Result;
use formwright_store::{FormsContext, SectionUpdate};

use super::{applied, print_json, resolve_section, resolve_template, template};
use crate::cli::SectionCommand;

pub fn run(command: SectionCommand, ctx: &mut FormsContext, json: bool) -> Result<()> {
    match command {
        SectionCommand::Add {
            template: reference,
            title,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let section_id = applied(
                ctx.templates_mut().add_section(&template_id, title)?,
                format_args!("template {template_id}"),
            )?;
            let section = template(ctx, &template_id)?.section(&section_id);
            if json {
                print_json(&section)
            } else {
                println!("Added section {section_id}");
                Ok(())
            }
        }
        SectionCommand::Rename {
            template: reference,
            section,
            title,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let section_id = resolve_section(template(ctx, &template_id)?, &section)?;
            applied(
                ctx.templates_mut().update_section(
                    &template_id,
                    &section_id,
                    &SectionUpdate::new().with_title(title.clone()),
                )?,
                format_args!("section {section_id}"),
            )?;
            if json {
                print_json(&template(ctx, &template_id)?.section(&section_id))
            } else {
                println!("Renamed section {section_id} to '{title}'");
                Ok(())
            }
        }
        SectionCommand::Move {
            template: reference,
            from,
            to,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            applied(
                ctx.templates_mut()
                    .reorder_sections(&template_id, from, to)?,
                format_args!("section at position {from}"),
            )?;
            if json {
                print_json(&template(ctx, &template_id)?.sorted_sections())
            } else {
                println!("Moved section {from} to {to}");
                Ok(())
            }
        }
        SectionCommand::Delete {
            template: reference,
            section,
        } => {
            let template_id = resolve_template(ctx, &reference)?;
            let section_id = resolve_section(template(ctx, &template_id)?, &section)?;
            applied(
                ctx.templates_mut()
                    .delete_section(&template_id, &section_id)?,
                format_args!("section {section_id}"),
            )?;
            if json {
                print_json(&serde_json::json!({ "deleted": section_id }))
            } else {
                println!("Deleted section {section_id}");
                Ok(())
            }
        }
    }
}
