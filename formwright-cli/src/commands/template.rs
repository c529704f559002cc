//! `formwright template ...`

use anyhow::Result;
use formwright_fields::Template;
use formwright_store::{FormsContext, TemplateUpdate};

use super::{applied, print_json, resolve_template, template};
use crate::cli::TemplateCommand;
use crate::table::{kind_details, new_table, truncate_str};

pub fn run(command: TemplateCommand, ctx: &mut FormsContext, json: bool) -> Result<()> {
    match command {
        TemplateCommand::Create { name, description } => {
            let created = ctx.templates_mut().create_template(name, description)?;
            if json {
                print_json(&created)
            } else {
                println!("Created template '{}' ({})", created.name, created.id);
                Ok(())
            }
        }
        TemplateCommand::List => list(ctx, json),
        TemplateCommand::Show { template: reference } => {
            let id = resolve_template(ctx, &reference)?;
            let template = template(ctx, &id)?;
            if json {
                print_json(template)
            } else {
                show(template);
                Ok(())
            }
        }
        TemplateCommand::Update {
            template: reference,
            name,
            description,
        } => {
            let id = resolve_template(ctx, &reference)?;
            let mut update = TemplateUpdate::new();
            if let Some(name) = name {
                update = update.with_name(name);
            }
            update = match description {
                Some(d) if d.is_empty() => update.without_description(),
                Some(d) => update.with_description(d),
                None => update,
            };
            applied(
                ctx.templates_mut().update_template(&id, &update)?,
                format_args!("template {id}"),
            )?;
            let updated = template(ctx, &id)?;
            if json {
                print_json(updated)
            } else {
                println!("Updated template '{}'", updated.name);
                Ok(())
            }
        }
        TemplateCommand::Delete { template: reference } => {
            let id = resolve_template(ctx, &reference)?;
            applied(
                ctx.templates_mut().delete_template(&id)?,
                format_args!("template {id}"),
            )?;
            if json {
                print_json(&serde_json::json!({ "deleted": id }))
            } else {
                println!("Deleted template {id}");
                Ok(())
            }
        }
    }
}

fn list(ctx: &FormsContext, json: bool) -> Result<()> {
    let templates = ctx.templates().templates();
    if json {
        return print_json(templates);
    }
    if templates.is_empty() {
        println!("No templates. Create one with `formwright template create <name>`.");
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["Id", "Name", "Description", "Sections", "Fields", "Updated"]);
    for t in templates {
        let field_count: usize = t.sections.iter().map(|s| s.fields.len()).sum();
        table.add_row(vec![
            t.id.to_string(),
            t.name.clone(),
            truncate_str(t.description.as_deref().unwrap_or(""), 40),
            t.sections.len().to_string(),
            field_count.to_string(),
            t.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn show(template: &Template) {
    println!("{} ({})", template.name, template.id);
    if let Some(description) = &template.description {
        println!("{description}");
    }

    let mut table = new_table();
    table.set_header(vec![
        "Section", "#", "Field", "Label", "Type", "Required", "Details",
    ]);
    for section in template.sorted_sections() {
        if section.fields.is_empty() {
            table.add_row(vec![
                format!("{} ({})", section.title, section.id),
                String::new(),
                String::new(),
                "(no fields)".to_string(),
                String::new(),
                String::new(),
                String::new(),
            ]);
        }
        for field in section.sorted_fields() {
            table.add_row(vec![
                format!("{} ({})", section.title, section.id),
                field.order.to_string(),
                field.id.to_string(),
                field.label.clone(),
                field.kind_name().to_string(),
                if field.required() { "yes" } else { "" }.to_string(),
                kind_details(&field.kind),
            ]);
        }
    }
    println!("{table}");
}
