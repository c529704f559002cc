//! `formwright submission ...`

use anyhow::{Context, Result};
use formwright_fields::{FormSubmission, SubmissionId};
use formwright_store::FormsContext;

use super::{applied, print_json, resolve_template};
use crate::cli::SubmissionCommand;
use crate::table::{data_summary, new_table};

pub fn run(command: SubmissionCommand, ctx: &mut FormsContext, json: bool) -> Result<()> {
    match command {
        SubmissionCommand::List { template } => {
            let submissions: Vec<&FormSubmission> = match template {
                Some(reference) => {
                    let id = resolve_template(ctx, &reference)?;
                    ctx.submissions().submissions_for_template(&id)
                }
                None => ctx.submissions().all().iter().collect(),
            };
            if json {
                return print_json(&submissions);
            }
            if submissions.is_empty() {
                println!("No submissions.");
                return Ok(());
            }

            let mut table = new_table();
            table.set_header(vec!["Id", "Template", "Submitted", "Values"]);
            for submission in submissions {
                let template = ctx.templates().get(&submission.template_id);
                table.add_row(vec![
                    submission.id.to_string(),
                    template
                        .map(|t| t.name.clone())
                        .unwrap_or_else(|| format!("{} (deleted)", submission.template_id)),
                    submission.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    data_summary(template, &submission.data),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        SubmissionCommand::Delete { submission } => {
            let id: SubmissionId = submission
                .parse()
                .with_context(|| format!("'{submission}' is not a submission id"))?;
            applied(
                ctx.submissions_mut().delete(&id)?,
                format_args!("submission {id}"),
            )?;
            if json {
                print_json(&serde_json::json!({ "deleted": id }))
            } else {
                println!("Deleted submission {id}");
                Ok(())
            }
        }
    }
}
