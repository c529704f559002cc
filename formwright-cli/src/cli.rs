//! CLI definition for the Formwright command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Formwright - build form templates, then validate and store submissions.
///
/// Templates are made of ordered sections holding ordered fields (label,
/// text, number, boolean, enum). At most five templates exist at a time.
#[derive(Parser, Debug)]
#[command(name = "formwright")]
#[command(version)]
#[command(about = "Build form templates, validate and store submissions")]
#[command(
    long_about = "Formwright keeps form templates and their submissions in a data directory.\n\n\
    Configuration is read from ~/.formwright/formwright.{toml,yaml,yml,json} and \
    ./.formwright/formwright.{toml,yaml,yml,json}.\n\n\
    Environment variables:\n  \
    FORMWRIGHT_STORAGE__DIR     Override the data directory\n  \
    FORMWRIGHT_STORAGE__FORMAT  json or yaml\n  \
    FORMWRIGHT_LOG__FILTER      tracing filter directive\n  \
    RUST_LOG                    Takes precedence over the configured log filter"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory holding the template and submission files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, inspect and delete templates
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Manage the sections of a template
    Section {
        #[command(subcommand)]
        command: SectionCommand,
    },

    /// Manage the fields of a section
    Field {
        #[command(subcommand)]
        command: FieldCommand,
    },

    /// Validate or submit filled-in values
    Form {
        #[command(subcommand)]
        command: FormCommand,
    },

    /// List and delete stored submissions
    Submission {
        #[command(subcommand)]
        command: SubmissionCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Create an empty template (at most five may exist)
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List all templates
    List,
    /// Show a template's sections and fields in display order
    Show { template: String },
    /// Rename a template or change its description
    Update {
        template: String,
        #[arg(long)]
        name: Option<String>,
        /// New description; an empty string clears it
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a template with all its sections and fields
    Delete { template: String },
}

#[derive(Subcommand, Debug)]
pub enum SectionCommand {
    /// Append a section to a template
    Add { template: String, title: String },
    /// Change a section's title
    Rename {
        template: String,
        section: String,
        title: String,
    },
    /// Move a section from one display position to another
    Move {
        template: String,
        from: usize,
        to: usize,
    },
    /// Delete a section and its fields
    Delete { template: String, section: String },
}

#[derive(Subcommand, Debug)]
pub enum FieldCommand {
    /// Append a field to a section
    Add {
        template: String,
        section: String,
        /// label, text, number, boolean or enum
        kind: String,
        label: String,
        /// Reject submissions without a value
        #[arg(long)]
        required: bool,
        #[command(flatten)]
        attributes: FieldAttributes,
    },
    /// Change a field in place, keeping its id and position
    ///
    /// Attribute flags override the field's current values. `--kind` switches
    /// to a fresh field of that kind before the flags are applied.
    Update {
        template: String,
        section: String,
        field: String,
        #[arg(long)]
        label: Option<String>,
        /// label, text, number, boolean or enum
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, value_name = "BOOL")]
        required: Option<bool>,
        #[command(flatten)]
        attributes: FieldAttributes,
    },
    /// Delete a field
    Delete {
        template: String,
        section: String,
        field: String,
    },
    /// Move a field from one display position to another
    Move {
        template: String,
        section: String,
        from: usize,
        to: usize,
    },
}

/// Kind-specific attributes of a field.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct FieldAttributes {
    /// Placeholder for text and number fields
    #[arg(long)]
    pub placeholder: Option<String>,
    /// Inclusive lower bound of a number field
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,
    /// Inclusive upper bound of a number field
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,
    /// Heading size of a label: h1, h2 or h3
    #[arg(long)]
    pub size: Option<String>,
    /// Presentation of a boolean: checkbox or toggle
    #[arg(long)]
    pub variant: Option<String>,
    /// Choice of an enum field as value=label (repeatable)
    #[arg(long = "option", value_name = "VALUE=LABEL")]
    pub options: Vec<String>,
}

impl FieldAttributes {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Subcommand, Debug)]
pub enum FormCommand {
    /// Check values against a template without storing them
    Validate {
        template: String,
        /// JSON object keyed by field id or field label
        values: PathBuf,
    },
    /// Validate values and store them as a submission
    Submit { template: String, values: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum SubmissionCommand {
    /// List submissions, optionally for one template
    List {
        #[arg(long)]
        template: Option<String>,
    },
    /// Delete a submission
    Delete { submission: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_template_create() {
        let cli = Cli::parse_from([
            "formwright",
            "template",
            "create",
            "Contact",
            "--description",
            "Basic info",
        ]);
        match cli.command {
            Commands::Template {
                command: TemplateCommand::Create { name, description },
            } => {
                assert_eq!(name, "Contact");
                assert_eq!(description.as_deref(), Some("Basic info"));
            }
            _ => panic!("Expected Template Create command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from([
            "formwright",
            "template",
            "list",
            "--json",
            "--debug",
            "--data-dir",
            "/tmp/forms",
        ]);
        assert!(cli.json);
        assert!(cli.debug);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/forms")));
        assert!(matches!(
            cli.command,
            Commands::Template {
                command: TemplateCommand::List
            }
        ));
    }

    #[test]
    fn test_cli_parsing_field_add() {
        let cli = Cli::parse_from([
            "formwright",
            "field",
            "add",
            "T",
            "S",
            "number",
            "Age",
            "--required",
            "--min",
            "-5",
            "--max",
            "65",
        ]);
        match cli.command {
            Commands::Field {
                command:
                    FieldCommand::Add {
                        kind,
                        label,
                        required,
                        attributes,
                        ..
                    },
            } => {
                assert_eq!(kind, "number");
                assert_eq!(label, "Age");
                assert!(required);
                assert_eq!(attributes.min, Some(-5.0));
                assert_eq!(attributes.max, Some(65.0));
            }
            _ => panic!("Expected Field Add command"),
        }
    }

    #[test]
    fn test_cli_parsing_repeated_options() {
        let cli = Cli::parse_from([
            "formwright", "field", "add", "T", "S", "enum", "Color", "--option", "red=Red",
            "--option", "blue=Blue",
        ]);
        match cli.command {
            Commands::Field {
                command: FieldCommand::Add { attributes, .. },
            } => assert_eq!(attributes.options, vec!["red=Red", "blue=Blue"]),
            _ => panic!("Expected Field Add command"),
        }
    }

    #[test]
    fn test_cli_parsing_field_move() {
        let cli = Cli::parse_from(["formwright", "field", "move", "T", "S", "0", "2"]);
        assert!(matches!(
            cli.command,
            Commands::Field {
                command: FieldCommand::Move { from: 0, to: 2, .. }
            }
        ));
    }

    #[test]
    fn test_cli_parsing_field_update_required() {
        let cli = Cli::parse_from([
            "formwright",
            "field",
            "update",
            "T",
            "S",
            "F",
            "--required",
            "false",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Field {
                command: FieldCommand::Update {
                    required: Some(false),
                    label: None,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_cli_parsing_field_update_attributes() {
        let cli = Cli::parse_from([
            "formwright", "field", "update", "T", "S", "Age", "--kind", "number", "--max", "120",
        ]);
        match cli.command {
            Commands::Field {
                command:
                    FieldCommand::Update {
                        kind,
                        required,
                        attributes,
                        ..
                    },
            } => {
                assert_eq!(kind.as_deref(), Some("number"));
                assert_eq!(required, None);
                assert_eq!(attributes.max, Some(120.0));
                assert!(!attributes.is_empty());
            }
            _ => panic!("Expected Field Update command"),
        }
    }

    #[test]
    fn test_cli_parsing_submission_list_filter() {
        let cli = Cli::parse_from(["formwright", "submission", "list", "--template", "T"]);
        match cli.command {
            Commands::Submission {
                command: SubmissionCommand::List { template },
            } => assert_eq!(template.as_deref(), Some("T")),
            _ => panic!("Expected Submission List command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["formwright"]).is_err());
        assert!(Cli::try_parse_from(["formwright", "field", "move", "T", "S", "x", "1"]).is_err());
    }
}
