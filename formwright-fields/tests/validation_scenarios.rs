//! End-to-end validation against a template built from the public API.

use formwright_fields::{
    validate_form, Field, FieldKind, FieldOption, FormData, LabelSize, Section, Template,
};
use serde_json::json;

fn registration() -> Template {
    let mut template = Template::new("Registration", Some("Event sign-up".into()));

    let mut about = Section::new("About you", 0);
    let mut heading = Field::new("Your details", FieldKind::Label { size: LabelSize::H2 });
    heading.order = 0;
    let mut name = Field::new("Name", "text".parse::<FieldKind>().unwrap().with_required(true));
    name.order = 1;
    let mut age = Field::new(
        "Age",
        FieldKind::Number {
            required: true,
            placeholder: None,
            min: Some(18.0),
            max: Some(99.0),
        },
    );
    age.order = 2;
    about.fields = vec![age, heading, name];

    let mut choices = Section::new("Choices", 1);
    let mut meal = Field::new(
        "Meal",
        FieldKind::Enum {
            required: false,
            options: vec![FieldOption::new("veg", "Vegetarian"), FieldOption::new("fish", "Fish")],
        },
    );
    meal.order = 0;
    let mut terms = Field::new("Terms", "boolean".parse::<FieldKind>().unwrap().with_required(true));
    terms.order = 1;
    choices.fields = vec![meal, terms];

    // Stored out of display order on purpose
    template.sections = vec![choices, about];
    template
}

fn messages(template: &Template, values: &FormData) -> Vec<String> {
    validate_form(template.fields_in_order(), values)
        .into_iter()
        .map(|e| e.message)
        .collect()
}

#[test]
fn empty_form_reports_required_fields_in_display_order() {
    let template = registration();
    assert_eq!(
        messages(&template, &FormData::new()),
        vec!["Name is required", "Age is required", "Terms is required"]
    );
}

#[test]
fn complete_form_is_valid() {
    let template = registration();
    let fields = template.fields_in_order();
    let mut values = FormData::new();
    for field in &fields {
        let value = match field.kind_name() {
            "text" => json!("Sam"),
            "number" => json!("30"),
            "enum" => json!("fish"),
            "boolean" => json!(false),
            _ => continue,
        };
        values.insert(field.id, value);
    }
    assert!(messages(&template, &values).is_empty());
}

#[test]
fn mixed_errors() {
    let template = registration();
    let by_label = |label: &str| {
        template
            .fields_in_order()
            .into_iter()
            .find(|f| f.label == label)
            .map(|f| f.id)
            .unwrap()
    };

    let mut values = FormData::new();
    values.insert(by_label("Name"), json!("Sam"));
    values.insert(by_label("Age"), json!(12));
    values.insert(by_label("Meal"), json!("beef"));
    values.insert(by_label("Terms"), json!("yes"));

    assert_eq!(
        messages(&template, &values),
        vec![
            "Age must be at least 18",
            "Meal must be one of the available options",
            "Terms must be true or false",
        ]
    );
}
