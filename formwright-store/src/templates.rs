//! TemplateStore - the collection of templates and its structural mutations.
//!
//! Every mutation works on a copy of the targeted template, persists the
//! resulting collection, and only then replaces the in-memory state. A failed
//! write leaves the store exactly as it was.

use formwright_fields::{Field, FieldId, FieldKind, Section, SectionId, Template, TemplateId};
use tracing::{debug, warn};

use crate::blob::{load_list, save_list, BlobStore, TEMPLATES_KEY};
use crate::error::{Result, StoreError};
use crate::outcome::Outcome;

/// Maximum number of templates that may exist at once.
pub const MAX_TEMPLATES: usize = 5;

/// Metadata changes for a template. Unset values are left alone.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
}

impl TemplateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    fn apply(&self, template: &mut Template) {
        if let Some(name) = &self.name {
            template.name = name.clone();
        }
        if let Some(description) = &self.description {
            template.description = description.clone();
        }
    }
}

/// Changes for a section. `order` is only touched when given explicitly.
#[derive(Debug, Clone, Default)]
pub struct SectionUpdate {
    pub title: Option<String>,
    pub order: Option<usize>,
}

impl SectionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    fn apply(&self, section: &mut Section) {
        if let Some(title) = &self.title {
            section.title = title.clone();
        }
        if let Some(order) = self.order {
            section.order = order;
        }
    }
}

/// Changes for a field.
///
/// A new `kind` replaces every kind-specific attribute at once, so a field
/// can never hold attributes of two kinds. `required` is applied after
/// `kind` and is ignored for labels.
#[derive(Debug, Clone, Default)]
pub struct FieldUpdate {
    pub label: Option<String>,
    pub kind: Option<FieldKind>,
    pub required: Option<bool>,
    pub order: Option<usize>,
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    fn apply(&self, field: &mut Field) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(kind) = &self.kind {
            field.kind = kind.clone();
        }
        if let Some(required) = self.required {
            field.kind.set_required(required);
        }
        if let Some(order) = self.order {
            field.order = order;
        }
    }
}

/// The data needed to add a field. Id and order are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub label: String,
    pub kind: FieldKind,
}

impl FieldDraft {
    pub fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// Owns the template collection and persists it under [`TEMPLATES_KEY`].
pub struct TemplateStore<S: BlobStore> {
    blobs: S,
    templates: Vec<Template>,
}

impl<S: BlobStore> TemplateStore<S> {
    /// Load the stored collection. A store that was never written is empty.
    pub fn load(blobs: S) -> Result<Self> {
        let templates: Vec<Template> = load_list(&blobs, TEMPLATES_KEY)?;
        debug!(templates = templates.len(), "template store loaded");
        Ok(Self { blobs, templates })
    }

    /// All templates, in creation order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Give back the underlying blob store.
    pub fn into_blobs(self) -> S {
        self.blobs
    }

    // --- Templates ---

    /// Append a new, empty template.
    ///
    /// Fails with [`StoreError::CapacityExceeded`] when [`MAX_TEMPLATES`]
    /// already exist.
    pub fn create_template(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Template> {
        if self.templates.len() >= MAX_TEMPLATES {
            warn!(limit = MAX_TEMPLATES, "template limit reached");
            return Err(StoreError::CapacityExceeded {
                limit: MAX_TEMPLATES,
            });
        }

        let template = Template::new(name, description);
        let mut next = self.templates.clone();
        next.push(template.clone());
        self.commit(next)?;

        debug!(template = %template.id, name = %template.name, "created template");
        Ok(template)
    }

    /// Merge metadata into a template. Unknown ids are ignored.
    pub fn update_template(&mut self, id: &TemplateId, update: &TemplateUpdate) -> Result<Outcome> {
        self.mutate(id, "update template", |template| {
            update.apply(template);
            Some(())
        })
    }

    /// Remove a template with all of its sections and fields.
    ///
    /// Submissions referencing it are left in place.
    pub fn delete_template(&mut self, id: &TemplateId) -> Result<Outcome> {
        if self.get(id).is_none() {
            debug!(template = %id, "delete template: not found, ignoring");
            return Ok(Outcome::Unchanged);
        }

        let next: Vec<Template> = self
            .templates
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        debug!(template = %id, "deleted template");
        Ok(Outcome::Applied(()))
    }

    // --- Sections ---

    /// Append a section at `order = section count`.
    pub fn add_section(
        &mut self,
        template_id: &TemplateId,
        title: impl Into<String>,
    ) -> Result<Outcome<SectionId>> {
        let title = title.into();
        self.mutate(template_id, "add section", move |template| {
            let section = Section::new(title, template.sections.len());
            let id = section.id;
            template.sections.push(section);
            Some(id)
        })
    }

    pub fn update_section(
        &mut self,
        template_id: &TemplateId,
        section_id: &SectionId,
        update: &SectionUpdate,
    ) -> Result<Outcome> {
        self.mutate(template_id, "update section", |template| {
            let section = template.section_mut(section_id)?;
            update.apply(section);
            Some(())
        })
    }

    /// Remove a section and its fields. Sibling `order` values are kept as-is,
    /// so gaps may appear.
    pub fn delete_section(
        &mut self,
        template_id: &TemplateId,
        section_id: &SectionId,
    ) -> Result<Outcome> {
        self.mutate(template_id, "delete section", |template| {
            let before = template.sections.len();
            template.sections.retain(|s| &s.id != section_id);
            (template.sections.len() != before).then_some(())
        })
    }

    /// Move the section at `source` (in display order) to `destination` and
    /// renumber every section to `0..n-1`.
    pub fn reorder_sections(
        &mut self,
        template_id: &TemplateId,
        source: usize,
        destination: usize,
    ) -> Result<Outcome> {
        self.mutate(template_id, "reorder sections", |template| {
            let mut sections = std::mem::take(&mut template.sections);
            sections.sort_by_key(|s| s.order);
            let mut sections = move_item(sections, source, destination)?;
            for (index, section) in sections.iter_mut().enumerate() {
                section.order = index;
            }
            template.sections = sections;
            Some(())
        })
    }

    // --- Fields ---

    /// Append a field with a fresh id at `order = field count`.
    pub fn add_field(
        &mut self,
        template_id: &TemplateId,
        section_id: &SectionId,
        draft: FieldDraft,
    ) -> Result<Outcome<FieldId>> {
        self.mutate(template_id, "add field", move |template| {
            let section = template.section_mut(section_id)?;
            let mut field = Field::new(draft.label, draft.kind);
            field.order = section.fields.len();
            let id = field.id;
            section.fields.push(field);
            Some(id)
        })
    }

    /// Merge changes into a field. Does not renumber siblings.
    pub fn update_field(
        &mut self,
        template_id: &TemplateId,
        section_id: &SectionId,
        field_id: &FieldId,
        update: &FieldUpdate,
    ) -> Result<Outcome> {
        self.mutate(template_id, "update field", |template| {
            let field = template
                .section_mut(section_id)?
                .fields
                .iter_mut()
                .find(|f| &f.id == field_id)?;
            update.apply(field);
            Some(())
        })
    }

    /// Remove a field. Remaining `order` values are not renumbered.
    pub fn delete_field(
        &mut self,
        template_id: &TemplateId,
        section_id: &SectionId,
        field_id: &FieldId,
    ) -> Result<Outcome> {
        self.mutate(template_id, "delete field", |template| {
            let section = template.section_mut(section_id)?;
            let before = section.fields.len();
            section.fields.retain(|f| &f.id != field_id);
            (section.fields.len() != before).then_some(())
        })
    }

    /// Move the field at `source` (in display order) to `destination` and
    /// renumber every field in the section to `0..n-1`.
    ///
    /// A `source` past the end changes nothing; a `destination` past the end
    /// moves the field last.
    pub fn reorder_fields(
        &mut self,
        template_id: &TemplateId,
        section_id: &SectionId,
        source: usize,
        destination: usize,
    ) -> Result<Outcome> {
        self.mutate(template_id, "reorder fields", |template| {
            let section = template.section_mut(section_id)?;
            let mut fields = std::mem::take(&mut section.fields);
            fields.sort_by_key(|f| f.order);
            let mut fields = move_item(fields, source, destination)?;
            for (index, field) in fields.iter_mut().enumerate() {
                field.order = index;
            }
            section.fields = fields;
            Some(())
        })
    }

    // --- Internal ---

    /// Apply `f` to a copy of the template, then touch and persist it.
    ///
    /// `f` returning `None` means its target was missing: the copy is dropped
    /// and nothing is written.
    fn mutate<T>(
        &mut self,
        template_id: &TemplateId,
        op: &'static str,
        f: impl FnOnce(&mut Template) -> Option<T>,
    ) -> Result<Outcome<T>> {
        let Some(index) = self.templates.iter().position(|t| &t.id == template_id) else {
            debug!(template = %template_id, op, "template not found, ignoring");
            return Ok(Outcome::Unchanged);
        };

        let mut template = self.templates[index].clone();
        let Some(value) = f(&mut template) else {
            debug!(template = %template_id, op, "target not found, ignoring");
            return Ok(Outcome::Unchanged);
        };
        template.touch();

        let mut next = self.templates.clone();
        next[index] = template;
        self.commit(next)?;

        debug!(template = %template_id, op, "template mutated");
        Ok(Outcome::Applied(value))
    }

    fn commit(&mut self, next: Vec<Template>) -> Result<()> {
        save_list(&mut self.blobs, TEMPLATES_KEY, &next)?;
        self.templates = next;
        Ok(())
    }
}

/// Remove the item at `source` and reinsert it at `destination`, clamped to
/// the end. `None` when `source` is out of range.
fn move_item<T>(mut items: Vec<T>, source: usize, destination: usize) -> Option<Vec<T>> {
    if source >= items.len() {
        return None;
    }
    let item = items.remove(source);
    let destination = destination.min(items.len());
    items.insert(destination, item);
    Some(items)
}
