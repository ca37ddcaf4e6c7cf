//! Project editor
//!
//! The create/update/delete flow over the persisted project list. The editor
//! owns what is being edited ([`EditMode`]), the form contents
//! ([`ProjectForm`]), a persistent status line, and a self-clearing
//! confirmation ([`Notice`]).
//!
//! Changes land in the store only; the rendered grid picks them up on its
//! next load.

use crate::notice::Notice;
use folio_model::RawProjectRecord;
use folio_store::{KeyValueStore, ProjectStore};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Label of the select entry that starts a new project
pub const NEW_PROJECT_LABEL: &str = "-- New Project --";

/// Status preselected for new projects
pub const DEFAULT_FORM_STATUS: &str = "In Progress";

/// Question asked before deleting
pub const DELETE_PROMPT: &str = "Delete this project?";

/// What the editor is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Filling in a new project
    #[default]
    Creating,
    /// Editing the stored project at this index
    EditingAt(usize),
}

/// One entry of the project selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Index into the store; `None` for the new-project entry
    pub value: Option<usize>,
    /// Displayed label
    pub label: String,
}

/// Result of a submit or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// A project was appended
    Created,
    /// The project at this index was replaced
    Updated(usize),
    /// The project at this index was removed
    Deleted(usize),
    /// Nothing changed (declined, nothing selected, or index gone)
    Unchanged,
    /// The store refused the write; the form is kept for another try
    Failed,
}

/// Form contents, as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub status: String,
    pub stars: String,
    /// Comma-separated
    pub tags: String,
    pub cover: String,
    pub alt: String,
    pub demo: String,
    pub code: String,
    pub timeline: String,
    pub role: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: DEFAULT_FORM_STATUS.to_string(),
            stars: String::new(),
            tags: String::new(),
            cover: String::new(),
            alt: String::new(),
            demo: String::new(),
            code: String::new(),
            timeline: String::new(),
            role: String::new(),
        }
    }
}

/// Leading-integer parse: optional sign then digits, anything after ignored
///
/// Negative or unparsable input gives 0.
fn parse_leading_stars(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

impl ProjectForm {
    /// Fill the form from a stored record
    #[must_use]
    pub fn from_record(record: &RawProjectRecord) -> Self {
        let text = |value: Option<&str>| value.unwrap_or_default().to_string();
        let stars = record
            .stars
            .as_ref()
            .and_then(|v| match v {
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "0".to_string());

        Self {
            title: text(record.title_str()),
            description: text(record.description_str()),
            status: record
                .status_str()
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_FORM_STATUS)
                .to_string(),
            stars,
            tags: record.tag_list().join(", "),
            cover: text(record.cover_str()),
            alt: text(record.alt_str()),
            demo: text(record.demo_str()),
            code: text(record.code_str()),
            timeline: text(record.timeline_str()),
            role: text(record.role_str()),
        }
    }

    /// Record to store: text trimmed, stars parsed, tags split
    #[must_use]
    pub fn to_record(&self) -> RawProjectRecord {
        self.apply_to(RawProjectRecord::new())
    }

    /// Overlay the form onto `base`
    ///
    /// Fields the form does not show (`slug` and unknown extras) keep the
    /// value they have in `base`.
    #[must_use]
    pub fn apply_to(&self, base: RawProjectRecord) -> RawProjectRecord {
        base.with_title(self.title.trim())
            .with_description(self.description.trim())
            .with_status(self.status.as_str())
            .with_stars(parse_leading_stars(&self.stars))
            .with_tags(split_tags(&self.tags))
            .with_cover(self.cover.trim())
            .with_alt(self.alt.trim())
            .with_demo(self.demo.trim())
            .with_code(self.code.trim())
            .with_timeline(self.timeline.trim())
            .with_role(self.role.trim())
    }
}

/// Create/update/delete controller over a [`ProjectStore`]
#[derive(Debug)]
pub struct ProjectEditor<K> {
    store: ProjectStore<K>,
    mode: EditMode,
    form: ProjectForm,
    /// Stored record behind the form while editing
    base: Option<RawProjectRecord>,
    status: String,
    confirmation: Notice,
}

impl<K: KeyValueStore> ProjectEditor<K> {
    /// Create an editor; confirmations stay visible for `confirmation_ttl`
    #[must_use]
    pub fn new(store: ProjectStore<K>, confirmation_ttl: Duration) -> Self {
        Self {
            store,
            mode: EditMode::Creating,
            form: ProjectForm::default(),
            base: None,
            status: String::new(),
            confirmation: Notice::new(confirmation_ttl),
        }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ProjectStore<K> {
        &self.store
    }

    /// Current mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Form contents
    #[inline]
    #[must_use]
    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    /// Form contents, for typing into
    #[inline]
    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    /// Persistent status line
    #[inline]
    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status
    }

    /// Confirmation currently shown; empty once expired
    #[must_use]
    pub fn confirmation(&self) -> String {
        self.confirmation.current()
    }

    /// Submit button label
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditMode::Creating => "Create Project",
            EditMode::EditingAt(_) => "Update Project",
        }
    }

    /// Form legend
    #[must_use]
    pub fn legend(&self) -> &'static str {
        match self.mode {
            EditMode::Creating => "Create New Project",
            EditMode::EditingAt(_) => "Edit Project",
        }
    }

    /// Check if the delete action is available
    #[inline]
    #[must_use]
    pub fn delete_enabled(&self) -> bool {
        matches!(self.mode, EditMode::EditingAt(_))
    }

    /// Entries for the project selector
    #[must_use]
    pub fn select_options(&self) -> Vec<SelectOption> {
        let stored = self.store.list_all().into_iter().enumerate().map(|(i, record)| {
            let label = record
                .title_str()
                .filter(|t| !t.is_empty())
                .map_or_else(|| format!("Project {}", i + 1), String::from);
            SelectOption {
                value: Some(i),
                label,
            }
        });
        std::iter::once(SelectOption {
            value: None,
            label: NEW_PROJECT_LABEL.to_string(),
        })
        .chain(stored)
        .collect()
    }

    /// Choose what to edit; `None` or a missing index starts a new project
    pub fn select(&mut self, index: Option<usize>) {
        match index.and_then(|i| self.store.get(i).map(|record| (i, record))) {
            Some((i, record)) => {
                self.form = ProjectForm::from_record(&record);
                self.base = Some(record);
                self.mode = EditMode::EditingAt(i);
                debug!(index = i, "editing project");
            }
            None => self.reset(),
        }
    }

    /// Clear the form and go back to creating
    pub fn reset(&mut self) {
        self.form = ProjectForm::default();
        self.base = None;
        self.mode = EditMode::Creating;
    }

    fn report(&mut self, verb: &str, title: &str, confirmation: &str) {
        self.status = format!("{verb} \"{title}\". Changes visible on next project load.");
        self.confirmation.show(confirmation);
        info!(title, "{}", verb.to_lowercase());
    }

    /// Save the form: create in [`EditMode::Creating`], otherwise update
    ///
    /// Updates keep the stored fields the form does not show. The form is
    /// cleared afterwards unless the store refused the write, in which case
    /// nothing is reported and [`EditOutcome::Failed`] is returned. Updating an
    /// index that no longer exists changes nothing.
    pub fn submit(&mut self) -> EditOutcome {
        let outcome = match self.mode {
            EditMode::Creating => {
                let record = self.form.to_record();
                let title = record.title_str().unwrap_or_default().to_string();
                match self.store.try_create(record) {
                    Ok(()) => {
                        self.report("Created", &title, "✓ Project created");
                        EditOutcome::Created
                    }
                    Err(e) => {
                        warn!(title, error = %e, "project not created");
                        return EditOutcome::Failed;
                    }
                }
            }
            EditMode::EditingAt(i) => {
                let base = self.base.clone().unwrap_or_default();
                let record = self.form.apply_to(base);
                let title = record.title_str().unwrap_or_default().to_string();
                match self.store.try_update(i, record) {
                    Ok(true) => {
                        self.report("Updated", &title, "✓ Project updated");
                        EditOutcome::Updated(i)
                    }
                    Ok(false) => {
                        debug!(index = i, "project to update is gone");
                        EditOutcome::Unchanged
                    }
                    Err(e) => {
                        warn!(index = i, error = %e, "project not updated");
                        return EditOutcome::Failed;
                    }
                }
            }
        };
        self.reset();
        outcome
    }

    /// Delete the project being edited if `confirm` approves
    ///
    /// `confirm` receives [`DELETE_PROMPT`]. Does nothing while creating.
    pub fn delete(&mut self, confirm: impl FnOnce(&str) -> bool) -> EditOutcome {
        let EditMode::EditingAt(i) = self.mode else {
            return EditOutcome::Unchanged;
        };
        if !confirm(DELETE_PROMPT) {
            return EditOutcome::Unchanged;
        }
        match self.store.try_delete(i) {
            Ok(Some(removed)) => {
                let title = removed.title_str().unwrap_or_default().to_string();
                self.report("Deleted", &title, "✓ Project deleted");
                self.reset();
                EditOutcome::Deleted(i)
            }
            Ok(None) => EditOutcome::Unchanged,
            Err(e) => {
                warn!(index = i, error = %e, "project not deleted");
                EditOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn editor() -> ProjectEditor<MemoryStore> {
        ProjectEditor::new(
            ProjectStore::with_default_key(MemoryStore::new()),
            Duration::from_secs(3),
        )
    }

    #[test]
    fn leading_integer_parse() {
        assert_eq!(parse_leading_stars("42"), 42);
        assert_eq!(parse_leading_stars("  7 stars"), 7);
        assert_eq!(parse_leading_stars("+3"), 3);
        assert_eq!(parse_leading_stars("-5"), 0);
        assert_eq!(parse_leading_stars("many"), 0);
        assert_eq!(parse_leading_stars(""), 0);
        assert_eq!(parse_leading_stars("12.9"), 12);
    }

    #[test]
    fn form_to_record_cleans_input() {
        let form = ProjectForm {
            title: "  Folio  ".into(),
            stars: "12abc".into(),
            tags: " rust, ,web ,, cli ".into(),
            ..ProjectForm::default()
        };
        let record = form.to_record();

        assert_eq!(record.title_str(), Some("Folio"));
        assert_eq!(record.status_str(), Some("In Progress"));
        assert_eq!(record.stars, Some(serde_json::json!(12)));
        assert_eq!(record.tag_list(), vec!["rust", "web", "cli"]);
        assert_eq!(record.demo_str(), Some(""));
    }

    #[test]
    fn form_from_record_fills_defaults() {
        let record = RawProjectRecord::new()
            .with_title("A")
            .with_stars(5)
            .with_tags(["x", "y"]);
        let form = ProjectForm::from_record(&record);

        assert_eq!(form.title, "A");
        assert_eq!(form.status, "In Progress");
        assert_eq!(form.stars, "5");
        assert_eq!(form.tags, "x, y");
        assert_eq!(form.description, "");

        assert_eq!(ProjectForm::from_record(&RawProjectRecord::new()).stars, "0");
    }

    #[test]
    fn select_options_label_by_title() {
        let editor = editor();
        editor.store().create(RawProjectRecord::new().with_title("Alpha"));
        editor.store().create(RawProjectRecord::new());

        let labels: Vec<_> = editor
            .select_options()
            .into_iter()
            .map(|o| (o.value, o.label))
            .collect();
        assert_eq!(
            labels,
            vec![
                (None, "-- New Project --".to_string()),
                (Some(0), "Alpha".to_string()),
                (Some(1), "Project 2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn create_then_edit_then_update() {
        let mut editor = editor();
        assert_eq!(editor.submit_label(), "Create Project");
        assert_eq!(editor.legend(), "Create New Project");
        assert!(!editor.delete_enabled());

        editor.form_mut().title = "First".into();
        assert_eq!(editor.submit(), EditOutcome::Created);
        assert_eq!(
            editor.status_message(),
            "Created \"First\". Changes visible on next project load."
        );
        assert_eq!(editor.confirmation(), "✓ Project created");
        assert_eq!(editor.form(), &ProjectForm::default());

        editor.select(Some(0));
        assert_eq!(editor.mode(), EditMode::EditingAt(0));
        assert_eq!(editor.submit_label(), "Update Project");
        assert_eq!(editor.legend(), "Edit Project");
        assert!(editor.delete_enabled());
        assert_eq!(editor.form().title, "First");

        editor.form_mut().title = "Renamed".into();
        assert_eq!(editor.submit(), EditOutcome::Updated(0));
        assert_eq!(editor.store().len(), 1);
        assert_eq!(editor.store().get(0).unwrap().title_str(), Some("Renamed"));
        assert_eq!(editor.confirmation(), "✓ Project updated");
        assert_eq!(editor.mode(), EditMode::Creating);
    }

    #[test]
    fn out_of_range_select_starts_new_project() {
        let mut editor = editor();
        editor.form_mut().title = "draft".into();
        editor.select(Some(4));

        assert_eq!(editor.mode(), EditMode::Creating);
        assert_eq!(editor.form().title, "");
    }

    #[test]
    fn update_of_vanished_index_changes_nothing() {
        let mut editor = editor();
        editor.store().create(RawProjectRecord::new().with_title("A"));
        editor.select(Some(0));
        editor.store().delete(0);

        assert_eq!(editor.submit(), EditOutcome::Unchanged);
        assert!(editor.store().is_empty());
        assert_eq!(editor.status_message(), "");
    }

    #[test]
    fn refused_create_reports_nothing() {
        let mut editor = editor();
        editor.store().kv().set_available(false);
        editor.form_mut().title = "Lost".into();

        assert_eq!(editor.submit(), EditOutcome::Failed);
        assert_eq!(editor.status_message(), "");
        assert_eq!(editor.confirmation(), "");
        // Kept so the user can try again.
        assert_eq!(editor.form().title, "Lost");
        assert_eq!(editor.mode(), EditMode::Creating);

        editor.store().kv().set_available(true);
        assert!(editor.store().is_empty());
    }

    #[test]
    fn refused_update_keeps_the_selection() {
        let mut editor = editor();
        editor.store().create(RawProjectRecord::new().with_title("A"));
        editor.select(Some(0));
        editor.form_mut().title = "B".into();
        editor.store().kv().set_available(false);

        assert_eq!(editor.submit(), EditOutcome::Failed);
        assert_eq!(editor.mode(), EditMode::EditingAt(0));
        assert_eq!(editor.status_message(), "");

        editor.store().kv().set_available(true);
        assert_eq!(editor.store().get(0).unwrap().title_str(), Some("A"));
    }

    #[test]
    fn update_keeps_fields_the_form_hides() {
        let mut editor = editor();
        let stored: RawProjectRecord = serde_json::from_value(serde_json::json!({
            "title": "Kernel Tracer v2",
            "slug": "kernel-tracer",
            "featured": true
        }))
        .unwrap();
        editor.store().create(stored);

        editor.select(Some(0));
        editor.form_mut().stars = "5".into();
        assert_eq!(editor.submit(), EditOutcome::Updated(0));

        let updated = editor.store().get(0).unwrap();
        assert_eq!(updated.slug_str(), Some("kernel-tracer"));
        assert_eq!(updated.extra.get("featured"), Some(&serde_json::json!(true)));
        assert_eq!(updated.stars, Some(serde_json::json!(5)));

        // A fresh project starts from nothing again.
        editor.form_mut().title = "Other".into();
        editor.submit();
        let created = editor.store().get(1).unwrap();
        assert_eq!(created.slug_str(), None);
        assert!(created.extra.is_empty());
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut editor = editor();
        editor.store().create(RawProjectRecord::new().with_title("Doomed"));

        assert_eq!(editor.delete(|_| true), EditOutcome::Unchanged);

        editor.select(Some(0));
        let mut asked = String::new();
        assert_eq!(
            editor.delete(|prompt| {
                asked = prompt.to_string();
                false
            }),
            EditOutcome::Unchanged
        );
        assert_eq!(asked, "Delete this project?");
        assert_eq!(editor.store().len(), 1);

        assert_eq!(editor.delete(|_| true), EditOutcome::Deleted(0));
        assert!(editor.store().is_empty());
        assert_eq!(
            editor.status_message(),
            "Deleted \"Doomed\". Changes visible on next project load."
        );
        assert_eq!(editor.confirmation(), "✓ Project deleted");
        assert_eq!(editor.mode(), EditMode::Creating);
    }
}
