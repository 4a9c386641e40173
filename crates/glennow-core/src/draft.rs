//! Editable form state for creating or editing a project.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::{Project, ProjectTag};
use crate::validate::{validate_source_url, validate_title};

/// The fields an administrator fills in before saving a project.
///
/// Sources and images are kept newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub contact_email: String,
    pub sources: Vec<String>,
    pub images: Vec<String>,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Pre-fills a draft from a stored project for editing.
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            contact_email: project.contact_email.clone(),
            sources: project.sources.clone(),
            images: project.images.clone(),
        }
    }

    /// Adds a source link to the front of the list.
    ///
    /// Blank input is ignored. Anything not starting with `http://` or
    /// `https://` is rejected and the list is left unchanged.
    pub fn add_source(&mut self, source: &str) -> Result<(), ValidationError> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(());
        }
        validate_source_url(source)?;
        self.sources.insert(0, source.to_string());
        Ok(())
    }

    /// Adds an image URI to the front of the list. Blank input is ignored.
    pub fn add_image(&mut self, uri: &str) {
        let uri = uri.trim();
        if !uri.is_empty() {
            self.images.insert(0, uri.to_string());
        }
    }

    pub fn remove_source(&mut self, index: usize) {
        if index < self.sources.len() {
            self.sources.remove(index);
        }
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Builds the record a form save hands to
    /// [`lifecycle::submit`](crate::lifecycle::submit).
    ///
    /// When editing, identity and lifecycle fields (`id`, `created_at`,
    /// `verified`, `inactive`, `tag`) come from `initial`. A new record gets a
    /// fresh id and `now` as its creation time.
    pub fn into_project(
        self,
        initial: Option<&Project>,
        now: DateTime<Utc>,
    ) -> Result<Project, ValidationError> {
        let title = validate_title(&self.title)?;

        let (id, created_at, verified, inactive, tag) = match initial {
            Some(p) => (p.id.clone(), p.created_at, p.verified, p.inactive, p.tag),
            None => (
                Uuid::new_v4().to_string(),
                now,
                false,
                false,
                ProjectTag::Untagged,
            ),
        };

        Ok(Project {
            id,
            title,
            description: self.description.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
            sources: self.sources,
            images: self.images,
            created_at,
            updated_at: now,
            tag,
            inactive,
            verified,
        })
    }
}
