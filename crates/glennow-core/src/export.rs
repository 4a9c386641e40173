//! Text handed to the share sheet and the mail composer.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ValidationError;
use crate::types::{ChangeRequest, FieldKind, FieldValue, Project};

/// Recipient of all change requests.
pub const ADMIN_EMAIL: &str = "lafaceg@etown.edu";

/// Formats a timestamp the way the records were stored: UTC, millisecond
/// precision, `Z` suffix.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Plain-text export of a project.
pub fn export_text(project: &Project) -> String {
    format!(
        "GlenNOW Project Export\n\n\
         Title: {}\n\n\
         Description:\n{}\n\n\
         Contact: {}\n\n\
         Sources:\n{}\n\n\
         Created: {}\n\
         Last edited: {}\n",
        project.title,
        project.description,
        project.contact_email,
        project.sources.join("\n"),
        iso_timestamp(&project.created_at),
        iso_timestamp(&project.updated_at),
    )
}

/// Suggested file name for [`export_text`].
pub fn export_title(project: &Project) -> String {
    format!("GlenNOW_{}.txt", project.title)
}

/// `mailto:` link for the project's developer, if an address was given.
pub fn contact_mailto(project: &Project) -> Option<String> {
    if project.contact_email.is_empty() {
        None
    } else {
        Some(format!("mailto:{}", project.contact_email))
    }
}

impl ChangeRequest {
    /// Rejects URL fields that are filled in but do not start with `http`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in &self.fields {
            if field.kind != FieldKind::Url {
                continue;
            }
            let bad = match &field.value {
                FieldValue::Text(s) => !s.is_empty() && !s.starts_with("http"),
                FieldValue::List(items) => {
                    items.iter().any(|s| !s.is_empty() && !s.starts_with("http"))
                }
            };
            if bad {
                return Err(ValidationError::InvalidRequestUrl {
                    label: field.label.clone(),
                });
            }
        }
        Ok(())
    }

    /// Mail body: one `name: value` line per field, then the timestamp and
    /// request type.
    pub fn body(&self) -> String {
        let mut lines: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.name, f.value))
            .collect();
        lines.push(format!("timestamp: {}", iso_timestamp(&self.timestamp)));
        lines.push(format!("type: {}", self.title));
        lines.join("\n")
    }

    /// `mailto:` link addressed to [`ADMIN_EMAIL`] with the title as subject.
    pub fn mailto(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            ADMIN_EMAIL,
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.body()),
        )
    }
}
