//! Record types stored by GlenNOW.
//!
//! Field names serialize in camelCase so the stored JSON matches the layout
//! the mobile app wrote to its local storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::export::iso_timestamp;

/// Default banner background color.
pub const DEFAULT_BANNER_COLOR: &str = "#cccccc";

/// Transient display badge carried by a project.
///
/// Stored as an optional string (`"NEW"`, `"Inactive"` or absent). Any other
/// stored string reads back as `Untagged`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ProjectTag {
    #[default]
    Untagged,
    /// Set on creation, consumed by the first edit.
    New,
    /// Set while the project is marked inactive.
    Inactive,
}

impl ProjectTag {
    pub fn is_untagged(&self) -> bool {
        matches!(self, ProjectTag::Untagged)
    }

    /// The badge text, or `None` when untagged.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ProjectTag::Untagged => None,
            ProjectTag::New => Some("NEW"),
            ProjectTag::Inactive => Some("Inactive"),
        }
    }
}

impl From<Option<String>> for ProjectTag {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("NEW") => ProjectTag::New,
            Some("Inactive") => ProjectTag::Inactive,
            None => ProjectTag::Untagged,
            Some(other) => {
                tracing::debug!(tag = other, "Ignoring unknown project tag");
                ProjectTag::Untagged
            }
        }
    }
}

impl From<ProjectTag> for Option<String> {
    fn from(tag: ProjectTag) -> Self {
        tag.label().map(str::to_string)
    }
}

/// Writes timestamps as `toISOString()` does: milliseconds and a `Z` suffix.
fn serialize_timestamp<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&iso_timestamp(at))
}

/// One archived development project.
///
/// Reading goes through [`StoredProject`], which accepts the looser shapes
/// older app versions left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredProject")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_email: String,
    /// Source links, newest first.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Image URIs, newest first.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "ProjectTag::is_untagged")]
    pub tag: ProjectTag,
    #[serde(default)]
    pub inactive: bool,
    #[serde(default)]
    pub verified: bool,
}

/// Ids were written as strings, but a numeric id still reads.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Text(String),
    Number(serde_json::Number),
}

/// A project record as found in storage.
///
/// `null` or missing fields take their defaults and a missing `updatedAt`
/// falls back to `createdAt`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProject {
    id: StoredId,
    title: Option<String>,
    description: Option<String>,
    contact_email: Option<String>,
    sources: Option<Vec<String>>,
    images: Option<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    tag: ProjectTag,
    inactive: Option<bool>,
    verified: Option<bool>,
}

impl From<StoredProject> for Project {
    fn from(stored: StoredProject) -> Self {
        let id = match stored.id {
            StoredId::Text(id) => id,
            StoredId::Number(n) => n.to_string(),
        };
        Self {
            id,
            title: stored.title.unwrap_or_default(),
            description: stored.description.unwrap_or_default(),
            contact_email: stored.contact_email.unwrap_or_default(),
            sources: stored.sources.unwrap_or_default(),
            images: stored.images.unwrap_or_default(),
            created_at: stored.created_at,
            updated_at: stored.updated_at.unwrap_or(stored.created_at),
            tag: stored.tag,
            inactive: stored.inactive.unwrap_or_default(),
            verified: stored.verified.unwrap_or_default(),
        }
    }
}

/// Site-wide announcement shown above the project list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub text: String,
    /// Hex-like color string, not validated.
    pub color: String,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: DEFAULT_BANNER_COLOR.to_string(),
        }
    }
}

impl Banner {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }

    /// Whether the banner has anything to show.
    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Value entered into a change-request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// How a request field is checked before sending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Url,
}

/// One named field of a change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    #[serde(default)]
    pub kind: FieldKind,
}

impl RequestField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            value: FieldValue::Text(value.into()),
            kind: FieldKind::Text,
        }
    }

    pub fn url(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Url,
            ..Self::text(name, value)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A change request mailed to the archive administrator.
///
/// `title` doubles as the request type and the mail subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub title: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<RequestField>,
}

impl ChangeRequest {
    pub fn new(title: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            timestamp,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: RequestField) -> Self {
        self.fields.push(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        let at: DateTime<Utc> = "2024-01-15T10:30:00Z".parse().unwrap();
        Project {
            id: "1705314600000".to_string(),
            title: "Verizon Store".to_string(),
            description: "Retail build-out".to_string(),
            contact_email: "dev@example.com".to_string(),
            sources: vec!["https://example.com/plans".to_string()],
            images: vec![],
            created_at: at,
            updated_at: at,
            tag: ProjectTag::New,
            inactive: false,
            verified: false,
        }
    }

    #[test]
    fn test_project_serializes_camel_case() {
        let json = serde_json::to_string(&sample_project()).unwrap();
        assert!(json.contains("\"contactEmail\":\"dev@example.com\""));
        assert!(json.contains("\"createdAt\":"));
        assert!(json.contains("\"updatedAt\":"));
        assert!(json.contains("\"tag\":\"NEW\""));
    }

    #[test]
    fn test_untagged_project_omits_tag() {
        let mut project = sample_project();
        project.tag = ProjectTag::Untagged;

        let json = serde_json::to_string(&project).unwrap();
        assert!(!json.contains("\"tag\""));
    }

    #[test]
    fn test_project_deserializes_app_record() {
        let json = r#"{
            "id": "1705314600000",
            "title": "Verizon Store",
            "description": "",
            "contactEmail": "",
            "sources": [],
            "images": ["file:///tmp/a.jpg"],
            "createdAt": "2024-01-15T10:30:00.000Z",
            "updatedAt": "2024-01-16T08:00:00.000Z",
            "verified": false,
            "inactive": true,
            "tag": "Inactive"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.tag, ProjectTag::Inactive);
        assert!(project.inactive);
        assert_eq!(project.images, vec!["file:///tmp/a.jpg".to_string()]);
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let json = r#"{
            "id": "a",
            "title": "Bare",
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.description, "");
        assert!(project.sources.is_empty());
        assert_eq!(project.tag, ProjectTag::Untagged);
        assert!(!project.inactive);
        assert!(!project.verified);
    }

    #[test]
    fn test_tag_from_stored_strings() {
        assert_eq!(ProjectTag::from(Some("NEW".to_string())), ProjectTag::New);
        assert_eq!(
            ProjectTag::from(Some("Inactive".to_string())),
            ProjectTag::Inactive
        );
        assert_eq!(ProjectTag::from(None), ProjectTag::Untagged);
        assert_eq!(
            ProjectTag::from(Some("featured".to_string())),
            ProjectTag::Untagged
        );
    }

    #[test]
    fn test_null_tag_reads_as_untagged() {
        let json = r#"{
            "id": "a",
            "title": "Bare",
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z",
            "tag": null
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.tag, ProjectTag::Untagged);
    }

    #[test]
    fn test_missing_updated_at_falls_back_to_created_at() {
        let json = r#"{
            "id": "2",
            "title": "Old",
            "createdAt": "2023-11-02T14:00:00.000Z"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.updated_at, project.created_at);
    }

    #[test]
    fn test_null_fields_and_numeric_id_read_as_defaults() {
        let json = r#"{
            "id": 1705314600000,
            "title": "Verizon Store",
            "description": null,
            "contactEmail": null,
            "sources": null,
            "createdAt": "2024-01-15T10:30:00.000Z",
            "updatedAt": "2024-01-15T10:30:00.000Z",
            "inactive": null
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "1705314600000");
        assert_eq!(project.description, "");
        assert_eq!(project.contact_email, "");
        assert!(project.sources.is_empty());
        assert!(!project.inactive);
    }

    #[test]
    fn test_timestamps_serialize_with_milliseconds() {
        let mut project = sample_project();
        project.updated_at = "2024-01-15T10:30:06.167715015Z".parse().unwrap();

        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains("\"createdAt\":\"2024-01-15T10:30:00.000Z\""));
        assert!(json.contains("\"updatedAt\":\"2024-01-15T10:30:06.167Z\""));

        let request = ChangeRequest::new("Edit Request", project.updated_at);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-01-15T10:30:06.167Z\""));
    }

    #[test]
    fn test_banner_default() {
        let banner = Banner::default();
        assert_eq!(banner.text, "");
        assert_eq!(banner.color, "#cccccc");
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_empty_banner_object_reads_as_default() {
        let banner: Banner = serde_json::from_str("{}").unwrap();
        assert_eq!(banner, Banner::default());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("hi".to_string()).to_string(), "hi");
        assert_eq!(
            FieldValue::List(vec!["a".to_string(), "b".to_string()]).to_string(),
            "a, b"
        );
    }

    #[test]
    fn test_change_request_deserialization() {
        let json = r#"{
            "title": "Edit Request",
            "timestamp": "2024-01-15T10:30:00Z",
            "fields": [
                { "name": "project", "label": "Project", "value": "Verizon Store" },
                { "name": "links", "label": "Links", "value": ["https://a", "https://b"], "kind": "url" }
            ]
        }"#;

        let request: ChangeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.fields.len(), 2);
        assert_eq!(request.fields[0].kind, FieldKind::Text);
        assert_eq!(request.fields[1].kind, FieldKind::Url);
        assert_eq!(
            request.fields[1].value,
            FieldValue::List(vec!["https://a".to_string(), "https://b".to_string()])
        );
    }
}
