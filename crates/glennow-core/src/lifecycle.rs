//! Project lifecycle rules.
//!
//! Every function here is pure: it takes the full prior state and returns the
//! full new state. Callers persist the result with
//! [`ProjectRepository::replace_all`](crate::ProjectRepository::replace_all).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::draft::ProjectDraft;
use crate::error::ValidationError;
use crate::types::{Banner, Project, ProjectTag};
use crate::validate::validate_title;

/// Creates a brand-new project from a draft.
///
/// The draft's title must be non-empty after trimming. Source links are
/// expected to have been checked when they were added to the draft.
pub fn create(draft: ProjectDraft, now: DateTime<Utc>) -> Result<Project, ValidationError> {
    let title = validate_title(&draft.title)?;

    Ok(Project {
        id: Uuid::new_v4().to_string(),
        title,
        description: draft.description.trim().to_string(),
        contact_email: draft.contact_email.trim().to_string(),
        sources: draft.sources,
        images: draft.images,
        created_at: now,
        updated_at: now,
        tag: ProjectTag::New,
        inactive: false,
        verified: false,
    })
}

/// Combines a stored project with edited values.
///
/// The edited record wins except that:
/// - a `New` tag is consumed, any other tag is kept from `existing`
/// - `inactive` and `created_at` always come from `existing`
/// - `updated_at` is set to `now`
pub fn merge(existing: &Project, edited: Project, now: DateTime<Utc>) -> Project {
    debug_assert_eq!(existing.id, edited.id, "merge requires matching ids");

    let tag = match existing.tag {
        ProjectTag::New => ProjectTag::Untagged,
        other => other,
    };

    Project {
        tag,
        inactive: existing.inactive,
        created_at: existing.created_at,
        updated_at: now,
        ..edited
    }
}

/// Flips the inactive flag.
///
/// Deactivating sets the `Inactive` tag. Reactivating clears the tag no
/// matter what it was, so a `New` badge does not survive a round trip.
pub fn toggle_inactive(existing: &Project) -> Project {
    let inactive = !existing.inactive;
    let tag = if inactive {
        ProjectTag::Inactive
    } else {
        ProjectTag::Untagged
    };

    Project {
        inactive,
        tag,
        ..existing.clone()
    }
}

/// Removes the project with `id`. Returns an equal list when there is none.
pub fn delete(list: &[Project], id: &str) -> Vec<Project> {
    list.iter().filter(|p| p.id != id).cloned().collect()
}

/// Replaces the banner wholesale.
pub fn apply_banner(_current: &Banner, patch: Banner) -> Banner {
    patch
}

/// Saves a project coming out of the edit form into the list.
///
/// An existing entry with the same id is merged in place. Otherwise the
/// project is prepended, tagged `New` and active.
pub fn submit(list: &[Project], project: Project, now: DateTime<Utc>) -> Vec<Project> {
    if list.iter().any(|p| p.id == project.id) {
        return list
            .iter()
            .map(|p| {
                if p.id == project.id {
                    merge(p, project.clone(), now)
                } else {
                    p.clone()
                }
            })
            .collect();
    }

    let mut updated = Vec::with_capacity(list.len() + 1);
    updated.push(Project {
        tag: ProjectTag::New,
        inactive: false,
        ..project
    });
    updated.extend_from_slice(list);
    updated
}

/// Applies [`toggle_inactive`] to the entry with `id`, if any.
pub fn toggle_in_list(list: &[Project], id: &str) -> Vec<Project> {
    list.iter()
        .map(|p| {
            if p.id == id {
                toggle_inactive(p)
            } else {
                p.clone()
            }
        })
        .collect()
}
