// GlenNOW Core - project records, lifecycle rules and persistence

pub mod auth;
pub mod draft;
pub mod error;
pub mod export;
pub mod lifecycle;
pub mod repository;
pub mod store;
pub mod types;
pub mod validate;

pub use auth::{AuthProvider, StaticCredentials};
pub use draft::ProjectDraft;
pub use error::{PersistenceError, StoreError, ValidationError};
pub use export::{contact_mailto, export_text, export_title, iso_timestamp, ADMIN_EMAIL};
pub use lifecycle::{apply_banner, create, delete, merge, submit, toggle_in_list, toggle_inactive};
pub use repository::{BannerRepository, ProjectRepository, RequestLog};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{
    Banner, ChangeRequest, FieldKind, FieldValue, Project, ProjectTag, RequestField,
};
