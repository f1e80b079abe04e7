//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod directory;
pub mod error;
pub mod hub;
pub mod import;
pub mod query;
pub mod session;

pub use config::{
    AgentdirConfig, DirectoryMode, SelectedOrganization, validate_config_key,
    validate_config_value,
};
pub use directory::{DirectoryContext, DirectoryStatus, RecordRef, SearchRequest, SearchResults};
pub use error::{ConfigError, DirectoryError, ImportError};
pub use hub::{ListingQuery, RecordFilter};
pub use session::{Session, SessionFile};
