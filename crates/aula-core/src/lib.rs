//! aula-core — Core data model, session context, and navigation.
//!
//! This crate defines the curriculum types, the answer record, the
//! session/role context, the page allow-list, and the media provider
//! traits that the rest of the workspace builds on.

pub mod curriculum;
pub mod model;
pub mod nav;
pub mod record;
pub mod session;
pub mod traits;
