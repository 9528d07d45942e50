//! aula-store — Flat-file persistence.
//!
//! Two stores, both deliberately simple:
//!
//! - [`AnswerLog`]: an append-only CSV of student submissions. Rows are
//!   never updated or deleted, and there is no locking — concurrent
//!   appends can interleave at the OS level.
//! - [`ContentStore`]: one UTF-8 text file per (unit, class, key) triple,
//!   overwritten wholesale on save.

pub mod answers;
pub mod content;
pub mod error;

pub use answers::{escape_response, unescape_response, AnswerLog, AppendOutcome};
pub use content::{sanitize_key, ContentStore};
pub use error::StoreError;
