//! Pathkit - a toolkit of small filesystem and path helpers.
//!
//! [`path`] holds the lexical side: normalizing paths without touching the disk, hidden-file
//! detection, extension and prefix stripping, and filename pattern matching. [`fs`] holds the
//! side effects: recursive listing and deletion, idempotent directory creation and file
//! concatenation.
//!
//! Every function is stateless and synchronous. Nothing is locked, so callers touching the same
//! paths from several threads or processes have to serialize access themselves.

pub mod fs;
pub mod path;
