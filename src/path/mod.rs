//! Lexical path helpers.
//!
//! Nothing in here writes to the filesystem. [`soft_realpath`] and [`file_is_hidden`] may read
//! it to resolve symlinks, everything else is pure string manipulation.

pub mod normalize;
pub mod pattern;

pub use normalize::{
    DEFAULT_EXTENSION, LeadingSeparator, file_is_hidden, normalize_lexically, path_diff,
    remove_extension, remove_extension_or, soft_realpath,
};
pub use pattern::{FilenameMatcher, MaybePattern, PatternError, match_filename};
