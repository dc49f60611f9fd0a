//! Filesystem utilities and extensions.
//!
//! Directory walking and deletion live in [`walk`], directory and file creation in [`build`].
//! [`PathExt`](path_ext::PathExt) exposes all of it as methods on [`Path`](std::path::Path).

pub mod build;
pub mod path_ext;
pub mod walk;

pub use build::{
    DEFAULT_DIR_MODE, LINE_SEPARATOR, concat, exists_and_is_readable, filter_exists,
    mkdir_if_not_exists, mkdir_if_not_exists_with, mkdirs,
};
pub use path_ext::{MkdirOptions, PathExt};
pub use walk::{
    DeletePolicy, Visibility, dir_is_empty, file_modify_times, list_files_in_dir, recursive_delete,
};
