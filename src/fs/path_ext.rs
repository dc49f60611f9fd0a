use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use super::{
    build::{self, DEFAULT_DIR_MODE},
    walk::{self, DeletePolicy, Visibility},
};
use crate::path;

/// Options for controlling [`PathExt::mkdir`]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MkdirOptions {
    /// Equivalent of `mkdir $path`.
    WithoutParents,
    /// Equivalent of `mkdir -p $path`.
    WithParents,
}

mod sealed {
    use std::path::Path;

    pub trait Sealed {}
    impl Sealed for Path {}
}

/// Extension trait for [`Path`] with the helpers of this crate as methods.
///
/// Everything here forwards to a free function from [`crate::fs`] or [`crate::path`].
///
/// ```rust,no_run
/// # use pathkit::fs::*;
/// # use std::path::Path;
/// # fn get_path() -> ! { loop {} }
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path: &Path = get_path();
/// path.mkdir(MkdirOptions::WithParents)?;
///
/// for file in path.list_files(Visibility::Visible) {
///     println!("{}", file.display());
/// }
///
/// let removed = path.delete_recursive(DeletePolicy::StopOnError)?;
/// println!("removed {removed} files");
/// # Ok(())
/// # }
/// ```
pub trait PathExt: sealed::Sealed {
    /// Create directories at given [`Path`], with mode [`DEFAULT_DIR_MODE`].
    ///
    /// # Returns
    /// [`Ok(())`](Ok) if created successfully or if something already exists there, otherwise
    /// error, as reported by [`DirBuilder::create`](std::fs::DirBuilder::create).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use pathkit::fs::*;
    /// # use std::path::PathBuf;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let buf = PathBuf::from("a/b");
    /// let path = buf.as_path();
    /// path.mkdir(MkdirOptions::WithParents)?;
    /// # Ok(())
    /// # }
    /// ```
    fn mkdir(&self, opts: MkdirOptions) -> io::Result<()>;

    /// See [`mkdir_if_not_exists`](build::mkdir_if_not_exists).
    fn mkdir_if_not_exists(&self) -> io::Result<()>;

    /// See [`soft_realpath`](path::soft_realpath).
    fn soft_realpath(&self) -> PathBuf;

    /// See [`file_is_hidden`](path::file_is_hidden).
    fn is_hidden(&self) -> bool;

    /// See [`dir_is_empty`](walk::dir_is_empty).
    fn is_empty_dir(&self) -> bool;

    /// See [`exists_and_is_readable`](build::exists_and_is_readable).
    fn is_readable(&self) -> bool;

    /// See [`list_files_in_dir`](walk::list_files_in_dir).
    fn list_files(&self, visibility: Visibility) -> Vec<PathBuf>;

    /// See [`recursive_delete`](walk::recursive_delete).
    fn delete_recursive(&self, policy: DeletePolicy) -> io::Result<usize>;

    /// See [`file_modify_times`](walk::file_modify_times).
    fn modify_times(&self) -> io::Result<BTreeMap<PathBuf, SystemTime>>;

    /// Append `source` to `self`, see [`concat`](build::concat).
    fn append_from(&self, source: impl AsRef<Path>) -> io::Result<()>;

    /// Expand a leading `~` into `$HOME`.
    ///
    /// Fails if `self` is not an `UTF-8` path.
    ///
    /// This function requires __expand-user__ feature.
    #[cfg(feature = "expand-user")]
    #[cfg_attr(docsrs, doc(cfg(feature = "expand-user")))]
    fn expand_user(&self) -> io::Result<PathBuf>;

    /// Resolve symlinks of the longest existing prefix of `self`, and normalize the rest
    /// lexically.
    ///
    /// Unlike [`std::fs::canonicalize`], this function __doesn't__ fail, if `self` points to
    /// non-existing file. Unlike [`soft_realpath`](PathExt::soft_realpath), the result is
    /// always absolute.
    ///
    /// This function requires __full-resolve__ feature.
    #[cfg(feature = "full-resolve")]
    #[cfg_attr(docsrs, doc(cfg(feature = "full-resolve")))]
    fn resolve(&self) -> io::Result<PathBuf>;

    /// Canonicalize `self` fully: expand `~` into a `$HOME`, then [`resolve`](PathExt::resolve).
    ///
    /// This function requires __full__ feature.
    #[cfg(all(feature = "expand-user", feature = "full-resolve"))]
    #[cfg_attr(docsrs, doc(cfg(feature = "full")))]
    fn full_canonicalize(&self) -> io::Result<PathBuf>;
}

impl PathExt for Path {
    fn mkdir(&self, opts: MkdirOptions) -> io::Result<()> {
        build::create_dir(self, DEFAULT_DIR_MODE, opts)
    }

    fn mkdir_if_not_exists(&self) -> io::Result<()> {
        build::mkdir_if_not_exists(self)
    }

    fn soft_realpath(&self) -> PathBuf {
        path::soft_realpath(self)
    }

    fn is_hidden(&self) -> bool {
        path::file_is_hidden(self)
    }

    fn is_empty_dir(&self) -> bool {
        walk::dir_is_empty(self)
    }

    fn is_readable(&self) -> bool {
        build::exists_and_is_readable(self)
    }

    fn list_files(&self, visibility: Visibility) -> Vec<PathBuf> {
        walk::list_files_in_dir(self, visibility)
    }

    fn delete_recursive(&self, policy: DeletePolicy) -> io::Result<usize> {
        walk::recursive_delete(self, policy)
    }

    fn modify_times(&self) -> io::Result<BTreeMap<PathBuf, SystemTime>> {
        walk::file_modify_times(self)
    }

    fn append_from(&self, source: impl AsRef<Path>) -> io::Result<()> {
        build::concat(self, source)
    }

    #[cfg(feature = "expand-user")]
    fn expand_user(&self) -> io::Result<PathBuf> {
        use shellexpand::tilde;
        let Some(as_str) = self.to_str() else {
            return Err(io::Error::other("path is not an UTF-8 string"));
        };
        Ok(PathBuf::from(tilde(as_str).into_owned()))
    }

    #[cfg(feature = "full-resolve")]
    fn resolve(&self) -> io::Result<PathBuf> {
        use soft_canonicalize::soft_canonicalize;
        soft_canonicalize(self)
    }

    #[cfg(all(feature = "expand-user", feature = "full-resolve"))]
    fn full_canonicalize(&self) -> io::Result<PathBuf> {
        self.expand_user()?.resolve()
    }
}
