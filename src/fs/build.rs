use std::{
    ffi::{OsStr, OsString},
    fs::{DirBuilder, OpenOptions, read},
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::path_ext::MkdirOptions;

/// Mode used by [`mkdir_if_not_exists`] for new directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Written by [`concat`] between the existing content and the appended one.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Create a directory at `path` with `mode`, treating an existing one as success.
///
/// `mode` only has an effect on `unix`, where it's still subject to the umask.
pub(crate) fn create_dir(path: &Path, mode: u32, opts: MkdirOptions) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(matches!(opts, MkdirOptions::WithParents));
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    match builder.create(path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        result => result,
    }
}

/// [`mkdir_if_not_exists_with`] using [`DEFAULT_DIR_MODE`] and creating missing parents.
pub fn mkdir_if_not_exists(path: impl AsRef<Path>) -> io::Result<()> {
    mkdir_if_not_exists_with(path, DEFAULT_DIR_MODE, MkdirOptions::WithParents)
}

/// Create a directory at `path`, unless something already exists there.
///
/// Anything counts: if `path` is a regular file, this is a no-op as well and no error is
/// returned.
///
/// # Returns
/// Error as reported by [`DirBuilder::create`], except for
/// [`ErrorKind::AlreadyExists`](io::ErrorKind::AlreadyExists).
pub fn mkdir_if_not_exists_with(
    path: impl AsRef<Path>,
    mode: u32,
    opts: MkdirOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    if path.exists() {
        if !path.is_dir() {
            tracing::debug!(path = %path.display(), "not a directory, leaving it alone");
        }
        return Ok(());
    }
    create_dir(path, mode, opts)
}

/// Call [`mkdir_if_not_exists`] on `base` followed by each of `folders`.
///
/// Names are appended to `base` as plain strings, so `base` usually ends with a separator. Missing
/// parents, `base` included, are created.
///
/// ```rust,no_run
/// # use pathkit::fs::mkdirs;
/// # fn main() -> std::io::Result<()> {
/// mkdirs(["pie", "cake", "icecream"], "desserts/")?;
/// # Ok(())
/// # }
/// ```
pub fn mkdirs<I>(folders: I, base: impl AsRef<OsStr>) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    let base = base.as_ref();
    for folder in folders {
        let mut path = OsString::from(base);
        path.push(folder);
        mkdir_if_not_exists(PathBuf::from(path))?;
    }
    Ok(())
}

/// Returns `true` if `path` exists and the current process may read it.
pub fn exists_and_is_readable(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.exists() && can_read(path)
}

#[cfg(unix)]
fn can_read(path: &Path) -> bool {
    use std::{ffi::CString, os::unix::ffi::OsStrExt};
    let Ok(raw) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `raw` is a valid NUL-terminated string, alive for the whole call.
    unsafe { libc::access(raw.as_ptr(), libc::R_OK) == 0 }
}

#[cfg(not(unix))]
fn can_read(path: &Path) -> bool {
    if path.is_dir() {
        std::fs::read_dir(path).is_ok()
    } else {
        std::fs::File::open(path).is_ok()
    }
}

/// Append the content of `source` to `target`.
///
/// `target` is created if it isn't a file yet. If it already was one, [`LINE_SEPARATOR`] is
/// written before the new content.
///
/// `source` is read completely before `target` is opened, so appending a file to itself is fine
/// and a missing `source` leaves `target` untouched.
pub fn concat(target: impl AsRef<Path>, source: impl AsRef<Path>) -> io::Result<()> {
    let target = target.as_ref();
    let content = read(source)?;
    let existed = target.is_file();

    let mut file = OpenOptions::new().append(true).create(true).open(target)?;
    if existed {
        file.write_all(LINE_SEPARATOR.as_bytes())?;
    }
    file.write_all(&content)?;
    file.flush()
}

/// Keep only the `paths` which exist, sorted.
pub fn filter_exists<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut existing: Vec<PathBuf> = paths
        .into_iter()
        .map(|path| path.as_ref().to_path_buf())
        .filter(|path| path.exists())
        .collect();
    existing.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    existing
}
