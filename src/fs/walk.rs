use std::{
    collections::BTreeMap,
    fs::{read_dir, remove_dir, remove_file},
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use walkdir::{DirEntry, WalkDir};

use crate::path::file_is_hidden;

/// Whether listings should include hidden files.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub enum Visibility {
    /// Skip files for which [`file_is_hidden`] holds.
    #[default]
    Visible,
    /// Equivalent of `ls -a`.
    All,
}

/// What [`recursive_delete`] does when an entry can't be removed.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Return the first error. Entries removed up to that point stay removed.
    StopOnError,
    /// Log the failure and carry on with the remaining entries.
    #[default]
    BestEffort,
}

impl DeletePolicy {
    fn handle(self, path: &Path, err: io::Error) -> io::Result<()> {
        match self {
            Self::StopOnError => Err(err),
            Self::BestEffort => {
                tracing::warn!(path = %path.display(), error = %err, "failed to remove, continuing");
                Ok(())
            }
        }
    }
}

/// List files below `path`, recursively and sorted.
///
/// Regular files are listed, and so are symlinks pointing at one. Symlinked directories are not
/// descended into. Missing directories, as well as entries which can't be read, yield nothing
/// instead of an error.
///
/// Note that hidden-ness is decided on the full path: with [`Visibility::Visible`] nothing is
/// listed below a directory whose own path contains a hidden segment.
pub fn list_files_in_dir(path: impl AsRef<Path>, visibility: Visibility) -> Vec<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
        })
        .map(DirEntry::into_path)
        .filter(|file| matches!(visibility, Visibility::All) || !file_is_hidden(file))
        .collect();

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files
}

/// Delete `path` and everything below it, children before their parents.
///
/// # Returns
/// Number of files and symlinks removed; directories are not counted. `Ok(0)` if there is nothing
/// at `path`. Errors are handled according to `policy`, so with [`DeletePolicy::BestEffort`]
/// this never fails.
pub fn recursive_delete(path: impl AsRef<Path>, policy: DeletePolicy) -> io::Result<usize> {
    let path = path.as_ref();
    let Ok(metadata) = path.symlink_metadata() else {
        return Ok(0);
    };
    if !metadata.is_dir() {
        let counted = usize::from(metadata.is_file() || metadata.is_symlink());
        return match remove_file(path) {
            Ok(()) => Ok(counted),
            Err(err) => policy.handle(path, err).map(|()| 0),
        };
    }

    let mut removed = 0;
    for entry in WalkDir::new(path)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let failed = err.path().unwrap_or(path).to_path_buf();
                policy.handle(&failed, err.into())?;
                continue;
            }
        };
        let file_type = entry.file_type();
        let result = if file_type.is_dir() {
            remove_dir(entry.path())
        } else {
            remove_file(entry.path()).map(|()| {
                if file_type.is_file() || file_type.is_symlink() {
                    removed += 1;
                }
            })
        };
        if let Err(err) = result {
            policy.handle(entry.path(), err)?;
        }
    }

    if let Err(err) = remove_dir(path) {
        policy.handle(path, err)?;
    }
    Ok(removed)
}

/// Returns `true` if `path` is a directory without any entries.
///
/// Missing paths, files and unreadable directories are not empty directories.
pub fn dir_is_empty(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_dir()
        && read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
}

/// Last modification time of every file [`list_files_in_dir`] finds below `path`.
///
/// Hidden files are skipped. A missing `path` gives an empty map.
pub fn file_modify_times(path: impl AsRef<Path>) -> io::Result<BTreeMap<PathBuf, SystemTime>> {
    list_files_in_dir(path, Visibility::Visible)
        .into_iter()
        .map(|file| {
            let modified = file.metadata()?.modified()?;
            Ok((file, modified))
        })
        .collect()
}
