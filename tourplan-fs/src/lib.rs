//! Capability-based file helpers for Tourplan input and cache files.
//!
//! Every path is resolved against an ambient directory handle from
//! `cap-std`, so callers pass plain UTF-8 paths while all reads and writes
//! go through `fs_utf8::Dir`.
#![forbid(unsafe_code)]

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Read a whole UTF-8 file.
///
/// # Errors
/// Returns any I/O error from opening or reading `path`.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating parent directories as needed and
/// replacing any existing file.
///
/// # Errors
/// Returns any I/O error from creating directories or writing the file.
pub fn write_string(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name.as_str(), contents)
}

/// Whether `path` names an existing regular file.
///
/// A missing file or missing parent directory is `Ok(false)`.
///
/// # Errors
/// Returns I/O errors other than `NotFound`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let result = open_parent(path).and_then(|(dir, name)| dir.metadata(name.as_str()));
    match result {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Returns any I/O error from opening the base directory or creating the
/// missing components.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Open the directory holding `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    let parent = match path.parent() {
        Some(p) if !p.as_str().is_empty() => p,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split a directory path into an ambient root handle and the relative
/// remainder beneath it.
fn split_base(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_dir = dir.as_std_path();
    let (base, relative) = match std_dir.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR_STR);
            let rest = std_dir
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip drive prefix"))?;
            (base, rest.to_path_buf())
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR);
            let rest = std_dir
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root"))?;
            (base, rest.to_path_buf())
        }
        _ => (Utf8PathBuf::from("."), std_dir.to_path_buf()),
    };
    let handle = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 directory path"))?;
    Ok((handle, relative))
}
