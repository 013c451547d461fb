//! Filesystem helpers for Trailmark built on `cap-std` and `camino`.
//!
//! Paths arrive from the command line or configuration as UTF-8 strings and
//! may be absolute or relative. Each helper resolves an ambient directory for
//! the path once and performs the operation through that capability.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading using ambient authority.
///
/// # Errors
/// Returns the underlying IO error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file as UTF-8, returning `None` when it or its parent
/// directory does not exist.
///
/// # Errors
/// Returns IO errors other than [`io::ErrorKind::NotFound`].
pub fn read_optional(path: &Utf8Path) -> io::Result<Option<String>> {
    let read = open_dir_and_file(path).and_then(|(dir, name)| dir.read_to_string(name.as_str()));
    match read {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the file at `path` with `contents`.
///
/// The bytes are written to a hidden sibling first and renamed over the
/// target, so readers never observe a partially written file. The parent
/// directory must already exist; see [`ensure_parent_dir`].
///
/// # Errors
/// Returns the first IO error raised while writing or renaming.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let (dir, name) = open_dir_and_file(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(staging.as_str(), contents)?;
    dir.rename(staging.as_str(), &dir, name.as_str())
        .inspect_err(|_| {
            // The staging file is disposable.
            let _ignored = dir.remove_file(staging.as_str());
        })
}

/// Resolve the ambient directory containing `path` and return it with the
/// file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} should include a file name")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists.
///
/// # Errors
/// Returns the IO error raised while creating the directory chain.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Report whether `path` exists and is a regular file.
///
/// # Errors
/// Returns [`io::ErrorKind::NotFound`] when the path or its parent is missing.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Open the anchor of `parent` (its root, drive prefix or `.`) and return it
/// with the remaining relative components.
fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let (anchor, relative) = split_anchor(parent);
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}

fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => anchor.push(component),
            _ => relative.push(component),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    (anchor, relative)
}
