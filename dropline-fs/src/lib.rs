//! Filesystem helpers for reading stop manifests and writing routes, built
//! on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) a file, creating missing parent directories first.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    if let Some(parent) = non_empty_parent(path) {
        fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())?;
    }
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name)
}

/// Return whether a path exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Open the directory containing `path` and return it with the file name.
fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let parent = non_empty_parent(path).unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} has no file name")))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Parent directory of `path`, or `None` for bare file names.
fn non_empty_parent(path: &Utf8Path) -> Option<&Utf8Path> {
    path.parent().filter(|parent| !parent.as_str().is_empty())
}
