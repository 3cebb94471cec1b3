use std::path::PathBuf;

use crate::error::{Error, Result};

/// Map an archive entry name to a path relative to the install directory.
///
/// Strips exactly one leading `go/` or `go\`. Returns `None` for the root
/// entry itself. Names that are absolute or contain a `..` segment fail with
/// [`Error::UnsafePath`] carrying the name as it appears in the archive.
pub fn sanitize_entry(name: &str) -> Result<Option<PathBuf>> {
    let unsafe_path = || Error::UnsafePath { entry: name.to_string() };

    let stripped = name
        .strip_prefix("go/")
        .or_else(|| name.strip_prefix("go\\"))
        .unwrap_or(name);

    if is_absolute(stripped) {
        return Err(unsafe_path());
    }

    let mut relative = PathBuf::new();
    for segment in stripped.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => return Err(unsafe_path()),
            part => relative.push(part),
        }
    }

    Ok((!relative.as_os_str().is_empty()).then_some(relative))
}

/// Absolute on any platform: a leading separator or a drive letter.
fn is_absolute(name: &str) -> bool {
    if name.starts_with(['/', '\\']) {
        return true;
    }
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
