use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use super::{ExtractReport, create_dir, write_file};
use crate::error::{Error, Result};
use crate::sanitize::sanitize_entry;

/// Stream a gzip-compressed tar into `dest`.
///
/// Entries are checked as they are read, so an unsafe entry late in the
/// archive stops extraction after earlier entries were written.
pub(super) fn extract<R: Read>(reader: R, dest: &Path) -> Result<ExtractReport> {
    let mut archive = ::tar::Archive::new(GzDecoder::new(BufReader::new(reader)));
    let mut report = ExtractReport::default();

    let entries = archive.entries().map_err(corrupted)?;
    for entry in entries {
        let mut entry = entry.map_err(corrupted)?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();

        let Some(relative) = sanitize_entry(&name)? else {
            continue;
        };
        let target = dest.join(relative);
        let mode = entry.header().mode().ok();
        let kind = entry.header().entry_type();

        if kind.is_dir() {
            create_dir(&target, mode)?;
            report.directories += 1;
        } else if kind.is_file() {
            report.bytes += write_file(&target, mode, &mut entry)?;
            report.files += 1;
        } else {
            debug!(entry = %name, ?kind, "skipping non-regular entry");
            report.skipped += 1;
        }
    }

    Ok(report)
}

fn corrupted(e: std::io::Error) -> Error { Error::Corrupted(e.to_string()) }
