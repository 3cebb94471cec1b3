use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use ::zip::ZipArchive;
use ::zip::result::ZipError;

use super::{ExtractReport, create_dir, write_file};
use crate::error::{Error, Result};
use crate::sanitize::sanitize_entry;

/// Extract a zip into `dest`.
///
/// The central directory lists every name up front, so all names are checked
/// before the first write.
pub(super) fn extract<R: Read + Seek>(reader: R, dest: &Path) -> Result<ExtractReport> {
    let mut archive = ZipArchive::new(BufReader::new(reader)).map_err(corrupted)?;

    let targets = (0..archive.len())
        .map(|i| {
            let entry = archive.by_index_raw(i).map_err(corrupted)?;
            sanitize_entry(entry.name())
        })
        .collect::<Result<Vec<Option<PathBuf>>>>()?;

    let mut report = ExtractReport::default();
    for (i, relative) in targets.into_iter().enumerate() {
        let Some(relative) = relative else {
            continue;
        };
        let mut entry = archive.by_index(i).map_err(corrupted)?;
        let target = dest.join(relative);
        let mode = entry.unix_mode();

        if entry.is_dir() {
            create_dir(&target, mode)?;
            report.directories += 1;
        } else {
            report.bytes += write_file(&target, mode, &mut entry)?;
            report.files += 1;
        }
    }

    Ok(report)
}

fn corrupted(e: ZipError) -> Error { Error::Corrupted(e.to_string()) }
