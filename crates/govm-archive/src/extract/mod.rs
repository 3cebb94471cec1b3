use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::format::ArchiveKind;

mod tar;
mod zip;

/// What an extraction wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub files:       usize,
    pub directories: usize,
    pub bytes:       u64,
    /// Entries that were neither files nor directories (tar links, devices).
    pub skipped:     usize,
}

/// Extract a `.tar.gz` or `.zip` Go distribution into `install_dir`.
///
/// The kind is resolved from the file name before anything is opened, so an
/// unsupported suffix never touches the filesystem. An unsafe entry aborts
/// the whole extraction; entries already written before it are left behind.
pub fn extract(archive: impl AsRef<Path>, install_dir: impl AsRef<Path>) -> Result<ExtractReport> {
    let archive = archive.as_ref();
    let install_dir = install_dir.as_ref();
    let kind = ArchiveKind::from_path(archive)?;

    debug!(archive = %archive.display(), dest = %install_dir.display(), %kind, "extracting");

    let file = File::open(archive).map_err(|source| Error::ExtractionFailed {
        path: archive.to_path_buf(),
        source,
    })?;

    let report = match kind {
        ArchiveKind::TarGz => self::tar::extract(file, install_dir)?,
        ArchiveKind::Zip => self::zip::extract(file, install_dir)?,
    };

    create_dir(install_dir, None)?;
    info!(
        dest = %install_dir.display(),
        files = report.files,
        dirs = report.directories,
        bytes = report.bytes,
        "extraction complete"
    );
    Ok(report)
}

/// Create `path` and missing parents, applying `mode` to the ones created.
fn create_dir(path: &Path, mode: Option<u32>) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        if let Some(mode) = mode {
            builder.mode(mode & 0o7777);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(path)
        .map_err(|source| Error::DirectoryCreationFailed { path: path.to_path_buf(), source })
}

/// Stream `content` into `target` created with `mode`, returning bytes written.
fn write_file(target: &Path, mode: Option<u32>, content: &mut impl Read) -> Result<u64> {
    if let Some(parent) = target.parent() {
        create_dir(parent, None)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if let Some(mode) = mode {
            options.mode(mode & 0o7777);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    let fail = |source: io::Error| Error::ExtractionFailed { path: target.to_path_buf(), source };
    let mut out = options.open(target).map_err(fail)?;
    io::copy(content, &mut out).map_err(fail)
}
