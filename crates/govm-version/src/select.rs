//! Picking the right artifact out of a release list.

use std::cmp::Ordering;

use crate::error::{Result, VersionError};
use crate::release::{File, FileKind, Release};
use crate::version::compare;

/// First release with a native Apple Silicon build.
const DARWIN_ARM64_SINCE: &str = "1.16";

/// Map the requested architecture to the one that has a published build.
///
/// Apple Silicon hosts fall back to the Intel build for releases before 1.16.
pub fn resolve_arch<'a>(version: &str, os: &str, arch: &'a str) -> &'a str {
    if os == "darwin" && arch == "arm64" && compare(version, DARWIN_ARM64_SINCE) == Ordering::Less {
        "amd64"
    } else {
        arch
    }
}

/// Find the archive file for `version` on `os`/`arch`.
///
/// `version` is matched against the catalog's `go`-prefixed spelling, so
/// pass it without the prefix (`1.21.0`, not `go1.21.0`).
pub fn select_file<'r>(releases: &'r [Release], version: &str, os: &str, arch: &str) -> Result<&'r File> {
    let wanted = format!("go{version}");
    let release = releases
        .iter()
        .find(|r| r.version == wanted)
        .ok_or_else(|| VersionError::ReleaseNotFound { version: version.to_string() })?;

    let arch = resolve_arch(version, os, arch);
    release
        .files
        .iter()
        .find(|f| f.os == os && f.arch == arch && f.kind == FileKind::Archive)
        .ok_or_else(|| VersionError::FileNotFound {
            version: version.to_string(),
            os:      os.to_string(),
            arch:    arch.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(version: &str, os: &str, arch: &str, kind: FileKind) -> File {
        let ext = if os == "windows" { "zip" } else { "tar.gz" };
        File {
            filename: format!("{version}.{os}-{arch}.{ext}"),
            os:       os.to_string(),
            arch:     arch.to_string(),
            version:  version.to_string(),
            sha256:   String::new(),
            size:     1,
            kind,
        }
    }

    fn releases() -> Vec<Release> {
        vec![
            Release {
                version: "go1.21.0".into(),
                stable:  true,
                files:   vec![
                    file("go1.21.0", "linux", "amd64", FileKind::Installer),
                    file("go1.21.0", "linux", "amd64", FileKind::Archive),
                    file("go1.21.0", "darwin", "arm64", FileKind::Archive),
                    file("go1.21.0", "windows", "amd64", FileKind::Archive),
                ],
            },
            Release {
                version: "go1.15.9".into(),
                stable:  true,
                files:   vec![file("go1.15.9", "darwin", "amd64", FileKind::Archive)],
            },
        ]
    }

    #[test]
    fn resolve_arch_cases() {
        assert_eq!(resolve_arch("1.15.9", "darwin", "arm64"), "amd64");
        assert_eq!(resolve_arch("1.16.0", "darwin", "arm64"), "arm64");
        assert_eq!(resolve_arch("1.16rc1", "darwin", "arm64"), "amd64");
        assert_eq!(resolve_arch("1.20.0", "linux", "amd64"), "amd64");
        assert_eq!(resolve_arch("1.15.9", "linux", "arm64"), "arm64");
    }

    #[test]
    fn selects_archive_kind() {
        let releases = releases();
        let f = select_file(&releases, "1.21.0", "linux", "amd64").unwrap();
        assert_eq!(f.kind, FileKind::Archive);
        assert_eq!(f.filename, "go1.21.0.linux-amd64.tar.gz");
    }

    #[test]
    fn selects_intel_build_for_old_apple_silicon() {
        let releases = releases();
        let f = select_file(&releases, "1.15.9", "darwin", "arm64").unwrap();
        assert_eq!(f.arch, "amd64");
    }

    #[test]
    fn missing_release() {
        let releases = releases();
        let err = select_file(&releases, "1.99.0", "linux", "amd64").unwrap_err();
        assert!(matches!(err, VersionError::ReleaseNotFound { .. }));
    }

    #[test]
    fn prefixed_version_is_not_normalized() {
        let releases = releases();
        let err = select_file(&releases, "go1.21.0", "linux", "amd64").unwrap_err();
        assert!(matches!(err, VersionError::ReleaseNotFound { .. }));
    }

    #[test]
    fn missing_platform() {
        let releases = releases();
        let err = select_file(&releases, "1.21.0", "freebsd", "amd64").unwrap_err();
        assert!(matches!(err, VersionError::FileNotFound { ref os, .. } if os == "freebsd"));
    }
}
