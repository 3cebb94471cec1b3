//! Catalog data model as published by the release endpoint.

use serde::{Deserialize, Serialize};

/// One published version with all of its per-platform files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Catalog spelling, e.g. `go1.21.0`.
    pub version: String,
    pub stable:  bool,
    #[serde(default)]
    pub files:   Vec<File>,
}

/// One downloadable artifact for an os/arch pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub filename: String,
    pub os:       String,
    pub arch:     String,
    pub version:  String,
    /// Lowercase hex SHA-256 digest.
    pub sha256:   String,
    pub size:     u64,
    pub kind:     FileKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Archive,
    Installer,
    Source,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_catalog_entry() {
        let json = r#"{
            "version": "go1.21.0",
            "stable": true,
            "files": [{
                "filename": "go1.21.0.linux-amd64.tar.gz",
                "os": "linux",
                "arch": "amd64",
                "version": "go1.21.0",
                "sha256": "d0398903a16ba2232b389fb31032ddf57cac34efda306a0eebac34f0965a0742",
                "size": 66615271,
                "kind": "archive"
            }, {
                "filename": "go1.21.0.src.tar.gz",
                "os": "",
                "arch": "",
                "version": "go1.21.0",
                "sha256": "818d46ede85682dd551ad378ef37a4d247006f12ec59b5b755601d2ce114369a",
                "size": 26956267,
                "kind": "source"
            }]
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.version, "go1.21.0");
        assert!(release.stable);
        assert_eq!(release.files.len(), 2);
        assert_eq!(release.files[0].kind, FileKind::Archive);
        assert_eq!(release.files[0].size, 66_615_271);
        assert_eq!(release.files[1].kind, FileKind::Source);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{"filename":"x","os":"","arch":"","version":"go1","sha256":"","size":0,"kind":"weird"}"#;
        assert!(serde_json::from_str::<File>(json).is_err());
    }
}
