use std::path::{Path, PathBuf};

use govm_catalog::{Clock, ReleaseCatalog, SystemClock};
use govm_fetch::{Fetcher, HttpClient, ReqwestClient};
use govm_verify::VerificationError;
use govm_version::{Release, VersionError, is_valid_version, normalize, select_file};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{InstallError, Result};
use crate::platform::Platform;
use crate::runtime;

/// The install pipeline: catalog, selection, download, verify, extract.
pub struct Installer<C: HttpClient, K: Clock = SystemClock> {
    config:  Config,
    catalog: ReleaseCatalog<C, K>,
    fetcher: Fetcher<C>,
}

impl Installer<ReqwestClient> {
    /// Installer talking to the network with settings from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let catalog_client = ReqwestClient::new().map_err(InstallError::Client)?;
        let download_client = ReqwestClient::with_timeout(config.timeout).map_err(InstallError::Client)?;

        let catalog = ReleaseCatalog::new(catalog_client, config.api_url.clone(), config.cache_expiry);
        let fetcher = Fetcher::new(download_client, config.cache_dir.clone()).retry(config.retry_policy());
        Ok(Self::from_parts(config, catalog, fetcher))
    }
}

impl<C: HttpClient, K: Clock> Installer<C, K> {
    pub fn from_parts(config: Config, catalog: ReleaseCatalog<C, K>, fetcher: Fetcher<C>) -> Self {
        Self { config, catalog, fetcher }
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn catalog(&self) -> &ReleaseCatalog<C, K> { &self.catalog }

    /// Install `version` for the host platform into `install_dir`.
    pub async fn install(&self, version: &str, install_dir: &Path) -> Result<PathBuf> {
        self.install_for(version, install_dir, &Platform::host()).await
    }

    /// Install `version` built for `platform` into `install_dir`.
    pub async fn install_for(&self, version: &str, install_dir: &Path, platform: &Platform) -> Result<PathBuf> {
        if !is_valid_version(version) {
            return Err(VersionError::Invalid(version.to_string()).into());
        }
        let version = normalize(version);

        let releases = self.catalog.fetch().await?;
        let file = select_file(&releases, version, &platform.os, &platform.arch)?.clone();
        info!(version, %platform, file = %file.filename, "resolved release");

        let url = self.config.download_url(&file.filename);
        let archive = self
            .fetcher
            .download(&url, file.size)
            .await
            .map_err(|source| InstallError::Download {
                version: version.to_string(),
                url: url.clone(),
                source,
            })?;
        info!(version, path = %archive.display(), "archive downloaded");

        let to_verify = archive.clone();
        let expected = file.sha256.clone();
        let verified = runtime::spawn_blocking(move || govm_verify::verify_file(&to_verify, &expected)).await?;
        if let Err(source) = verified {
            // A full-size archive with the wrong digest cannot be resumed.
            if matches!(source, VerificationError::Mismatch { .. }) {
                match tokio::fs::remove_file(&archive).await {
                    Ok(()) => warn!(path = %archive.display(), "removed archive with bad checksum"),
                    Err(e) => warn!(path = %archive.display(), error = %e, "failed to remove archive with bad checksum"),
                }
            }
            return Err(InstallError::Verify { version: version.to_string(), source });
        }
        info!(version, sha256 = %file.sha256, "checksum verified");

        let (to_extract, dest) = (archive.clone(), install_dir.to_path_buf());
        let report = runtime::spawn_blocking(move || govm_archive::extract(to_extract, dest))
            .await?
            .map_err(|source| InstallError::Extract {
                version: version.to_string(),
                dest: install_dir.to_path_buf(),
                source,
            })?;
        debug!(files = report.files, bytes = report.bytes, "archive extracted");

        if let Err(e) = tokio::fs::remove_file(&archive).await {
            warn!(path = %archive.display(), error = %e, "failed to remove cached archive");
        }

        info!(version, dest = %install_dir.display(), "installed");
        Ok(install_dir.to_path_buf())
    }

    /// [`install`](Self::install) on the shared runtime, for synchronous callers.
    pub fn install_blocking(&self, version: &str, install_dir: &Path) -> Result<PathBuf> {
        runtime::block_on(self.install(version, install_dir))?
    }

    /// Catalog releases on the shared runtime, newest first as published.
    pub fn releases_blocking(&self, stable_only: bool) -> Result<Vec<Release>> {
        Ok(runtime::block_on(self.catalog.releases_matching(stable_only))??)
    }

    /// Delete the download cache directory and forget the cached catalog.
    pub fn clean_cache_blocking(&self) -> Result<()> {
        runtime::block_on(self.catalog.clear())?;

        let dir = self.fetcher.cache_dir();
        match std::fs::remove_dir_all(dir) {
            Ok(()) => {
                info!(path = %dir.display(), "cache removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(InstallError::Clean { path: dir.to_path_buf(), source }),
        }
    }
}
