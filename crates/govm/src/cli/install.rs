use std::path::PathBuf;

use anyhow::Context;
use govm_install::{Installer, ReqwestClient};

#[derive(Debug, clap::Args)]
pub struct Install {
    /// Version to install, e.g. `1.21.0`, `go1.22rc1`.
    pub version: String,

    /// Install here instead of `<install_root>/go<version>`.
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl Install {
    pub fn run(self, installer: &Installer<ReqwestClient>) -> anyhow::Result<()> {
        let dir = self
            .dir
            .unwrap_or_else(|| installer.config().version_dir(&self.version));

        let installed = installer
            .install_blocking(&self.version, &dir)
            .with_context(|| format!("installing {}", self.version))?;

        println!("{}", installed.display());
        Ok(())
    }
}
