use govm_install::{Installer, ReqwestClient};

#[derive(Debug, clap::Args)]
pub struct CleanCache {}

impl CleanCache {
    pub fn run(self, installer: &Installer<ReqwestClient>) -> anyhow::Result<()> {
        installer.clean_cache_blocking()?;
        println!("removed {}", installer.config().cache_dir.display());
        Ok(())
    }
}
