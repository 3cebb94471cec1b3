use govm_install::{Installer, ReqwestClient};
use govm_version::compare;

#[derive(Debug, clap::Args)]
pub struct LsRemote {
    /// Include prereleases.
    #[arg(long)]
    pub all: bool,
}

impl LsRemote {
    pub fn run(self, installer: &Installer<ReqwestClient>) -> anyhow::Result<()> {
        let mut releases = installer.releases_blocking(!self.all)?;
        releases.sort_by(|a, b| compare(&b.version, &a.version));

        for release in releases {
            if release.stable {
                println!("{}", release.version);
            } else {
                println!("{} (unstable)", release.version);
            }
        }
        Ok(())
    }
}
