use std::path::PathBuf;

use anyhow::Context;
use govm_install::{Config, Installer, ReqwestClient};

mod clean;
mod install;
mod ls_remote;

pub use clean::CleanCache;
pub use install::Install;
pub use ls_remote::LsRemote;

#[derive(Debug, clap::Parser)]
#[command(name = "govm", version, about = "Install Go toolchains from the official release catalog")]
pub struct Cli {
    /// Config file (defaults to ~/.govm/config.toml; missing is fine).
    #[arg(long, global = true, env = "GOVM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Download, verify, and unpack a Go release.
    Install(Install),
    /// List versions available in the release catalog.
    LsRemote(LsRemote),
    /// Delete downloaded archives, including partial ones.
    CleanCache(CleanCache),
}

impl Cli {
    pub fn installer(&self) -> anyhow::Result<Installer<ReqwestClient>> {
        let path = self.config.clone().unwrap_or_else(Config::default_path);
        let config = Config::load(&path).with_context(|| format!("loading {}", path.display()))?;
        Installer::new(config).context("setting up installer")
    }
}
