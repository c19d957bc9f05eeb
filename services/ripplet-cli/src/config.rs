use anyhow::{Context, Result, bail};
use rp_api_types::NetworkKind;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = ".ripplet";

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.join("session")
    }

    pub fn ensure_data_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("failed to create data dir {}", self.data_dir.display()))?;
        Ok(&self.data_dir)
    }
}

pub fn parse_network(value: &str) -> Result<NetworkKind> {
    match NetworkKind::parse(value) {
        Some(network) => Ok(network),
        None => bail!("unknown network '{value}' (expected mainnet, testnet or devnet)"),
    }
}
