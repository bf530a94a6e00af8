use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Fetch and parse the channel URL as an HLS playlist
    #[default]
    Native,
    /// Hand the channel URL to `streamlink --json`
    Streamlink,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    pub backend: Backend,
    pub streamlink_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Native,
            streamlink_path: PathBuf::from("streamlink"),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout_secs: 30,
        }
    }
}

impl ResolverConfig {
    /// HTTP client for playlist fetches. The streamlink backend uses it to expand master playlists.
    pub fn http_client(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        Ok(client)
    }
}
