use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

pub use self::channel::ChannelConfig;
pub use self::output::OutputConfig;
pub use self::resolver::{Backend, ResolverConfig};

pub mod channel;
pub mod output;
pub mod resolver;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    pub channels: Vec<ChannelConfig>,
}

impl Config {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conf_contents = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Self::parse(&conf_contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Treat a missing, null or empty folder name as absent.
fn deserialize_optional_folder<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal_config() {
        let conf = Config::parse(
            r#"{
                "output": {"folder": "out", "bestFolder": "best"},
                "channels": [
                    {"slug": "news", "url": "https://a.example/news.m3u8"},
                    {}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(conf.output.folder, PathBuf::from("out"));
        assert_eq!(conf.output.best_folder, PathBuf::from("best"));
        assert_eq!(conf.output.master_folder, None);
        assert_eq!(conf.resolver, ResolverConfig::default());

        assert_eq!(conf.channels.len(), 2);
        assert_eq!(conf.channels[0].slug, "news");
        assert_eq!(conf.channels[0].url, "https://a.example/news.m3u8");
        assert!(conf.channels[0].enabled);
        assert_eq!(conf.channels[1].slug, "unknown");
        assert_eq!(conf.channels[1].url, "");
    }

    #[test]
    fn empty_master_folder_is_absent() {
        let conf = Config::parse(
            r#"{
                "output": {"folder": "out", "bestFolder": "best", "masterFolder": ""},
                "channels": []
            }"#,
        )
        .unwrap();
        assert_eq!(conf.output.master_folder, None);

        let conf = Config::parse(
            r#"{
                "output": {"folder": "out", "bestFolder": "best", "masterFolder": "master"},
                "channels": []
            }"#,
        )
        .unwrap();
        assert_eq!(conf.output.master_folder, Some(PathBuf::from("master")));
    }

    #[test]
    fn resolver_section() {
        let conf = Config::parse(
            r#"{
                "output": {"folder": "out", "bestFolder": "best"},
                "resolver": {"backend": "streamlink", "streamlinkPath": "/opt/streamlink", "timeoutSecs": 5},
                "channels": []
            }"#,
        )
        .unwrap();

        assert_eq!(conf.resolver.backend, Backend::Streamlink);
        assert_eq!(conf.resolver.streamlink_path, PathBuf::from("/opt/streamlink"));
        assert_eq!(conf.resolver.timeout_secs, 5);
        assert_eq!(conf.resolver.user_agent, ResolverConfig::default().user_agent);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Config::parse("{ not json").is_err());
        assert!(Config::parse(r#"{"channels": []}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Config::read(tmp.path().join("config.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("unable to read config file"));
    }
}
