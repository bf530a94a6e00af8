use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ChannelConfig {
    #[serde(default = "default_slug")]
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_slug() -> String {
    "unknown".to_owned()
}

const fn default_true() -> bool {
    true
}
