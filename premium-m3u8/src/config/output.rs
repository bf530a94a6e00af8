use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Root output directory, relative to the working directory
    pub folder: PathBuf,
    /// Directory under `folder` receiving the single-variant manifests
    pub best_folder: PathBuf,
    /// Directory under `folder` receiving the full ranked manifests
    #[serde(default, deserialize_with = "super::deserialize_optional_folder")]
    pub master_folder: Option<PathBuf>,
}
