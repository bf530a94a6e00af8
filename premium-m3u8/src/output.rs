use std::path::{Path, PathBuf};

use anyhow::Result;
use premium_m3u8_common::ensure_dir;
use tracing::debug;

use crate::config::OutputConfig;

pub const MANIFEST_EXTENSION: &str = "m3u8";

/// Resolved output directories for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub root: PathBuf,
    pub best: PathBuf,
    pub master: Option<PathBuf>,
}

impl OutputPaths {
    pub fn new(base: impl AsRef<Path>, config: &OutputConfig) -> Self {
        let root = base.as_ref().join(&config.folder);
        let best = root.join(&config.best_folder);
        let master = config.master_folder.as_ref().map(|m| root.join(m));
        Self { root, best, master }
    }

    /// Compute the output directories under `base` and create them.
    pub async fn prepare(base: impl AsRef<Path>, config: &OutputConfig) -> Result<Self> {
        let paths = Self::new(base, config);

        ensure_dir(&paths.best).await?;
        debug!("best manifests go to {}", paths.best.display());
        if let Some(master) = &paths.master {
            ensure_dir(master).await?;
            debug!("master manifests go to {}", master.display());
        }

        Ok(paths)
    }

    pub fn best_file(&self, slug: &str) -> PathBuf {
        manifest_path(&self.best, slug)
    }

    pub fn master_file(&self, slug: &str) -> Option<PathBuf> {
        self.master.as_ref().map(|dir| manifest_path(dir, slug))
    }
}

/// File name stem written for `slug`. Characters that are not valid in a file name on every
/// platform, including path separators, become `_`.
pub fn file_stem(slug: &str) -> String {
    let sanitize_options = sanitize_filename::Options {
        windows: true,
        replacement: "_",
        ..Default::default()
    };
    sanitize_filename::sanitize_with_options(slug, sanitize_options)
}

fn manifest_path(dir: &Path, slug: &str) -> PathBuf {
    dir.join(format!("{}.{}", file_stem(slug), MANIFEST_EXTENSION))
}

#[cfg(test)]
mod test {
    use super::*;

    fn output_config(master: Option<&str>) -> OutputConfig {
        OutputConfig {
            folder: PathBuf::from("playlists"),
            best_folder: PathBuf::from("best"),
            master_folder: master.map(PathBuf::from),
        }
    }

    #[test]
    fn paths_are_relative_to_base() {
        let paths = OutputPaths::new("/work", &output_config(Some("master")));

        assert_eq!(paths.root, PathBuf::from("/work/playlists"));
        assert_eq!(paths.best, PathBuf::from("/work/playlists/best"));
        assert_eq!(paths.master, Some(PathBuf::from("/work/playlists/master")));
        assert_eq!(
            paths.best_file("news"),
            PathBuf::from("/work/playlists/best/news.m3u8")
        );
        assert_eq!(
            paths.master_file("news"),
            Some(PathBuf::from("/work/playlists/master/news.m3u8"))
        );
    }

    #[test]
    fn slug_cannot_escape_directory() {
        let paths = OutputPaths::new("/work", &output_config(None));
        let file = paths.best_file("../../etc/passwd");

        assert_eq!(file.parent(), Some(Path::new("/work/playlists/best")));
    }

    #[test]
    fn unsafe_slug_characters_are_replaced() {
        assert_eq!(file_stem("news"), "news");
        assert_eq!(file_stem("news:hd?"), "news_hd_");

        let paths = OutputPaths::new("/work", &output_config(None));
        assert_eq!(
            paths.best_file("news:hd?"),
            PathBuf::from("/work/playlists/best/news_hd_.m3u8")
        );
    }

    #[tokio::test]
    async fn prepare_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();

        let paths = OutputPaths::prepare(tmp.path(), &output_config(Some("master")))
            .await
            .unwrap();
        assert!(paths.best.is_dir());
        assert!(paths.master.as_ref().unwrap().is_dir());

        // Second run over existing directories
        OutputPaths::prepare(tmp.path(), &output_config(Some("master")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn prepare_without_master() {
        let tmp = tempfile::tempdir().unwrap();

        let paths = OutputPaths::prepare(tmp.path(), &output_config(None))
            .await
            .unwrap();
        assert!(paths.best.is_dir());
        assert_eq!(paths.master, None);
        assert_eq!(paths.master_file("news"), None);
        assert!(!tmp.path().join("playlists").join("master").exists());
    }

    #[tokio::test]
    async fn prepare_fails_when_blocked_by_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("playlists"), "").unwrap();

        assert!(OutputPaths::prepare(tmp.path(), &output_config(None))
            .await
            .is_err());
    }
}
