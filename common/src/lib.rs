use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Create `path` and any missing parents. Succeeds if the directory already exists.
pub async fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path)
        .await
        .with_context(|| format!("unable to create directory {}", path.display()))
}

/// Write `contents` to `path`, creating the file or truncating an existing one.
pub async fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");

        ensure_dir(&dir).await.unwrap();
        ensure_dir(&dir).await.unwrap();

        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn ensure_dir_fails_on_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, "x").unwrap();

        assert!(ensure_dir(&file).await.is_err());
    }

    #[tokio::test]
    async fn write_text_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.m3u8");

        write_text(&path, "a much longer first version\n").await.unwrap();
        write_text(&path, "short\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short\n");
    }
}
