use std::path::{Path, PathBuf};

use premium_m3u8_common::write_text;
use stream_resolver::{ResolveError, StreamResolver};
use thiserror::Error;
use tracing::{info, warn};

use self::manifest::RankedEntries;
use crate::config::ChannelConfig;
use crate::output::{file_stem, OutputPaths};
use crate::report::Report;

pub mod manifest;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("no \"best\" stream, available: [{}]", .labels.join(", "))]
    MissingBest { labels: Vec<String> },

    #[error("no playable video variant")]
    NoPlayableVariant,

    #[error("unable to write {}: {msg}", .path.display())]
    Write { path: PathBuf, msg: String },
}

#[derive(Debug)]
pub enum ChannelResult {
    /// Path of the written single-variant manifest
    Success(PathBuf),
    Failure(ChannelError),
}

pub struct ChannelProcessor<'a> {
    resolver: &'a dyn StreamResolver,
    paths: &'a OutputPaths,
}

impl<'a> ChannelProcessor<'a> {
    pub fn new(resolver: &'a dyn StreamResolver, paths: &'a OutputPaths) -> Self {
        Self { resolver, paths }
    }

    /// Process every channel in order, one at a time.
    pub async fn process_all(&self, channels: &[ChannelConfig]) -> Report {
        let mut report = Report::default();
        let total = channels.len();

        for (idx, channel) in channels.iter().enumerate() {
            info!("[{}/{}] Processing: {}", idx + 1, total, channel.slug);

            if !channel.enabled {
                info!("  skipped, channel disabled");
                report.record_skip(&channel.slug);
                continue;
            }

            let stem = file_stem(&channel.slug);
            if stem != channel.slug {
                warn!("  slug is not a valid file name, writing as {}", stem);
            }

            let result = self.process(channel).await;
            match &result {
                ChannelResult::Success(path) => {
                    info!("  premium manifest created: {}", path.display())
                }
                ChannelResult::Failure(err) => warn!("  failed: {}", err),
            }
            report.record(&channel.slug, result);
        }

        report
    }

    pub async fn process(&self, channel: &ChannelConfig) -> ChannelResult {
        match self.try_process(channel).await {
            Ok(path) => ChannelResult::Success(path),
            Err(err) => ChannelResult::Failure(err),
        }
    }

    async fn try_process(&self, channel: &ChannelConfig) -> Result<PathBuf, ChannelError> {
        let streams = self.resolver.resolve(&channel.url).await?;
        let best = streams.best().ok_or_else(|| ChannelError::MissingBest {
            labels: streams.labels().map(str::to_owned).collect(),
        })?;

        let ranked = RankedEntries::from_descriptor(best);
        let best_text = ranked
            .best_manifest()
            .ok_or(ChannelError::NoPlayableVariant)?;

        let best_path = self.paths.best_file(&channel.slug);
        write_manifest(&best_path, &best_text).await?;

        if let (Some(master_path), Some(master_text)) =
            (self.paths.master_file(&channel.slug), ranked.master_manifest())
        {
            write_manifest(&master_path, &master_text).await?;
        }

        Ok(best_path)
    }
}

async fn write_manifest(path: &Path, text: &str) -> Result<(), ChannelError> {
    write_text(path, text)
        .await
        .map_err(|e| ChannelError::Write {
            path: path.to_path_buf(),
            msg: e.to_string(),
        })
}
