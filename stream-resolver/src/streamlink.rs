use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};
use url::Url;

use crate::descriptor::BEST;
use crate::hls::{fetch_playlist, parse_stream_set};
use crate::{Descriptor, ResolveError, StreamResolver, StreamSet};

/// Resolves channel pages by shelling out to `streamlink --json`.
///
/// With an HTTP client attached, the multivariant playlist behind the `best` stream is fetched
/// so that its variants can be ranked. Without one, every stream stays a flat URL.
#[derive(Clone, Debug)]
pub struct StreamlinkResolver<'a> {
    program: PathBuf,
    client: Option<&'a Client>,
}

#[derive(Deserialize, Debug)]
struct StreamlinkOutput {
    #[serde(default)]
    streams: IndexMap<String, StreamlinkStream>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StreamlinkStream {
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<String>,
    /// Multivariant playlist the stream was picked from, for HLS streams
    master: Option<String>,
}

impl<'a> StreamlinkResolver<'a> {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            client: None,
        }
    }

    pub fn with_client(mut self, client: &'a Client) -> Self {
        self.client = Some(client);
        self
    }
}

impl Default for StreamlinkResolver<'_> {
    fn default() -> Self {
        Self::new("streamlink")
    }
}

#[async_trait]
impl StreamResolver for StreamlinkResolver<'_> {
    async fn resolve(&self, url: &str) -> Result<StreamSet, ResolveError> {
        if url.trim().is_empty() {
            return Err(ResolveError::EmptyUrl);
        }

        let output = Command::new(&self.program)
            .arg("--json")
            .arg(url.trim())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ResolveError::Streamlink {
                url: url.to_owned(),
                msg: format!("unable to run {}: {}", self.program.display(), e),
            })?;
        debug!("{} exited with {}", self.program.display(), output.status);

        if !output.status.success() {
            let msg = match serde_json::from_slice::<StreamlinkOutput>(&output.stdout) {
                Ok(StreamlinkOutput {
                    error: Some(error), ..
                }) => error,
                _ => format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            };
            return Err(ResolveError::Streamlink {
                url: url.to_owned(),
                msg,
            });
        }

        let (mut streams, master) = parse_streamlink_output(url, &output.stdout)?;

        if let (Some(client), Some(master)) = (self.client, master) {
            match fetch_playlist(client, master).await {
                Ok((master_url, body)) => {
                    if let Err(e) = expand_best(&mut streams, &master_url, &body) {
                        warn!("keeping flat best stream: {}", e);
                    }
                }
                Err(e) => warn!("keeping flat best stream: {}", e),
            }
        }

        Ok(streams)
    }
}

/// Turn the JSON printed by `streamlink --json` into a stream set, along with the multivariant
/// playlist behind the `best` stream if streamlink reported one.
fn parse_streamlink_output(
    url: &str,
    stdout: &[u8],
) -> Result<(StreamSet, Option<Url>), ResolveError> {
    let parsed: StreamlinkOutput =
        serde_json::from_slice(stdout).map_err(|e| ResolveError::Streamlink {
            url: url.to_owned(),
            msg: format!("unexpected output: {}", e),
        })?;

    if let Some(error) = parsed.error {
        return Err(ResolveError::Streamlink {
            url: url.to_owned(),
            msg: error,
        });
    }

    let mut streams = StreamSet::new();
    let mut best_master = None;
    for (label, stream) in parsed.streams {
        let Some(stream_url) = stream.url else {
            debug!(
                "skipping {} stream {} without url",
                stream.kind.as_deref().unwrap_or("unknown"),
                label
            );
            continue;
        };
        let stream_url = Url::parse(&stream_url).map_err(|e| ResolveError::InvalidUrl {
            url: stream_url.clone(),
            msg: e.to_string(),
        })?;
        if label == BEST {
            best_master = stream.master.and_then(|m| match Url::parse(&m) {
                Ok(m) => Some(m),
                Err(e) => {
                    debug!("ignoring master playlist {}: {}", m, e);
                    None
                }
            });
        }
        streams.insert(label, Descriptor::Flat(stream_url));
    }

    Ok((streams, best_master))
}

/// Swap the flat `best` stream for the multivariant playlist it was picked from.
fn expand_best(
    streams: &mut StreamSet,
    master_url: &Url,
    body: &[u8],
) -> Result<(), ResolveError> {
    let master = parse_stream_set(master_url, body)?;
    match master.best() {
        Some(best) if matches!(best, Descriptor::Multivariant { .. }) => {
            streams.replace(BEST, best.clone())
        }
        _ => debug!("{} is not a multivariant playlist", master_url),
    }
    Ok(())
}
