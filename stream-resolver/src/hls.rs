use async_trait::async_trait;
use m3u8_rs::Playlist;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::descriptor::{BEST, WORST};
use crate::{Descriptor, ResolveError, Resolution, StreamResolver, StreamSet, Variant};

const AUDIO_CODECS: &[&str] = &["mp4a", "ac-3", "ec-3", "ac-4", "opus", "flac", "fLaC", "mp3"];

/// Resolves URLs that point directly at an HLS playlist.
#[derive(Clone, Debug)]
pub struct HlsResolver<'a> {
    client: &'a Client,
}

impl<'a> HlsResolver<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

/// Fetch a playlist, returning the URL it was finally served from along with its body.
pub(crate) async fn fetch_playlist(
    client: &Client,
    url: Url,
) -> Result<(Url, Vec<u8>), ResolveError> {
    let err_func = |error: reqwest::Error| ResolveError::FetchPlaylist {
        url: url.to_string(),
        error,
    };

    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(err_func)?
        .error_for_status()
        .map_err(err_func)?;
    let final_url = resp.url().clone();
    let body = resp.bytes().await.map_err(err_func)?;

    Ok((final_url, body.to_vec()))
}

#[async_trait]
impl StreamResolver for HlsResolver<'_> {
    async fn resolve(&self, url: &str) -> Result<StreamSet, ResolveError> {
        if url.trim().is_empty() {
            return Err(ResolveError::EmptyUrl);
        }
        let url = Url::parse(url.trim()).map_err(|e| ResolveError::InvalidUrl {
            url: url.to_owned(),
            msg: e.to_string(),
        })?;

        let (playlist_url, body) = fetch_playlist(self.client, url).await?;
        debug!("fetched {} bytes from {}", body.len(), playlist_url);

        parse_stream_set(&playlist_url, &body)
    }
}

/// Build the stream set for a playlist body served from `playlist_url`.
pub(crate) fn parse_stream_set(playlist_url: &Url, body: &[u8]) -> Result<StreamSet, ResolveError> {
    let playlist =
        m3u8_rs::parse_playlist_res(body).map_err(|e| ResolveError::ParsePlaylist {
            url: playlist_url.to_string(),
            msg: e.to_string(),
        })?;

    match playlist {
        Playlist::MasterPlaylist(pl) => {
            let variants = pl
                .variants
                .iter()
                .filter(|v| !v.is_i_frame)
                .map(|v| to_variant(playlist_url, v))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("{} lists {} variants", playlist_url, variants.len());

            Ok(variant_streams(playlist_url, variants))
        }
        Playlist::MediaPlaylist(_) => {
            let mut streams = StreamSet::new();
            streams.insert("live", Descriptor::Flat(playlist_url.clone()));
            streams.insert(BEST, Descriptor::Flat(playlist_url.clone()));
            Ok(streams)
        }
    }
}

fn to_variant(playlist_url: &Url, variant: &m3u8_rs::VariantStream) -> Result<Variant, ResolveError> {
    let uri = playlist_url
        .join(&variant.uri)
        .map_err(|e| ResolveError::InvalidUrl {
            url: variant.uri.clone(),
            msg: e.to_string(),
        })?;

    Ok(Variant {
        uri,
        resolution: variant.resolution.as_ref().map(|r| Resolution {
            width: r.width,
            height: r.height,
        }),
        bandwidth: variant.bandwidth,
        audio_only: is_audio_only(variant),
    })
}

fn is_audio_only(variant: &m3u8_rs::VariantStream) -> bool {
    if variant.resolution.is_some() || variant.video.is_some() {
        return false;
    }

    match &variant.codecs {
        Some(codecs) => {
            let mut codecs = codecs
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .peekable();
            codecs.peek().is_some()
                && codecs.all(|c| AUDIO_CODECS.iter().any(|a| c.starts_with(a)))
        }
        None => false,
    }
}

/// Label each variant the way streamlink does and add `best`/`worst` for the whole list.
fn variant_streams(playlist_url: &Url, variants: Vec<Variant>) -> StreamSet {
    let mut streams = StreamSet::new();
    let mut taken: Vec<String> = Vec::new();

    for variant in &variants {
        let base = if variant.audio_only {
            "audio_only".to_owned()
        } else if let Some(r) = variant.resolution {
            format!("{}p", r.height)
        } else {
            format!("{}k", variant.bandwidth / 1000)
        };

        let mut label = base.clone();
        let mut n = 1;
        while taken.contains(&label) {
            label = match n {
                1 => format!("{}_alt", base),
                _ => format!("{}_alt{}", base, n),
            };
            n += 1;
        }

        streams.insert(label.clone(), Descriptor::Flat(variant.uri.clone()));
        taken.push(label);
    }

    if !variants.is_empty() {
        let descriptor = Descriptor::Multivariant {
            url: playlist_url.clone(),
            variants,
        };
        streams.insert(WORST, descriptor.clone());
        streams.insert(BEST, descriptor);
    }

    streams
}
