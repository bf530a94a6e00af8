use stream_resolver::{Descriptor, Resolution, Variant};
use url::Url;

const HEADER: &str = "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-INDEPENDENT-SEGMENTS\n";

const BANDWIDTH: u64 = 8_000_000;
const AVERAGE_BANDWIDTH: u64 = 6_500_000;
const FRAME_RATE: &str = "25.000";
const CODECS: &str = "avc1.640029,mp4a.40.2";
const NAME: &str = "1080p Premium";

/// `#EXT-X-STREAM-INF` line and URL for one stream, with the fixed premium attributes.
pub fn stream_entry(resolution: Option<Resolution>, url: &Url) -> String {
    let mut text = format!(
        "#EXT-X-STREAM-INF:BANDWIDTH={},AVERAGE-BANDWIDTH={},",
        BANDWIDTH, AVERAGE_BANDWIDTH
    );
    if let Some(r) = resolution {
        text.push_str(&format!("RESOLUTION={}x{},", r.width, r.height));
    }
    text.push_str(&format!(
        "FRAME-RATE={},CODECS=\"{}\",NAME=\"{}\"\n{}\n",
        FRAME_RATE, CODECS, NAME, url
    ));

    text
}

/// Entries ranked out of a resolved descriptor.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RankedEntries {
    best: Option<String>,
    master: String,
}

impl RankedEntries {
    pub fn from_descriptor(descriptor: &Descriptor) -> Self {
        match descriptor {
            Descriptor::Flat(url) => {
                let entry = stream_entry(None, url);
                Self {
                    master: entry.clone(),
                    best: Some(entry),
                }
            }
            Descriptor::Multivariant { variants, .. } => Self::rank(variants),
        }
    }

    /// Scan variants in order. The first eligible variant seeds best; after that a variant
    /// taller than the one before it takes over as best and moves to the front of the master
    /// list, anything else is appended. Audio-only variants are dropped and ties keep the
    /// earlier variant.
    pub fn rank(variants: &[Variant]) -> Self {
        let mut ranked = Self::default();
        let mut previous_height = 0;

        for variant in variants.iter().filter(|v| !v.audio_only) {
            let entry = stream_entry(variant.resolution, &variant.uri);
            let height = variant.height();

            if ranked.best.is_none() || height > previous_height {
                ranked.master.insert_str(0, &entry);
                ranked.best = Some(entry);
            } else {
                ranked.master.push_str(&entry);
            }
            previous_height = height;
        }

        ranked
    }

    /// Single-variant manifest, or `None` if no variant was eligible.
    pub fn best_manifest(&self) -> Option<String> {
        self.best.as_ref().map(|entry| format!("{}{}", HEADER, entry))
    }

    /// Manifest listing every eligible variant in ranked order.
    pub fn master_manifest(&self) -> Option<String> {
        (!self.master.is_empty()).then(|| format!("{}{}", HEADER, self.master))
    }
}
