use indexmap::IndexMap;
use url::Url;

pub(crate) const BEST: &str = "best";
pub(crate) const WORST: &str = "worst";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Resolution {
    pub width: u64,
    pub height: u64,
}

/// One rendition listed in a multivariant playlist.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Variant {
    /// Absolute URL of the variant's media playlist
    pub uri: Url,
    pub resolution: Option<Resolution>,
    /// Advertised peak bandwidth in bits per second
    pub bandwidth: u64,
    pub audio_only: bool,
}

impl Variant {
    /// Vertical resolution, 0 if the playlist does not advertise one.
    pub fn height(&self) -> u64 {
        self.resolution.map_or(0, |r| r.height)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Descriptor {
    /// A single directly playable URL.
    Flat(Url),
    /// A multivariant playlist and its renditions, in playlist order.
    Multivariant { url: Url, variants: Vec<Variant> },
}

impl Descriptor {
    pub fn url(&self) -> &Url {
        match self {
            Self::Flat(url) => url,
            Self::Multivariant { url, .. } => url,
        }
    }
}

/// Streams offered by a channel, keyed by quality label in the order the resolver found them.
#[derive(Clone, Default, Debug)]
pub struct StreamSet(IndexMap<String, Descriptor>);

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream. An existing label keeps its first descriptor.
    pub fn insert(&mut self, label: impl Into<String>, descriptor: Descriptor) {
        self.0.entry(label.into()).or_insert(descriptor);
    }

    /// Set the descriptor for `label`, overwriting an existing one in place.
    pub fn replace(&mut self, label: impl Into<String>, descriptor: Descriptor) {
        self.0.insert(label.into(), descriptor);
    }

    pub fn get(&self, label: &str) -> Option<&Descriptor> {
        self.0.get(label)
    }

    pub fn best(&self) -> Option<&Descriptor> {
        self.get(BEST)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Descriptor)> for StreamSet {
    fn from_iter<T: IntoIterator<Item = (String, Descriptor)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (label, descriptor) in iter {
            set.insert(label, descriptor);
        }
        set
    }
}
