mod descriptor;
mod error;
mod hls;
mod resolver;
mod streamlink;

pub use descriptor::{Descriptor, Resolution, StreamSet, Variant};
pub use error::ResolveError;
pub use hls::HlsResolver;
pub use resolver::StreamResolver;
pub use streamlink::StreamlinkResolver;
