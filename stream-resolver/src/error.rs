use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no stream url given")]
    EmptyUrl,

    #[error("invalid url: {url}, {msg}")]
    InvalidUrl { url: String, msg: String },

    #[error("unable to fetch playlist: {url}, {error}")]
    FetchPlaylist {
        url: String,
        error: reqwest::Error,
    },

    #[error("unable to parse playlist: {url}, {msg}")]
    ParsePlaylist { url: String, msg: String },

    #[error("unable to resolve with streamlink: {url}, {msg}")]
    Streamlink { url: String, msg: String },
}
