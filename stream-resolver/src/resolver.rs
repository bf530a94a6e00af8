use async_trait::async_trait;

use crate::{ResolveError, StreamSet};

/// Turns a channel URL into the set of streams it offers, keyed by quality label.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<StreamSet, ResolveError>;
}
