use std::path::Path;

use anyhow::Result;
use stream_resolver::{HlsResolver, StreamResolver, StreamlinkResolver};
use tracing::info;

use crate::config::{Backend, Config};
use crate::{ChannelProcessor, OutputPaths, Report};

/// Load the config at `config_path`, prepare the output directories under `base` and process
/// every channel. Any error returned here is fatal for the run.
pub async fn run(config_path: &Path, base: &Path) -> Result<Report> {
    info!("=== Starting stream processing (Premium Format) ===");

    let conf = Config::read(config_path)?;
    let paths = OutputPaths::prepare(base, &conf.output).await?;

    let client = conf.resolver.http_client()?;
    let resolver: Box<dyn StreamResolver + '_> = match conf.resolver.backend {
        Backend::Native => Box::new(HlsResolver::new(&client)),
        Backend::Streamlink => Box::new(
            StreamlinkResolver::new(&conf.resolver.streamlink_path).with_client(&client),
        ),
    };

    let processor = ChannelProcessor::new(resolver.as_ref(), &paths);
    Ok(processor.process_all(&conf.channels).await)
}

/// Process exit status for a finished run. Per-channel failures do not affect it.
pub fn exit_code(result: &Result<Report>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
