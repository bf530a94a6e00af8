pub mod app;
pub mod channel;
pub mod config;
pub mod output;
pub mod report;

pub use app::{exit_code, run};
pub use channel::{ChannelError, ChannelProcessor, ChannelResult};
pub use config::Config;
pub use output::OutputPaths;
pub use report::Report;
