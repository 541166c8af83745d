pub mod config;
pub mod logging;
pub use config::{IndexerConfig, SinkType, SourceType};
