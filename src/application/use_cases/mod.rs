pub mod ingest;
pub mod poll;
pub use ingest::*;
pub use poll::*;
