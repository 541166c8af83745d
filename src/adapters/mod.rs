pub mod inbound;
pub mod parsers;
pub mod sinks;
pub use inbound::{FileSourceAdaptor, SolanaRpcGateway};
