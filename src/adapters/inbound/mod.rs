pub mod block_mapper;
pub mod file_source;
pub mod rpc_gateway;
pub use file_source::FileSourceAdaptor;
pub use rpc_gateway::SolanaRpcGateway;
