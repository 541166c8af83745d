//! SPL Swap Transfer Indexer
//!
//! Polls a Solana RPC node for blocks and emits a flat record for every clean two-hop
//! SPL token transfer between an allowed source mint and the destination mint.
//!
//! - `domain`: Blocks, transactions, instruction shapes and the emitted transfer record
//! - `application`: Ports (traits), block poller, ingestion pipeline and error types
//! - `adapters`: RPC and replay gateways, the filter chain and extractor, sinks
//! - `infrastructure`: Configuration and logging

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
