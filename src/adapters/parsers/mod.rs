pub mod extractor;
pub mod filters;
pub mod instruction_pair;
pub mod spl_token;
pub use extractor::extract_transfer;
pub use filters::{FilterChain, MintPair};
pub use instruction_pair::InstructionPair;
pub use spl_token::SplTransferParser;
