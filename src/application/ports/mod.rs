pub mod gateway;
pub mod parser;
pub mod sink;
pub use gateway::*;
pub use parser::*;
pub use sink::*;
