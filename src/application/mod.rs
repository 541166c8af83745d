pub mod error;
pub mod ports;
pub mod retry;
pub mod use_cases;
pub use error::*;
pub use ports::*;
pub use retry::*;
pub use use_cases::*;
