pub mod bridge;

pub use crate::domain::model::{ModuleName, SymbolName};
pub use crate::domain::ports::NativePrinter;
pub use crate::utils::error::Result;
