pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{load_native_module, LibraryPrinter, ModuleRegistry, NativeModule, NoopPrinter};
pub use config::{BridgeSettings, FileConfig};
pub use core::bridge::BridgeCaller;
pub use domain::model::{ModuleName, SymbolName};
pub use domain::ports::NativePrinter;
pub use utils::error::{BridgeError, LinkError, Result};
pub use utils::logger::LogFormat;
