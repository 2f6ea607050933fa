#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use file::FileConfig;

use crate::domain::model::{ModuleName, SymbolName};
use crate::utils::error::Result;

/// Fully resolved names the bridge connects with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeSettings {
    pub module: ModuleName,
    pub symbol: SymbolName,
}

impl BridgeSettings {
    /// Builds settings from the first configured value of each name,
    /// falling back to `HelloWorld` / `print`.
    pub fn from_layers(module: Option<&str>, symbol: Option<&str>) -> Result<Self> {
        Ok(Self {
            module: module.map(ModuleName::new).transpose()?.unwrap_or_default(),
            symbol: symbol.map(SymbolName::new).transpose()?.unwrap_or_default(),
        })
    }
}
