use serde::Deserialize;
use std::path::Path;

use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_native_name, Validate};

/// Optional TOML configuration:
///
/// ```toml
/// [bridge]
/// module = "HelloWorld"
/// symbol = "print"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub bridge: BridgeSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    pub module: Option<String>,
    pub symbol: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(BridgeError::IoError)?;
        tracing::debug!("Read bridge config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(module) = &self.bridge.module {
            validate_native_name("bridge.module", module)?;
        }
        if let Some(symbol) = &self.bridge.symbol {
            validate_native_name("bridge.symbol", symbol)?;
        }
        Ok(())
    }
}
