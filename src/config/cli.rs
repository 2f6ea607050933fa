use clap::Parser;
use std::path::PathBuf;

use crate::config::BridgeSettings;
use crate::config::file::FileConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_native_name, Validate};

#[derive(Debug, Clone, Parser)]
#[command(name = "hello-bridge")]
#[command(about = "Load a native module and call its zero-argument print function")]
pub struct CliConfig {
    #[arg(long, help = "Module name or library file [default: HelloWorld]")]
    pub module: Option<String>,

    #[arg(long, help = "Exported function to call [default: print]")]
    pub symbol: Option<String>,

    #[arg(long, help = "TOML file with a [bridge] table")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Resolve configuration but do not load or call native code")]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Command-line values win over the config file, which wins over defaults.
    pub fn resolve(&self) -> Result<BridgeSettings> {
        let file = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        BridgeSettings::from_layers(
            self.module.as_deref().or(file.bridge.module.as_deref()),
            self.symbol.as_deref().or(file.bridge.symbol.as_deref()),
        )
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(module) = &self.module {
            validate_native_name("module", module)?;
        }
        if let Some(symbol) = &self.symbol {
            validate_native_name("symbol", symbol)?;
        }
        Ok(())
    }
}
