use thiserror::Error;

/// Failure to link against a native module.
///
/// Every variant names what could not be resolved so the diagnostic printed
/// at the entry point identifies the missing module or symbol.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Native module '{module}' could not be loaded from '{file_name}': {source}")]
    ModuleNotFound {
        module: String,
        file_name: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Symbol '{symbol}' not found in native module '{module}': {source}")]
    SymbolNotFound {
        module: String,
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    /// The module or symbol exists but cannot be used with this platform's
    /// binary format or calling convention. `symbol` is `None` when the
    /// module file itself was rejected by the loader.
    #[error("Native module '{module}' is incompatible with this process: {reason}")]
    AbiMismatch {
        module: String,
        symbol: Option<String>,
        reason: String,
    },
}

impl LinkError {
    /// Logical name of the module the failure refers to.
    pub fn module(&self) -> &str {
        match self {
            LinkError::ModuleNotFound { module, .. }
            | LinkError::SymbolNotFound { module, .. }
            | LinkError::AbiMismatch { module, .. } => module,
        }
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BridgeError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            BridgeError::Link(LinkError::ModuleNotFound { module, file_name, .. }) => {
                format!("Native module '{}' ({}) was not found", module, file_name)
            }
            BridgeError::Link(LinkError::SymbolNotFound { module, symbol, .. }) => {
                format!("Native module '{}' does not export '{}'", module, symbol)
            }
            BridgeError::Link(err @ LinkError::AbiMismatch { .. }) => err.to_string(),
            BridgeError::IoError(e) => format!("Could not read configuration: {}", e),
            BridgeError::TomlError(e) => format!("Configuration file is not valid TOML: {}", e),
            BridgeError::ConfigError { message } => message.clone(),
            BridgeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BridgeError::Link(LinkError::ModuleNotFound { .. }) => {
                "Build the native module and make sure it is on the platform library search path"
            }
            BridgeError::Link(LinkError::SymbolNotFound { .. }) => {
                "Check that the module exports the symbol with C linkage (no name mangling)"
            }
            BridgeError::Link(LinkError::AbiMismatch { .. }) => {
                "Rebuild the native module for this platform and calling convention"
            }
            BridgeError::IoError(_) | BridgeError::TomlError(_) => {
                "Check the path and contents of the --config file"
            }
            BridgeError::ConfigError { .. } | BridgeError::InvalidConfigValueError { .. } => {
                "Check the --module and --symbol arguments"
            }
        }
    }

    /// Process exit code: 1 for linkage failures, 2 for configuration problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Link(_) => 1,
            _ => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = BridgeError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 2);

        let link = BridgeError::from(LinkError::AbiMismatch {
            module: "HelloWorld".to_string(),
            symbol: Some("print".to_string()),
            reason: "symbol 'print' resolves to a null address".to_string(),
        });
        assert_eq!(link.exit_code(), 1);
        assert!(link.user_friendly_message().contains("HelloWorld"));
        assert!(link.user_friendly_message().contains("print"));
    }
}
