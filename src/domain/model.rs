use std::ffi::OsString;
use std::fmt;
use std::path::Path;

use crate::utils::error::Result;
use crate::utils::validation::validate_native_name;

pub const DEFAULT_MODULE: &str = "HelloWorld";
pub const DEFAULT_SYMBOL: &str = "print";

/// Logical name of a native module, resolved by the platform's dynamic loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_native_name("module", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Artifact name handed to the loader.
    ///
    /// A bare name gets the platform prefix and suffix (`HelloWorld` becomes
    /// `libHelloWorld.so`, `libHelloWorld.dylib` or `HelloWorld.dll`). A name
    /// that already carries an extension or a path separator is used as is.
    pub fn file_name(&self) -> OsString {
        if self.is_file_like() {
            OsString::from(&self.0)
        } else {
            libloading::library_filename(&self.0)
        }
    }

    /// True when the name is a file name or path rather than a bare module name.
    pub fn is_file_like(&self) -> bool {
        self.0.contains('/')
            || self.0.contains('\\')
            || Path::new(&self.0).extension().is_some()
    }
}

impl Default for ModuleName {
    fn default() -> Self {
        Self(DEFAULT_MODULE.to_string())
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the exported zero-argument function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolName(String);

impl SymbolName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_native_name("symbol", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Default for SymbolName {
    fn default() -> Self {
        Self(DEFAULT_SYMBOL.to_string())
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
