//! Dynamic loading of native modules using libloading.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use libloading::Library;
use tracing::{debug, info};

use crate::domain::model::{ModuleName, SymbolName};
use crate::domain::ports::NativePrinter;
use crate::utils::error::LinkError;

/// Signature every bridged entry point must have: no arguments, no return.
pub type PrintFn = unsafe extern "C" fn();

/// A native module loaded into the process.
///
/// Never unloaded: the handle lives as long as the last `Arc` pointing at it,
/// and the global registry keeps one for the lifetime of the process.
#[derive(Debug)]
pub struct NativeModule {
    name: ModuleName,
    file_name: OsString,
    library: Library,
}

impl NativeModule {
    /// Opens the module through the platform loader, bypassing any registry.
    ///
    /// Loading runs the module's initialisers, so only load trusted modules.
    pub fn open(name: &ModuleName) -> Result<Self, LinkError> {
        let file_name = name.file_name();
        debug!("Opening native module {} as {:?}", name, file_name);

        let library = unsafe { Library::new(&file_name) }
            .map_err(|source| classify_load_error(name, &file_name, source))?;

        Ok(Self {
            name: name.clone(),
            file_name,
            library,
        })
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }
}

/// Loader messages for a file that was found but is not a usable library.
const FORMAT_ERRORS: &[&str] = &[
    "invalid elf header",
    "wrong elf class",
    "file too short",
    "elf load command",
    "not a mach-o file",
    "incompatible architecture",
    "wrong architecture",
    "not a valid win32 application",
];

/// Splits a failed load into "nothing there" and "there, but unusable".
///
/// A file-like name that exists on disk, or a loader message describing a
/// bad binary format, means the module was found and rejected.
fn classify_load_error(
    name: &ModuleName,
    file_name: &OsStr,
    source: libloading::Error,
) -> LinkError {
    let message = source.to_string().to_lowercase();
    let present = name.is_file_like() && Path::new(file_name).exists();

    if present || FORMAT_ERRORS.iter().any(|needle| message.contains(needle)) {
        return LinkError::AbiMismatch {
            module: name.to_string(),
            symbol: None,
            reason: format!(
                "'{}' is not a loadable library for this platform: {}",
                file_name.to_string_lossy(),
                source
            ),
        };
    }

    LinkError::ModuleNotFound {
        module: name.to_string(),
        file_name: file_name.to_string_lossy().into_owned(),
        source,
    }
}

/// Process-wide cache of loaded modules keyed by logical name.
///
/// The lock is held across the load itself, so two threads asking for the
/// same module never open it twice. Failures are not cached.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Mutex<HashMap<ModuleName, Arc<NativeModule>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static ModuleRegistry {
        static GLOBAL: OnceLock<ModuleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ModuleRegistry::new)
    }

    /// Loads `name`, or returns the instance from an earlier successful load.
    pub fn load(&self, name: &ModuleName) -> Result<Arc<NativeModule>, LinkError> {
        let mut modules = self.modules.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(module) = modules.get(name) {
            debug!("Native module {} already loaded", name);
            return Ok(Arc::clone(module));
        }

        let module = Arc::new(NativeModule::open(name)?);
        info!(
            "Loaded native module {} ({})",
            name,
            module.file_name().to_string_lossy()
        );
        modules.insert(name.clone(), Arc::clone(&module));
        Ok(module)
    }

    pub fn is_loaded(&self, name: &ModuleName) -> bool {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads a native module through the global registry. Idempotent.
pub fn load_native_module(name: &ModuleName) -> Result<Arc<NativeModule>, LinkError> {
    ModuleRegistry::global().load(name)
}

/// `NativePrinter` backed by a function exported from a native module.
pub struct LibraryPrinter {
    module: Arc<NativeModule>,
    symbol: SymbolName,
    func: PrintFn,
}

impl LibraryPrinter {
    /// Resolves `symbol` in `module` up front so a missing export surfaces
    /// before the first call.
    pub fn resolve(module: Arc<NativeModule>, symbol: &SymbolName) -> Result<Self, LinkError> {
        // Option<fn> lets a symbol that resolves to address zero be detected
        // instead of called.
        let resolved = {
            let sym = unsafe { module.library.get::<Option<PrintFn>>(symbol.as_bytes()) }
                .map_err(|source| LinkError::SymbolNotFound {
                    module: module.name().to_string(),
                    symbol: symbol.to_string(),
                    source,
                })?;
            *sym
        };

        let func = resolved.ok_or_else(|| LinkError::AbiMismatch {
            module: module.name().to_string(),
            symbol: Some(symbol.to_string()),
            reason: format!("symbol '{}' resolves to a null address", symbol),
        })?;

        debug!("Resolved {} in native module {}", symbol, module.name());

        Ok(Self {
            module,
            symbol: symbol.clone(),
            func,
        })
    }

    pub fn symbol(&self) -> &SymbolName {
        &self.symbol
    }
}

impl NativePrinter for LibraryPrinter {
    fn print(&self) -> Result<(), LinkError> {
        debug!("Calling {} in native module {}", self.symbol, self.module.name());
        // The module is kept alive by `self.module` for as long as `func` is reachable.
        unsafe { (self.func)() };
        Ok(())
    }
}

impl std::fmt::Debug for LibraryPrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryPrinter")
            .field("module", self.module.name())
            .field("symbol", &self.symbol)
            .finish()
    }
}
