// Adapters layer: concrete NativePrinter implementations.

pub mod native;
pub mod noop;

pub use native::{load_native_module, LibraryPrinter, ModuleRegistry, NativeModule};
pub use noop::NoopPrinter;
