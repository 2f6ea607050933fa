use crate::utils::error::LinkError;

/// Capability to run the native `print` operation.
///
/// Calls block until the implementation returns. Implementations backed by
/// native code inherit that code's thread-safety guarantees; the bridge adds
/// no locking of its own.
pub trait NativePrinter: Send + Sync {
    fn print(&self) -> Result<(), LinkError>;
}

impl<P: NativePrinter + ?Sized> NativePrinter for Box<P> {
    fn print(&self) -> Result<(), LinkError> {
        (**self).print()
    }
}

impl<P: NativePrinter + ?Sized> NativePrinter for std::sync::Arc<P> {
    fn print(&self) -> Result<(), LinkError> {
        (**self).print()
    }
}
