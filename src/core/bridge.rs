use tracing::{debug, info};

use crate::adapters::native::{load_native_module, LibraryPrinter};
use crate::core::{ModuleName, NativePrinter, SymbolName};
use crate::utils::error::Result;

/// Calls a native `print` operation through a `NativePrinter`.
#[derive(Debug)]
pub struct BridgeCaller<P: NativePrinter> {
    printer: P,
}

impl<P: NativePrinter> BridgeCaller<P> {
    pub fn new(printer: P) -> Self {
        Self { printer }
    }

    /// Runs the native operation, blocking until it returns.
    pub fn print(&self) -> Result<()> {
        debug!("Invoking native print");
        self.printer.print()?;
        Ok(())
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }
}

impl BridgeCaller<LibraryPrinter> {
    /// Loads `module` and resolves `symbol` before returning, so any
    /// linkage failure is reported here rather than on the first call.
    pub fn connect(module: &ModuleName, symbol: &SymbolName) -> Result<Self> {
        let native = load_native_module(module)?;
        let printer = LibraryPrinter::resolve(native, symbol)?;
        info!("Bridge connected to {}::{}", module, symbol);
        Ok(Self::new(printer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::noop::NoopPrinter;
    use crate::utils::error::{BridgeError, LinkError};

    struct FailingPrinter;

    impl NativePrinter for FailingPrinter {
        fn print(&self) -> std::result::Result<(), LinkError> {
            Err(LinkError::AbiMismatch {
                module: "HelloWorld".to_string(),
                symbol: Some("print".to_string()),
                reason: "test".to_string(),
            })
        }
    }

    #[test]
    fn test_print_delegates_to_printer() {
        let bridge = BridgeCaller::new(NoopPrinter::new());
        bridge.print().unwrap();
        bridge.print().unwrap();
        assert_eq!(bridge.printer().calls(), 2);
    }

    #[test]
    fn test_printer_failure_propagates() {
        let bridge = BridgeCaller::new(FailingPrinter);
        let err = bridge.print().unwrap_err();
        assert!(matches!(err, BridgeError::Link(LinkError::AbiMismatch { .. })));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_boxed_printer() {
        let printer: Box<dyn NativePrinter> = Box::new(NoopPrinter::new());
        let bridge = BridgeCaller::new(printer);
        assert!(bridge.print().is_ok());
    }

    #[test]
    fn test_connect_missing_module() {
        let module = ModuleName::new("HelloBridgeMissingForConnect").unwrap();
        let err = BridgeCaller::connect(&module, &SymbolName::default()).unwrap_err();
        match err {
            BridgeError::Link(LinkError::ModuleNotFound { module, .. }) => {
                assert_eq!(module, "HelloBridgeMissingForConnect")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
