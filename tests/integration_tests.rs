use anyhow::Result;
use hello_bridge::{
    load_native_module, BridgeCaller, BridgeError, LinkError, ModuleName, ModuleRegistry,
    NoopPrinter, SymbolName,
};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_absent_module_in_directory_fails_without_side_effects() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let library = temp_dir.path().join(libloading::library_filename("HelloWorld"));
    let module = ModuleName::new(library.to_string_lossy().into_owned())?;

    let registry = ModuleRegistry::new();
    for _ in 0..2 {
        let err = registry.load(&module).unwrap_err();
        assert!(matches!(err, LinkError::ModuleNotFound { .. }));
    }
    assert!(registry.is_empty());
    Ok(())
}

#[test]
fn test_file_that_is_not_a_library_is_an_abi_mismatch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let library = temp_dir.path().join(libloading::library_filename("Garbage"));
    std::fs::write(&library, b"definitely not a shared object")?;
    let module = ModuleName::new(library.to_string_lossy().into_owned())?;

    let err = BridgeCaller::connect(&module, &SymbolName::default()).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Link(LinkError::AbiMismatch { symbol: None, .. })
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(!err.user_friendly_message().contains("not found"));
    assert_eq!(
        err.recovery_suggestion(),
        "Rebuild the native module for this platform and calling convention"
    );
    Ok(())
}

#[test]
fn test_noop_printer_needs_no_native_module() -> Result<()> {
    let printer = Arc::new(NoopPrinter::new());
    let bridge = BridgeCaller::new(Arc::clone(&printer));
    bridge.print()?;
    assert_eq!(printer.calls(), 1);
    Ok(())
}

#[test]
fn test_concurrent_callers_share_bridge() -> Result<()> {
    let bridge = Arc::new(BridgeCaller::new(NoopPrinter::new()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bridge = Arc::clone(&bridge);
            std::thread::spawn(move || bridge.print())
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked")?;
    }
    assert_eq!(bridge.printer().calls(), 4);
    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_concurrent_loads_yield_one_instance() -> Result<()> {
    let registry = ModuleRegistry::new();
    let module = ModuleName::new("libc.so.6")?;

    let loaded = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| registry.load(&module)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect::<std::result::Result<Vec<_>, _>>()
    })?;

    let first = &loaded[0];
    assert!(loaded.iter().all(|module| Arc::ptr_eq(first, module)));
    assert_eq!(registry.len(), 1);
    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_global_load_returns_same_instance() -> Result<()> {
    let module = ModuleName::new("libc.so.6")?;
    let first = load_native_module(&module)?;
    let second = load_native_module(&module)?;
    assert!(Arc::ptr_eq(&first, &second));
    assert!(ModuleRegistry::global().is_loaded(&module));
    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_connect_and_print_end_to_end() -> Result<()> {
    let bridge = BridgeCaller::connect(&ModuleName::new("libc.so.6")?, &SymbolName::new("tzset")?)?;
    bridge.print()?;
    assert_eq!(bridge.printer().symbol().as_str(), "tzset");
    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_connect_reports_missing_symbol() -> Result<()> {
    let err = BridgeCaller::connect(
        &ModuleName::new("libc.so.6")?,
        &SymbolName::new("hello_bridge_missing_print")?,
    )
    .unwrap_err();

    assert!(err.user_friendly_message().contains("hello_bridge_missing_print"));
    assert!(matches!(err, BridgeError::Link(LinkError::SymbolNotFound { .. })));
    Ok(())
}
