//! Sample native module for the bridge: exports a zero-argument `print`.

#![allow(non_snake_case)]

use std::io::Write;

const GREETING: &str = "Hello, World from native code!";

/// Writes the greeting to stdout.
///
/// Write failures are swallowed: unwinding out of an `extern "C"` function
/// aborts the host process.
#[no_mangle]
pub extern "C" fn print() {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{}", GREETING);
    let _ = stdout.flush();
}
