//! JSON output for CLI commands.

use std::io::{self, Write};

use serde_json::Value;

/// Write one compact JSON value followed by a newline (NDJSON).
pub fn write_line(out: &mut impl Write, value: &Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Print `value` to stdout, pretty unless `compact` is set.
pub fn emit(value: &Value, compact: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if compact {
        write_line(&mut out, value)
    } else {
        serde_json::to_writer_pretty(&mut out, value)?;
        out.write_all(b"\n")
    }
}
