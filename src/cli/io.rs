//! JSON output for one-shot commands
//!
//! Each command prints exactly one JSON object on stdout.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::CliResult;

/// Build the success envelope
pub fn ok_envelope<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(json!({
        "status": "ok",
        "data": serde_json::to_value(data)?,
    }))
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_json(&ok_envelope(data)?)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_json(&json!({
        "status": "error",
        "code": code,
        "message": message,
    }))
}

fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let value = ok_envelope(&vec![1, 2]).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"], json!([1, 2]));
    }
}
