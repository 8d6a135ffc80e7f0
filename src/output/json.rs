//
//  listmonk-ops
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON output
//!
//! The default output of every command, shaped for `jq`:
//!
//! ```text
//! lmk subscribers list --per-page all | jq -r '.results[].email'
//! ```

use std::io::{self, Write};

use anyhow::Context;
use serde::Serialize;

/// Pretty-prints `value` to stdout.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut io::stdout().lock(), value)
}

/// Pretty-prints `value` and a trailing newline to `out`.
pub fn write_json_to<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    writeln!(out, "{rendered}").context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &json!({"name": "Weekly"})).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "{\n  \"name\": \"Weekly\"\n}\n");
    }
}
