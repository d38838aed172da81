use std::io::{self, Write};

use anyhow::{Context, Result};
use idlschema::ResolutionError;
use serde::Serialize;

/// Printed when the command line does not name exactly one type.
#[derive(Debug, Serialize)]
pub struct UsageOutput {
    error: &'static str,
    examples: [&'static str; 3],
}

impl Default for UsageOutput {
    fn default() -> Self {
        Self {
            error: "Usage: get-type-schema <type>",
            examples: [
                "get-type-schema sensor_msgs/msg/Temperature",
                "get-type-schema std_srvs/srv/Trigger",
                "get-type-schema example_interfaces/action/Fibonacci",
            ],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorOutput<'a> {
    error: String,
    #[serde(rename = "type")]
    type_name: &'a str,
}

impl<'a> ErrorOutput<'a> {
    pub fn new(err: &'a ResolutionError) -> Self {
        Self {
            error: err.to_string(),
            type_name: err.type_name(),
        }
    }
}

/// Write `value` to stdout as a single JSON line.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer(&mut out, value).context("failed to write JSON output")?;
    writeln!(out).context("failed to write JSON output")?;
    Ok(())
}
