mod output;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use idlschema::{AMENT_PREFIX_PATH, AmentIndex, SchemaComposer};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use output::{ErrorOutput, UsageOutput, print_json};

#[derive(Parser)]
#[command(
    name = "get-type-schema",
    version,
    about = "Print the JSON schema of a ROS 2 message, service or action type"
)]
struct Cli {
    /// Interface type, e.g. sensor_msgs/msg/Temperature
    type_name: String,

    /// Install prefixes to search for interface definitions
    #[arg(long, env = "AMENT_PREFIX_PATH", value_delimiter = ':', hide_env_values = true)]
    prefix_path: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!(error = %e, "invalid invocation");
            return finish(print_json(&UsageOutput::default()).map(|()| ExitCode::FAILURE));
        }
    };

    finish(run(cli))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let prefixes: Vec<PathBuf> = cli
        .prefix_path
        .into_iter()
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    if prefixes.is_empty() {
        warn!("no install prefixes given; set {AMENT_PREFIX_PATH} or pass --prefix-path");
    }

    let composer = SchemaComposer::new(AmentIndex::new(prefixes));
    match composer.resolve(&cli.type_name) {
        Ok(resolved) => {
            print_json(&resolved)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            debug!(error = ?err, "resolution failed");
            print_json(&ErrorOutput::new(&err))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn finish(result: Result<ExitCode>) -> ExitCode {
    result.unwrap_or_else(|e| {
        eprintln!("error: {e:#}");
        ExitCode::FAILURE
    })
}
