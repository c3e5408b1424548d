//! Drive the `gitlab_service_jenkins_ci` resource from the command line.
//!
//! The resource state is exchanged as JSON: it is read from `--state` (stdin by default)
//! and the resulting state is written on stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;
use crate::error::BoxedError;
use crate::resource::data::ResourceData;
use crate::resource::jenkins_ci;

mod config;
mod error;
mod gitlab;
mod resource;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file holding the resource state, `-` for stdin
    #[arg(short, long, default_value = "-")]
    state: PathBuf,
    /// Operation to run
    #[command(subcommand)]
    command: Command,
}

/// Operations on the resource
#[derive(Debug, Subcommand)]
enum Command {
    /// Create the integration and print the resulting state
    Create,
    /// Refresh the state, the printed id is empty if the project is gone
    Read,
    /// Update the integration and print the resulting state
    Update,
    /// Remove the integration
    Delete,
    /// Import the integration of an existing project
    Import {
        /// Project id or full path
        project: String,
    },
    /// Compare `--state` with a prior state and tell what an update would change
    Plan {
        /// JSON file holding the prior state
        prior: PathBuf,
    },
    /// Print the resource schema
    Schema,
}

/// Output of the `plan` command
#[derive(Debug, Serialize)]
struct Plan {
    /// Configurable attributes that differ from the prior state
    changed: Vec<&'static str>,
    /// The integration has to be deleted and created again
    replace: bool,
}

/// Reads the resource state from `path`
fn load_state(path: &Path) -> Result<ResourceData, BoxedError> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

/// Runs `command`, returning what has to be printed on stdout
#[instrument(skip(state), err)]
async fn run(command: Command, state: &Path) -> Result<String, BoxedError> {
    let output = match command {
        Command::Schema => serde_json::to_string_pretty(&jenkins_ci::schema())?,
        Command::Plan { prior } => {
            let prior_data = load_state(&prior)?;
            let data = load_state(state)?;
            let schema = jenkins_ci::schema();
            schema.validate(&data)?;
            serde_json::to_string_pretty(&Plan {
                changed: schema.changed_attributes(&prior_data, &data),
                replace: schema.requires_replacement(&prior_data, &data),
            })?
        }
        Command::Create => {
            let connection = Config::from_env()?.connect()?;
            let mut data = load_state(state)?;
            jenkins_ci::create(&connection, &mut data).await?;
            serde_json::to_string_pretty(&data)?
        }
        Command::Read => {
            let connection = Config::from_env()?.connect()?;
            let mut data = load_state(state)?;
            jenkins_ci::read(&connection, &mut data).await?;
            if data.is_removed() {
                info!("the resource doesn't exist anymore");
            }
            serde_json::to_string_pretty(&data)?
        }
        Command::Update => {
            let connection = Config::from_env()?.connect()?;
            let mut data = load_state(state)?;
            jenkins_ci::update(&connection, &mut data).await?;
            serde_json::to_string_pretty(&data)?
        }
        Command::Delete => {
            let connection = Config::from_env()?.connect()?;
            let data = load_state(state)?;
            jenkins_ci::delete(&connection, &data).await?;
            String::new()
        }
        Command::Import { project } => {
            let connection = Config::from_env()?.connect()?;
            let mut data = jenkins_ci::import(&project);
            jenkins_ci::read(&connection, &mut data).await?;
            if data.is_removed() {
                return Err(format!("project {project} not found").into());
            }
            serde_json::to_string_pretty(&data)?
        }
    };

    Ok(output)
}

#[expect(clippy::print_stdout, reason = "The resulting state goes to stdout")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    info!("{} {:?}", jenkins_ci::RESOURCE_TYPE, cli.command);

    match run(cli.command, &cli.state).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
