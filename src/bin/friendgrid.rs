use clap::{Parser, Subcommand};
use friendgrid::config::FriendGridConfig;
use friendgrid::fusion::ItemParameters;
use friendgrid::fusion::schema::describe;
use friendgrid::input::NodeInput;
use friendgrid::input::loader::load_input_from_yaml;
use friendgrid::runtime::context::Context;
use friendgrid::runtime::dispatcher::{Dispatcher, plan};
use friendgrid::transport::HttpRequester;
use std::sync::Arc;
use std::path::PathBuf;
use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a node input file against the Fusion API
    Run {
        /// Path to the node input YAML/JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Path to a config file (base URL, timeout, credentials)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// API token for the default credential profile
        #[arg(long)]
        token: Option<String>,

        /// Parameter applied to every item (key=value)
        #[arg(long, short = 'P', value_parser = parse_key_val)]
        param: Vec<(String, Value)>,
    },

    /// Print the requests an input file would send, without sending them
    Plan {
        /// Path to the node input YAML/JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Parameter applied to every item (key=value)
        #[arg(long, short = 'P', value_parser = parse_key_val)]
        param: Vec<(String, Value)>,
    },

    /// Print the node description (resources, operations, parameters)
    Describe,
}

fn parse_key_val(s: &str) -> Result<(String, Value), String> {
    let pos = s.find('=').ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    let key = s[..pos].to_string();
    let val_str = &s[pos + 1..];
    // Ids stay strings; only structured values are parsed as JSON
    let val = match val_str.trim_start().chars().next() {
        Some('{') | Some('[') => serde_json::from_str(val_str)
            .map_err(|e| format!("invalid JSON for `{}`: {}", key, e))?,
        _ => Value::String(val_str.to_string()),
    };
    Ok((key, val))
}

fn load_input(input: &PathBuf, overrides: Vec<(String, Value)>) -> Result<NodeInput> {
    let mut node_input = load_input_from_yaml(&input.to_string_lossy())?;
    if overrides.is_empty() {
        return Ok(node_input);
    }

    let items = node_input.batch();
    node_input.items = items
        .into_iter()
        .map(|item| {
            let mut value = serde_json::to_value(item)?;
            if let Value::Object(map) = &mut value {
                for (k, v) in &overrides {
                    map.insert(k.clone(), v.clone());
                }
            }
            serde_json::from_value::<ItemParameters>(value)
        })
        .collect::<Result<_, _>>()
        .context("Invalid --param override")?;

    Ok(node_input)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the JSON output
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input, config, base_url, token, param } => {
            let node_input = load_input(&input, param)?;

            let config = match config {
                Some(path) => FriendGridConfig::load(&path)?,
                None => FriendGridConfig::default(),
            }
            .with_env()
            .with_overrides(base_url, token);
            info!("Using Fusion API at {}", config.base_url);

            let requester = HttpRequester::from_config(&config)?;
            let dispatcher = Dispatcher::new(Context::new(Arc::new(requester)));

            let responses = dispatcher.run(&node_input).await?;
            print_json(&responses)?;
        }

        Commands::Plan { input, param } => {
            let node_input = load_input(&input, param)?;
            let requests = plan(node_input.selection()?, &node_input.batch())?;
            print_json(&requests)?;
        }

        Commands::Describe => {
            print_json(&describe())?;
        }
    }

    Ok(())
}
