use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use qremiser_digest::{Algorithm, DEFAULT_ALGORITHMS};
use qremiser_record::{HashPipeline, Identifier, Record, RecordAssembler};
use qremiser_server::{QremiserServer, ServerConfig};

use crate::cli::*;

/// Configuration from `path`, or defaults when no file was given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(p) => Ok(ServerConfig::from_file(p)?),
        None => Ok(ServerConfig::default()),
    }
}

pub fn run_command(cli: Cli, config: ServerConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Describe(args) => cmd_describe(args, &config),
        Command::Serve(args) => cmd_serve(args, config),
        Command::Algorithms => cmd_algorithms(&config),
    }
}

fn cmd_describe(args: DescribeArgs, config: &ServerConfig) -> anyhow::Result<()> {
    let pretty = args.pretty;
    let record = describe(args, config)?;
    println!("{}", render(&record, pretty)?);
    Ok(())
}

fn describe(args: DescribeArgs, config: &ServerConfig) -> anyhow::Result<Record> {
    let pipeline = if args.algorithms.is_empty() {
        config.pipeline()
    } else {
        HashPipeline::new(args.algorithms)
    };
    let identifier = match (args.identifier_type, args.identifier_value) {
        (Some(kind), Some(value)) => Some(Identifier::new(kind, value)?),
        _ => None,
    };

    let assembler = RecordAssembler::new().with_pipeline(pipeline);
    let record = assembler
        .assemble(&args.path, args.original_name.as_deref(), identifier)
        .with_context(|| format!("describing {}", args.path.display()))?;
    Ok(record)
}

fn render(record: &Record, pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(out)
}

fn cmd_serve(args: ServeArgs, mut config: ServerConfig) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    println!("qremiser listening on {}", config.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(QremiserServer::new(config).serve())?;
    Ok(())
}

fn cmd_algorithms(config: &ServerConfig) -> anyhow::Result<()> {
    let enabled = config.pipeline();
    for alg in Algorithm::ALL {
        let status = if alg.is_available() {
            "available".green()
        } else {
            "not built".red()
        };
        let marker = if enabled.algorithms().contains(&alg) {
            "*".yellow().bold()
        } else {
            " ".normal()
        };
        println!("{} {:<8} {}", marker, alg.name(), status);
    }
    let defaults: Vec<&str> = DEFAULT_ALGORITHMS.iter().map(|a| a.name()).collect();
    println!("\n{} enabled (default: {})", "*".yellow().bold(), defaults.join(", "));
    Ok(())
}
