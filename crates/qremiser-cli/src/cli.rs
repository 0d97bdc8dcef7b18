use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use qremiser_digest::Algorithm;

#[derive(Parser)]
#[command(
    name = "qremiser",
    about = "Build preservation metadata records for files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file.
    #[arg(long, global = true, env = "QREMISER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Characterize a file and print its record as JSON
    Describe(DescribeArgs),
    /// Start the HTTP upload endpoint
    Serve(ServeArgs),
    /// List digest algorithms and whether this build supports them
    Algorithms,
}

#[derive(Args)]
pub struct DescribeArgs {
    pub path: PathBuf,

    /// Name the file had before it was staged; enables the extension guess.
    #[arg(long)]
    pub original_name: Option<String>,

    #[arg(long, requires = "identifier_value")]
    pub identifier_type: Option<String>,

    #[arg(long, requires = "identifier_type")]
    pub identifier_value: Option<String>,

    /// Digest algorithm; repeat for several. Defaults to the configured set.
    #[arg(short, long = "algorithm")]
    pub algorithms: Vec<Algorithm>,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Overrides `bind_addr` from the configuration file.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}
