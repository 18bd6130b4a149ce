use std::io::Write;

use clap::{Parser, Subcommand};

use crate::draw::{DrawArgs, run_draw};
use crate::error::Result;
use crate::inspect::{InspectArgs, run_inspect, run_list};
use crate::logging::{self, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "lsys",
    about = "Draw L-system fractals incrementally, as colored line segments",
    version
)]
pub struct Cli {
    /// Log line format on stderr. Filter with LSYS_LOG (default: warn).
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print built-in fractal slugs, names and default depths.
    List,

    /// Show a fractal's grammar, projection matrix and step count.
    Inspect(InspectArgs),

    /// Stream a fractal's segments to stdout as JSON lines.
    Draw(DrawArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::List => run_list(out),
        Commands::Inspect(args) => run_inspect(&args, out),
        Commands::Draw(args) => run_draw(&args, out),
    }
}
