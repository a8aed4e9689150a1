mod cmd;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{ResolveArgs, ToolchainArgs, cmd_probe, cmd_resolve};
use output::{OutputFormat, print_error};

/// nativeplan - resolve native-image build settings for a project
#[derive(Parser)]
#[command(name = "nativeplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve the main class and arguments for a native build
  Resolve(ResolveArgs),

  /// Show the detected toolchain edition and version
  Probe {
    #[command(flatten)]
    toolchain: ToolchainArgs,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match &cli.command {
    Commands::Resolve(args) => cmd_resolve(args, cli.output),
    Commands::Probe { toolchain } => cmd_probe(toolchain, cli.output),
  };

  if let Err(e) = result {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
