//! CLI tool for XSVF to CSVF conversion.

mod commands;
mod exit_codes;
mod output;

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use csvf::options::DEFAULT_MAX_COMPARE_BYTES;
use exit_codes::ExitCode;

/// XSVF to CSVF converter
#[derive(Parser)]
#[command(name = "xsvf2csvf")]
#[command(author, version, about = "Convert XSVF JTAG streams to CSVF", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an XSVF file to CSVF (alias: c)
    #[command(alias = "c")]
    Convert {
        /// XSVF file to convert
        input: PathBuf,

        /// Output file (defaults to the input with a .csvf extension)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Also write the uncompressed normalized stream to this file
        #[arg(short = 'u', long)]
        uncompressed: Option<PathBuf>,

        /// Compare buffer size of the target player, in bytes
        #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_COMPARE_BYTES)]
        max_compare_bytes: usize,
    },

    /// Expand a CSVF file back into its normalized stream (alias: d)
    #[command(alias = "d")]
    Decompress {
        /// CSVF file to expand
        input: PathBuf,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Convert in memory and report statistics (alias: i)
    #[command(alias = "i")]
    Info {
        /// XSVF file to inspect
        input: PathBuf,

        /// Compare buffer size of the target player, in bytes
        #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_COMPARE_BYTES)]
        max_compare_bytes: usize,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(ExitCode::BadArgs.code());
        }
        // --help and --version
        e.exit()
    });
    init_logging(cli.quiet, cli.verbose);

    let exit_code = match cli.command {
        Commands::Convert {
            input,
            output,
            uncompressed,
            max_compare_bytes,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("csvf"));
            commands::convert(&commands::ConvertConfig {
                input: &input,
                output: &output,
                uncompressed: uncompressed.as_deref(),
                max_compare_bytes,
                format: cli.format,
                quiet: cli.quiet,
            })
        }

        Commands::Decompress { input, output } => {
            commands::decompress(&input, &output, cli.format, cli.quiet)
        }

        Commands::Info {
            input,
            max_compare_bytes,
        } => commands::info(&input, max_compare_bytes, cli.format),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
