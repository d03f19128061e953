use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use component_size_report::cmd;
use component_size_report::pipeline::config::DEFAULT_STATS_PATH;
use std::process;

/// Component size reports for merge requests
///
/// Extracts per-component JS/CSS sizes from bundle analyzer stats, keeps them
/// as a CI artifact, and comments the difference against the baseline branch
/// on the merge request.
#[derive(Parser)]
#[command(name = "component-size-report", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI logs or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the artifact and update the merge request comment
    Report(cmd::ReportArgs),

    /// Print component sizes found in a stats file
    Extract {
        /// Bundle analyzer stats file
        #[arg(long, env = "STATS_PATH", default_value = DEFAULT_STATS_PATH)]
        stats_path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the report comment for two local artifacts
    Compare {
        /// Artifact of the current build
        current: String,

        /// Artifact of the baseline build
        baseline: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
        console::set_colors_enabled(false);
    }

    let result = match &cli.command {
        Some(Commands::Report(args)) => cmd::cmd_report(args),
        Some(Commands::Extract { stats_path, json }) => cmd::cmd_extract(stats_path, *json),
        Some(Commands::Compare { current, baseline }) => cmd::cmd_compare(current, baseline),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell, &mut Cli::command());
            Ok(())
        }
        None => {
            println!("component-size-report v{}", env!("CARGO_PKG_VERSION"));
            println!("Component size reports for merge requests\n");
            println!("Usage: component-size-report <COMMAND>\n");
            println!("Commands:");
            println!("  report       Build the artifact and update the merge request comment");
            println!("  extract      Print component sizes found in a stats file");
            println!("  compare      Render the report comment for two local artifacts");
            println!("  completions  Generate shell completions");
            println!(
                "\nRun 'component-size-report <COMMAND> --help' for more information on a command."
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        use component_size_report::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        process::exit(ErrorFormatter::exit_code(&e));
    }
}
