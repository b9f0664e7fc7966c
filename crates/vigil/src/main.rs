// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vigil - credential risk analysis workbench.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod advisor;
mod analyze;
mod command;
mod render;
mod shell;
mod vault_cmd;

use clap::{Parser, Subcommand};
use colored::Colorize;
use vigil_core::CaptureKind;

/// Vigil - credential risk analysis workbench.
#[derive(Parser, Debug)]
#[command(name = "vigil", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single analysis and print the trace.
    Analyze {
        /// Credential to evaluate.
        text: String,
    },
    /// Launch an interactive workbench session.
    Shell,
    /// Inspect or maintain the stored vault.
    Vault {
        #[command(subcommand)]
        action: VaultCommands,
    },
}

#[derive(Subcommand, Debug)]
enum VaultCommands {
    /// List vault entries.
    List {
        /// Show the recycle bin instead of active entries.
        #[arg(long)]
        trash: bool,
        /// Only show entries captured this way (text, voice, retina, bio).
        #[arg(long)]
        kind: Option<CaptureKind>,
    },
    /// Permanently remove a trashed entry.
    Purge {
        /// Entry id or unique id prefix.
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match vigil_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            vigil_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.engine.log_level);

    let outcome = match cli.command {
        Some(Commands::Analyze { text }) => analyze::run_analyze(&config, &text).await,
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Vault { action }) => match action {
            VaultCommands::List { trash, kind } => vault_cmd::run_list(&config, trash, kind).await,
            VaultCommands::Purge { id } => vault_cmd::run_purge(&config, &id).await,
        },
        None => {
            println!("vigil: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vigil={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_vault_list_filters() {
        let cli = Cli::try_parse_from(["vigil", "vault", "list", "--trash", "--kind", "voice"])
            .unwrap();
        match cli.command {
            Some(Commands::Vault {
                action: VaultCommands::List { trash, kind },
            }) => {
                assert!(trash);
                assert_eq!(kind, Some(CaptureKind::Voice));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["vigil", "vault", "list", "--kind", "smell"]).is_err());
    }

    #[test]
    fn cli_parses_analyze() {
        let cli = Cli::try_parse_from(["vigil", "analyze", "hunter2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Analyze { text }) if text == "hunter2"));
    }
}
