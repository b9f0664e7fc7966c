// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vigil shell` command implementation.
//!
//! Interactive workbench with readline history. Plain lines are analyzed;
//! `/boost manual` switches into a tactical sub-mode until the session is
//! committed or cancelled. The vault is persisted to the configured SQLite
//! file after every change.

use std::sync::Arc;

use chrono::Utc;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use vigil_config::VigilConfig;
use vigil_core::{VaultStore, VigilError};
use vigil_engine::{EngineSettings, Workbench};
use vigil_mutation::MutationSession;
use vigil_vault::{SaveOutcome, SqliteVaultStore};

use crate::advisor::build_advisor;
use crate::analyze::follow;
use crate::command::{self, Command, TacticalCommand};
use crate::render::{self, TracePrinter};

struct Shell {
    workbench: Workbench,
    printer: TracePrinter,
    session: Option<MutationSession>,
}

/// Whether the REPL should keep reading.
enum Flow {
    Continue,
    Quit,
}

/// Runs the `vigil shell` interactive REPL.
pub async fn run_shell(config: &VigilConfig) -> Result<(), VigilError> {
    let advisor = build_advisor(config)?;
    let store: Arc<dyn VaultStore> =
        Arc::new(SqliteVaultStore::open(&config.vault.database_path).await?);
    let workbench = Workbench::start(advisor, store, EngineSettings::from(config)).await?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| VigilError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "vigil shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let mut shell = Shell {
        workbench,
        printer: TracePrinter::default(),
        session: None,
    };
    shell.flush().await;

    loop {
        let prompt = if shell.session.is_some() {
            format!("{}> ", "tactical".magenta())
        } else {
            format!("{}> ", "vigil".green())
        };
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match shell.handle(&line).await {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
                shell.flush().await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }
    Ok(())
}

impl Shell {
    async fn flush(&mut self) {
        let trace = self.workbench.snapshot().await.trace;
        self.printer.print(&trace);
    }

    async fn handle(&mut self, line: &str) -> Result<Flow, VigilError> {
        if self.session.is_some() {
            return self.handle_tactical(line).await.map(|()| Flow::Continue);
        }
        let command = match command::parse(line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message.yellow());
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "shell command");
        self.dispatch(command).await
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow, VigilError> {
        let wb = &self.workbench;
        let pipeline = wb.pipeline();
        let printer = &mut self.printer;

        match command {
            Command::Analyze(text) => {
                if let Ok(run) = follow(pipeline, printer, wb.analyze(&text)).await {
                    print_result(&run);
                }
            }
            Command::BoostAuto => {
                let run = follow(pipeline, printer, wb.boost_auto()).await?;
                print_result(&run);
            }
            Command::BoostManual => {
                let session = follow(pipeline, printer, wb.boost_manual()).await?;
                println!("{}", render::session_view(&session));
                println!("{}", command::TACTICAL_HELP.dimmed());
                self.session = Some(session);
            }
            Command::Voice(peaks) => {
                if let Ok(run) = follow(pipeline, printer, wb.capture_voice(&peaks)).await {
                    print_result(&run);
                }
            }
            Command::Retina(rgba) => {
                if let Ok(run) = follow(pipeline, printer, wb.capture_retina(&rgba)).await {
                    print_result(&run);
                }
            }
            Command::Bio(device) => {
                if let Ok(run) = follow(pipeline, printer, wb.capture_bio(device.as_deref())).await
                {
                    print_result(&run);
                }
            }
            Command::Save => {
                if let SaveOutcome::Saved(id) = wb.save().await? {
                    println!("saved as {}", id.short().cyan());
                }
            }
            Command::Vault(kind) => {
                let vault = wb.vault().await;
                let today = Utc::now().date_naive();
                print_rows(render::entry_table(vault.list_active(kind), |e| {
                    vault.classify(e, today)
                }));
            }
            Command::Trash => {
                let vault = wb.vault().await;
                let today = Utc::now().date_naive();
                print_rows(render::entry_table(vault.trashed(), |e| {
                    vault.classify(e, today)
                }));
            }
            Command::Report => {
                let today = Utc::now().date_naive();
                let report = wb.vault().await.expiry_report(today);
                println!("{}", render::expiry_summary(&report, today));
            }
            Command::Status => {
                let run = wb.snapshot().await;
                println!("status: {}", run.status.to_string().bold());
                if !run.target_text.is_empty() {
                    println!("target: {}", run.target_text);
                }
                print_result(&run);
            }
            Command::Delete(prefix) => {
                let id = wb.resolve(&prefix).await?;
                report_missing(wb.delete(&id).await?, "not in the active vault");
            }
            Command::Restore(prefix) => {
                let id = wb.resolve(&prefix).await?;
                report_missing(wb.restore(&id).await?, "not in the recycle bin");
            }
            Command::Purge(prefix) => {
                let id = wb.resolve(&prefix).await?;
                report_missing(
                    wb.purge(&id).await?,
                    "not in the recycle bin; delete it first",
                );
            }
            Command::Describe(prefix, text) => {
                let id = wb.resolve(&prefix).await?;
                wb.describe(&id, text).await?;
            }
            Command::Expire(prefix, date) => {
                let id = wb.resolve(&prefix).await?;
                wb.set_expiry(&id, date).await?;
            }
            Command::Reveal(prefix) => {
                let id = wb.resolve(&prefix).await?;
                match wb.reveal(&id).await? {
                    Some(entry) => println!("{}", entry.secret_value.bold()),
                    None => report_missing(false, "not in the active vault"),
                }
            }
            Command::Reset => wb.reset().await,
            Command::Help => println!("{}", command::HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn handle_tactical(&mut self, line: &str) -> Result<(), VigilError> {
        let command = match command::parse_tactical(line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message.yellow());
                return Ok(());
            }
        };
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        match command {
            TacticalCommand::Apply(affordance) => match session.op_for(affordance) {
                Some(op) => {
                    if !session.apply(&op)? {
                        println!("{}", "not applicable to the current buffer".dimmed());
                    }
                }
                None => eprintln!("{}", "no such suggestion".yellow()),
            },
            TacticalCommand::Preview(affordance) => match session.op_for(affordance) {
                Some(op) => {
                    if session.begin_preview(&op)?.is_none() {
                        println!("{}", "not applicable to the current buffer".dimmed());
                    }
                }
                None => eprintln!("{}", "no such suggestion".yellow()),
            },
            TacticalCommand::Unpreview => session.end_preview(),
            TacticalCommand::Select(start, end) => session.select(start, end)?,
            TacticalCommand::Edit(text) => session.edit(text),
            TacticalCommand::Show => {}
            TacticalCommand::Help => {
                println!("{}", command::TACTICAL_HELP);
                return Ok(());
            }
            TacticalCommand::Commit => {
                if let Some(session) = self.session.take() {
                    let wb = &self.workbench;
                    if let Ok(run) = follow(wb.pipeline(), &mut self.printer, wb.commit(session)).await
                    {
                        print_result(&run);
                    }
                }
                return Ok(());
            }
            TacticalCommand::Cancel => {
                if let Some(session) = self.session.take() {
                    self.workbench.cancel(session);
                    println!("{}", "tactical session discarded".dimmed());
                }
                return Ok(());
            }
        }

        if let Some(session) = &self.session {
            println!("{}", render::session_view(session));
        }
        Ok(())
    }
}

fn print_result(run: &vigil_engine::AnalysisRun) {
    if let Some(result) = &run.result {
        println!("{}", render::result_summary(result));
    }
}

fn print_rows(rows: Vec<String>) {
    if rows.is_empty() {
        println!("{}", "no entries".dimmed());
    }
    for row in rows {
        println!("{row}");
    }
}

fn report_missing(found: bool, message: &str) {
    if !found {
        eprintln!("{}", message.yellow());
    }
}
