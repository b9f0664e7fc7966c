// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vigil analyze` command implementation.
//!
//! Runs one analysis with the configured advisor, streaming trace lines as
//! they are appended. Does not open the vault.

use std::future::Future;
use std::time::Duration;

use vigil_config::VigilConfig;
use vigil_core::VigilError;
use vigil_engine::{AnalysisPipeline, PipelineSettings, TraceMode};

use crate::advisor::build_advisor;
use crate::render::{self, TracePrinter};

/// Trace polling interval while a run is in flight.
const FOLLOW_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_analyze(config: &VigilConfig, text: &str) -> Result<(), VigilError> {
    let advisor = build_advisor(config)?;
    let pipeline = AnalysisPipeline::new(advisor, PipelineSettings::from(&config.pipeline));
    let mut printer = TracePrinter::default();

    let run = follow(
        &pipeline,
        &mut printer,
        pipeline.run_analysis(text, TraceMode::Fresh),
    )
    .await?;

    if let Some(result) = &run.result {
        println!();
        println!("{}", render::result_summary(result));
    }
    Ok(())
}

/// Drive `fut` to completion, printing new trace lines as they appear.
pub async fn follow<F, T>(pipeline: &AnalysisPipeline, printer: &mut TracePrinter, fut: F) -> T
where
    F: Future<Output = T>,
{
    tokio::pin!(fut);
    let mut tick = tokio::time::interval(FOLLOW_INTERVAL);
    loop {
        tokio::select! {
            out = &mut fut => {
                printer.print(&pipeline.snapshot().await.trace);
                return out;
            }
            _ = tick.tick() => {
                printer.print(&pipeline.snapshot().await.trace);
            }
        }
    }
}
