// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis pipeline behavior under a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use vigil_core::{AnalysisResult, VigilError};
use vigil_engine::trace::{text, SCAN_STEPS};
use vigil_engine::{AnalysisPipeline, AnalysisStatus, PipelineSettings, Severity, TraceMode};
use vigil_test_utils::{MockAdvisor, Reply};

fn result(score: f64, vectors: &[&str]) -> AnalysisResult {
    AnalysisResult::new(score, vectors.iter().map(|v| v.to_string()).collect())
}

fn pipeline_with(advisor: MockAdvisor) -> (AnalysisPipeline, Arc<MockAdvisor>) {
    let advisor = Arc::new(advisor);
    let pipeline = AnalysisPipeline::new(advisor.clone(), PipelineSettings::default());
    (pipeline, advisor)
}

#[tokio::test(start_paused = true)]
async fn evaluator_failure_after_steps_yields_eight_lines() {
    let advisor = MockAdvisor::new();
    advisor
        .push_evaluation(Reply::err("service unavailable").after(Duration::from_secs(3)))
        .await;
    let (pipeline, _) = pipeline_with(advisor);

    let err = pipeline
        .run_analysis("password", TraceMode::Fresh)
        .await
        .unwrap_err();
    assert!(matches!(err, VigilError::Evaluation { .. }));

    let run = pipeline.snapshot().await;
    assert_eq!(run.status, AnalysisStatus::Error);
    assert_eq!(run.trace.len(), 8);
    for (line, step) in run.trace.iter().zip(SCAN_STEPS.iter()) {
        assert_eq!(line.text, step.text);
    }
    let last = run.trace.last().unwrap();
    assert_eq!(last.text, text::EVALUATION_FAILED);
    assert_eq!(last.severity, Severity::Error);
    assert!(run.result.is_none());
}

#[tokio::test(start_paused = true)]
async fn success_appends_vectors_in_evaluator_order() {
    let advisor = MockAdvisor::new();
    advisor
        .push_evaluation(Reply::ok(result(
            35.0,
            &["Rainbow Table", "Dictionary Attack", "Brute Force"],
        )))
        .await;
    let (pipeline, _) = pipeline_with(advisor);

    let run = pipeline.run_analysis("dragon", TraceMode::Fresh).await.unwrap();
    assert_eq!(run.status, AnalysisStatus::Complete);
    assert_eq!(run.score(), Some(35.0));
    assert_eq!(run.target_text, "dragon");

    let texts: Vec<_> = run.trace.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts.len(), 7 + 3 + 2);
    assert_eq!(
        &texts[7..10],
        &[
            ">> VULNERABILITY CONFIRMED: Rainbow Table",
            ">> VULNERABILITY CONFIRMED: Dictionary Attack",
            ">> VULNERABILITY CONFIRMED: Brute Force",
        ]
    );
    assert_eq!(texts[10], text::ANALYSIS_COMPLETE);
    assert_eq!(texts[11], text::REPORT);
    assert!(run.trace[7..10].iter().all(|l| l.severity == Severity::Error));
}

#[tokio::test(start_paused = true)]
async fn fast_evaluator_still_waits_for_every_step() {
    let (pipeline, _) = pipeline_with(MockAdvisor::new());
    let started = tokio::time::Instant::now();

    let run = pipeline.run_analysis("abc", TraceMode::Fresh).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(2100));
    assert_eq!(run.trace.len(), 9);
    assert_eq!(run.trace[6].text, "Aggregating vulnerability data...");
}

#[tokio::test(start_paused = true)]
async fn empty_input_appends_one_line_and_keeps_status() {
    let (pipeline, advisor) = pipeline_with(MockAdvisor::new());
    pipeline.run_analysis("first", TraceMode::Fresh).await.unwrap();
    let before = pipeline.snapshot().await;

    let err = pipeline.run_analysis("", TraceMode::Fresh).await.unwrap_err();
    assert!(matches!(err, VigilError::EmptyInput));

    let after = pipeline.snapshot().await;
    assert_eq!(after.status, AnalysisStatus::Complete);
    assert_eq!(after.target_text, "first");
    assert_eq!(after.trace.len(), before.trace.len() + 1);
    let last = after.trace.last().unwrap();
    assert_eq!(last.text, text::EMPTY_INPUT);
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(advisor.evaluate_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_input_from_idle_stays_idle() {
    let (pipeline, _) = pipeline_with(MockAdvisor::new());
    assert!(pipeline.run_analysis("", TraceMode::Fresh).await.is_err());
    let run = pipeline.snapshot().await;
    assert_eq!(run.status, AnalysisStatus::Idle);
    assert_eq!(run.trace.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_run_is_discarded() {
    let advisor = MockAdvisor::new();
    advisor
        .push_evaluation(Reply::ok(result(10.0, &["Stale"])).after(Duration::from_secs(10)))
        .await;
    advisor.push_evaluation(Reply::ok(result(80.0, &[]))).await;
    let (pipeline, _) = pipeline_with(advisor);

    let (slow, fast) = tokio::join!(pipeline.run_analysis("slow", TraceMode::Fresh), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        pipeline.run_analysis("fast", TraceMode::Fresh).await
    });

    match slow {
        Err(VigilError::StaleResultDiscarded { sequence, latest }) => {
            assert_eq!(sequence, 1);
            assert_eq!(latest, 2);
        }
        other => panic!("expected stale discard, got {other:?}"),
    }
    assert_eq!(fast.unwrap().score(), Some(80.0));

    let run = pipeline.snapshot().await;
    assert_eq!(run.target_text, "fast");
    assert_eq!(run.status, AnalysisStatus::Complete);
    assert_eq!(run.score(), Some(80.0));
    // Only the newer run's steps, no stale vector.
    assert_eq!(run.trace.len(), 9);
    assert!(run.trace.iter().all(|l| !l.text.contains("Stale")));
}

#[tokio::test(start_paused = true)]
async fn superseded_failure_does_not_flip_status() {
    let advisor = MockAdvisor::new();
    advisor
        .push_evaluation(Reply::err("late failure").after(Duration::from_secs(10)))
        .await;
    let (pipeline, _) = pipeline_with(advisor);

    let (slow, fast) = tokio::join!(pipeline.run_analysis("one", TraceMode::Fresh), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        pipeline.run_analysis("two", TraceMode::Fresh).await
    });
    assert!(matches!(slow, Err(VigilError::StaleResultDiscarded { .. })));
    assert!(fast.is_ok());
    assert_eq!(pipeline.status().await, AnalysisStatus::Complete);
}

#[tokio::test(start_paused = true)]
async fn preserve_mode_keeps_trace_and_adds_separator() {
    let (pipeline, _) = pipeline_with(MockAdvisor::new());
    let first = pipeline.run_analysis("a1", TraceMode::Fresh).await.unwrap();
    let second = pipeline.run_analysis("a2", TraceMode::Preserve).await.unwrap();

    assert_eq!(second.trace.len(), first.trace.len() + 1 + 9);
    let separator = &second.trace[first.trace.len()];
    assert_eq!(separator.text, text::REEVALUATE);
    assert_eq!(separator.severity, Severity::Info);
    assert_eq!(second.sequence, first.sequence + 1);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_idle_with_single_line() {
    let (pipeline, _) = pipeline_with(MockAdvisor::new());
    pipeline.run_analysis("xyz", TraceMode::Fresh).await.unwrap();
    pipeline.reset().await;

    let run = pipeline.snapshot().await;
    assert_eq!(run.status, AnalysisStatus::Idle);
    assert!(run.target_text.is_empty());
    assert!(run.result.is_none());
    assert_eq!(run.trace.len(), 1);
    assert_eq!(run.trace[0].text, text::RESET);
}

#[tokio::test(start_paused = true)]
async fn reset_during_run_discards_it() {
    let advisor = MockAdvisor::new();
    advisor
        .push_evaluation(Reply::ok(result(20.0, &[])).after(Duration::from_secs(5)))
        .await;
    let (pipeline, _) = pipeline_with(advisor);

    let (run, ()) = tokio::join!(pipeline.run_analysis("abc", TraceMode::Fresh), async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        pipeline.reset().await;
    });
    assert!(matches!(run, Err(VigilError::StaleResultDiscarded { .. })));
    assert_eq!(pipeline.status().await, AnalysisStatus::Idle);
    assert_eq!(pipeline.snapshot().await.trace.len(), 1);
}

#[tokio::test]
async fn trace_is_capped() {
    let advisor = Arc::new(MockAdvisor::new());
    let settings = PipelineSettings {
        trace_capacity: 10,
        simulate_delays: false,
        ..PipelineSettings::default()
    };
    let pipeline = AnalysisPipeline::new(advisor, settings);
    for i in 0..3 {
        pipeline
            .run_analysis(&format!("pw{i}"), TraceMode::Preserve)
            .await
            .unwrap();
    }
    let run = pipeline.snapshot().await;
    assert_eq!(run.trace.len(), 10);
    assert_eq!(run.trace.last().unwrap().text, text::REPORT);
}

#[tokio::test(start_paused = true)]
async fn steps_skip_sleeping_when_delays_disabled() {
    let advisor = Arc::new(MockAdvisor::new());
    let settings = PipelineSettings {
        simulate_delays: false,
        ..PipelineSettings::default()
    };
    let pipeline = AnalysisPipeline::new(advisor, settings);
    let started = tokio::time::Instant::now();
    let run = pipeline.run_analysis("quick", TraceMode::Fresh).await.unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(run.trace.len(), 9);
}

#[tokio::test(start_paused = true)]
async fn boost_target_gated_on_threshold() {
    let advisor = MockAdvisor::new();
    advisor.push_evaluation(Reply::ok(result(94.9, &[]))).await;
    advisor.push_evaluation(Reply::ok(result(95.0, &[]))).await;
    let (pipeline, _) = pipeline_with(advisor);

    assert!(matches!(
        pipeline.boost_target().await,
        Err(VigilError::BoostUnavailable(_))
    ));
    pipeline.run_analysis("low", TraceMode::Fresh).await.unwrap();
    let base = pipeline.boost_target().await.unwrap();
    assert_eq!(base.target, "low");
    assert_eq!(base.score, 94.9);
    assert_eq!(base.sequence, pipeline.snapshot().await.sequence);
    assert!(pipeline.ensure_current(base.sequence).is_ok());

    pipeline.run_analysis("high", TraceMode::Fresh).await.unwrap();
    assert!(matches!(
        pipeline.boost_target().await,
        Err(VigilError::BoostUnavailable(_))
    ));
}
