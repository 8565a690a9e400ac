//! Plain-text rendering of ideas, evaluations, updates and status snapshots.

use idea_forge_sdk::{Evaluation, ForgeStatus, ForgeUpdate, Idea};
use serde::Serialize;
use std::fmt::Write;

/// Scores are whole numbers most of the time; keep one decimal otherwise.
fn score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn band(value: f64) -> &'static str {
    if value >= 8.0 {
        "high"
    } else if value >= 6.0 {
        "mid"
    } else {
        "low"
    }
}

/// The name a unit enum variant has on the wire.
fn wire_name<T: Serialize>(value: T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn write_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// One block per update: `[Iteration N] STAGE`, the message, and the score
/// when the update carries an evaluation.
pub fn update(update: &ForgeUpdate) -> String {
    let mut out = String::new();
    let stage = update
        .stage
        .map_or_else(|| "ERROR".to_string(), |stage| stage.as_str().to_uppercase());
    let _ = writeln!(out, "[Iteration {}] {stage}", update.iteration);

    if !update.message.is_empty() {
        let _ = writeln!(out, "  {}", update.message);
    }
    if let Some(error) = &update.error {
        let _ = writeln!(out, "  Error: {error}");
    }
    if let Some(evaluation) = &update.evaluation {
        let _ = writeln!(out, "  Score: {}/10", score(evaluation.overall_score));
        let _ = writeln!(out, "  Verdict: {}", evaluation.verdict);
    }
    out
}

pub fn idea(idea: &Idea) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", idea.title);
    if !idea.name.is_empty() {
        let _ = writeln!(out, "({})", idea.name);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Problem: {}", idea.problem);
    let _ = writeln!(out, "Solution: {}", idea.solution);
    if !idea.tech_stack.is_empty() {
        let _ = writeln!(out, "Tech stack: {}", idea.tech_stack.join(", "));
    }
    let _ = writeln!(out, "Unique angle: {}", idea.unique_angle);
    let _ = writeln!(out, "Demo potential: {}", idea.demo_potential);
    let _ = writeln!(
        out,
        "Scores: feasibility {} ({}), innovation {} ({}), impact {} ({})",
        score(idea.feasibility_score),
        band(idea.feasibility_score),
        score(idea.innovation_score),
        band(idea.innovation_score),
        score(idea.impact_score),
        band(idea.impact_score),
    );
    if let Some(sources) = idea.sources.as_deref() {
        write_list(&mut out, "Sources", sources);
    }
    out
}

pub fn evaluation(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Overall: {}/10 {}",
        score(evaluation.overall_score),
        evaluation.verdict
    );
    for (name, value) in evaluation.scores.entries() {
        let _ = writeln!(out, "  {:<16}{}", name.replace('_', " "), score(value));
    }
    write_list(&mut out, "Strengths", &evaluation.strengths);
    write_list(&mut out, "Weaknesses", &evaluation.weaknesses);
    write_list(
        &mut out,
        "Suggestions",
        &evaluation.improvement_suggestions,
    );
    if !evaluation.killer_feature_idea.is_empty() {
        let _ = writeln!(out, "Killer feature: {}", evaluation.killer_feature_idea);
    }
    if !evaluation.reasoning.is_empty() {
        let _ = writeln!(out, "Reasoning: {}", evaluation.reasoning);
    }
    out
}

/// The result card: the idea, then its evaluation when there is one.
pub fn card(idea: &Idea, evaluation: Option<&Evaluation>) -> String {
    let mut out = self::idea(idea);
    if let Some(evaluation) = evaluation {
        out.push('\n');
        out.push_str(&self::evaluation(evaluation));
    }
    out
}

pub fn status(status: &ForgeStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: {}", wire_name(status.status));
    if let Some(mode) = status.mode {
        let _ = writeln!(out, "Mode: {}", wire_name(mode));
    }
    if let (Some(iteration), Some(max_iterations)) = (status.iteration, status.max_iterations) {
        let _ = writeln!(out, "Iteration: {iteration}/{max_iterations}");
    }
    if let Some(threshold) = status.threshold {
        let _ = writeln!(out, "Threshold: {threshold}/10");
    }
    if let Some(ideas_count) = status.ideas_count {
        let _ = writeln!(out, "Ideas generated: {ideas_count}");
    }
    if let Some(idea) = &status.final_idea {
        let _ = writeln!(out);
        out.push_str(&card(idea, status.final_evaluation.as_ref()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use idea_forge_sdk::{EvaluationScores, ForgeMode, ForgeStage, ForgeStatusKind, Verdict};

    fn sample_idea() -> Idea {
        Idea {
            name: "pantry_pal".to_string(),
            title: "Pantry Pal".to_string(),
            problem: "Food waste".to_string(),
            solution: "Expiry nudges".to_string(),
            tech_stack: vec!["Rust".to_string(), "SQLite".to_string()],
            unique_angle: "Offline".to_string(),
            demo_potential: "Live shelf scan".to_string(),
            feasibility_score: 8.0,
            innovation_score: 6.5,
            impact_score: 4.0,
            sources: Some(vec!["https://example.com/thread".to_string()]),
        }
    }

    #[test]
    fn update_shows_stage_message_and_score() {
        let rendered = update(
            &ForgeUpdate::new(2, ForgeStage::Rejected, "Below threshold").with_evaluation(
                Evaluation {
                    overall_score: 5.0,
                    verdict: Verdict::Fail,
                    ..Evaluation::default()
                },
            ),
        );
        assert_eq!(
            rendered,
            "[Iteration 2] REJECTED\n  Below threshold\n  Score: 5/10\n  Verdict: FAIL\n"
        );
    }

    #[test]
    fn error_update_is_labelled() {
        let rendered = update(&ForgeUpdate::error("model unavailable"));
        assert_eq!(rendered, "[Iteration 0] ERROR\n  Error: model unavailable\n");
    }

    #[test]
    fn max_iterations_stage_is_uppercased() {
        let rendered = update(&ForgeUpdate::new(10, ForgeStage::MaxIterations, ""));
        assert_eq!(rendered, "[Iteration 10] MAX_ITERATIONS\n");
    }

    #[test]
    fn idea_card_lists_every_field() {
        let rendered = idea(&sample_idea());
        assert!(rendered.starts_with("Pantry Pal\n(pantry_pal)\n"));
        assert!(rendered.contains("Tech stack: Rust, SQLite\n"));
        assert!(rendered.contains(
            "Scores: feasibility 8 (high), innovation 6.5 (mid), impact 4 (low)\n"
        ));
        assert!(rendered.contains("Sources:\n  - https://example.com/thread\n"));
    }

    #[test]
    fn evaluation_lists_sub_scores_and_feedback() {
        let rendered = evaluation(&Evaluation {
            scores: EvaluationScores {
                innovation: 7.0,
                feasibility: 8.0,
                impact: 6.0,
                demo_potential: 9.0,
                technical_depth: 6.0,
                market_fit: 7.0,
            },
            overall_score: 7.2,
            verdict: Verdict::Pass,
            strengths: vec!["Clear demo".to_string()],
            weaknesses: Vec::new(),
            improvement_suggestions: vec!["Add sharing".to_string()],
            killer_feature_idea: "Recipes".to_string(),
            reasoning: "Solid".to_string(),
        });
        assert!(rendered.starts_with("Overall: 7.2/10 PASS\n"));
        assert!(rendered.contains("  technical depth 6\n"));
        assert!(rendered.contains("Strengths:\n  - Clear demo\n"));
        assert!(!rendered.contains("Weaknesses"));
        assert!(rendered.contains("Killer feature: Recipes\n"));
    }

    #[test]
    fn status_shows_progress_when_running() {
        let rendered = status(&ForgeStatus {
            status: ForgeStatusKind::Running,
            mode: Some(ForgeMode::Depth),
            iteration: Some(3),
            max_iterations: Some(10),
            ideas_count: None,
            threshold: Some(7),
            final_idea: None,
            final_evaluation: None,
        });
        assert_eq!(
            rendered,
            "Status: running\nMode: depth\nIteration: 3/10\nThreshold: 7/10\n"
        );
    }
}
