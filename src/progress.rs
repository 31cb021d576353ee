//! Quiz completion
//!
//! The UI owns the quizzes. When one is passed it hands the result here,
//! which updates the save record and says what the game should do next.

use crate::persistence::SaveState;
use crate::score::{ScoreKind, ScoreReport};
use crate::sim::QuizId;

/// A passed quiz as reported by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub quiz_id: QuizId,
    pub total_time_ms: u64,
    pub attempts: u32,
}

/// What the game should do after a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// Hall gate passed: move to the next map
    Advance,
    /// Closing stage passed: big burst, stay put
    Celebrate,
}

/// Add the result to the combined score, mark the quiz complete and decide
/// the outcome. Returns a report when this quiz is a reporting point.
pub fn record_quiz_result(
    save: &mut SaveState,
    result: QuizResult,
    at: &str,
) -> (QuizOutcome, Option<ScoreReport>) {
    save.score.total_time_ms = save.score.total_time_ms.saturating_add(result.total_time_ms);
    save.score.attempts = save.score.attempts.saturating_add(result.attempts);
    save.mark_completed(result.quiz_id);

    let (outcome, kind) = match result.quiz_id {
        QuizId::Map1 => (QuizOutcome::Advance, None),
        QuizId::Map2 => (QuizOutcome::Advance, Some(ScoreKind::Checkpoint)),
        QuizId::Final => (QuizOutcome::Celebrate, Some(ScoreKind::Final)),
    };
    log::info!(
        "Quiz {} passed ({} ms, {} attempts)",
        result.quiz_id.as_str(),
        result.total_time_ms,
        result.attempts
    );

    let report = kind.map(|kind| ScoreReport {
        kind,
        player_name: save.player_name.clone(),
        total_time_ms: save.score.total_time_ms,
        attempts: save.score.attempts,
        at: at.to_string(),
    });
    (outcome, report)
}
