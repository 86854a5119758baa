//! Answer evaluation and point arithmetic for the quiz games.

use serde::{Deserialize, Serialize};

/// How a game matches a submitted answer against the correct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Multiple choice: the submitted option must equal the stored answer.
    Choice,
    /// Typed answer: compared after normalization, alternates accepted.
    FreeText,
}

/// Normalize a free-text answer: lowercase, drop punctuation, collapse
/// whitespace runs, trim.
pub fn normalize_answer(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `submitted` counts as correct for a question whose canonical
/// answer is `correct`, with optional alternates for free-text games.
pub fn is_correct(
    submitted: &str,
    correct: &str,
    accepted: &[String],
    mode: AnswerMode,
) -> bool {
    match mode {
        AnswerMode::Choice => submitted == correct,
        AnswerMode::FreeText => {
            let normalized = normalize_answer(submitted);
            normalize_answer(correct) == normalized
                || accepted.iter().any(|a| normalize_answer(a) == normalized)
        }
    }
}

/// Points awarded for a correct answer.
///
/// `base + floor(time_remaining / divisor)`, minus the hint penalty when a
/// hint was revealed this question. Never negative; no divisor means no
/// speed bonus.
pub fn points_for(
    base: u32,
    time_remaining: u32,
    bonus_divisor: Option<u32>,
    hint_penalty: u32,
) -> u32 {
    let bonus = match bonus_divisor {
        Some(divisor) if divisor > 0 => time_remaining / divisor,
        _ => 0,
    };
    (base + bonus).saturating_sub(hint_penalty)
}
