//! Quiz mini-game state machine.
//!
//! One `QuizEngine` drives one play session. The countdown is modeled as an
//! explicit [`QuizEngine::tick`] (one call = one elapsed second) so the host
//! decides where ticks come from and tests never wait on a real clock. A
//! session runs a fixed number of turns (the initial queue length); games
//! with the retry flag rotate a missed question to the back of the queue so
//! it comes around again within the remaining turns.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::scoring::{is_correct, points_for, AnswerMode};
use crate::types::GameQuestion;

/// The quiz mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    WordMatch,
    SpeedWords,
    PhrasalChallenge,
    ContextClues,
    BusinessEnglish,
    NativeSpeed,
    ListeningComp,
    FillBlanks,
    MasterChallenge,
    TranslationChallenge,
}

impl GameKind {
    /// All game kinds.
    pub const ALL: [GameKind; 10] = [
        Self::WordMatch,
        Self::SpeedWords,
        Self::PhrasalChallenge,
        Self::ContextClues,
        Self::BusinessEnglish,
        Self::NativeSpeed,
        Self::ListeningComp,
        Self::FillBlanks,
        Self::MasterChallenge,
        Self::TranslationChallenge,
    ];

    /// Get the game identifier as stored in the question bank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordMatch => "word_match",
            Self::SpeedWords => "speed_words",
            Self::PhrasalChallenge => "phrasal_challenge",
            Self::ContextClues => "context_clues",
            Self::BusinessEnglish => "business_english",
            Self::NativeSpeed => "native_speed",
            Self::ListeningComp => "listening_comp",
            Self::FillBlanks => "fill_blanks",
            Self::MasterChallenge => "master_challenge",
            Self::TranslationChallenge => "translation_challenge",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Fixed per-game tuning.
    pub fn config(&self) -> GameConfig {
        match self {
            Self::WordMatch => GameConfig {
                question_count: 5,
                timer_secs: 30,
                base_points: 10,
                bonus_divisor: None,
                hint_penalty: 0,
                retry_missed: true,
                feedback_delay_ms: 2500,
                answer_mode: AnswerMode::Choice,
            },
            Self::SpeedWords => GameConfig {
                question_count: 8,
                timer_secs: 15,
                base_points: 10,
                bonus_divisor: Some(5),
                hint_penalty: 0,
                retry_missed: true,
                feedback_delay_ms: 2000,
                answer_mode: AnswerMode::Choice,
            },
            Self::PhrasalChallenge => GameConfig {
                question_count: 6,
                timer_secs: 20,
                base_points: 20,
                bonus_divisor: Some(8),
                hint_penalty: 0,
                retry_missed: false,
                feedback_delay_ms: 1500,
                answer_mode: AnswerMode::Choice,
            },
            Self::ContextClues => GameConfig {
                question_count: 6,
                timer_secs: 25,
                base_points: 15,
                bonus_divisor: Some(8),
                hint_penalty: 0,
                retry_missed: false,
                feedback_delay_ms: 1500,
                answer_mode: AnswerMode::Choice,
            },
            Self::BusinessEnglish => GameConfig {
                question_count: 6,
                timer_secs: 25,
                base_points: 30,
                bonus_divisor: Some(6),
                hint_penalty: 0,
                retry_missed: false,
                feedback_delay_ms: 1500,
                answer_mode: AnswerMode::Choice,
            },
            Self::NativeSpeed => GameConfig {
                question_count: 7,
                timer_secs: 20,
                base_points: 30,
                bonus_divisor: Some(6),
                hint_penalty: 0,
                retry_missed: true,
                feedback_delay_ms: 2000,
                answer_mode: AnswerMode::Choice,
            },
            Self::ListeningComp => GameConfig {
                question_count: 5,
                timer_secs: 30,
                base_points: 20,
                bonus_divisor: Some(10),
                hint_penalty: 0,
                retry_missed: false,
                feedback_delay_ms: 1500,
                answer_mode: AnswerMode::Choice,
            },
            Self::FillBlanks => GameConfig {
                question_count: 6,
                timer_secs: 20,
                base_points: 10,
                bonus_divisor: None,
                hint_penalty: 0,
                retry_missed: true,
                feedback_delay_ms: 2500,
                answer_mode: AnswerMode::Choice,
            },
            Self::MasterChallenge => GameConfig {
                question_count: 5,
                timer_secs: 45,
                base_points: 40,
                bonus_divisor: Some(10),
                hint_penalty: 10,
                retry_missed: false,
                feedback_delay_ms: 2000,
                answer_mode: AnswerMode::FreeText,
            },
            Self::TranslationChallenge => GameConfig {
                question_count: 6,
                timer_secs: 40,
                base_points: 25,
                bonus_divisor: Some(15),
                hint_penalty: 0,
                retry_missed: false,
                feedback_delay_ms: 1500,
                answer_mode: AnswerMode::FreeText,
            },
        }
    }
}

/// Tuning for one game kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Questions drawn into one session.
    pub question_count: usize,
    /// Countdown per question, in seconds.
    pub timer_secs: u32,
    /// Points for a correct answer before bonuses.
    pub base_points: u32,
    /// Speed bonus is `time_remaining / divisor`; None disables it.
    pub bonus_divisor: Option<u32>,
    /// Subtracted from the award when the hint was revealed.
    pub hint_penalty: u32,
    /// Missed questions go to the back of the queue instead of out.
    pub retry_missed: bool,
    /// How long the UI shows feedback before advancing.
    pub feedback_delay_ms: u64,
    /// How answers are compared.
    pub answer_mode: AnswerMode,
}

/// What happened to the question currently being revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct { points: u32 },
    Incorrect,
    TimedOut,
}

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Timer running, waiting for a selection.
    AwaitingAnswer,
    /// Feedback showing; the timer is frozen.
    Revealed(Outcome),
    /// Terminal. No further input is accepted.
    Completed,
}

/// Result of advancing past a revealed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A fresh question is up.
    Next,
    /// The session ended; carries the final score, reported exactly once.
    Completed(u32),
}

/// One quiz play session.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    kind: GameKind,
    config: GameConfig,
    queue: VecDeque<GameQuestion>,
    turns_remaining: usize,
    score: u32,
    time_remaining: u32,
    hint_revealed: bool,
    phase: Phase,
}

impl QuizEngine {
    /// Start a session over the given questions, truncated to the game's
    /// question count. An empty question list completes immediately.
    pub fn new(kind: GameKind, questions: Vec<GameQuestion>) -> Self {
        let config = kind.config();
        let mut queue: VecDeque<GameQuestion> = questions.into();
        queue.truncate(config.question_count);
        let turns_remaining = queue.len();
        let phase = if queue.is_empty() {
            Phase::Completed
        } else {
            Phase::AwaitingAnswer
        };
        Self {
            kind,
            config,
            queue,
            turns_remaining,
            score: 0,
            time_remaining: config.timer_secs,
            hint_revealed: false,
            phase,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turns left in the session, counting the current one.
    pub fn turns_remaining(&self) -> usize {
        self.turns_remaining
    }

    /// The question currently shown, if the session is live.
    pub fn current_question(&self) -> Option<&GameQuestion> {
        match self.phase {
            Phase::Completed => None,
            _ => self.queue.front(),
        }
    }

    /// One second elapsed. At zero the question times out, which behaves
    /// exactly like a wrong answer: no score, same requeue rules.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.phase = Phase::Revealed(Outcome::TimedOut);
            return Some(Outcome::TimedOut);
        }
        None
    }

    /// Reveal the current question's hint. Costs the game's hint penalty on
    /// a subsequent correct answer.
    pub fn reveal_hint(&mut self) -> Option<&str> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let hint = self.queue.front().and_then(|q| q.hint.as_deref());
        if hint.is_some() {
            self.hint_revealed = true;
        }
        hint
    }

    /// Submit an answer for the current question. Freezes the timer and
    /// moves to feedback; ignored outside `AwaitingAnswer`.
    pub fn answer(&mut self, submitted: &str) -> Option<Outcome> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let question = self.queue.front()?;
        let correct = is_correct(
            submitted,
            &question.correct_answer,
            &question.accepted_answers,
            self.config.answer_mode,
        );
        let outcome = if correct {
            let penalty = if self.hint_revealed {
                self.config.hint_penalty
            } else {
                0
            };
            let points = points_for(
                self.config.base_points,
                self.time_remaining,
                self.config.bonus_divisor,
                penalty,
            );
            self.score += points;
            Outcome::Correct { points }
        } else {
            Outcome::Incorrect
        };
        self.phase = Phase::Revealed(outcome);
        Some(outcome)
    }

    /// Move past the feedback for the current question. The host calls this
    /// after the feedback delay; in tests it is called directly.
    ///
    /// Returns `Step::Completed(score)` exactly once, on the advance that
    /// spends the last turn. Ignored unless a question is revealed.
    pub fn advance(&mut self) -> Option<Step> {
        let outcome = match self.phase {
            Phase::Revealed(outcome) => outcome,
            _ => return None,
        };
        let missed = !matches!(outcome, Outcome::Correct { .. });
        if missed && self.config.retry_missed {
            if let Some(question) = self.queue.pop_front() {
                self.queue.push_back(question);
            }
        } else {
            self.queue.pop_front();
        }
        self.turns_remaining -= 1;
        if self.turns_remaining == 0 || self.queue.is_empty() {
            self.phase = Phase::Completed;
            return Some(Step::Completed(self.score));
        }
        self.time_remaining = self.config.timer_secs;
        self.hint_revealed = false;
        self.phase = Phase::AwaitingAnswer;
        Some(Step::Next)
    }

    /// Abandon the session from any phase. Pending state is discarded and
    /// no score is reported.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.turns_remaining = 0;
        self.score = 0;
        self.time_remaining = 0;
        self.hint_revealed = false;
        self.phase = Phase::Completed;
    }
}
