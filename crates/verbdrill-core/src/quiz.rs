//! Quiz session state machine.
//!
//! A session walks a fixed list of verbs one at a time:
//!
//! ```text
//! AwaitingAnswer(i) --submit--> Graded(i) --advance--> AwaitingAnswer(i + 1)
//!                                         \--advance--> Finished   (last item)
//! ```
//!
//! An empty session starts in `Finished`. There is no way back to an earlier
//! item and no way to grade an item twice.

use std::fmt;

use serde::Serialize;

use crate::error::QuizError;
use crate::model::VerbRecord;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Item `i` is shown and waiting for both forms.
    AwaitingAnswer(usize),
    /// Item `i` has been graded and its feedback is showing.
    Graded(usize),
    /// Every item has been played.
    Finished,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::AwaitingAnswer(i) => write!(f, "awaiting an answer to question {}", i + 1),
            QuizState::Graded(i) => write!(f, "showing feedback for question {}", i + 1),
            QuizState::Finished => write!(f, "finished"),
        }
    }
}

/// Grading outcome of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Unanswered,
    Correct,
    Incorrect,
}

/// A verb plus what the learner answered for it this session.
#[derive(Debug, Clone)]
pub struct QuizItem {
    pub verb: VerbRecord,
    pub past_input: String,
    pub participle_input: String,
    pub outcome: Outcome,
}

impl QuizItem {
    fn new(verb: VerbRecord) -> Self {
        Self {
            verb,
            past_input: String::new(),
            participle_input: String::new(),
            outcome: Outcome::Unanswered,
        }
    }
}

/// What the caller shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// One of the inputs was blank; nothing was graded.
    Blank,
    Correct,
    /// The stored forms, for display.
    Incorrect { past: String, participle: String },
}

/// One answered item in a finished session's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub verb_id: String,
    pub user_past: String,
    pub user_participle: String,
    pub is_correct: bool,
}

/// Final report of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub total_questions: usize,
    pub score: usize,
    pub answers: Vec<AnswerRecord>,
}

impl QuizSummary {
    /// Score as a fraction of the questions, 0.0 for an empty quiz.
    pub fn ratio(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.score as f64 / self.total_questions as f64
        }
    }
}

/// One quiz attempt over a fixed list of verbs.
#[derive(Debug, Clone)]
pub struct QuizSession {
    items: Vec<QuizItem>,
    state: QuizState,
    score: usize,
}

impl QuizSession {
    pub fn new(verbs: Vec<VerbRecord>) -> Self {
        let state = if verbs.is_empty() {
            QuizState::Finished
        } else {
            QuizState::AwaitingAnswer(0)
        };
        Self {
            items: verbs.into_iter().map(QuizItem::new).collect(),
            state,
            score: 0,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    /// The item in play, if the session is not finished.
    pub fn current(&self) -> Option<&QuizItem> {
        match self.state {
            QuizState::AwaitingAnswer(i) | QuizState::Graded(i) => self.items.get(i),
            QuizState::Finished => None,
        }
    }

    /// 1-based position of the item in play and the total, for display.
    pub fn progress(&self) -> (usize, usize) {
        let position = match self.state {
            QuizState::AwaitingAnswer(i) | QuizState::Graded(i) => i + 1,
            QuizState::Finished => self.items.len(),
        };
        (position, self.items.len())
    }

    /// Grade the current item.
    ///
    /// Both forms must be non-blank; otherwise the submission is ignored and
    /// [`Feedback::Blank`] is returned with the state untouched.
    pub fn submit(&mut self, past: &str, participle: &str) -> Result<Feedback, QuizError> {
        let QuizState::AwaitingAnswer(i) = self.state else {
            return Err(self.invalid("submit an answer"));
        };

        if past.trim().is_empty() || participle.trim().is_empty() {
            return Ok(Feedback::Blank);
        }

        let item = &mut self.items[i];
        item.past_input = past.to_string();
        item.participle_input = participle.to_string();

        let correct = forms_match(past, &item.verb.past)
            && forms_match(participle, &item.verb.participle);

        let feedback = if correct {
            item.outcome = Outcome::Correct;
            self.score += 1;
            Feedback::Correct
        } else {
            item.outcome = Outcome::Incorrect;
            Feedback::Incorrect {
                past: item.verb.past.clone(),
                participle: item.verb.participle.clone(),
            }
        };

        self.state = QuizState::Graded(i);
        Ok(feedback)
    }

    /// Move past the graded item. Returns the new state.
    pub fn advance(&mut self) -> Result<QuizState, QuizError> {
        let QuizState::Graded(i) = self.state else {
            return Err(self.invalid("advance"));
        };

        self.state = if i + 1 < self.items.len() {
            QuizState::AwaitingAnswer(i + 1)
        } else {
            QuizState::Finished
        };
        Ok(self.state)
    }

    /// Report of every item graded so far.
    pub fn summary(&self) -> QuizSummary {
        let answers = self
            .items
            .iter()
            .filter(|item| item.outcome != Outcome::Unanswered)
            .map(|item| AnswerRecord {
                verb_id: item.verb.id.clone(),
                user_past: item.past_input.clone(),
                user_participle: item.participle_input.clone(),
                is_correct: item.outcome == Outcome::Correct,
            })
            .collect();

        QuizSummary {
            total_questions: self.items.len(),
            score: self.score,
            answers,
        }
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }
}

/// Trimmed, case-insensitive comparison of an answer with a stored form.
pub fn forms_match(answer: &str, expected: &str) -> bool {
    answer.trim().to_lowercase() == expected.trim().to_lowercase()
}
