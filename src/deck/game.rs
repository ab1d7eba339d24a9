use crate::content::{GameItem, GameItemKind};

pub const WRONG_ANSWER_MESSAGE: &str = "خطأ! حاول التذكر.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Learn,
    Play,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

/// "State, organisation or special status?" classification round.
#[derive(Debug, Clone, Default)]
pub struct ClassificationGame {
    mode: GameMode,
    index: usize,
    score: usize,
    last_feedback: Option<Feedback>,
}

impl ClassificationGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.last_feedback.as_ref()
    }

    pub fn current<'a>(&self, items: &'a [GameItem]) -> Option<&'a GameItem> {
        match self.mode {
            GameMode::Play => items.get(self.index),
            _ => None,
        }
    }

    pub fn start(&mut self, items: &[GameItem]) {
        self.index = 0;
        self.score = 0;
        self.last_feedback = None;
        self.mode = if items.is_empty() {
            GameMode::Finished
        } else {
            GameMode::Play
        };
    }

    /// Scores a pick for the current item and moves on. Returns None when
    /// no round is in progress.
    pub fn choose(&mut self, items: &[GameItem], kind: GameItemKind) -> Option<Feedback> {
        let item = self.current(items)?;
        let correct = item.kind == kind;
        let feedback = Feedback {
            correct,
            message: if correct {
                item.feedback.clone()
            } else {
                WRONG_ANSWER_MESSAGE.to_string()
            },
        };

        if correct {
            self.score += 1;
        }
        self.index += 1;
        if self.index >= items.len() {
            self.mode = GameMode::Finished;
        }

        self.last_feedback = Some(feedback.clone());
        Some(feedback)
    }

    /// Back to the lesson.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
