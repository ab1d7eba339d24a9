use thiserror::Error;

use crate::content::{HistoryEvent, QuizQuestion};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
    #[error("option {selected} does not exist, the question has {available} options")]
    OptionOutOfRange { selected: usize, available: usize },

    #[error("tab {0} does not exist")]
    TabOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizState {
    #[default]
    Unanswered,
    Answered { selected: usize, correct: bool },
}

impl QuizState {
    /// Takes the first answer only. Later answers return the recorded state
    /// unchanged.
    pub fn answer(&mut self, question: &QuizQuestion, selected: usize) -> Result<QuizState, QuizError> {
        if let QuizState::Answered { .. } = self {
            return Ok(*self);
        }
        if selected >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                selected,
                available: question.options.len(),
            });
        }

        *self = QuizState::Answered {
            selected,
            correct: selected == question.correct_index,
        };
        Ok(*self)
    }

    pub fn reset(&mut self) {
        *self = QuizState::Unanswered;
    }

    pub fn feedback(&self) -> Option<&'static str> {
        match self {
            QuizState::Answered { correct: true, .. } => Some("إجابة صحيحة!"),
            QuizState::Answered { correct: false, .. } => Some("خطأ!"),
            QuizState::Unanswered => None,
        }
    }
}

/// Tabbed history timeline with one quiz per event.
#[derive(Debug, Clone, Default)]
pub struct HistoryTabs {
    active: usize,
    quiz_visible: bool,
    quiz: QuizState,
}

impl HistoryTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_event<'a>(&self, events: &'a [HistoryEvent]) -> Option<&'a HistoryEvent> {
        events.get(self.active)
    }

    /// Switching tabs hides and resets the quiz.
    pub fn select(&mut self, events: &[HistoryEvent], idx: usize) -> Result<(), QuizError> {
        if idx >= events.len() {
            return Err(QuizError::TabOutOfRange(idx));
        }
        self.active = idx;
        self.quiz_visible = false;
        self.quiz.reset();
        Ok(())
    }

    pub fn show_quiz(&mut self) {
        self.quiz_visible = true;
    }

    pub fn is_quiz_visible(&self) -> bool {
        self.quiz_visible
    }

    pub fn answer(&mut self, events: &[HistoryEvent], selected: usize) -> Result<QuizState, QuizError> {
        let event = events
            .get(self.active)
            .ok_or(QuizError::TabOutOfRange(self.active))?;
        self.quiz.answer(&event.quiz, selected)
    }

    pub fn quiz(&self) -> QuizState {
        self.quiz
    }
}
