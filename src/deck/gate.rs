//! Exit-ticket teacher gate and the intro warm-up prompt.
//!
//! The gate is a plain string comparison meant to keep the responses link
//! off the projector. It is a classroom convenience, not access control:
//! no hashing, no attempt limit, no session.

pub const WRONG_PASSCODE_MESSAGE: &str = "كلمة المرور غير صحيحة";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketView {
    #[default]
    Student,
    TeacherAuth,
    TeacherView,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherGate {
    view: TicketView,
    password: String,
    error: Option<&'static str>,
}

impl TeacherGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> TicketView {
        self.view
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn request_teacher(&mut self) {
        self.view = TicketView::TeacherAuth;
    }

    /// Compares `password` with `passcode`. Only valid on the auth view.
    pub fn submit(&mut self, password: &str, passcode: &str) -> TicketView {
        if self.view != TicketView::TeacherAuth {
            return self.view;
        }
        self.password = password.to_string();
        if self.password == passcode {
            self.view = TicketView::TeacherView;
            self.error = None;
        } else {
            self.error = Some(WRONG_PASSCODE_MESSAGE);
        }
        self.view
    }

    pub fn back(&mut self) {
        if self.view == TicketView::TeacherAuth {
            self.view = TicketView::Student;
        }
    }

    pub fn logout(&mut self) {
        self.view = TicketView::Student;
        self.password.clear();
        self.error = None;
    }
}

/// Free-text answer to the warm-up question.
#[derive(Debug, Clone, Default)]
pub struct WarmUp {
    word: String,
}

impl WarmUp {
    pub fn set_word(&mut self, word: &str) {
        self.word = word.trim().to_string();
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn echo(&self) -> Option<String> {
        if self.word.is_empty() {
            return None;
        }
        Some(format!(
            "كلمة مثيرة! هل يعبر \"{}\" عن واقع مجتمعنا الدولي اليوم؟ لنكتشف معاً.",
            self.word
        ))
    }
}
