use super::GlossaryDictionary;

/// Whether a click was handled by the popup and must not reach ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// stop propagation
    Consumed,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Closed,
    Open(String),
}

/// Definition popup owned by one annotated block. At most one term is
/// open at a time.
#[derive(Debug, Clone, Default)]
pub struct DefinitionPopup {
    state: PopupState,
}

impl DefinitionPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn active_term(&self) -> Option<&str> {
        match &self.state {
            PopupState::Open(term) => Some(term.as_str()),
            PopupState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PopupState::Open(_))
    }

    /// Opens `term`, replacing any term already open. Text that is not a
    /// dictionary key is not a term reference and leaves the popup as is.
    pub fn click_term(&mut self, dictionary: &GlossaryDictionary, term: &str) -> ClickOutcome {
        if !dictionary.contains(term) {
            return ClickOutcome::Ignored;
        }
        self.state = PopupState::Open(term.to_string());
        ClickOutcome::Consumed
    }

    pub fn close(&mut self) {
        self.state = PopupState::Closed;
    }

    /// Backdrop click.
    pub fn click_outside(&mut self) -> ClickOutcome {
        if self.is_open() {
            self.close();
            ClickOutcome::Consumed
        } else {
            ClickOutcome::Ignored
        }
    }

    /// Clicks on the popup surface keep it open.
    pub fn click_inside(&mut self) -> ClickOutcome {
        if self.is_open() {
            ClickOutcome::Consumed
        } else {
            ClickOutcome::Ignored
        }
    }

    pub fn definition<'d>(&self, dictionary: &'d GlossaryDictionary) -> Option<&'d str> {
        self.active_term().and_then(|term| dictionary.get(term))
    }
}
