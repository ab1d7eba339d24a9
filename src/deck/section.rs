use crate::content::{ContentStore, SectionId};
use crate::glossary::{ClickOutcome, DefinitionPopup, GlossaryDictionary};

use super::game::ClassificationGame;
use super::gate::{TeacherGate, WarmUp};
use super::quiz::HistoryTabs;
use super::reveal::{LockedPanel, RevealSet, ReviewBoard};
use super::shell::Shell;
use super::timer::LectureTimer;

/// Widget state specific to one section.
#[derive(Debug, Clone)]
pub enum Widgets {
    Intro {
        warm_up: WarmUp,
        story_revealed: bool,
        /// comparison rows whose international column is shown
        rows: RevealSet,
    },
    Components {
        active_card: Option<usize>,
    },
    History {
        tabs: HistoryTabs,
    },
    Subjects {
        game: ClassificationGame,
    },
    Modern,
    Review {
        board: ReviewBoard,
    },
    Summary,
    ExitTicket {
        gate: TeacherGate,
    },
}

/// Something the user clicked inside a section.
#[derive(Debug, Clone, Copy)]
pub enum Click<'a> {
    /// a term reference, possibly sitting inside a clickable row or card
    Term(&'a str),
    Row(usize),
    Card(usize),
    /// the definition popup's own surface
    Popup,
    /// the backdrop behind the popup
    Outside,
}

/// State of the section on screen. Recreated on every visit, so nothing
/// survives navigating away and back.
#[derive(Debug, Clone)]
pub struct SectionView {
    id: SectionId,
    pub popup: DefinitionPopup,
    pub panel: LockedPanel,
    pub widgets: Widgets,
}

impl SectionView {
    pub fn enter(id: SectionId) -> Self {
        let widgets = match id {
            SectionId::Intro => Widgets::Intro {
                warm_up: WarmUp::default(),
                story_revealed: false,
                rows: RevealSet::new(),
            },
            SectionId::Components => Widgets::Components { active_card: None },
            SectionId::History => Widgets::History {
                tabs: HistoryTabs::new(),
            },
            SectionId::Subjects => Widgets::Subjects {
                game: ClassificationGame::new(),
            },
            SectionId::Modern => Widgets::Modern,
            SectionId::Review => Widgets::Review {
                board: ReviewBoard::new(),
            },
            SectionId::Summary => Widgets::Summary,
            SectionId::ExitTicket => Widgets::ExitTicket {
                gate: TeacherGate::new(),
            },
        };

        Self {
            id,
            popup: DefinitionPopup::new(),
            panel: LockedPanel::new(),
            widgets,
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Dispatches a click. A term click is consumed by the popup and never
    /// reaches the row or card around it. Words missing from `dictionary`
    /// are ignored.
    pub fn click(&mut self, dictionary: &GlossaryDictionary, click: Click<'_>) -> ClickOutcome {
        match click {
            Click::Term(term) => self.popup.click_term(dictionary, term),
            Click::Popup => self.popup.click_inside(),
            Click::Outside => self.popup.click_outside(),
            Click::Row(idx) => match &mut self.widgets {
                Widgets::Intro { rows, .. } => {
                    rows.reveal(idx);
                    ClickOutcome::Consumed
                }
                _ => ClickOutcome::Ignored,
            },
            Click::Card(idx) => match &mut self.widgets {
                Widgets::Components { active_card } => {
                    *active_card = if *active_card == Some(idx) { None } else { Some(idx) };
                    ClickOutcome::Consumed
                }
                _ => ClickOutcome::Ignored,
            },
        }
    }
}

/// Shell, timer and the section on screen.
#[derive(Debug, Clone)]
pub struct Deck<'s> {
    store: &'s ContentStore,
    shell: Shell,
    timer: LectureTimer,
    view: SectionView,
}

impl<'s> Deck<'s> {
    pub fn new(store: &'s ContentStore) -> Self {
        let shell = Shell::new(store);
        let view = SectionView::enter(shell.active());
        Self {
            store,
            timer: LectureTimer::new(store.lecture().duration_minutes),
            shell,
            view,
        }
    }

    pub fn store(&self) -> &'s ContentStore {
        self.store
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn timer(&self) -> &LectureTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut LectureTimer {
        &mut self.timer
    }

    pub fn view(&self) -> &SectionView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SectionView {
        &mut self.view
    }

    /// Clicks inside the section on screen.
    pub fn click(&mut self, click: Click<'_>) -> ClickOutcome {
        self.view.click(self.store.glossary(), click)
    }

    pub fn next(&mut self) -> bool {
        let moved = self.shell.next();
        self.remount(moved)
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.shell.prev();
        self.remount(moved)
    }

    pub fn select(&mut self, id: SectionId) -> bool {
        let moved = self.shell.select(id);
        self.remount(moved)
    }

    fn remount(&mut self, moved: bool) -> bool {
        if moved {
            tracing::debug!(section = self.shell.active().slug(), "entering section");
            self.view = SectionView::enter(self.shell.active());
        }
        moved
    }
}
