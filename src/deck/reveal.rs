use std::collections::BTreeSet;

use crate::content::ReviewItem;

/// Rows revealed so far. Revealing is one-way.
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    revealed: BTreeSet<usize>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the row was already revealed.
    pub fn reveal(&mut self, idx: usize) -> bool {
        self.revealed.insert(idx)
    }

    pub fn reveal_all(&mut self, count: usize) {
        self.revealed.extend(0..count);
    }

    pub fn is_revealed(&self, idx: usize) -> bool {
        self.revealed.contains(&idx)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}

/// Model answers behind the teacher toggle. Starts unlocked.
#[derive(Debug, Clone, Default)]
pub struct LockedPanel {
    locked: bool,
}

impl LockedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn toggle(&mut self) {
        self.locked = !self.locked;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn status_label(&self) -> &'static str {
        if self.locked {
            "مغلق (للأستاذ)"
        } else {
            "مفتوح للنقاش"
        }
    }
}

/// True/false statements and discussion notes in the review section.
#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    statements: RevealSet,
    notes: RevealSet,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a guess and reveals the correction. Returns whether the
    /// guess was right; a statement already revealed yields None.
    pub fn guess(&mut self, items: &[ReviewItem], idx: usize, answer: bool) -> Option<bool> {
        let item = items.get(idx)?;
        if !self.statements.reveal(idx) {
            return None;
        }
        Some(item.is_true == answer)
    }

    pub fn is_statement_revealed(&self, idx: usize) -> bool {
        self.statements.is_revealed(idx)
    }

    /// Returns false if the note was already showing.
    pub fn reveal_note(&mut self, idx: usize) -> bool {
        self.notes.reveal(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements() -> Vec<ReviewItem> {
        vec![
            ReviewItem {
                statement: "أ".to_string(),
                is_true: true,
                correction: "صواب".to_string(),
            },
            ReviewItem {
                statement: "ب".to_string(),
                is_true: false,
                correction: "خطأ".to_string(),
            },
        ]
    }

    #[test]
    fn reveal_is_one_way() {
        let mut rows = RevealSet::new();
        assert!(rows.reveal(2));
        assert!(!rows.reveal(2));
        assert!(rows.is_revealed(2));

        rows.reveal_all(4);
        assert_eq!(rows.len(), 4);
        assert!((0..4).all(|i| rows.is_revealed(i)));
    }

    #[test]
    fn panel_starts_unlocked() {
        let mut panel = LockedPanel::new();
        assert!(!panel.is_locked());
        panel.toggle();
        assert!(panel.is_locked());
        assert_eq!(panel.status_label(), "مغلق (للأستاذ)");
        panel.unlock();
        assert!(!panel.is_locked());
    }

    #[test]
    fn review_guess_counts_once() {
        let items = statements();
        let mut board = ReviewBoard::new();
        assert_eq!(board.guess(&items, 1, false), Some(true));
        assert_eq!(board.guess(&items, 1, true), None);
        assert_eq!(board.guess(&items, 0, false), Some(false));
        assert_eq!(board.guess(&items, 7, true), None);
        assert!(board.is_statement_revealed(0));

        assert!(board.reveal_note(1));
        assert!(!board.reveal_note(1));
    }
}
