mod annotate;
mod dictionary;
mod popup;
pub mod rich;

pub use annotate::{concat, Annotator, Segment, Segments};
pub use dictionary::{GlossaryDictionary, GlossaryEntry};
pub use popup::{ClickOutcome, DefinitionPopup, PopupState};
