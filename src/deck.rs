mod frontmatter;
pub mod game;
pub mod gate;
pub mod quiz;
pub mod render;
pub mod reveal;
mod section;
mod shell;
mod timer;

pub use frontmatter::Heading;
pub use render::{render_deck, render_section, render_section_with, Answers, RenderedPage};
pub use section::{Click, Deck, SectionView, Widgets};
pub use shell::{Shell, MOBILE_BREAKPOINT_PX};
pub use timer::LectureTimer;
