//! Lecture deck for the International Society course.
//!
//! [`content`] holds the read-only lecture records, [`glossary`] turns prose
//! into plain runs and clickable term references, and [`deck`] carries the
//! navigation shell, per-section widget state and the Markdown renderer.

pub mod config;
pub mod content;
pub mod deck;
pub mod export;
pub mod glossary;
pub mod logging;
