use anyhow::Context;
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;

use crate::content::ContentStore;

pub const DEFAULT_OUTPUT_DIR: &str = "output/lecture";

pub const ENV_CONTENT: &str = "LECTURE_CONTENT";
pub const ENV_OUTPUT_DIR: &str = "LECTURE_OUTPUT_DIR";
pub const ENV_PASSCODE: &str = "TEACHER_PASSCODE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output_dir: String,
    /// alternative lecture file, the bundled lecture when unset
    pub content_path: Option<PathBuf>,
    /// overrides the passcode in the lecture file
    pub teacher_passcode: Option<String>,
}

impl Config {
    /// Reads `.env`, then the process environment and positional `args`.
    pub fn from_env(args: impl Iterator<Item = String>) -> Config {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(error = %e, "no .env file loaded");
        }
        Config::from_sources(args, |key| env::var(key).ok())
    }

    /// The first positional argument wins over `LECTURE_OUTPUT_DIR`.
    pub fn from_sources(
        mut args: impl Iterator<Item = String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Config {
        let output_dir = args
            .next()
            .or_else(|| var(ENV_OUTPUT_DIR))
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        Config {
            output_dir,
            content_path: var(ENV_CONTENT).filter(|p| !p.is_empty()).map(PathBuf::from),
            teacher_passcode: var(ENV_PASSCODE).filter(|p| !p.is_empty()),
        }
    }

    pub fn load_store(&self) -> anyhow::Result<Cow<'static, ContentStore>> {
        match &self.content_path {
            Some(path) => {
                let store = ContentStore::load(path)
                    .context(format!("failed to load lecture from {}", path.display()))?;
                Ok(Cow::Owned(store))
            }
            None => Ok(Cow::Borrowed(ContentStore::builtin())),
        }
    }

    pub fn passcode<'a>(&'a self, store: &'a ContentStore) -> &'a str {
        self.teacher_passcode
            .as_deref()
            .unwrap_or(store.lecture().teacher_passcode.as_str())
    }
}
