use std::env;

use anyhow::Context;
use intl_society::config::Config;
use intl_society::export::export_lecture;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> anyhow::Result<()> {
    intl_society::logging::init();

    let config = Config::from_env(env::args().skip(1));
    let store = match config.load_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Usage: cargo run [output_dir]  (set LECTURE_CONTENT=<file> for another lecture)");
            return Err(e);
        }
    };

    let summary = export_lecture(&store, &config.output_dir)
        .context(format!("failed to export lecture to {}", config.output_dir))?;

    println!("Lecture metadata\n");
    println!("---");
    println!("{}", summary.metadata);
    println!("---\n");

    println!(
        "created {BOLD}{}{RESET} pages and {BOLD}{}{RESET} glossary terms in {BOLD}{}{RESET}",
        summary.pages, summary.terms, &config.output_dir
    );

    Ok(())
}
