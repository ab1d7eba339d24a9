use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use intl_society::config::Config;
use intl_society::content::{GameItemKind, SectionId};
use intl_society::deck::gate::TicketView;
use intl_society::deck::{render_section_with, Answers, Click, Deck, Widgets};
use intl_society::glossary::{Annotator, ClickOutcome};

const HELP: &str = "\
commands:
  next | prev | go <slug|n>      move between sections
  show                           print the current section
  term <name>                    open a glossary definition
  close                          close the definition
  reveal <n>|all|story           reveal comparison rows or the story analysis
  card <n>                       flip a component card
  lock                           toggle the teacher panel
  tab <n> | quiz [n]             pick a history tab, open its quiz, answer it
  play | pick state|org|special | lesson
  tf <n> yes|no | note <n>       review statements and teacher notes
  warm <word>                    answer the warm-up question
  teacher | login <pw> | back | logout
  segments <text>                dump glossary segments as JSON
  time | help | quit";

struct Presenter<'s> {
    deck: Deck<'s>,
    annotator: Annotator<'s>,
    passcode: String,
    started: Instant,
}

impl<'s> Presenter<'s> {
    fn tick(&mut self) {
        let elapsed = self.started.elapsed().as_secs();
        let recorded = u64::from(self.deck.timer().elapsed_secs());
        if elapsed > recorded {
            self.deck.timer_mut().advance(elapsed - recorded);
        }
    }

    fn header(&self) -> String {
        let id = self.deck.shell().active();
        let (pos, total) = self.deck.shell().position();
        let label = self
            .deck
            .store()
            .nav_item(id)
            .map(|item| item.label.as_str())
            .unwrap_or_else(|| id.slug());
        format!("[{}/{}] {} ({})", pos, total, label, self.deck.timer().format())
    }

    /// Handles one command line. Returns false on quit.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };
        let store = self.deck.store();

        match cmd {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "help" => writeln!(out, "{}", HELP)?,
            "next" | "prev" => {
                let moved = if cmd == "next" { self.deck.next() } else { self.deck.prev() };
                if moved {
                    writeln!(out, "{}", self.header())?;
                } else {
                    writeln!(out, "no more sections that way")?;
                }
            }
            "go" => {
                let target = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| self.deck.shell().order().get(n).copied())
                    .or_else(|| SectionId::from_slug(arg));
                match target {
                    Some(id) => {
                        self.deck.select(id);
                        writeln!(out, "{}", self.header())?;
                    }
                    None => writeln!(out, "unknown section '{}'", arg)?,
                }
            }
            "show" => {
                let answers = if self.deck.view().panel.is_locked() {
                    Answers::Hidden
                } else {
                    Answers::Shown
                };
                let page = render_section_with(store, &self.annotator, self.deck.shell().active(), answers)?;
                writeln!(out, "{}", page.content)?;
            }
            "term" => match self.deck.click(Click::Term(arg)) {
                ClickOutcome::Consumed => {
                    let definition = self.deck.view().popup.definition(store.glossary());
                    writeln!(out, "{}: {}", arg, definition.unwrap_or_default())?;
                }
                ClickOutcome::Ignored => writeln!(out, "'{}' is not in the glossary", arg)?,
            },
            "close" => self.deck.view_mut().popup.close(),
            "time" => writeln!(
                out,
                "{} ({:.0}%)",
                self.deck.timer().format(),
                self.deck.timer().progress_percent()
            )?,
            "lock" => {
                let panel = &mut self.deck.view_mut().panel;
                panel.toggle();
                writeln!(out, "{}", panel.status_label())?;
            }
            "reveal" if arg.parse::<usize>().is_ok() => {
                let idx = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                match idx.and_then(|i| store.intro().comparison.get(i).map(|row| (i, row))) {
                    Some((i, row)) if self.deck.click(Click::Row(i)) == ClickOutcome::Consumed => {
                        writeln!(out, "{}: {}", row.criteria, row.international)?
                    }
                    Some(_) => writeln!(out, "'reveal' does nothing here, try 'help'")?,
                    None => writeln!(out, "no such row")?,
                }
            }
            "card" => {
                let idx = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                match idx.and_then(|i| store.components().cards.get(i).map(|card| (i, card))) {
                    Some((i, card)) if self.deck.click(Click::Card(i)) == ClickOutcome::Consumed => {
                        writeln!(out, "{}: {}", card.title, card.real_world)?
                    }
                    Some(_) => writeln!(out, "'card' does nothing here, try 'help'")?,
                    None => writeln!(out, "no such card")?,
                }
            }
            "segments" => {
                let segments = self.annotator.annotate(arg);
                writeln!(out, "{}", serde_json::to_string_pretty(&segments)?)?;
            }
            _ => self.handle_widget(cmd, arg, out)?,
        }

        Ok(true)
    }

    fn handle_widget(&mut self, cmd: &str, arg: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let store = self.deck.store();
        let index = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        let passcode = self.passcode.as_str();
        let view = self.deck.view_mut();

        match (cmd, &mut view.widgets) {
            ("warm", Widgets::Intro { warm_up, .. }) => {
                warm_up.set_word(arg);
                writeln!(out, "{}", warm_up.echo().unwrap_or_default())?;
            }
            ("reveal", Widgets::Intro { story_revealed, rows, .. }) => {
                let comparison = &store.intro().comparison;
                if arg == "story" {
                    *story_revealed = true;
                    writeln!(out, "{}", store.intro().story.answer.trim_end())?;
                } else if arg == "all" {
                    rows.reveal_all(comparison.len());
                    for row in comparison {
                        writeln!(out, "{}: {}", row.criteria, row.international)?;
                    }
                } else {
                    writeln!(out, "use 'reveal <n>', 'reveal all' or 'reveal story'")?;
                }
            }
            ("tab", Widgets::History { tabs }) => {
                let events = &store.history().events;
                tabs.select(events, index.unwrap_or(usize::MAX))?;
                if let Some(event) = tabs.active_event(events) {
                    writeln!(out, "{} ({})", event.treaty_name, event.period)?;
                }
            }
            ("quiz", Widgets::History { tabs }) if arg.is_empty() => {
                tabs.show_quiz();
                if let Some(event) = tabs.active_event(&store.history().events) {
                    writeln!(out, "{}", event.quiz.question)?;
                    for (i, option) in event.quiz.options.iter().enumerate() {
                        writeln!(out, "  {}. {}", i + 1, option)?;
                    }
                }
            }
            ("quiz", Widgets::History { tabs }) if !tabs.is_quiz_visible() => {
                writeln!(out, "open the quiz with 'quiz' first")?;
            }
            ("quiz", Widgets::History { tabs }) => {
                let events = &store.history().events;
                tabs.answer(events, index.unwrap_or(usize::MAX))?;
                let explanation = tabs
                    .active_event(events)
                    .map(|e| e.quiz.explanation.as_str())
                    .unwrap_or_default();
                writeln!(out, "{} {}", tabs.quiz().feedback().unwrap_or_default(), explanation)?;
            }
            ("play", Widgets::Subjects { game }) => {
                game.start(&store.subjects().game);
                if let Some(item) = game.current(&store.subjects().game) {
                    writeln!(out, "{}", item.name)?;
                }
            }
            ("pick", Widgets::Subjects { game }) => {
                let items = &store.subjects().game;
                let kind = match arg {
                    "state" => GameItemKind::State,
                    "org" => GameItemKind::Org,
                    "special" => GameItemKind::Special,
                    other => anyhow::bail!("unknown category '{}', use state, org or special", other),
                };
                match game.choose(items, kind) {
                    Some(feedback) => {
                        writeln!(out, "{} (score {})", feedback.message, game.score())?;
                        match game.current(items) {
                            Some(next) => writeln!(out, "{}", next.name)?,
                            None => writeln!(out, "final score {}/{}", game.score(), items.len())?,
                        }
                    }
                    None => writeln!(out, "start a round with 'play'")?,
                }
            }
            ("lesson", Widgets::Subjects { game }) => game.reset(),
            ("tf", Widgets::Review { board }) => {
                let items = &store.review().true_false;
                let (n, answer) = arg.split_once(' ').unwrap_or((arg, ""));
                let guess = match answer.trim() {
                    "yes" | "صواب" => true,
                    "no" | "خطأ" => false,
                    other => anyhow::bail!("answer with yes or no, got '{}'", other),
                };
                let idx = n.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                match idx.and_then(|i| board.guess(items, i, guess).map(|ok| (i, ok))) {
                    Some((i, ok)) => writeln!(
                        out,
                        "{} {}",
                        if ok { "أحسنت!" } else { "للأسف." },
                        items[i].correction
                    )?,
                    None => writeln!(out, "statement already revealed or missing")?,
                }
            }
            ("note", Widgets::Review { board }) => {
                match index.and_then(|i| store.review().topics.get(i).map(|t| (i, t))) {
                    Some((i, topic)) => {
                        board.reveal_note(i);
                        writeln!(out, "{}", topic.teacher_notes.as_deref().unwrap_or_default())?;
                    }
                    None => writeln!(out, "no such topic")?,
                }
            }
            ("teacher", Widgets::ExitTicket { gate }) => {
                gate.request_teacher();
                writeln!(out, "enter the passcode with 'login <pw>'")?;
            }
            ("login", Widgets::ExitTicket { gate }) => match gate.submit(arg, passcode) {
                TicketView::TeacherView => {
                    writeln!(out, "{}", store.lecture().responses_url)?;
                }
                _ => writeln!(out, "{}", gate.error().unwrap_or("use 'teacher' first"))?,
            },
            ("back", Widgets::ExitTicket { gate }) => gate.back(),
            ("logout", Widgets::ExitTicket { gate }) => gate.logout(),
            _ => writeln!(out, "'{}' does nothing here, try 'help'", cmd)?,
        }

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    intl_society::logging::init();

    let config = Config::from_env(env::args().skip(1));
    let store = config.load_store().context("failed to load lecture")?;

    let mut presenter = Presenter {
        deck: Deck::new(&store),
        annotator: Annotator::new(store.glossary()),
        passcode: config.passcode(&store).to_string(),
        started: Instant::now(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{} - {}", store.lecture().title, store.lecture().subtitle)?;
    writeln!(stdout, "{}", presenter.header())?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        presenter.tick();
        match presenter.handle(&line, &mut stdout) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => writeln!(stdout, "error: {:#}", e)?,
        }
        stdout.flush()?;
    }

    Ok(())
}
