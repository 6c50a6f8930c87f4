//! Terminal front-end and entry point.
//!
//! This binary is the thin integration layer between the Libris library and a
//! line-oriented terminal. It reads commands from stdin, translates them to
//! library [`Event`]s, drives them through [`libris::dispatch`] and prints the
//! rendered screen after each one.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read config file and environment, initialize tracing
//! 2. **Bootstrap**: Validate endpoints and establish the session
//! 3. **Loop**: Parse a command, dispatch its event, render
//!
//! # Commands
//!
//! Numbers refer to the `(n)` markers of the current screen.
//!
//! - `catalog [genres]`: open the catalogue, optionally filtered by genre
//! - `search [words]`: open the catalogue filtered by keywords
//! - `open <n>`: open the n-th listed book
//! - `more`: load the next page of the current list
//! - `like`: like or unlike the open book
//! - `status <reading|read|drop|none>`: set or clear the reading status
//! - `review <1-5> [text]`: post a review of the open book
//! - `edit <n> <1-5|-> [text]`: edit your n-th review
//! - `like-review <n>` / `delete-review <n>`
//! - `fav [liked|reading|read|drop]`: open favourites or switch projection
//! - `register <name> <email> <password>` / `logout` / `whoami`
//! - `help` / `quit`

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use libris::app::{FavouritesFilter, Page, ReviewForm};
use libris::domain::ReadingStatus;
use libris::{dispatch, initialize, AppState, Config, Event};

const HELP: &str = "\
catalog [genres]            open the catalogue
search [words]              search by keywords
open <n>                    open the n-th listed book
more                        load the next page
like                        like or unlike the open book
status <reading|read|drop|none>
review <1-5> [text]         post a review
edit <n> <1-5|-> [text]     edit your review
like-review <n>             like or unlike a review
delete-review <n>           delete your review
fav [liked|reading|read|drop]
register <name> <email> <password>
logout | whoami | help | quit";

/// A parsed input line.
#[derive(Debug, PartialEq)]
enum Command {
    Dispatch(Vec<Event>),
    WhoAmI,
    Help,
    Quit,
}

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("libris: {e}");
            return ExitCode::FAILURE;
        }
    };
    libris::observability::init_tracing(&config);

    let (mut state, worker) = match initialize(&config) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("libris: {e}");
            return ExitCode::FAILURE;
        }
    };

    print_screen(&state);
    prompt();

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            prompt();
            continue;
        }

        match parse_command(&line, &state) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::WhoAmI) => match state.session.user() {
                Some(user) => println!(
                    "{} (#{}) {}",
                    user.name,
                    user.id,
                    user.email.as_deref().unwrap_or("")
                ),
                None => println!("гость"),
            },
            Ok(Command::Dispatch(events)) => {
                let mut redraw = false;
                for event in events {
                    redraw |= dispatch(&mut state, &worker, event);
                }
                if redraw {
                    print_screen(&state);
                }
            }
            Err(message) => eprintln!("{message}"),
        }
        prompt();
    }

    tracing::debug!("input closed, exiting");
    ExitCode::SUCCESS
}

fn print_screen(state: &AppState) {
    let mut out = io::stdout().lock();
    for line in libris::ui::render(state) {
        let _ = writeln!(out, "{line}");
    }
}

fn prompt() {
    let mut out = io::stdout().lock();
    let _ = write!(out, "> ");
    let _ = out.flush();
}

/// Resolves a 1-based screen index against listed ids.
fn nth(ids: &[i64], arg: Option<&str>) -> Result<i64, String> {
    let arg = arg.ok_or("expected a number")?;
    let index: usize = arg.parse().map_err(|_| format!("not a number: {arg}"))?;
    index
        .checked_sub(1)
        .and_then(|i| ids.get(i))
        .copied()
        .ok_or_else(|| format!("no item ({index}) on screen"))
}

fn rest(words: &[&str]) -> String {
    words.join(" ")
}

fn parse_command(line: &str, state: &AppState) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Err("empty command".to_string());
    };
    let single = |event: Event| -> Result<Command, String> { Ok(Command::Dispatch(vec![event])) };

    match command {
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        "whoami" => Ok(Command::WhoAmI),
        "catalog" => single(Event::ShowCatalog {
            keywords: None,
            genres: (!args.is_empty()).then(|| rest(args)),
        }),
        "search" => single(Event::ShowCatalog {
            keywords: (!args.is_empty()).then(|| rest(args)),
            genres: None,
        }),
        "open" => single(Event::OpenBook(nth(state.listed_books(), args.first().copied())?)),
        "more" => single(Event::LoadMore),
        "like" => single(Event::ToggleBookLike),
        "status" => {
            let status = match args.first().copied() {
                Some("none" | "clear") => None,
                Some(value) => Some(value.parse::<ReadingStatus>()?),
                None => return Err("usage: status <reading|read|drop|none>".to_string()),
            };
            single(Event::SetStatus(status))
        }
        "review" => {
            let (rating, text) = args.split_first().ok_or("usage: review <1-5> [text]")?;
            single(Event::SubmitReview(ReviewForm::new(*rating, rest(text))))
        }
        "edit" => {
            let review_id = nth(state.listed_reviews(), args.first().copied())?;
            let rating = match args.get(1).copied() {
                Some("-") | None => String::new(),
                Some(rating) => rating.to_string(),
            };
            let text = args.get(2..).map(rest).unwrap_or_default();
            single(Event::EditReview {
                review_id,
                form: ReviewForm::new(rating, text),
            })
        }
        "like-review" => single(Event::ToggleReviewLike(nth(
            state.listed_reviews(),
            args.first().copied(),
        )?)),
        "delete-review" => single(Event::DeleteReview(nth(
            state.listed_reviews(),
            args.first().copied(),
        )?)),
        "fav" => {
            let filter = args
                .first()
                .map(|arg| arg.parse::<FavouritesFilter>())
                .transpose()?;
            let mut events = Vec::new();
            if !matches!(state.page, Page::Favourites(_)) {
                events.push(Event::ShowFavourites);
            }
            events.extend(filter.map(Event::SelectFavourites));
            if events.is_empty() {
                events.push(Event::ShowFavourites);
            }
            Ok(Command::Dispatch(events))
        }
        "register" => match args {
            [name, email, password] => single(Event::Register {
                name: (*name).to_string(),
                email: (*email).to_string(),
                password: (*password).to_string(),
            }),
            _ => Err("usage: register <name> <email> <password>".to_string()),
        },
        "logout" => single(Event::Logout),
        other => Err(format!("unknown command: {other} (try help)")),
    }
}
