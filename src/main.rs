//! Marbles entry point
//!
//! A headless terminal front end over the simulation: each command feeds one or
//! more ticks of input, then the board is printed.

use std::io::{self, BufRead, Write};
use std::path::Path;

use marbles::persistence::SaveDirectory;
use marbles::settings::{SETTINGS_FILE, Settings};
use marbles::sim::{GameSession, MoveOutcome, Slot, SlotContents, TickInput, tick};

const HELP: &str = "\
commands:
  <slot>          click a slot (0-36)
  f <slot>        shift-click a slot
  u / r           undo / redo
  uu <n> / rr <n> hold shift+undo / shift+redo for n ticks
  w <n>           let n ticks pass
  s <name>        save
  l <name>        load
  ls              list saves
  n               new game
  q               quit";

/// Rows of the board as (leading pad, first slot, length)
const ROWS: [(usize, usize, usize); 7] = [
    (2, 0, 3),
    (1, 3, 5),
    (0, 8, 7),
    (0, 15, 7),
    (0, 22, 7),
    (1, 29, 5),
    (2, 34, 3),
];

fn render(session: &GameSession) -> String {
    let board = session.board();
    let selected = session.selected();
    let destinations = session.valid_destinations();
    let mut out = String::new();
    for (pad, first, len) in ROWS {
        out.push_str(&"    ".repeat(pad));
        for index in first..first + len {
            let cell = match board.contents(index as i32) {
                SlotContents::Occupied(id) if Some(id) == selected => format!("[{index:2}]"),
                SlotContents::Occupied(_) => format!(" {index:2} "),
                _ if destinations.iter().any(|s| s.index() == index) => " ++ ".to_string(),
                _ => "  . ".to_string(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

fn print_status(session: &GameSession) {
    println!("{}", render(session));
    let history = session.history();
    println!(
        "{} | {} marbles | move {}/{}{}",
        session.title(),
        session.board().alive_count(),
        history.cursor(),
        history.len(),
        if session.is_dirty() { " | unsaved" } else { "" }
    );
    if let Some(hint) = session.status().hint() {
        println!("{hint}");
    }
    if let Some(message) = &session.message {
        println!("** {} **", message.text);
    }
    if let Some(id) = session.selected() {
        let marble = &session.marbles()[id.index()];
        println!("selected: {} at {}", session.body_name(marble.body()), marble.slot());
    }
}

/// Run ticks until all animations (and any cutscene) have finished
fn settle(session: &mut GameSession) {
    let idle = TickInput::default();
    while session.in_cutscene() || session.marbles().iter().any(|m| m.animation().is_active()) {
        tick(session, &idle);
    }
}

fn confirm(
    settings: &Settings,
    session: &GameSession,
    stdin: &mut impl BufRead,
) -> io::Result<bool> {
    if !settings.needs_prompt(session.is_dirty()) {
        return Ok(true);
    }
    print!("Discard unsaved moves? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    stdin.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn parse_count(arg: Option<&str>) -> u32 {
    arg.and_then(|a| a.parse().ok()).unwrap_or(1)
}

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Marbles starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let mut session = GameSession::new(seed);
    session.apply_settings(&settings);
    let saves = SaveDirectory::default();

    println!("{HELP}\n");
    print_status(&session);

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        match command {
            "q" | "quit" => break,
            "h" | "help" => println!("{HELP}"),
            "u" => {
                let input = TickInput {
                    undo_pressed: true,
                    undo_held: true,
                    ..Default::default()
                };
                tick(&mut session, &input);
            }
            "r" => {
                let input = TickInput {
                    redo_pressed: true,
                    redo_held: true,
                    ..Default::default()
                };
                tick(&mut session, &input);
            }
            "uu" | "rr" => {
                let undo = command == "uu";
                let input = TickInput {
                    modifier_held: true,
                    undo_held: undo,
                    redo_held: !undo,
                    ..Default::default()
                };
                for _ in 0..parse_count(arg) {
                    tick(&mut session, &input);
                }
            }
            "w" => {
                for _ in 0..parse_count(arg) {
                    tick(&mut session, &TickInput::default());
                }
            }
            "s" => match arg {
                Some(name) => {
                    let _ = saves.save(name, &mut session);
                }
                None => println!("usage: s <name>"),
            },
            "l" => match arg {
                Some(name) => {
                    if confirm(&settings, &session, &mut stdin)? {
                        let _ = saves.load(name, &mut session);
                    }
                }
                None => println!("usage: l <name>"),
            },
            "ls" => match saves.list() {
                Ok(names) if names.is_empty() => {
                    println!("no saves in {}", saves.root().display())
                }
                Ok(names) => println!("{}", names.join("\n")),
                Err(err) => println!("could not list saves: {err}"),
            },
            "n" => {
                if confirm(&settings, &session, &mut stdin)? {
                    session.reset();
                }
            }
            "f" => {
                let target = arg.and_then(|a| a.parse().ok()).and_then(Slot::new);
                let input = TickInput {
                    target,
                    click: true,
                    modifier_held: true,
                    ..Default::default()
                };
                tick(&mut session, &input);
            }
            other => match other.parse::<i32>() {
                Ok(index) => {
                    let input = TickInput {
                        target: Slot::new(index),
                        click: true,
                        ..Default::default()
                    };
                    let outcome = tick(&mut session, &input);
                    if matches!(outcome, MoveOutcome::Moved | MoveOutcome::OpeningRemoval) {
                        settle(&mut session);
                    }
                }
                Err(_) => println!("unknown command {other:?} (h for help)"),
            },
        }
        print_status(&session);
    }

    if let Err(err) = settings.save(Path::new(SETTINGS_FILE)) {
        log::warn!("Failed to save settings: {err}");
    }
    log::info!("Bye");
    Ok(())
}
