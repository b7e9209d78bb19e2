//! Interactive session: a ticking clock plus commands read from stdin.

use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::debug;
use violetas_core::{Config, Event, MeetingEngine, Phrase, Pool};

use super::resolve_now;
use crate::render;

#[derive(Args)]
pub struct SessionArgs {
    /// Start the session clock at this local time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    at: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Status,
    Toggle { pool: Pool, name: String },
    Groups,
    Reset,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        match command.as_str() {
            "status" | "" => Ok(SessionCommand::Status),
            "groups" => Ok(SessionCommand::Groups),
            "reset" => Ok(SessionCommand::Reset),
            "help" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            "toggle" => {
                let pool = words
                    .next()
                    .ok_or("usage: toggle <english|spanish> <name>")?
                    .parse::<Pool>()
                    .map_err(|e| e.to_string())?;
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err("usage: toggle <english|spanish> <name>".into());
                }
                Ok(SessionCommand::Toggle { pool, name })
            }
            other => Err(format!("unknown command: {other} (try 'help')")),
        }
    }
}

/// Wall clock that starts at a chosen moment and then runs in real time.
struct SessionTime {
    origin: NaiveDateTime,
    started: Instant,
}

impl SessionTime {
    fn now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.started.elapsed()).unwrap_or_default();
        self.origin + elapsed
    }
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let time = SessionTime {
        origin: resolve_now(args.at.as_deref())?,
        started: Instant::now(),
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(config, time));
    // A pending stdin read would otherwise hold the runtime open.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn drive(config: Config, time: SessionTime) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = MeetingEngine::new(&config, time.now())?;
    let mut interval = tokio::time::interval(engine.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut token = engine.tick_token();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", render::board(&config, &engine));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(current) = token else { continue };
                let events = engine.tick(current, time.now());
                print_events(&events, &engine);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match line.parse::<SessionCommand>() {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{message}");
                        continue;
                    }
                };
                debug!(?command, "session command");
                match command {
                    SessionCommand::Status => print!("{}", render::board(&config, &engine)),
                    SessionCommand::Toggle { pool, name } => {
                        match engine.toggle_member(pool, &name) {
                            Ok(event) => print_events(&[event], &engine),
                            Err(e) => eprintln!("{e}"),
                        }
                    }
                    SessionCommand::Groups => {
                        let events = engine.request_groups(time.now());
                        print_events(&events, &engine);
                        if events.iter().any(|e| matches!(e, Event::GroupsCreated { .. })) {
                            if let Some(groups) = engine.groups() {
                                print!("{}", render::groups(groups, engine.language()));
                            }
                        }
                    }
                    SessionCommand::Reset => {
                        let events = engine.reset_session(time.now());
                        token = engine.tick_token();
                        interval.reset();
                        print_events(&events, &engine);
                    }
                    SessionCommand::Help => print_help(&engine),
                    SessionCommand::Quit => break,
                }
            }
        }
    }

    engine.stop_ticking();
    Ok(())
}

fn print_events(events: &[Event], engine: &MeetingEngine) {
    for event in events {
        if let Some(line) = render::event(event, engine.language()) {
            println!("{line}");
        }
    }
}

fn print_help(engine: &MeetingEngine) {
    let lang = engine.language();
    println!("status                          {}", Phrase::CurrentSegment.text(lang));
    println!("toggle <english|spanish> <name>");
    println!("groups                          {}", Phrase::CreateBreakoutGroups.text(lang));
    println!("reset                           {}", Phrase::NewSession.text(lang));
    println!("quit");
}
