use clap::Args;
use violetas_core::{Config, MeetingEngine};

use super::resolve_now;
use crate::render;

#[derive(Args)]
pub struct StatusArgs {
    /// Evaluate at this local time instead of now (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    at: Option<String>,
    /// Print the state snapshot as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = resolve_now(args.at.as_deref())?;
    let engine = MeetingEngine::new(&config, now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    } else {
        print!("{}", render::board(&config, &engine));
    }
    Ok(())
}
