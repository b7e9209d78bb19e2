use clap::Args;
use violetas_core::{Config, MeetingEngine};

use super::resolve_now;
use crate::render;

#[derive(Args)]
pub struct GroupsArgs {
    /// Evaluate at this local time instead of now (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    at: Option<String>,
    /// Member who is not here today (repeatable)
    #[arg(long = "absent", value_name = "NAME")]
    absent: Vec<String>,
    /// Seed for reproducible groups, overriding groups.seed
    #[arg(long)]
    seed: Option<u64>,
    /// Print events as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: GroupsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if args.seed.is_some() {
        config.groups.seed = args.seed;
    }
    let now = resolve_now(args.at.as_deref())?;
    let mut engine = MeetingEngine::new(&config, now)?;

    for name in &args.absent {
        let pool = engine
            .roster()
            .pool_of(name.trim())
            .ok_or_else(|| format!("unknown member: {name}"))?;
        engine.toggle_member(pool, name)?;
    }

    let events = engine.request_groups(now);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let language = engine.language();
    for event in &events {
        if let Some(line) = render::event(event, language) {
            println!("{line}");
        }
    }
    if let Some(groups) = engine.groups() {
        print!("{}", render::groups(groups, language));
    }
    Ok(())
}
