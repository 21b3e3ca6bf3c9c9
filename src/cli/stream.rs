//! The `stream` command.

use crate::command::{Command, Env, FlagSet};
use crate::error::Result;
use crate::util::{args, json};

use super::App;

pub fn command() -> Command<App> {
    Command::new("stream")
        .usage("[options] field-spec...")
        .help(
            "Stream tweets matching the installed filter rules.\n\n\
             Tweets are printed as they arrive, one per line, until the\n\
             stream closes or --max results have been received.",
        )
        .set_flags(flags)
        .run(run)
}

fn flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.integer("max", 0, "Stop after this many results (0 means no limit)");
}

fn run(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let parsed = args::parse_args(raw, "tweet");
    let max = env.flags.integer("max");
    let client = env.config.client()?;
    let mut seen: i64 = 0;
    client.stream(&parsed.query(), |value| {
        json::print_json(&value)?;
        seen += 1;
        Ok(max <= 0 || seen < max)
    })
}
