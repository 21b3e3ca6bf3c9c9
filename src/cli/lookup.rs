//! The `lookup` command.

use std::io::Write as _;

use crate::command::{self, Command, Env};
use crate::error::Result;
use crate::util::{args, json};

use super::App;

pub fn command() -> Command<App> {
    Command::new("lookup")
        .usage("[options] id/field-spec...")
        .help(
            "Look up the tweets with the given IDs.\n\n\
             Each argument is either a tweet ID, a field specifier of the\n\
             form \"type:field\" (\":field\" alone means \"tweet:field\"),\n\
             or an expansion of the form \"@name\".",
        )
        .run(run)
}

fn run(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let parsed = args::parse_args(raw, "tweet");
    if parsed.keys.is_empty() {
        writeln!(env, "Error: no tweet IDs were specified")?;
        return command::fail_with_usage(env);
    }
    let client = env.config.client()?;
    let rsp = client.lookup_tweets(&parsed.keys, &parsed.query())?;
    json::print_json(&rsp)
}
