//! The `users` command and its follower subcommands.

use std::io::Write as _;

use serde_json::Value;

use crate::command::{self, Command, Env, FlagSet};
use crate::error::Result;
use crate::util::{args, json};

use super::App;

pub fn command() -> Command<App> {
    Command::new("users")
        .usage(
            "[options] username/field-spec...\n\
             users <subcommand> [options] args...",
        )
        .help(
            "Look up the users with the given usernames.\n\n\
             With --id, the arguments are user IDs instead. A leading \"@\"\n\
             on a username is ignored.",
        )
        .set_flags(flags)
        .run(run)
        .subcommands(vec![followers(), following()])
}

fn flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.boolean("id", "Interpret the arguments as user IDs");
}

fn run(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let parsed = args::parse_args(raw, "user");
    if parsed.keys.is_empty() {
        writeln!(env, "Error: no usernames were specified")?;
        return command::fail_with_usage(env);
    }
    let names: Vec<String> = parsed
        .keys
        .iter()
        .map(|k| k.strip_prefix('@').unwrap_or(k).to_string())
        .collect();
    let client = env.config.client()?;
    let rsp = if env.flags.boolean("id") {
        client.lookup_users(&names, &parsed.query())?
    } else {
        client.lookup_usernames(&names, &parsed.query())?
    };
    json::print_json(&rsp)
}

fn followers() -> Command<App> {
    Command::new("followers")
        .usage("[options] user field-spec...")
        .help("List the followers of the given user.")
        .run(run_followers)
}

fn following() -> Command<App> {
    Command::new("following")
        .usage("[options] user field-spec...")
        .help("List the users the given user is following.")
        .run(run_following)
}

fn run_followers(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    follows(env, raw, false)
}

fn run_following(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    follows(env, raw, true)
}

fn follows(env: &mut Env<'_, App>, raw: &[String], following: bool) -> Result<()> {
    let parsed = args::parse_args(raw, "user");
    let Some(spec) = parsed.keys.first() else {
        writeln!(env, "Error: no user was specified")?;
        return command::fail_with_usage(env);
    };
    let client = env.config.client()?;
    let user_id = client.resolve_user(spec)?;
    let rsp: Value = if following {
        client.following(&user_id, &parsed.query())?
    } else {
        client.followers(&user_id, &parsed.query())?
    };
    json::print_json(&rsp)
}
