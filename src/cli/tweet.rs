//! The `tweet` command group: create, delete, like, unlike.

use std::io::Write as _;

use crate::command::{self, Command, Env, FlagSet};
use crate::error::{ChirpError, Result};
use crate::util::json;

use super::App;

pub fn command() -> Command<App> {
    Command::new("tweet")
        .usage("<subcommand> [options] args...")
        .help("Create, delete, and react to tweets.")
        .subcommands(vec![create(), delete(), like(), unlike()])
}

fn create() -> Command<App> {
    Command::new("create")
        .usage("[options] text...")
        .help(
            "Post a tweet with the given text.\n\n\
             The arguments are joined with spaces to form the status text.",
        )
        .set_flags(create_flags)
        .run(run_create)
}

fn create_flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.string("reply-to", "", "Post as a reply to this tweet ID");
}

fn run_create(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let text = raw.join(" ").trim().to_string();
    if text.is_empty() {
        return Err(ChirpError::Invalid("empty status update".into()));
    }
    let client = env.config.client()?;
    let rsp = client.create_tweet(&text, &env.flags.string("reply-to"))?;
    json::print_json(&rsp)
}

fn delete() -> Command<App> {
    Command::new("delete")
        .usage("id...")
        .help("Delete the tweets with the given IDs.")
        .run(run_delete)
}

fn run_delete(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    if raw.is_empty() {
        writeln!(env, "Error: no tweet IDs were specified")?;
        return command::fail_with_usage(env);
    }
    let client = env.config.client()?;
    for id in raw {
        if id.trim().is_empty() {
            return Err(ChirpError::Invalid("empty ID string".into()));
        }
        json::print_json(&client.delete_tweet(id)?)?;
    }
    Ok(())
}

fn like() -> Command<App> {
    Command::new("like")
        .usage("id")
        .help("Like the tweet with the given ID as the authenticated user.")
        .run(run_like)
}

fn unlike() -> Command<App> {
    Command::new("unlike")
        .usage("id")
        .help("Remove a like from the tweet with the given ID.")
        .run(run_unlike)
}

fn run_like(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    react(env, raw, true)
}

fn run_unlike(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    react(env, raw, false)
}

fn react(env: &mut Env<'_, App>, raw: &[String], like: bool) -> Result<()> {
    let Some(id) = raw.first() else {
        writeln!(env, "Error: no tweet ID was specified")?;
        return command::fail_with_usage(env);
    };
    if id.trim().is_empty() {
        return Err(ChirpError::Invalid("empty ID string".into()));
    }
    let client = env.config.client()?;
    let me = client.me()?;
    let rsp = if like {
        client.like(&me, id)?
    } else {
        client.unlike(&me, id)?
    };
    json::print_json(&rsp)
}
