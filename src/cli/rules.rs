//! The `rules` command group for the filtered stream.

use std::io::Write as _;

use serde_json::{Value, json};

use crate::command::{self, Command, Env};
use crate::error::Result;
use crate::util::json;

use super::App;

pub fn command() -> Command<App> {
    Command::new("rules")
        .usage(
            "[id...]\n\
             rules <subcommand> args...",
        )
        .help(
            "Show and edit the rules of the filtered stream.\n\n\
             With no subcommand, print the installed rules, restricted to\n\
             the given rule IDs if any are listed.",
        )
        .run(run_show)
        .subcommands(vec![add(), remove()])
}

fn run_show(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let client = env.config.client()?;
    json::print_json(&client.rules(raw)?)
}

fn add() -> Command<App> {
    Command::new("add")
        .usage("[tag=]query...")
        .help(
            "Add rules to the filtered stream.\n\n\
             Each argument is a rule query, optionally prefixed with a tag\n\
             and an equals sign.",
        )
        .run(run_add)
}

fn run_add(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    if raw.is_empty() {
        writeln!(env, "Error: no rules were specified")?;
        return command::fail_with_usage(env);
    }
    let rules: Vec<Value> = raw
        .iter()
        .map(|arg| match arg.split_once('=') {
            Some((tag, query)) if !tag.is_empty() => json!({ "value": query, "tag": tag }),
            _ => json!({ "value": arg }),
        })
        .collect();
    let client = env.config.client()?;
    json::print_json(&client.update_rules(&json!({ "add": rules }))?)
}

fn remove() -> Command<App> {
    Command::new("remove")
        .usage("id...")
        .help("Remove the rules with the given IDs from the filtered stream.")
        .run(run_remove)
}

fn run_remove(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    if raw.is_empty() {
        writeln!(env, "Error: no rule IDs were specified")?;
        return command::fail_with_usage(env);
    }
    let client = env.config.client()?;
    json::print_json(&client.update_rules(&json!({ "delete": { "ids": raw } }))?)
}
