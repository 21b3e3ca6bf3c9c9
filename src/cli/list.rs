//! The `list` command group.

use std::io::Write as _;

use serde_json::{Map, Value};

use crate::command::{self, Command, Env, FlagSet};
use crate::error::Result;
use crate::util::{args, json};

use super::App;

pub fn command() -> Command<App> {
    Command::new("list")
        .usage("<subcommand> [options] args...")
        .help("Operate on lists of users.")
        .set_flags(flags)
        .subcommands(vec![members(), followers(), create(), update(), delete()])
}

fn flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.string("id", "", "The list ID to operate on");
}

fn require_id(env: &mut Env<'_, App>) -> Result<String> {
    let id = env.flags.string("id");
    if id.is_empty() {
        writeln!(env, "Error: no list ID was specified")?;
        command::fail_with_usage(env)?;
    }
    Ok(id)
}

fn members() -> Command<App> {
    Command::new("members")
        .usage("[options] field-spec...")
        .help("List the members of the list given by --id.")
        .run(run_members)
}

fn followers() -> Command<App> {
    Command::new("followers")
        .usage("[options] field-spec...")
        .help("List the followers of the list given by --id.")
        .run(run_followers)
}

fn run_members(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let id = require_id(env)?;
    let parsed = args::parse_args(raw, "user");
    let client = env.config.client()?;
    json::print_json(&client.list_members(&id, &parsed.query())?)
}

fn run_followers(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let id = require_id(env)?;
    let parsed = args::parse_args(raw, "user");
    let client = env.config.client()?;
    json::print_json(&client.list_followers(&id, &parsed.query())?)
}

fn create() -> Command<App> {
    Command::new("create")
        .usage("[options] name")
        .help("Create a new list with the given name.")
        .set_flags(create_flags)
        .run(run_create)
}

fn create_flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.string("description", "", "List description");
    fs.boolean("private", "Make the list private");
}

fn run_create(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let Some(name) = raw.first() else {
        writeln!(env, "Error: no list name was specified")?;
        return command::fail_with_usage(env);
    };
    let client = env.config.client()?;
    let rsp = client.create_list(
        name,
        &env.flags.string("description"),
        env.flags.boolean("private"),
    )?;
    json::print_json(&rsp)
}

fn update() -> Command<App> {
    Command::new("update")
        .usage("[options]")
        .help(
            "Update the list given by --id.\n\n\
             Only the fields whose flags are set explicitly are changed.",
        )
        .set_flags(update_flags)
        .run(run_update)
}

fn update_flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.string("name", "", "New list name");
    fs.string("description", "", "New list description");
    fs.boolean("private", "Make the list private");
}

fn run_update(env: &mut Env<'_, App>, _raw: &[String]) -> Result<()> {
    let id = require_id(env)?;
    let mut fields = Map::new();
    if env.flags.is_set("name") {
        fields.insert("name".into(), Value::String(env.flags.string("name")));
    }
    if env.flags.is_set("description") {
        fields.insert(
            "description".into(),
            Value::String(env.flags.string("description")),
        );
    }
    if env.flags.is_set("private") {
        fields.insert("private".into(), Value::Bool(env.flags.boolean("private")));
    }
    if fields.is_empty() {
        writeln!(env, "Error: no fields were specified to update")?;
        return command::fail_with_usage(env);
    }
    let client = env.config.client()?;
    json::print_json(&client.update_list(&id, &Value::Object(fields))?)
}

fn delete() -> Command<App> {
    Command::new("delete")
        .usage("[options]")
        .help("Delete the list given by --id.")
        .run(run_delete)
}

fn run_delete(env: &mut Env<'_, App>, _raw: &[String]) -> Result<()> {
    let id = require_id(env)?;
    let client = env.config.client()?;
    json::print_json(&client.delete_list(&id)?)
}
