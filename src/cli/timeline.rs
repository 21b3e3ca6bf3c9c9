//! The `timeline` command group.

use crate::api::Timeline;
use crate::command::{Command, Env, FlagSet};
use crate::error::Result;
use crate::util::{args, json};

use super::App;

pub fn command() -> Command<App> {
    Command::new("timeline")
        .usage("<subcommand> [options] args...")
        .help("Fetch tweet timelines.")
        .set_flags(flags)
        .subcommands(vec![
            Command::new("user")
                .usage("[options] [user] field-spec...")
                .help("Fetch tweets authored by a user (default: the authenticated user).")
                .run(run_user),
            Command::new("mentions")
                .usage("[options] [user] field-spec...")
                .help("Fetch tweets mentioning a user (default: the authenticated user).")
                .run(run_mentions),
            Command::new("home")
                .usage("[options] field-spec...")
                .help("Fetch the authenticated user's home timeline.")
                .run(run_home),
        ])
}

fn flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.integer("page-size", 100, "Number of results per page");
    fs.boolean("exclude-replies", "Leave replies out of the results");
    fs.boolean("exclude-retweets", "Leave retweets out of the results");
}

fn run_user(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    fetch(env, raw, Timeline::User)
}

fn run_mentions(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    fetch(env, raw, Timeline::Mentions)
}

fn run_home(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    fetch(env, raw, Timeline::Home)
}

fn fetch(env: &mut Env<'_, App>, raw: &[String], kind: Timeline) -> Result<()> {
    let parsed = args::parse_args(raw, "tweet");
    let client = env.config.client()?;
    // Without an explicit user, operate on the authenticated user.
    let user_id = match parsed.keys.first() {
        Some(spec) if kind != Timeline::Home => client.resolve_user(spec)?,
        _ => client.me()?,
    };
    let page_size = env.flags.integer("page-size").clamp(5, 100);
    let mut q = vec![("max_results".to_string(), page_size.to_string())];
    let mut exclude = Vec::new();
    if env.flags.boolean("exclude-replies") {
        exclude.push("replies");
    }
    if env.flags.boolean("exclude-retweets") {
        exclude.push("retweets");
    }
    if !exclude.is_empty() {
        q.push(("exclude".to_string(), exclude.join(",")));
    }
    q.extend(parsed.query());
    json::print_json(&client.timeline(kind, &user_id, &q)?)
}
