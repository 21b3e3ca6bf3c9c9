//! Help synthesis over the real chirp command tree.

use chirp::cli::{self, App};
use chirp::command::Env;

#[test]
fn root_help_covers_flags_and_commands() {
    let root = cli::root("chirp");
    let env = Env::new(&root, App::default());
    let info = env.help_info(true);

    assert!(info.usage.starts_with("Usage:\n\n  chirp <command> [arguments]"));
    assert!(info.flags.contains("--config"));
    assert!(info.flags.contains("--auth-user"));

    let names: Vec<&str> = info.commands.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"search"));
    assert!(names.contains(&"help"));

    let mut out = Vec::new();
    info.write_long(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("A command-line client for the Twitter API."));
    assert!(out.contains("Subcommands:"));
    assert!(out.contains("chirp search"));
}

#[test]
fn search_help_shows_declared_flags_with_defaults() {
    let root = cli::root("chirp");
    let search = root.find_command("search").unwrap();
    let env = Env::new(search, App::default());
    let info = env.help_info(false);

    assert!(info.flags.contains("--query <value>"));
    assert!(info.flags.contains("--page-size <n>"));
    assert!(info.flags.contains("[default: 100]"));
    assert_eq!(info.synopsis, "Search for recent tweets matching a query.");
}

#[test]
fn group_help_lists_one_level_of_subcommands() {
    let root = cli::root("chirp");
    let tweet = root.find_command("tweet").unwrap();
    let info = tweet.help_info(true);

    let names: Vec<&str> = info.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["create", "delete", "like", "unlike"]);
    for sub in &info.commands {
        assert!(sub.commands.is_empty());
    }
}

#[test]
fn flagless_commands_have_empty_flag_blocks() {
    let root = cli::root("chirp");
    let lookup = root.find_command("lookup").unwrap();
    let env = Env::new(lookup, App::default());
    assert!(env.help_info(false).flags.is_empty());
}
