//! End-to-end dispatch behavior over a synthetic command tree.

use std::cell::RefCell;
use std::rc::Rc;

use chirp::ChirpError;
use chirp::command::{self, Command, Env, FlagSet, Sink};
use chirp::error::Result;

/// Records which actions ran, shared through the dispatch config payload.
#[derive(Clone, Default)]
struct Trace(Rc<RefCell<Vec<String>>>);

impl Trace {
    fn record(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }
}

fn top_flags(_env: &Env<'_, Trace>, fs: &mut FlagSet) {
    fs.boolean("verbose", "Enable verbose output");
}

fn group_flags(_env: &Env<'_, Trace>, fs: &mut FlagSet) {
    fs.string("label", "g", "Group label");
}

fn leaf_flags(_env: &Env<'_, Trace>, fs: &mut FlagSet) {
    fs.integer("n", 1, "Repeat count");
}

fn top_init(env: &mut Env<'_, Trace>) -> anyhow::Result<()> {
    env.config.record("init".into());
    Ok(())
}

fn boom_init(_env: &mut Env<'_, Trace>) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("no workspace available"))
}

fn run_echo(env: &mut Env<'_, Trace>, args: &[String]) -> Result<()> {
    env.config.record(format!("echo:{}", args.join(",")));
    Ok(())
}

fn run_custom_help(env: &mut Env<'_, Trace>, args: &[String]) -> Result<()> {
    env.config.record(format!("customhelp:{}", args.join(",")));
    Ok(())
}

fn run_leaf(env: &mut Env<'_, Trace>, args: &[String]) -> Result<()> {
    env.config.record(format!(
        "leaf label={} n={} verbose={} args={}",
        env.flags.string("label"),
        env.flags.integer("n"),
        env.flags.boolean("verbose"),
        args.join(",")
    ));
    Ok(())
}

fn run_fail(_env: &mut Env<'_, Trace>, _args: &[String]) -> Result<()> {
    Err(ChirpError::Invalid("kaput".into()))
}

fn tree() -> Command<Trace> {
    Command::new("top")
        .usage("<command> [arguments]")
        .help("Test tool.")
        .set_flags(top_flags)
        .init(top_init)
        .subcommands(vec![
            Command::new("echo")
                .usage("args...")
                .help("Echo the arguments.")
                .run(run_echo),
            Command::new("group")
                .usage("<subcommand> args...")
                .help("A command group.")
                .set_flags(group_flags)
                .subcommands(vec![Command::new("leaf")
                    .usage("[options] args...")
                    .help("The working end.")
                    .set_flags(leaf_flags)
                    .run(run_leaf)]),
            Command::new("help")
                .usage("args...")
                .help("A subcommand that shadows the help token.")
                .run(run_custom_help),
            Command::new("boom").help("Fails to initialize.").init(boom_init).run(run_echo),
            Command::new("fail").help("Fails at run time.").run(run_fail),
        ])
}

fn dispatch(args: &[&str]) -> (std::result::Result<(), ChirpError>, String, Vec<String>) {
    let root = tree();
    let trace = Trace::default();
    let mut env = Env::new(&root, trace.clone());
    let buf: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let sink: Sink = buf.clone();
    env.log = Some(sink);
    let argv: Vec<String> = args.iter().map(ToString::to_string).collect();
    let result = command::run(&mut env, &argv);
    drop(env);
    let out = String::from_utf8(buf.borrow().clone()).unwrap();
    let calls = trace.0.borrow().clone();
    (result, out, calls)
}

#[test]
fn nested_dispatch_layers_flags_from_every_level() {
    let (result, out, calls) = dispatch(&[
        "--verbose", "group", "--label", "L", "leaf", "--n", "3", "x", "y",
    ]);
    assert!(result.is_ok());
    assert!(out.is_empty(), "unexpected diagnostics: {out}");
    assert_eq!(calls, vec!["init", "leaf label=L n=3 verbose=true args=x,y"]);
}

#[test]
fn inner_levels_use_defaults_when_flags_are_omitted() {
    let (result, _, calls) = dispatch(&["group", "leaf"]);
    assert!(result.is_ok());
    assert_eq!(calls, vec!["init", "leaf label=g n=1 verbose=false args="]);
}

#[test]
fn init_runs_before_subcommand_resolution() {
    let (_, _, calls) = dispatch(&["echo", "hi"]);
    assert_eq!(calls, vec!["init", "echo:hi"]);
}

#[test]
fn subcommand_named_help_wins_over_the_help_token() {
    let (result, _, calls) = dispatch(&["help", "echo"]);
    assert!(result.is_ok());
    assert_eq!(calls, vec!["init", "customhelp:echo"]);
}

#[test]
fn trailing_help_on_a_group_renders_long_help() {
    let (result, out, calls) = dispatch(&["group", "help"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("Usage:"));
    assert!(out.contains("A command group."));
    assert!(out.contains("group leaf"));
    assert_eq!(calls, vec!["init"]);
}

#[test]
fn help_followed_by_a_name_descends_and_stays_pending() {
    let (result, out, calls) = dispatch(&["group", "help", "leaf"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("The working end."));
    assert!(out.contains("--n"));
    assert_eq!(calls, vec!["init"]);
}

#[test]
fn help_flag_renders_synopsis_help() {
    let (result, out, calls) = dispatch(&["--help"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("Usage:"));
    assert!(out.contains("Test tool."));
    assert!(out.contains("--verbose"));
    assert!(calls.is_empty(), "init must not run on a flag-level help request");
}

#[test]
fn help_flag_on_a_nested_node_renders_its_synopsis() {
    let (result, out, calls) = dispatch(&["group", "leaf", "--help"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("The working end."));
    assert!(out.contains("--n"));
    assert_eq!(calls, vec!["init"], "only the root init may run");
}

#[test]
fn help_flag_on_a_group_renders_its_synopsis() {
    let (result, out, _) = dispatch(&["group", "--help"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("A command group."));
    assert!(out.contains("--label"));
}

#[test]
fn unknown_leading_flag_is_a_flag_error() {
    let (result, _, calls) = dispatch(&["--bogus"]);
    assert!(matches!(result, Err(ChirpError::Flag(_))));
    assert!(calls.is_empty());
}

#[test]
fn free_argument_without_run_action_is_diagnosed() {
    let (result, out, _) = dispatch(&["group", "wat"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("command \"wat\" not understood"));
    assert!(out.contains("Usage:"));
}

#[test]
fn bare_group_prints_usage() {
    let (result, out, calls) = dispatch(&["group"]);
    assert!(matches!(result, Err(ChirpError::Usage)));
    assert!(out.contains("Usage:"));
    assert_eq!(calls, vec!["init"]);
}

#[test]
fn literal_help_as_final_argument_runs_the_action() {
    let (result, out, calls) = dispatch(&["echo", "help"]);
    assert!(result.is_ok());
    assert!(out.contains("ordinary argument"));
    assert_eq!(calls, vec!["init", "echo:help"]);
}

#[test]
fn init_failure_names_the_command() {
    let (result, _, calls) = dispatch(&["boom"]);
    match result {
        Err(ChirpError::Init { command, cause }) => {
            assert_eq!(command, "boom");
            assert!(cause.to_string().contains("no workspace available"));
        }
        other => panic!("expected init error, got {other:?}"),
    }
    // The root init succeeded; the failing node's action never ran.
    assert_eq!(calls, vec!["init"]);
}

#[test]
fn run_errors_pass_through_unchanged() {
    let (result, out, _) = dispatch(&["fail"]);
    match result {
        Err(ChirpError::Invalid(msg)) => assert_eq!(msg, "kaput"),
        other => panic!("expected invalid error, got {other:?}"),
    }
    assert!(out.is_empty());
}
