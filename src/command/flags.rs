//! Flag parsing adapter over `clap`.
//!
//! The adapter keeps `clap` from printing or exiting on its own: parse
//! outcomes are translated into values the dispatcher understands, and all
//! help/usage rendering stays with the framework.
//!
//! Flag parsing stops at the first argument that does not look like a flag
//! (or at a literal `--`); everything after that point is handed back as
//! free arguments for subcommand resolution.

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, value_parser};

/// Outcome of a failed parse, translated for the dispatcher.
#[derive(Debug)]
pub(crate) enum FlagError {
    /// The user asked the flag layer for help (`-h`/`--help`).
    HelpRequested,
    /// Any other parse failure, to be propagated unwrapped.
    Parse(clap::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Integer,
    Switch,
}

struct Decl {
    name: String,
    kind: Kind,
    default: Option<String>,
    help: String,
}

/// A set of flag declarations for one command, built fresh per dispatch
/// step by the node's flag declaration hook.
pub struct FlagSet {
    name: String,
    args: Vec<Arg>,
    decls: Vec<Decl>,
}

impl FlagSet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
            decls: Vec::new(),
        }
    }

    /// Declares a string-valued flag.
    pub fn string(&mut self, name: &str, default: &str, help: &str) {
        self.args.push(
            Arg::new(name.to_string())
                .long(name.to_string())
                .value_name("value")
                .action(ArgAction::Set)
                .default_value(default.to_string())
                .help(help.to_string()),
        );
        self.decls.push(Decl {
            name: name.to_string(),
            kind: Kind::Text,
            default: (!default.is_empty()).then(|| default.to_string()),
            help: help.to_string(),
        });
    }

    /// Declares an integer-valued flag.
    pub fn integer(&mut self, name: &str, default: i64, help: &str) {
        self.args.push(
            Arg::new(name.to_string())
                .long(name.to_string())
                .value_name("n")
                .action(ArgAction::Set)
                .value_parser(value_parser!(i64))
                .default_value(default.to_string())
                .help(help.to_string()),
        );
        self.decls.push(Decl {
            name: name.to_string(),
            kind: Kind::Integer,
            default: (default != 0).then(|| default.to_string()),
            help: help.to_string(),
        });
    }

    /// Declares a boolean switch, false unless given.
    pub fn boolean(&mut self, name: &str, help: &str) {
        self.args.push(
            Arg::new(name.to_string())
                .long(name.to_string())
                .action(ArgAction::SetTrue)
                .help(help.to_string()),
        );
        self.decls.push(Decl {
            name: name.to_string(),
            kind: Kind::Switch,
            default: None,
            help: help.to_string(),
        });
    }

    /// Parses the leading flag arguments of `argv` and returns the matches
    /// together with the remaining free arguments.
    pub(crate) fn parse(self, argv: &[String]) -> Result<(ArgMatches, Vec<String>), FlagError> {
        let (flag_args, rest) = self.split_args(argv);
        let mut cmd = clap::Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_colored_help(true);
        for arg in self.args {
            cmd = cmd.arg(arg);
        }
        match cmd.try_get_matches_from(flag_args) {
            Ok(matches) => Ok((matches, rest)),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                Err(FlagError::HelpRequested)
            }
            Err(e) => Err(FlagError::Parse(e)),
        }
    }

    /// Splits `argv` into the leading flag segment and the trailing free
    /// arguments. A literal `--` ends the flag segment without being kept.
    fn split_args(&self, argv: &[String]) -> (Vec<String>, Vec<String>) {
        let mut i = 0;
        while i < argv.len() {
            let arg = argv[i].as_str();
            if arg == "--" {
                return (argv[..i].to_vec(), argv[i + 1..].to_vec());
            }
            if !arg.starts_with('-') || arg == "-" {
                break;
            }
            if arg.contains('=') {
                i += 1;
                continue;
            }
            let name = arg.trim_start_matches('-');
            i += if self.takes_value(name) { 2 } else { 1 };
        }
        let i = i.min(argv.len());
        (argv[..i].to_vec(), argv[i..].to_vec())
    }

    fn takes_value(&self, name: &str) -> bool {
        self.decls
            .iter()
            .any(|d| d.name == name && d.kind != Kind::Switch)
    }

    /// Renders the flag summary block; empty when nothing is declared.
    /// Byte-identical across calls for the same declarations.
    pub(crate) fn summary(&self) -> String {
        if self.decls.is_empty() {
            return String::new();
        }
        let entries: Vec<(String, String)> = self
            .decls
            .iter()
            .map(|d| {
                let label = match d.kind {
                    Kind::Switch => format!("--{}", d.name),
                    Kind::Text => format!("--{} <value>", d.name),
                    Kind::Integer => format!("--{} <n>", d.name),
                };
                let mut text = d.help.clone();
                if let Some(default) = &d.default {
                    text.push_str(&format!(" [default: {default}]"));
                }
                (label, text)
            })
            .collect();
        let width = entries.iter().map(|(l, _)| l.len()).max().unwrap_or_default();
        let mut out = String::from("Options:");
        for (label, text) in entries {
            out.push_str(&format!("\n  {label:<width$}  {text}"));
        }
        out
    }
}

/// Parsed flag values visible to a command's hooks and run action.
///
/// Values are layered: a subcommand's environment inherits the flags parsed
/// by its ancestors, and lookups prefer the innermost level that declares
/// the name. Accessors never panic; unknown names yield zero values.
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    layers: Vec<ArgMatches>,
}

impl FlagValues {
    pub(crate) fn push(&mut self, matches: ArgMatches) {
        self.layers.push(matches);
    }

    fn lookup<V>(&self, name: &str, get: impl Fn(&ArgMatches) -> Option<V>) -> Option<V> {
        for matches in self.layers.iter().rev() {
            match matches.try_contains_id(name) {
                Ok(true) => return get(matches),
                Ok(false) => return None,
                Err(_) => {}
            }
        }
        None
    }

    /// The value of a string flag; empty if unset or undeclared.
    #[must_use]
    pub fn string(&self, name: &str) -> String {
        self.lookup(name, |m| m.try_get_one::<String>(name).ok().flatten().cloned())
            .unwrap_or_default()
    }

    /// The value of an integer flag; 0 if unset or undeclared.
    #[must_use]
    pub fn integer(&self, name: &str) -> i64 {
        self.lookup(name, |m| m.try_get_one::<i64>(name).ok().flatten().copied())
            .unwrap_or_default()
    }

    /// The value of a boolean switch; false if unset or undeclared.
    #[must_use]
    pub fn boolean(&self, name: &str) -> bool {
        self.lookup(name, |m| m.try_get_one::<bool>(name).ok().flatten().copied())
            .unwrap_or_default()
    }

    /// Reports whether the flag was set explicitly on the command line, as
    /// opposed to carrying its default.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        for matches in self.layers.iter().rev() {
            match matches.try_contains_id(name) {
                Ok(true) => {
                    return matches!(matches.value_source(name), Some(ValueSource::CommandLine));
                }
                Ok(false) => return false,
                Err(_) => {}
            }
        }
        false
    }
}
