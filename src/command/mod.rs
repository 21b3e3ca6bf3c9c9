//! Plumbing for command dispatch.
//!
//! A command-line tool is described as a static tree of [`Command`] values:
//! each node carries a name, usage and help text, an optional flag
//! declaration hook, an optional initializer, an optional run action, and
//! its subcommands. [`run`] walks the unclaimed arguments through the tree,
//! resolving subcommands by name, treating `"help"` tokens as help requests,
//! and finally invoking the resolved node's action with the remaining free
//! arguments.
//!
//! Dispatch threads an [`Env`] through every level: the executing node, its
//! parent, the name it was invoked by, an opaque shared configuration value,
//! and a diagnostic sink. `Env` implements [`std::io::Write`]; commands
//! should send diagnostic output there and primary output to stdout.
//!
//! Help or usage requests terminate in [`ChirpError::Usage`], a sentinel
//! distinct from real failures so that the caller can map it to its own exit
//! status without printing a second error.

pub mod flags;
pub mod help;

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::error::{ChirpError, Result};
use flags::FlagError;
pub use flags::{FlagSet, FlagValues};
pub use help::HelpInfo;

/// The action of a command, invoked with the final free argument list.
pub type RunFn<T> = fn(&mut Env<'_, T>, &[String]) -> Result<()>;

/// Initializer hook, invoked after flag parsing and before subcommand
/// resolution. A failure aborts dispatch.
pub type InitFn<T> = fn(&mut Env<'_, T>) -> anyhow::Result<()>;

/// Flag declaration hook, invoked once per dispatch step to register the
/// node's options on a fresh [`FlagSet`] before parsing.
pub type SetFlagsFn<T> = fn(&Env<'_, T>, &mut FlagSet);

/// Where diagnostic output goes when an explicit sink is installed.
pub type Sink = Rc<RefCell<dyn io::Write>>;

/// One node of the command tree.
///
/// A tree is built once, before any dispatch occurs; nothing mutates its
/// shape at runtime. `T` is the caller-supplied configuration payload
/// threaded through dispatch; the framework never interprets it.
pub struct Command<T> {
    /// The name of the command, preferably one word. Must be unique among
    /// siblings.
    pub name: String,

    /// A terse usage summary. Multiple lines are allowed; each line should
    /// be self-contained for a particular usage sense.
    pub usage: String,

    /// A detailed description. The first non-blank line is used as a
    /// synopsis in compact listings.
    pub help: String,

    /// If set, flags are declared through this hook and parsed from the
    /// arguments. If unset, the node takes no flags (or its run action
    /// parses its own raw arguments).
    pub set_flags: Option<SetFlagsFn<T>>,

    /// Initializer, run after flag parsing and before resolution.
    pub init: Option<InitFn<T>>,

    /// The action of the command. If unset, reaching this node reports a
    /// usage failure.
    pub run: Option<RunFn<T>>,

    /// Subcommands, in display order. Dispatch lookup is by name.
    pub commands: Vec<Command<T>>,
}

impl<T> Command<T> {
    /// Creates an empty command with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            usage: String::new(),
            help: String::new(),
            set_flags: None,
            init: None,
            run: None,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    #[must_use]
    pub fn set_flags(mut self, hook: SetFlagsFn<T>) -> Self {
        self.set_flags = Some(hook);
        self
    }

    #[must_use]
    pub fn init(mut self, hook: InitFn<T>) -> Self {
        self.init = Some(hook);
        self
    }

    #[must_use]
    pub fn run(mut self, action: RunFn<T>) -> Self {
        self.run = Some(action);
        self
    }

    #[must_use]
    pub fn subcommands(mut self, commands: Vec<Command<T>>) -> Self {
        self.commands = commands;
        self
    }

    /// Finds the direct subcommand with the given name.
    #[must_use]
    pub fn find_command(&self, name: &str) -> Option<&Self> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// The environment passed to the hooks and run action of a command.
///
/// A new `Env` is derived for every descent into a subcommand: a shallow
/// copy of the current one with the executing node, parent, and invocation
/// name updated. Parent environments are never mutated after a child is
/// derived from them.
pub struct Env<'c, T> {
    /// The node currently executing.
    pub command: &'c Command<T>,
    /// The node that dispatched to this one, if any.
    pub parent: Option<&'c Command<T>>,
    /// The name this level was invoked by on the command line.
    pub name: String,
    /// Caller-supplied configuration, passed unchanged through every level.
    pub config: T,
    /// Diagnostic sink; `None` means the process's standard error stream.
    pub log: Option<Sink>,
    /// Flag values parsed so far, outermost level first.
    pub flags: FlagValues,

    help_pending: bool,
}

impl<'c, T: Clone> Env<'c, T> {
    /// Creates the root environment for a dispatch over `command`.
    pub fn new(command: &'c Command<T>, config: T) -> Self {
        Self {
            command,
            parent: None,
            name: command.name.clone(),
            config,
            log: None,
            flags: FlagValues::default(),
            help_pending: false,
        }
    }

    /// Derives the environment for a descent into `command`, invoked as
    /// `name`.
    fn child(&self, command: &'c Command<T>, name: &str) -> Self {
        Self {
            command,
            parent: Some(self.command),
            name: name.to_string(),
            config: self.config.clone(),
            log: self.log.clone(),
            flags: self.flags.clone(),
            help_pending: self.help_pending,
        }
    }

    /// Synthesizes help details for the executing node, including its flag
    /// summary. If `include_commands` is true, one level of subcommand help
    /// is included as well.
    #[must_use]
    pub fn help_info(&self, include_commands: bool) -> HelpInfo {
        let mut info = self.command.help_info(include_commands);
        if let Some(set_flags) = self.command.set_flags {
            let mut fs = FlagSet::new(&self.name);
            set_flags(self, &mut fs);
            info.flags = fs.summary();
        }
        info
    }
}

impl<T> io::Write for Env<'_, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.log {
            Some(sink) => sink.borrow_mut().write(buf),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.log {
            Some(sink) => sink.borrow_mut().flush(),
            None => io::stderr().flush(),
        }
    }
}

/// Runs the command described by `env` with the given unprocessed arguments.
///
/// Flags declared by the node are parsed first; a help request from the flag
/// layer renders synopsis help and reports [`ChirpError::Usage`], while any
/// other parse failure propagates unwrapped. The initializer hook runs next.
/// Remaining arguments are then resolved against subcommands by name, with
/// the literal token `"help"` consumed as a help request when it is not the
/// final argument of a node that takes arguments itself. Whatever arguments
/// are left belong to the resolved node's run action, whose result is
/// returned verbatim.
pub fn run<T: Clone>(env: &mut Env<'_, T>, raw_args: &[String]) -> Result<()> {
    let cmd = env.command;

    let args: Vec<String> = if let Some(set_flags) = cmd.set_flags {
        let mut fs = FlagSet::new(&env.name);
        set_flags(env, &mut fs);
        match fs.parse(raw_args) {
            Ok((matches, rest)) => {
                env.flags.push(matches);
                rest
            }
            Err(FlagError::HelpRequested) => {
                let info = env.help_info(true);
                info.write_synopsis(env)?;
                return Err(ChirpError::Usage);
            }
            Err(FlagError::Parse(e)) => return Err(ChirpError::Flag(e)),
        }
    } else {
        raw_args.to_vec()
    };

    if let Some(init) = cmd.init {
        init(env).map_err(|cause| ChirpError::Init {
            command: env.name.clone(),
            cause,
        })?;
    }

    // Resolve the leading arguments: subcommand names descend, "help"
    // tokens mark a pending help request, and anything else ends the walk.
    let mut i = 0;
    while i < args.len() {
        let first = args[i].as_str();
        if let Some(child) = cmd.find_command(first) {
            let mut child_env = env.child(child, first);
            return run(&mut child_env, &args[i + 1..]);
        }
        // A "help" token defers resolution unless it is the last free
        // argument of a node that consumes arguments itself.
        if first == "help" && (args.len() - i > 1 || cmd.run.is_none()) {
            env.help_pending = true;
            i += 1;
            continue;
        }
        if cmd.run.is_none() && !env.help_pending {
            writeln!(env, "command {first:?} not understood")?;
        }
        break;
    }
    let rest = &args[i..];

    if env.help_pending {
        let info = env.help_info(true);
        info.write_long(env)?;
        return Err(ChirpError::Usage);
    }
    let Some(action) = cmd.run else {
        let info = env.help_info(false);
        info.write_usage(env)?;
        return Err(ChirpError::Usage);
    };
    if let [only] = rest
        && only == "help"
    {
        writeln!(env, "notice: \"help\" is treated here as an ordinary argument")?;
    }
    action(env, rest)
}

/// A run action building block: writes a usage summary for the executing
/// command and reports the usage sentinel.
pub fn fail_with_usage<T: Clone>(env: &mut Env<'_, T>) -> Result<()> {
    let info = env.help_info(false);
    info.write_usage(env)?;
    Err(ChirpError::Usage)
}

/// A run action that renders the executing command's complete help.
pub fn run_long_help<T: Clone>(env: &mut Env<'_, T>, _args: &[String]) -> Result<()> {
    let info = env.help_info(true);
    info.write_long(env)?;
    Err(ChirpError::Usage)
}

/// A run action that renders the executing command's synopsis help.
pub fn run_short_help<T: Clone>(env: &mut Env<'_, T>, _args: &[String]) -> Result<()> {
    let info = env.help_info(false);
    info.write_synopsis(env)?;
    Err(ChirpError::Usage)
}
