//! Assembly of the chirp command tree.
//!
//! The root command owns the global flags and the initializer that loads
//! configuration and sets up logging; everything else hangs off it as
//! subcommands. The [`App`] value is the shared configuration payload
//! threaded through dispatch.

pub mod list;
pub mod lookup;
pub mod rules;
pub mod search;
pub mod stream;
pub mod timeline;
pub mod topics;
pub mod tweet;
pub mod users;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;

use crate::api;
use crate::command::{Command, Env, FlagSet};
use crate::config::{self, Settings};
use crate::error::{ChirpError, Result};
use crate::logging;

/// Shared application state, cloned cheaply through dispatch. The settings
/// slot is filled by the root initializer before any subcommand runs.
#[derive(Clone, Default)]
pub struct App {
    settings: Rc<RefCell<Option<Settings>>>,
}

impl App {
    /// Installs the loaded settings for the rest of the dispatch.
    pub fn install(&self, settings: Settings) {
        *self.settings.borrow_mut() = Some(settings);
    }

    /// A copy of the loaded settings.
    pub fn settings(&self) -> Result<Settings> {
        self.settings
            .borrow()
            .clone()
            .ok_or_else(|| ChirpError::Config("configuration was not initialized".into()))
    }

    /// An API client built from the loaded settings.
    pub fn client(&self) -> Result<api::Client> {
        self.settings()?.client()
    }
}

/// Builds the root command, named after the invoking binary.
#[must_use]
pub fn root(name: &str) -> Command<App> {
    Command::new(name)
        .usage("<command> [arguments]")
        .help(
            "A command-line client for the Twitter API.\n\n\
             Run \"help\" with a command or topic name for more details.",
        )
        .set_flags(root_flags)
        .init(root_init)
        .subcommands(vec![
            lookup::command(),
            search::command(),
            users::command(),
            tweet::command(),
            timeline::command(),
            list::command(),
            rules::command(),
            stream::command(),
            topics::command(),
        ])
}

fn root_flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.string("config", "", "Configuration file path");
    fs.string("log-level", "", "Log filter, overriding CHIRP_LOG");
    fs.string("auth-user", "", "Authenticate as this user");
}

fn root_init(env: &mut Env<'_, App>) -> anyhow::Result<()> {
    logging::init(&env.flags.string("log-level"));

    let path = match env.flags.string("config") {
        path if path.is_empty() => config::default_path(),
        path => PathBuf::from(path),
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    let mut settings = Settings::load(&path).context("loading configuration")?;
    let user = env.flags.string("auth-user");
    if !user.is_empty() {
        settings.auth_user = Some(user);
    }
    env.config.install(settings);
    Ok(())
}
