//! The `help` command and its free-standing help topics.

use std::io::Write as _;

use crate::command::{self, Command, Env};
use crate::error::{ChirpError, Result};

use super::App;

pub fn command() -> Command<App> {
    Command::new("help")
        .usage("[command/topic...]")
        .help(
            "Print help for the named command or topic.\n\n\
             With no arguments, print a summary of the available commands\n\
             and topics.",
        )
        .run(run)
        .subcommands(vec![expansions(), tweet_fields(), user_fields(), search_query()])
}

fn run(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let Some(root) = env.parent else {
        return command::run_long_help(env, raw);
    };
    let mut target = root;
    for name in raw {
        match target.find_command(name) {
            Some(next) => target = next,
            None => {
                writeln!(env, "help: command {name:?} not found")?;
                return Err(ChirpError::Usage);
            }
        }
    }
    // Flag declarations need an environment for the target node.
    let scratch = Env::new(target, env.config.clone());
    let info = scratch.help_info(true);
    info.write_long(env)?;
    Err(ChirpError::Usage)
}

fn expansions() -> Command<App> {
    Command::new("expansions")
        .help(
            "How object expansions are requested.\n\n\
             An argument of the form \"@name\" asks the API to expand the\n\
             named object reference into the response. Shortcuts are\n\
             understood for the most common expansions:\n\n\
             \x20 @tweets, @ref_tweets   referenced_tweets.id\n\
             \x20 @ref_author            referenced_tweets.id.author_id\n\
             \x20 @reply_to_user         in_reply_to_user_id\n\
             \x20 @media_keys            attachments.media_keys\n\
             \x20 @poll_ids              attachments.poll_ids\n\
             \x20 @place_id              geo.place_id\n\
             \x20 @mentions              entities.mentions.username\n\
             \x20 @pinned_tweet          pinned_tweet_id\n\n\
             Any other name is passed through to the API unmodified.",
        )
        .run(command::run_long_help)
}

fn tweet_fields() -> Command<App> {
    Command::new("tweet.fields")
        .help(
            "Optional tweet fields.\n\n\
             An argument of the form \"tweet:field\" (or \":field\" where\n\
             tweets are the default object type) asks the API to include\n\
             the named optional field in each returned tweet. Useful fields\n\
             include author_id, created_at, conversation_id, entities,\n\
             lang, public_metrics, and referenced_tweets. The shortcut\n\
             prefixes \"t:\", \"u:\", \"m:\", and \"l:\" stand for tweet,\n\
             user, media, and place.",
        )
        .run(command::run_long_help)
}

fn user_fields() -> Command<App> {
    Command::new("user.fields")
        .help(
            "Optional user fields.\n\n\
             An argument of the form \"user:field\" (or \":field\" where\n\
             users are the default object type) asks the API to include\n\
             the named optional field in each returned user. Useful fields\n\
             include created_at, description, location, pinned_tweet_id,\n\
             public_metrics, and verified.",
        )
        .run(command::run_long_help)
}

fn search_query() -> Command<App> {
    Command::new("search-query")
        .help(
            "The query language for search and stream rules.\n\n\
             A query is a space-separated conjunction of terms: bare\n\
             keywords, quoted phrases, and operators such as from:user,\n\
             to:user, @user, #hashtag, lang:code, is:retweet, is:reply,\n\
             has:links, and has:media. Prefix a term with \"-\" to negate\n\
             it, and group alternatives with parentheses and OR.",
        )
        .run(command::run_long_help)
}
