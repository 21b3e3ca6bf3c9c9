//! Field-spec and expansion sugar shared by the leaf commands.
//!
//! Arguments to most commands mix plain keys (IDs, usernames, queries) with
//! field specifiers of the form `type:field` (where `:field` alone defaults
//! to the command's domain type) and expansions of the form `@name`.

use std::collections::BTreeMap;

/// The result of a call to [`parse_args`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// All arguments that are not field specs or expansions, in the order
    /// given.
    pub keys: Vec<String>,
    expansions: Vec<String>,
    fields: BTreeMap<String, Vec<String>>,
}

/// Decodes an argument list of keys mixed with field specifiers and
/// expansions. If `dtype` is non-empty, a spec of the form `:field` is
/// treated as `dtype:field`.
#[must_use]
pub fn parse_args(args: &[String], dtype: &str) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();
    for arg in args {
        if let Some(expansion) = arg.strip_prefix('@') {
            parsed
                .expansions
                .push(expansion_shortcut(expansion).to_string());
            continue;
        }
        match arg.split_once(':') {
            None => parsed.keys.push(arg.clone()),
            Some((dtype_spec, field)) => {
                let dtype_spec = match dtype_spec {
                    "" => dtype,
                    "m" => "media",
                    "u" => "user",
                    "t" => "tweet",
                    "l" => "place",
                    other => other,
                };
                parsed
                    .fields
                    .entry(dtype_spec.to_string())
                    .or_default()
                    .push(field.to_string());
            }
        }
    }
    parsed
}

impl ParsedArgs {
    /// Renders the parsed fields and expansions as API query parameters, in
    /// a deterministic order.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if !self.expansions.is_empty() {
            query.push(("expansions".to_string(), self.expansions.join(",")));
        }
        for (dtype, fields) in &self.fields {
            query.push((format!("{dtype}.fields"), fields.join(",")));
        }
        query
    }
}

/// Maps expansion shortcuts to their full names; anything unrecognized
/// passes through unchanged.
fn expansion_shortcut(name: &str) -> &str {
    match name {
        "tweets" | "ref_tweets" => "referenced_tweets.id",
        "reply_to_user" => "in_reply_to_user_id",
        "media_keys" => "attachments.media_keys",
        "poll_ids" => "attachments.poll_ids",
        "place_id" => "geo.place_id",
        "mentions" => "entities.mentions.username",
        "ref_author" => "referenced_tweets.id.author_id",
        "pinned_tweet" => "pinned_tweet_id",
        other => other,
    }
}
