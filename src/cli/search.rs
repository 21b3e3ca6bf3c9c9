//! The `search` command.

use std::io::Write as _;

use chrono::DateTime;

use crate::command::{self, Command, Env, FlagSet};
use crate::error::{ChirpError, Result};
use crate::util::{args, json};

use super::App;

pub fn command() -> Command<App> {
    Command::new("search")
        .usage("--query q [options] field-spec...")
        .help(
            "Search for recent tweets matching a query.\n\n\
             Results are fetched in pages and printed as they arrive, one\n\
             tweet per line. Run \"help search-query\" for the query syntax.",
        )
        .set_flags(flags)
        .run(run)
}

fn flags(_env: &Env<'_, App>, fs: &mut FlagSet) {
    fs.string("query", "", "Search query (required)");
    fs.integer("max", 0, "Maximum number of results (0 means no limit)");
    fs.integer("page-size", 100, "Number of results per page");
    fs.string("since-id", "", "Return results newer than this tweet ID");
    fs.string("until-id", "", "Return results older than this tweet ID");
    fs.string("since", "", "Return results at or after this time (RFC 3339)");
    fs.string("until", "", "Return results before this time (RFC 3339)");
}

fn time_flag(env: &Env<'_, App>, name: &str) -> Result<Option<String>> {
    let value = env.flags.string(name);
    if value.is_empty() {
        return Ok(None);
    }
    let when = DateTime::parse_from_rfc3339(&value)
        .map_err(|e| ChirpError::Invalid(format!("invalid --{name} time: {e}")))?;
    Ok(Some(when.to_rfc3339()))
}

/// The lines to print from one page of results. The requested page size
/// never goes below the API minimum, so a page can hold more results than
/// --max allows; the surplus is cut here rather than printed.
fn page_lines(data: &serde_json::Value, max: i64, seen: i64) -> Result<Vec<String>> {
    let mut lines = json::to_lines(data)?;
    if max > 0 {
        let remaining = usize::try_from(max - seen).unwrap_or(0);
        lines.truncate(remaining);
    }
    Ok(lines)
}

fn run(env: &mut Env<'_, App>, raw: &[String]) -> Result<()> {
    let query = env.flags.string("query");
    if query.is_empty() {
        writeln!(env, "Error: a search query must be provided")?;
        return command::fail_with_usage(env);
    }
    let parsed = args::parse_args(raw, "tweet");
    if !parsed.keys.is_empty() {
        writeln!(env, "Error: extra arguments after the query: {}", parsed.keys.join(" "))?;
        return command::fail_with_usage(env);
    }
    let start_time = time_flag(env, "since")?;
    let end_time = time_flag(env, "until")?;
    let max = env.flags.integer("max");
    let page_size = env.flags.integer("page-size").clamp(10, 100);
    let client = env.config.client()?;

    let mut next_token = String::new();
    let mut seen: i64 = 0;
    loop {
        let page = if max > 0 {
            page_size.min(max - seen).max(10)
        } else {
            page_size
        };
        let mut q = vec![
            ("query".to_string(), query.clone()),
            ("max_results".to_string(), page.to_string()),
        ];
        for name in ["since-id", "until-id"] {
            let value = env.flags.string(name);
            if !value.is_empty() {
                q.push((name.replace('-', "_"), value));
            }
        }
        if let Some(t) = &start_time {
            q.push(("start_time".to_string(), t.clone()));
        }
        if let Some(t) = &end_time {
            q.push(("end_time".to_string(), t.clone()));
        }
        q.extend(parsed.query());
        if !next_token.is_empty() {
            q.push(("next_token".to_string(), next_token.clone()));
        }

        let rsp = client.search_recent(&q)?;
        if let Some(data) = rsp.get("data") {
            let lines = page_lines(data, max, seen)?;
            for line in &lines {
                println!("{line}");
            }
            seen += i64::try_from(lines.len()).unwrap_or(i64::MAX);
        }
        next_token = rsp["meta"]["next_token"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        if next_token.is_empty() || (max > 0 && seen >= max) {
            return Ok(());
        }
        tracing::debug!(seen, "fetching next result page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn page_of(n: usize) -> Value {
        Value::Array((0..n).map(|i| json!({ "id": i.to_string() })).collect())
    }

    #[test]
    fn page_output_stops_at_the_result_limit() {
        let lines = page_lines(&page_of(10), 5, 0).unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], r#"{"id":"4"}"#);
    }

    #[test]
    fn limit_accounts_for_results_already_printed() {
        assert_eq!(page_lines(&page_of(10), 12, 10).unwrap().len(), 2);
        assert!(page_lines(&page_of(10), 10, 10).unwrap().is_empty());
    }

    #[test]
    fn no_limit_prints_the_whole_page() {
        assert_eq!(page_lines(&page_of(10), 0, 99).unwrap().len(), 10);
    }
}
