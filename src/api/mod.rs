//! Minimal client for the Twitter v2 API.
//!
//! JSON in, JSON out: responses are passed through as `serde_json::Value`
//! and printed by the commands, not modeled as typed structs. Calls are
//! blocking; one invocation runs exactly one command to completion.

use std::io::{BufRead, BufReader};
use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde_json::{Value, json};

use crate::error::{ChirpError, Result};

const BASE_URL: &str = "https://api.twitter.com/2";

/// Which timeline of a user to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    /// Tweets authored by the user.
    User,
    /// Tweets mentioning the user.
    Mentions,
    /// The user's reverse-chronological home timeline.
    Home,
}

/// An authenticated API client.
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    token: String,
    base: String,
}

impl Client {
    /// Builds a client around a bearer token. No overall request timeout is
    /// set; streaming calls stay open until the caller stops reading.
    pub fn new(token: String) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("chirp/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None)
            .build()?;
        Ok(Self {
            http,
            token,
            base: BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL. Used by tests.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    fn send(&self, req: RequestBuilder) -> Result<Value> {
        let rsp = req.bearer_auth(&self.token).send()?;
        Self::decode(rsp)
    }

    fn decode(rsp: Response) -> Result<Value> {
        let status = rsp.status();
        let body = rsp.text()?;
        tracing::trace!(%status, body = %body, "api response");
        if !status.is_success() {
            return Err(ChirpError::Api {
                status: status.as_u16(),
                body,
            });
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Issues a GET request against an API path with query parameters.
    pub fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url).query(query))
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        self.send(self.http.post(url).json(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        self.send(self.http.put(url).json(body))
    }

    fn delete(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        self.send(self.http.delete(url))
    }

    // ----- tweets ---------------------------------------------------------

    pub fn lookup_tweets(&self, ids: &[String], extra: &[(String, String)]) -> Result<Value> {
        let mut query = vec![("ids".to_string(), ids.join(","))];
        query.extend_from_slice(extra);
        self.get("tweets", &query)
    }

    pub fn search_recent(&self, query: &[(String, String)]) -> Result<Value> {
        self.get("tweets/search/recent", query)
    }

    pub fn create_tweet(&self, text: &str, reply_to: &str) -> Result<Value> {
        let mut body = json!({ "text": text });
        if !reply_to.is_empty() {
            body["reply"] = json!({ "in_reply_to_tweet_id": reply_to });
        }
        self.post("tweets", &body)
    }

    pub fn delete_tweet(&self, id: &str) -> Result<Value> {
        self.delete(&format!("tweets/{id}"))
    }

    pub fn like(&self, user_id: &str, tweet_id: &str) -> Result<Value> {
        self.post(
            &format!("users/{user_id}/likes"),
            &json!({ "tweet_id": tweet_id }),
        )
    }

    pub fn unlike(&self, user_id: &str, tweet_id: &str) -> Result<Value> {
        self.delete(&format!("users/{user_id}/likes/{tweet_id}"))
    }

    pub fn timeline(
        &self,
        kind: Timeline,
        user_id: &str,
        query: &[(String, String)],
    ) -> Result<Value> {
        let path = match kind {
            Timeline::User => format!("users/{user_id}/tweets"),
            Timeline::Mentions => format!("users/{user_id}/mentions"),
            Timeline::Home => format!("users/{user_id}/timelines/reverse_chronological"),
        };
        self.get(&path, query)
    }

    // ----- users ----------------------------------------------------------

    pub fn lookup_users(&self, ids: &[String], extra: &[(String, String)]) -> Result<Value> {
        let mut query = vec![("ids".to_string(), ids.join(","))];
        query.extend_from_slice(extra);
        self.get("users", &query)
    }

    pub fn lookup_usernames(&self, names: &[String], extra: &[(String, String)]) -> Result<Value> {
        let mut query = vec![("usernames".to_string(), names.join(","))];
        query.extend_from_slice(extra);
        self.get("users/by", &query)
    }

    /// The ID of the authenticated user.
    pub fn me(&self) -> Result<String> {
        let rsp = self.get("users/me", &[])?;
        rsp["data"]["id"].as_str().map(ToString::to_string).ok_or_else(|| {
            ChirpError::Auth("could not resolve the authenticated user".into())
        })
    }

    /// Resolves a user specification to an ID: `@name` and other
    /// non-numeric specs go through the username lookup endpoint, numeric
    /// IDs pass through unchanged.
    pub fn resolve_user(&self, spec: &str) -> Result<String> {
        let name = spec.strip_prefix('@').unwrap_or(spec);
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(name.to_string());
        }
        let rsp = self.lookup_usernames(&[name.to_string()], &[])?;
        rsp["data"][0]["id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| ChirpError::Invalid(format!("no such user: {spec:?}")))
    }

    pub fn followers(&self, user_id: &str, query: &[(String, String)]) -> Result<Value> {
        self.get(&format!("users/{user_id}/followers"), query)
    }

    pub fn following(&self, user_id: &str, query: &[(String, String)]) -> Result<Value> {
        self.get(&format!("users/{user_id}/following"), query)
    }

    // ----- lists ----------------------------------------------------------

    pub fn list_members(&self, list_id: &str, query: &[(String, String)]) -> Result<Value> {
        self.get(&format!("lists/{list_id}/members"), query)
    }

    pub fn list_followers(&self, list_id: &str, query: &[(String, String)]) -> Result<Value> {
        self.get(&format!("lists/{list_id}/followers"), query)
    }

    pub fn create_list(&self, name: &str, description: &str, private: bool) -> Result<Value> {
        self.post(
            "lists",
            &json!({ "name": name, "description": description, "private": private }),
        )
    }

    pub fn update_list(&self, list_id: &str, fields: &Value) -> Result<Value> {
        self.put(&format!("lists/{list_id}"), fields)
    }

    pub fn delete_list(&self, list_id: &str) -> Result<Value> {
        self.delete(&format!("lists/{list_id}"))
    }

    // ----- streaming ------------------------------------------------------

    pub fn rules(&self, ids: &[String]) -> Result<Value> {
        let mut query = Vec::new();
        if !ids.is_empty() {
            query.push(("ids".to_string(), ids.join(",")));
        }
        self.get("tweets/search/stream/rules", &query)
    }

    pub fn update_rules(&self, body: &Value) -> Result<Value> {
        self.post("tweets/search/stream/rules", body)
    }

    /// Opens the filtered stream and hands each decoded line to `handle`
    /// until it returns false, the stream ends, or an error occurs.
    pub fn stream(
        &self,
        query: &[(String, String)],
        mut handle: impl FnMut(Value) -> Result<bool>,
    ) -> Result<()> {
        let url = self.url("tweets/search/stream");
        tracing::debug!(%url, "GET (stream)");
        let rsp = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&self.token)
            .send()?;
        let status = rsp.status();
        if !status.is_success() {
            return Err(ChirpError::Api {
                status: status.as_u16(),
                body: rsp.text()?,
            });
        }
        for line in BufReader::new(rsp).lines() {
            let line = line?;
            // Keep-alive newlines arrive periodically.
            if line.trim().is_empty() {
                continue;
            }
            if !handle(serde_json::from_str(&line)?)? {
                break;
            }
        }
        Ok(())
    }
}
