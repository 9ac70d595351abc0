//! Endpoint paths and request URL assembly.
//!
//! A URL is plain string concatenation: service root, endpoint path, then
//! `?` and `&`-joined `key=value` pairs in the order they were added.
//! The server reads parameters by name, so the order only matters to a
//! human reading logs.
//!
//! Values are inserted verbatim, **without** percent-encoding. IDs and
//! handshake output are always URL-safe; free text such as a player name
//! must be URL-safe already.

use std::fmt;

/// Every path the Fences API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/get`: publicly visible games.
    PublicGames,
    /// `/get-all`: every game (admin).
    AllGames,
    /// `/game/get`
    GetGame,
    /// `/game/create`
    CreateGame,
    /// `/game/join`
    JoinGame,
    /// `/game/find`: join any open game.
    FindGame,
    /// `/game/set-field`: play a turn.
    SetField,
    /// `/game/delete` (admin)
    DeleteGame,
    /// `/delete-all` (admin)
    DeleteAllGames,
    /// `/player/get`
    GetPlayer,
    /// `/player/create`
    CreatePlayer,
    /// `/key`: start the admin handshake.
    Key,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::PublicGames => "/get",
            Self::AllGames => "/get-all",
            Self::GetGame => "/game/get",
            Self::CreateGame => "/game/create",
            Self::JoinGame => "/game/join",
            Self::FindGame => "/game/find",
            Self::SetField => "/game/set-field",
            Self::DeleteGame => "/game/delete",
            Self::DeleteAllGames => "/delete-all",
            Self::GetPlayer => "/player/get",
            Self::CreatePlayer => "/player/create",
            Self::Key => "/key",
        }
    }

    /// Whether the endpoint needs an admin token.
    pub fn is_privileged(self) -> bool {
        matches!(
            self,
            Self::AllGames | Self::DeleteGame | Self::DeleteAllGames
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One request: an endpoint plus its ordered query parameters.
///
/// ```rust
/// use fences_transport::{Endpoint, Request};
///
/// let request = Request::new(Endpoint::JoinGame)
///     .param("gameID", 4)
///     .param("playerID", 9);
///
/// assert_eq!(
///     request.url("http://localhost:8080/fences"),
///     "http://localhost:8080/fences/game/join?gameID=4&playerID=9",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    endpoint: Endpoint,
    params: Vec<(&'static str, String)>,
}

impl Request {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    /// Appends `key=value`. The value is formatted with `Display` and not
    /// escaped.
    pub fn param(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The query string without the leading `?`; empty if there are no
    /// parameters.
    pub fn query(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Builds the full URL under `root`.
    ///
    /// `root` is used as given; a trailing slash would produce a double
    /// slash, so callers normalise it once up front.
    pub fn url(&self, root: &str) -> String {
        let mut url = format!("{root}{}", self.endpoint.path());
        if !self.params.is_empty() {
            url.push('?');
            url.push_str(&self.query());
        }
        url
    }

    /// Like [`url`](Self::url), but for logging: on privileged endpoints
    /// the token ciphertext (`key`) is replaced.
    pub fn redacted_url(&self, root: &str) -> String {
        if !self.endpoint.is_privileged() {
            return self.url(root);
        }
        let redacted = Self {
            endpoint: self.endpoint,
            params: self
                .params
                .iter()
                .map(|(key, value)| {
                    if *key == "key" {
                        (*key, "<redacted>".to_string())
                    } else {
                        (*key, value.clone())
                    }
                })
                .collect(),
        };
        redacted.url(root)
    }
}
