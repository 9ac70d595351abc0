//! `FencesClient`: one method per API operation.
//!
//! Every operation follows the same path:
//!   1. Build a [`Request`] (endpoint + ordered parameters)
//!   2. One GET through the [`Transport`]
//!   3. Anything but 200 → the status of that code, body ignored
//!   4. Decode the 200 body with the endpoint's rule
//!   5. Fold the outcome into an [`ApiResult`]
//!
//! Steps 1–4 are a plain `Result<T, FencesError>` chain; step 5 is the only
//! place an error turns into a status.

use fences_auth::TokenMinter;
use fences_protocol::{
    AdminToken, ApiResult, ApiStatus, Game, GameId, JoinResult, Player, PlayerId,
    ProtocolError, TurnResult, decode_game_detail, decode_game_id, decode_game_list,
    decode_join, decode_key_offer, decode_player, decode_player_id,
    decode_turn,
};
#[cfg(feature = "reqwest")]
use fences_transport::ReqwestTransport;
use fences_transport::{Endpoint, Request, Transport};

use crate::{ClientBuilder, ClientConfig, FencesError};

/// Blocking client for the Fences API.
///
/// Holds the service root, the transport and the token minter, all
/// immutable, so a client shared behind `&` or `Arc` can be used from
/// several threads at once.
///
/// No method returns `Err` or panics on a bad server answer: check
/// [`ApiResult::status`] before trusting the value.
#[derive(Debug)]
pub struct FencesClient<T> {
    root: String,
    transport: T,
    minter: TokenMinter,
}

#[cfg(feature = "reqwest")]
impl FencesClient<ReqwestTransport> {
    /// Creates a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> FencesClient<T> {
    /// Creates a client from a finished configuration and a transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let root = config.service_root();
        tracing::debug!(%root, "fences client created");
        Self {
            root,
            transport,
            minter: TokenMinter::new(config.admin_secret),
        }
    }

    /// The URL every endpoint path is appended to.
    pub fn service_root(&self) -> &str {
        &self.root
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // --- Games ---

    /// Lists the publicly visible games. Malformed entries are dropped.
    pub fn public_games(&self) -> ApiResult<Vec<Game>> {
        self.call(Request::new(Endpoint::PublicGames), decode_game_list)
    }

    /// Fetches one game with its board.
    pub fn game(&self, id: GameId) -> ApiResult<Game> {
        self.call(
            Request::new(Endpoint::GetGame).param("gameID", id.0),
            decode_game_detail,
        )
    }

    /// Creates a game. Only the id of the returned game is known.
    pub fn create_game(&self) -> ApiResult<Game> {
        self.call(Request::new(Endpoint::CreateGame), decode_game_id)
    }

    /// Takes a seat in a specific game.
    pub fn join_game(&self, game: GameId, player: PlayerId) -> ApiResult<JoinResult> {
        self.call(
            Request::new(Endpoint::JoinGame)
                .param("gameID", game.0)
                .param("playerID", player.0),
            decode_join,
        )
    }

    /// Takes a seat in whatever game the server picks.
    pub fn find_game(&self, player: PlayerId) -> ApiResult<JoinResult> {
        self.call(
            Request::new(Endpoint::FindGame).param("playerID", player.0),
            decode_join,
        )
    }

    /// Claims the cell at (`x`, `y`).
    ///
    /// `y` is the row; an edge row shares the `y` of the row above it.
    /// `x` runs from `0` to `2 * width - 2` across a row and its edge row.
    pub fn make_turn(
        &self,
        game: GameId,
        player: PlayerId,
        x: u64,
        y: u64,
    ) -> ApiResult<TurnResult> {
        self.call(
            Request::new(Endpoint::SetField)
                .param("gameID", game.0)
                .param("playerID", player.0)
                .param("x", x)
                .param("y", y),
            decode_turn,
        )
    }

    // --- Players ---

    pub fn player(&self, id: PlayerId) -> ApiResult<Player> {
        self.call(
            Request::new(Endpoint::GetPlayer).param("playerID", id.0),
            decode_player,
        )
    }

    /// Registers a player.
    ///
    /// `name` goes into the query string as-is; it must already be
    /// URL-safe.
    pub fn create_player(&self, name: &str) -> ApiResult<Player> {
        self.call(
            Request::new(Endpoint::CreatePlayer).param("name", name),
            decode_player_id,
        )
    }

    // --- Administration ---

    /// Runs the key handshake and mints a token for the privileged calls.
    ///
    /// Fails with [`ApiStatus::Error`] when the key offer can't be decoded
    /// or the secret can't be encrypted under it. Never retried.
    pub fn create_token(&self) -> ApiResult<AdminToken> {
        let outcome = self
            .exchange(&Request::new(Endpoint::Key))
            .and_then(|body| {
                let offer = decode_key_offer(&body)?;
                Ok(self.minter.mint(&offer)?)
            });
        self.finish(Endpoint::Key, outcome)
    }

    /// Lists every game, public or not.
    pub fn all_games(&self, token: &AdminToken) -> ApiResult<Vec<Game>> {
        self.call(
            privileged(Request::new(Endpoint::AllGames), token),
            decode_game_list,
        )
    }

    pub fn delete_game(&self, token: &AdminToken, id: GameId) -> ApiResult<Game> {
        self.call(
            privileged(Request::new(Endpoint::DeleteGame).param("gameID", id.0), token),
            decode_game_id,
        )
    }

    /// Deletes every game. Success carries no data; the body is ignored.
    pub fn delete_all_games(&self, token: &AdminToken) -> ApiResult<()> {
        self.call(
            privileged(Request::new(Endpoint::DeleteAllGames), token),
            |_| Ok::<(), ProtocolError>(()),
        )
    }

    // --- Pipeline ---

    fn call<U, E>(
        &self,
        request: Request,
        decode: impl FnOnce(&[u8]) -> Result<U, E>,
    ) -> ApiResult<U>
    where
        FencesError: From<E>,
    {
        let outcome = self
            .exchange(&request)
            .and_then(|body| Ok(decode(&body)?));
        self.finish(request.endpoint(), outcome)
    }

    /// One round trip. Returns the body of a 200 and nothing else.
    fn exchange(&self, request: &Request) -> Result<Vec<u8>, FencesError> {
        tracing::debug!(url = %request.redacted_url(&self.root), "GET");

        let response = self.transport.get(&request.url(&self.root))?;
        if response.status != 200 {
            return Err(FencesError::Http {
                code: response.status,
                status: ApiStatus::from_http(response.status),
            });
        }
        Ok(response.body)
    }

    fn finish<U>(
        &self,
        endpoint: Endpoint,
        outcome: Result<U, FencesError>,
    ) -> ApiResult<U> {
        match outcome {
            Ok(value) => ApiResult::ok(value),
            Err(e) => {
                match &e {
                    FencesError::Transport(_) => {
                        tracing::warn!(%endpoint, error = %e, "request failed");
                    }
                    FencesError::Http { code, .. } => {
                        tracing::debug!(%endpoint, code, "non-200 answer");
                    }
                    FencesError::Protocol(_) | FencesError::Auth(_) => {
                        tracing::debug!(%endpoint, error = %e, "response rejected");
                    }
                }
                ApiResult::failed(e.status())
            }
        }
    }
}

/// Attaches the two token parameters every privileged endpoint expects.
fn privileged(request: Request, token: &AdminToken) -> Request {
    debug_assert!(request.endpoint().is_privileged());
    request
        .param("sessionID", token.session_id())
        .param("key", token.token())
}
