//! Wire model for the Fences API.
//!
//! This crate defines what the client and the Fences server exchange, and
//! how the client judges the outcome of each exchange:
//!
//! - **Status** ([`ApiStatus`], [`ApiResult`]): the closed outcome
//!   taxonomy every operation reports, and the envelope that pairs a
//!   status with an optional value.
//! - **Types** ([`Game`], [`Player`], [`JoinResult`], [`TurnResult`],
//!   [`AdminToken`], etc.): immutable entities built from responses.
//! - **Codec** (`decode_*` functions): one decode rule per endpoint,
//!   turning a JSON body into an entity or a [`ProtocolError`].
//!
//! # Architecture
//!
//! The protocol layer sits between transport (status code + raw body) and
//! the client facade. It knows nothing about URLs or sockets.
//!
//! ```text
//! Transport (code, bytes) → Protocol (ApiStatus, entity) → Client (ApiResult)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

#[cfg(feature = "json")]
mod codec;
mod error;
mod status;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

#[cfg(feature = "json")]
pub use codec::{
    decode_game_detail, decode_game_id, decode_game_list, decode_join,
    decode_key_offer, decode_player, decode_player_id, decode_turn,
};
pub use error::ProtocolError;
pub use status::{ApiResult, ApiStatus};
pub use types::{
    AdminToken, Field, Game, GameId, GameStatus, JoinResult, KeyOffer,
    Player, PlayerId, TurnResult, Version,
};
