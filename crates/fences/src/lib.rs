//! # Fences
//!
//! Blocking client for the Fences board game API.
//!
//! Every operation is one HTTP GET and comes back as an
//! [`ApiResult`](fences_protocol::ApiResult): a status from a closed set
//! plus a value that is present only when the status is `ok`. Operations
//! never return `Err` and never panic on a bad answer; transport failures,
//! non-200 codes and undecodable bodies all become statuses.
//!
//! Privileged operations need an [`AdminToken`](fences_protocol::AdminToken),
//! minted by [`FencesClient::create_token`] through an RSA handshake with
//! the server.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fences::prelude::*;
//!
//! let client = FencesClient::builder().host("192.168.0.20").build()?;
//!
//! let game = client.create_game();
//! let player = client.create_player("alice");
//! if let (Some(game), Some(player)) = (game.value(), player.value()) {
//!     let joined = client.join_game(game.id(), player.id());
//!     println!("{joined}");
//! }
//!
//! let token = client.create_token();
//! if let Some(token) = token.value() {
//!     let games = client.all_games(token).into_value().unwrap_or_default();
//!     println!("{} games on the server", games.len());
//! }
//! # Ok::<(), fences::FencesError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `reqwest` (default): the blocking HTTP transport and
//!   [`ClientBuilder::build`]

mod client;
mod config;
mod error;

pub use client::FencesClient;
pub use config::{ClientBuilder, ClientConfig};
pub use error::FencesError;

pub use fences_auth as auth;
pub use fences_protocol as protocol;
pub use fences_transport as transport;

/// Everything a typical caller needs in one import.
pub mod prelude {
    pub use crate::{ClientBuilder, ClientConfig, FencesClient, FencesError};

    pub use fences_auth::AdminSecret;
    pub use fences_protocol::{
        AdminToken, ApiResult, ApiStatus, Field, Game, GameId, GameStatus,
        JoinResult, Player, PlayerId, TurnResult, Version,
    };
    pub use fences_transport::{HttpResponse, Transport, TransportError};
    #[cfg(feature = "reqwest")]
    pub use fences_transport::ReqwestTransport;
}
