//! Administrator handshake for the Fences client.
//!
//! Privileged endpoints want proof that the caller knows a shared secret,
//! but there is no pre-established secure channel. The server solves this
//! by handing out a fresh RSA public key per session:
//!
//! 1. **Key offer**: `GET /key` returns a `sessionID` and the key (`puk`),
//!    serialized as dash-joined signed bytes ([`parse_signed_bytes`]).
//! 2. **Encryption**: the client encrypts the shared [`AdminSecret`] with
//!    RSA PKCS#1 v1.5 ([`TokenMinter`]).
//! 3. **Token**: the ciphertext, comma-joined ([`format_signed_bytes`]),
//!    travels with the session ID on every privileged call.
//!
//! # How it fits in the stack
//!
//! ```text
//! Client facade (above)  ← fetches the key offer, calls mint()
//!     ↕
//! Auth layer (this crate)  ← pure: KeyOffer in, AdminToken out
//!     ↕
//! Protocol layer (below)  ← provides KeyOffer, AdminToken
//! ```
//!
//! Nothing here does I/O, so the whole handshake can be exercised offline.

mod auth;
mod error;
mod secret;
mod wire;

pub use auth::{TokenMinter, decode_public_key};
pub use error::AuthError;
pub use secret::AdminSecret;
pub use wire::{format_signed_bytes, parse_signed_bytes};
