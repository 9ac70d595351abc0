//! Turning a key offer into an admin token.
//!
//! The cipher is plain single-block RSA with PKCS#1 v1.5 padding. The
//! padding is random, so minting twice against the same key gives two
//! different tokens, both of which decrypt to the same secret.

use fences_protocol::{AdminToken, KeyOffer};
use rsa::pkcs8::DecodePublicKey;
use rsa::rand_core::CryptoRngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

use crate::{AdminSecret, AuthError, format_signed_bytes, parse_signed_bytes};

/// Decodes the `puk` string of a key offer into an RSA public key.
///
/// The bytes are a DER-encoded X.509 `SubjectPublicKeyInfo`.
///
/// # Errors
/// [`AuthError::MalformedKey`] if the text encoding is broken,
/// [`AuthError::InvalidKey`] if the bytes aren't an RSA public key.
pub fn decode_public_key(puk: &str) -> Result<RsaPublicKey, AuthError> {
    let der = parse_signed_bytes(puk)?;
    RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| AuthError::InvalidKey(e.to_string()))
}

/// Mints [`AdminToken`]s from key offers.
///
/// Holds nothing but the secret, so one minter can be shared freely.
///
/// ## Example
///
/// ```rust,no_run
/// use fences_auth::{AdminSecret, TokenMinter};
/// use fences_protocol::KeyOffer;
///
/// let minter = TokenMinter::new(AdminSecret::default());
/// let offer = KeyOffer::new("session-1", "48--126-1-34-48-13");
/// let token = minter.mint(&offer)?;
/// println!("{token}");
/// # Ok::<(), fences_auth::AuthError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenMinter {
    secret: AdminSecret,
}

impl TokenMinter {
    pub fn new(secret: AdminSecret) -> Self {
        Self { secret }
    }

    /// Mints a token using the thread-local, OS-seeded RNG for padding.
    pub fn mint(&self, offer: &KeyOffer) -> Result<AdminToken, AuthError> {
        self.mint_with_rng(offer, &mut rand::thread_rng())
    }

    /// Mints a token with a caller-supplied RNG.
    ///
    /// # Errors
    /// Any failure decoding the key or encrypting the secret. Nothing is
    /// retried.
    pub fn mint_with_rng<R: CryptoRngCore>(
        &self,
        offer: &KeyOffer,
        rng: &mut R,
    ) -> Result<AdminToken, AuthError> {
        let key = decode_public_key(offer.public_key())?;
        let ciphertext = self.encrypt(&key, rng)?;

        tracing::debug!(
            session_id = offer.session_id(),
            modulus_bytes = key.size(),
            "admin token minted"
        );

        Ok(AdminToken::new(
            offer.session_id(),
            format_signed_bytes(&ciphertext, ','),
        ))
    }

    /// Encrypts the secret under `key`. The ciphertext is exactly as long
    /// as the key's modulus.
    pub fn encrypt<R: CryptoRngCore>(
        &self,
        key: &RsaPublicKey,
        rng: &mut R,
    ) -> Result<Vec<u8>, AuthError> {
        key.encrypt(rng, Pkcs1v15Encrypt, self.secret.as_bytes())
            .map_err(|e| AuthError::Encryption(e.to_string()))
    }
}
