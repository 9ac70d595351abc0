//! Signed-byte text encodings used by the handshake.
//!
//! The server's side of the handshake runs on a platform whose bytes are
//! signed, so byte strings travel as decimal numbers in `-128..=127`:
//!
//! | Direction | Separator | Example for `[12, 0xFD, 45]` |
//! |---|---|---|
//! | public key, server → client | `-` | `12--3-45` |
//! | ciphertext, client → server | `,` | `12,-3,45` |
//!
//! With `-` as the separator, a negative number shows up as an empty token
//! followed by its magnitude.

use crate::AuthError;

/// Parses a dash-joined list of signed bytes.
///
/// Each number is read as a 16-bit integer and truncated to its low eight
/// bits, so out-of-range values like `200` wrap (to `-56`) rather than fail.
///
/// # Errors
/// [`AuthError::MalformedKey`] for an empty string, a non-numeric token,
/// a number outside 16 bits, a doubled sign, or a trailing sign.
pub fn parse_signed_bytes(encoded: &str) -> Result<Vec<u8>, AuthError> {
    if encoded.is_empty() {
        return Err(AuthError::MalformedKey("empty key".into()));
    }

    let mut bytes = Vec::with_capacity(encoded.len() / 3);
    let mut negative = false;

    for (position, token) in encoded.split('-').enumerate() {
        if token.is_empty() {
            // An empty token is the sign of the next number.
            if negative {
                return Err(AuthError::MalformedKey(format!(
                    "doubled sign at token {position}"
                )));
            }
            negative = true;
            continue;
        }

        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::MalformedKey(format!(
                "non-numeric token {token:?} at {position}"
            )));
        }
        let magnitude: i16 = token.parse().map_err(|_| {
            AuthError::MalformedKey(format!(
                "token {token:?} at {position} out of range"
            ))
        })?;

        let value = if negative { -magnitude } else { magnitude };
        // Truncation to the low byte is intentional.
        bytes.push(value as u8);
        negative = false;
    }

    if negative {
        return Err(AuthError::MalformedKey("trailing sign".into()));
    }
    Ok(bytes)
}

/// Formats bytes as signed decimals joined by `separator`.
///
/// The ciphertext uses `','`; `'-'` reproduces the key offer format.
pub fn format_signed_bytes(bytes: &[u8], separator: char) -> String {
    let mut out = String::with_capacity(bytes.len() * 4);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(&(*byte as i8).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_signs() {
        assert_eq!(parse_signed_bytes("12--3-45").unwrap(), vec![12, 0xFD, 45]);
    }

    #[test]
    fn test_parse_leading_negative() {
        assert_eq!(parse_signed_bytes("-128-127").unwrap(), vec![0x80, 0x7F]);
    }

    #[test]
    fn test_parse_single_value() {
        assert_eq!(parse_signed_bytes("0").unwrap(), vec![0]);
        assert_eq!(parse_signed_bytes("-1").unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_parse_der_prefix() {
        // 0x30 0x82: the start of every SubjectPublicKeyInfo of this size.
        assert_eq!(parse_signed_bytes("48--126").unwrap(), vec![0x30, 0x82]);
    }

    #[test]
    fn test_parse_wraps_out_of_byte_range() {
        assert_eq!(parse_signed_bytes("200").unwrap(), vec![200]);
        assert_eq!(parse_signed_bytes("256").unwrap(), vec![0]);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "-", "1-", "1---2", "1-a-2", "1-+2", "1-99999", "1 -2"] {
            let err = parse_signed_bytes(input).unwrap_err();
            assert!(matches!(err, AuthError::MalformedKey(_)), "{input:?}");
        }
    }

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_signed_bytes(&[12, 0xFD, 45], ','), "12,-3,45");
        assert_eq!(format_signed_bytes(&[0x80], ','), "-128");
        assert_eq!(format_signed_bytes(&[], ','), "");
    }

    #[test]
    fn test_dash_format_parses_back() {
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = format_signed_bytes(&bytes, '-');
        assert_eq!(parse_signed_bytes(&encoded).unwrap(), bytes);
    }
}
