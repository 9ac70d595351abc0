//! Decode rules: one function per endpoint, JSON body in, entity out.
//!
//! Two tolerance policies apply:
//!
//! - **Single entities fail whole.** If a required field is missing or has
//!   the wrong type, the function returns an error and no partial entity.
//! - **Collections degrade per item.** A list element that is `null` or
//!   malformed is skipped; an unreadable board cell becomes `None`. The
//!   rest of the response still counts.
//!
//! The server's field names are camel-cased (`gameID`, `currentPlayer`);
//! those strings appear here and nowhere else.

use serde_json::{Map, Value};

use crate::{
    Field, Game, GameId, GameStatus, JoinResult, KeyOffer, Player, PlayerId,
    ProtocolError, TurnResult,
};

// ---------------------------------------------------------------------------
// Public decode rules
// ---------------------------------------------------------------------------

/// Decodes a game list (`/get`, `/get-all`).
///
/// Every element needs `gameID`, `status`, `width`, `height`, `player0` and
/// `player1`; the last four may be `null`. Elements that don't qualify are
/// skipped, not fatal.
///
/// # Errors
/// Fails only when the body isn't JSON or isn't an array.
pub fn decode_game_list(body: &[u8]) -> Result<Vec<Game>, ProtocolError> {
    let items = match parse(body)? {
        Value::Array(items) => items,
        _ => return Err(ProtocolError::UnexpectedShape("array")),
    };

    let total = items.len();
    let games: Vec<Game> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(map) => match game_summary(&Fields(map)) {
                Ok(game) => Some(game),
                Err(e) => {
                    tracing::debug!(index, error = %e, "skipping malformed game");
                    None
                }
            },
            Value::Null => None,
            _ => {
                tracing::debug!(index, "skipping non-object list element");
                None
            }
        })
        .collect();

    if games.len() < total {
        tracing::debug!(total, kept = games.len(), "game list partially decoded");
    }
    Ok(games)
}

/// Decodes a detailed game (`/game/get`), board included.
pub fn decode_game_detail(body: &[u8]) -> Result<Game, ProtocolError> {
    let map = object(body)?;
    let fields = Fields(&map);

    let mut game = game_summary_lenient(&fields)?;
    game.active_player = Some(fields.int("currentPlayer")? == 1);
    game.content = Some(decode_board(&fields.string("content")?));
    Ok(game)
}

/// Decodes `{gameID}` (`/game/create`, `/game/delete`).
pub fn decode_game_id(body: &[u8]) -> Result<Game, ProtocolError> {
    let map = object(body)?;
    Ok(Game::new(GameId(Fields(&map).int("gameID")?)))
}

/// Decodes `{playerID, name}` (`/player/get`).
pub fn decode_player(body: &[u8]) -> Result<Player, ProtocolError> {
    let map = object(body)?;
    let fields = Fields(&map);
    let id = PlayerId(fields.int("playerID")?);
    Ok(Player::with_name(id, fields.optional_string("name")?))
}

/// Decodes `{playerID}` (`/player/create`).
pub fn decode_player_id(body: &[u8]) -> Result<Player, ProtocolError> {
    let map = object(body)?;
    Ok(Player::new(PlayerId(Fields(&map).int("playerID")?)))
}

/// Decodes `{gameID, playerID, player}` (`/game/join`, `/game/find`).
///
/// `player` is the seat number; `1` means the second seat.
pub fn decode_join(body: &[u8]) -> Result<JoinResult, ProtocolError> {
    let map = object(body)?;
    let fields = Fields(&map);
    Ok(JoinResult::new(
        GameId(fields.int("gameID")?),
        PlayerId(fields.int("playerID")?),
        fields.int("player")? == 1,
    ))
}

/// Decodes `{gameID, winner?}` (`/game/set-field`).
pub fn decode_turn(body: &[u8]) -> Result<TurnResult, ProtocolError> {
    let map = object(body)?;
    let fields = Fields(&map);
    Ok(TurnResult::new(
        GameId(fields.int("gameID")?),
        fields.optional_bool("winner")?,
    ))
}

/// Decodes `{sessionID, puk}` (`/key`).
///
/// The key stays in its wire form; parsing it is the handshake's job.
pub fn decode_key_offer(body: &[u8]) -> Result<KeyOffer, ProtocolError> {
    let map = object(body)?;
    let fields = Fields(&map);
    Ok(KeyOffer::new(fields.string("sessionID")?, fields.string("puk")?))
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn parse(body: &[u8]) -> Result<Value, ProtocolError> {
    serde_json::from_slice(body).map_err(ProtocolError::Decode)
}

fn object(body: &[u8]) -> Result<Map<String, Value>, ProtocolError> {
    match parse(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(ProtocolError::UnexpectedShape("object")),
    }
}

/// The list-entry shape: all six keys present, four of them nullable.
fn game_summary(fields: &Fields<'_>) -> Result<Game, ProtocolError> {
    Ok(Game {
        width: fields.nullable_int("width")?,
        height: fields.nullable_int("height")?,
        player0: fields.nullable_int("player0")?.map(PlayerId),
        player1: fields.nullable_int("player1")?.map(PlayerId),
        ..game_head(fields)?
    })
}

/// The detail shape tolerates missing size and seat keys.
fn game_summary_lenient(fields: &Fields<'_>) -> Result<Game, ProtocolError> {
    Ok(Game {
        width: fields.optional_int("width")?,
        height: fields.optional_int("height")?,
        player0: fields.optional_int("player0")?.map(PlayerId),
        player1: fields.optional_int("player1")?.map(PlayerId),
        ..game_head(fields)?
    })
}

/// `gameID` and `status`, both required. An unknown status code is `None`.
fn game_head(fields: &Fields<'_>) -> Result<Game, ProtocolError> {
    let id = GameId(fields.int("gameID")?);
    let status = GameStatus::from_code(fields.int("status")?);
    Ok(Game {
        status,
        ..Game::new(id)
    })
}

/// One cell per character; anything outside `0..=2` is an unknown cell.
fn decode_board(content: &str) -> Vec<Option<Field>> {
    content.chars().map(Field::from_char).collect()
}

/// Typed access to the keys of one JSON object.
struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn missing(field: &'static str) -> ProtocolError {
        ProtocolError::InvalidField {
            field,
            reason: "missing",
        }
    }

    fn mistyped(field: &'static str, reason: &'static str) -> ProtocolError {
        ProtocolError::InvalidField { field, reason }
    }

    /// Required, non-null integer.
    fn int(&self, field: &'static str) -> Result<i64, ProtocolError> {
        self.nullable_int(field)?
            .ok_or_else(|| Self::mistyped(field, "must not be null"))
    }

    /// Required key whose value may be `null`.
    fn nullable_int(
        &self,
        field: &'static str,
    ) -> Result<Option<i64>, ProtocolError> {
        match self.0.get(field) {
            None => Err(Self::missing(field)),
            Some(value) => as_optional_int(field, value),
        }
    }

    /// Key that may be missing or `null`.
    fn optional_int(
        &self,
        field: &'static str,
    ) -> Result<Option<i64>, ProtocolError> {
        match self.0.get(field) {
            None => Ok(None),
            Some(value) => as_optional_int(field, value),
        }
    }

    fn string(&self, field: &'static str) -> Result<String, ProtocolError> {
        self.optional_string(field)?.ok_or_else(|| Self::missing(field))
    }

    fn optional_string(
        &self,
        field: &'static str,
    ) -> Result<Option<String>, ProtocolError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Self::mistyped(field, "expected a string")),
        }
    }

    fn optional_bool(
        &self,
        field: &'static str,
    ) -> Result<Option<bool>, ProtocolError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(Self::mistyped(field, "expected a boolean")),
        }
    }
}

fn as_optional_int(
    field: &'static str,
    value: &Value,
) -> Result<Option<i64>, ProtocolError> {
    match value {
        Value::Null => Ok(None),
        other => other.as_i64().map(Some).ok_or(ProtocolError::InvalidField {
            field,
            reason: "expected an integer",
        }),
    }
}

// =========================================================================
// Tests
// =========================================================================
