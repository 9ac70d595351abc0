//! Entity types built from Fences API responses.
//!
//! Every type here is an immutable value: the fields are private, the
//! getters hand out copies or borrows, and nothing is updated after
//! decoding. A `Game` fetched a second time is a second, independent value.
//!
//! Fields the server did not send are `Option`s. "Absent" is never encoded
//! as a sentinel number like `0` or `-1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a game.
///
/// Newtype over `i64` so a `GameId` can't be passed where a `PlayerId` is
/// expected. `#[serde(transparent)]` keeps it a plain JSON number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// A unique identifier for a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Lifecycle phase of a game.
///
/// ```text
/// Waiting ──(second player joins)──→ Running ──(someone wins)──→ Finished
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Waiting for players; anyone may join.
    Waiting,
    /// Both seats are taken and turns are being played.
    Running,
    /// Game over; no further actions are possible.
    Finished,
}

impl GameStatus {
    /// Maps the server's numeric code. Unknown codes are `None`, not an
    /// error: a newer server may add phases this client doesn't know.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Waiting),
            2 => Some(Self::Running),
            3 => Some(Self::Finished),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Waiting => 1,
            Self::Running => 2,
            Self::Finished => 3,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Running => write!(f, "running"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The occupancy of one board cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Unoccupied; a turn may be played here.
    Empty,
    /// Claimed by the first seat.
    Player0,
    /// Claimed by the second seat.
    Player1,
}

impl Field {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Player0),
            2 => Some(Self::Player1),
            _ => None,
        }
    }

    /// Maps one character of the board string. Anything other than
    /// `'0'`, `'1'` or `'2'` is `None`.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(Self::from_code)
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Player0 => 1,
            Self::Player1 => 2,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// A single game between two players.
///
/// How much of it is known depends on where it came from:
///
/// | Source | Known fields |
/// |---|---|
/// | create / delete / join / turn | `id` only |
/// | game lists | `id`, `status`, size, seats |
/// | detailed fetch | everything, including the board |
///
/// ## Board layout
///
/// `content` is row-major, starting top-left. Each logical row `y` holds
/// `2 * width - 1` cells: the big row followed by its edge row, which
/// shares the same `y`. [`Game::field_at`] does the index arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) status: Option<GameStatus>,
    pub(crate) width: Option<i64>,
    pub(crate) height: Option<i64>,
    pub(crate) player0: Option<PlayerId>,
    pub(crate) player1: Option<PlayerId>,
    pub(crate) active_player: Option<bool>,
    pub(crate) content: Option<Vec<Option<Field>>>,
}

impl Game {
    /// A game known only by its ID.
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            status: None,
            width: None,
            height: None,
            player0: None,
            player1: None,
            active_player: None,
            content: None,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn status(&self) -> Option<GameStatus> {
        self.status
    }

    /// Board width, usually 5.
    pub fn width(&self) -> Option<i64> {
        self.width
    }

    /// Board height, usually 5.
    pub fn height(&self) -> Option<i64> {
        self.height
    }

    /// The first seat, if taken.
    pub fn player0(&self) -> Option<PlayerId> {
        self.player0
    }

    /// The second seat, if taken.
    pub fn player1(&self) -> Option<PlayerId> {
        self.player1
    }

    /// Whose turn it is: `true` for the second seat, `false` for the first.
    pub fn active_player(&self) -> Option<bool> {
        self.active_player
    }

    /// The board, one entry per cell. A cell the server sent with an
    /// unknown code is `None`.
    pub fn content(&self) -> Option<&[Option<Field>]> {
        self.content.as_deref()
    }

    /// Looks up the cell at board coordinates `(x, y)`.
    ///
    /// `y` is the logical row; `x` runs from `0` to `2 * width - 2`
    /// across the big row and its edge row. Returns `None` when the width
    /// or board is unknown, the width isn't positive, the coordinates are
    /// off the board, or the cell itself is unknown.
    pub fn field_at(&self, x: u64, y: u64) -> Option<Field> {
        let width = u64::try_from(self.width?).ok()?;
        let row_len = width.checked_mul(2)?.checked_sub(1)?;
        if x >= row_len {
            return None;
        }
        let index = y.checked_mul(row_len)?.checked_add(x)?;
        let index = usize::try_from(index).ok()?;
        self.content.as_ref()?.get(index).copied().flatten()
    }

    /// The board re-serialized as a digit string, `?` for unknown cells.
    pub fn content_string(&self) -> Option<String> {
        let content = self.content.as_ref()?;
        Some(
            content
                .iter()
                .map(|cell| match cell {
                    Some(field) => char::from(b'0' + field.code() as u8),
                    None => '?',
                })
                .collect(),
        )
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game {{ gameID={}", self.id.0)?;
        if let Some(status) = self.status {
            write!(f, ", status={status}")?;
        }
        if let Some(width) = self.width {
            write!(f, ", width={width}")?;
        }
        if let Some(height) = self.height {
            write!(f, ", height={height}")?;
        }
        if let Some(player0) = self.player0 {
            write!(f, ", player0={}", player0.0)?;
        }
        if let Some(player1) = self.player1 {
            write!(f, ", player1={}", player1.0)?;
        }
        if let Some(active) = self.active_player {
            write!(f, ", activePlayer={active}")?;
        }
        if let Some(content) = self.content_string() {
            write!(f, ", content=[{content}]")?;
        }
        write!(f, " }}")
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player identity.
///
/// The name is a description, not an identifier: the server doesn't
/// promise it is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: Option<String>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    pub(crate) fn with_name(id: PlayerId, name: Option<String>) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {{ playerID={}", self.id.0)?;
        if let Some(name) = &self.name {
            write!(f, ", name=\"{name}\"")?;
        }
        write!(f, " }}")
    }
}

// ---------------------------------------------------------------------------
// JoinResult / TurnResult
// ---------------------------------------------------------------------------

/// What the server reports after a player joins (or is matched into) a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinResult {
    game: Game,
    player: Player,
    role: bool,
}

impl JoinResult {
    pub fn new(game_id: GameId, player_id: PlayerId, role: bool) -> Self {
        Self {
            game: Game::new(game_id),
            player: Player::new(player_id),
            role,
        }
    }

    /// The joined game (ID only).
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The joining player (ID only).
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The seat taken: `true` for the second seat, `false` for the first.
    pub fn role(&self) -> bool {
        self.role
    }
}

impl fmt::Display for JoinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JoinResult {{ gameID={}, playerID={}, role={} }}",
            self.game.id.0, self.player.id.0, self.role
        )
    }
}

/// What the server reports after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    game: Game,
    winner: Option<bool>,
}

impl TurnResult {
    pub fn new(game_id: GameId, winner: Option<bool>) -> Self {
        Self {
            game: Game::new(game_id),
            winner,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// `Some(true)` if the second seat won with this turn, `Some(false)` if
    /// the first seat did, `None` while the game goes on.
    pub fn winner(&self) -> Option<bool> {
        self.winner
    }
}

impl fmt::Display for TurnResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TurnResult {{ gameID={}", self.game.id.0)?;
        if let Some(winner) = self.winner {
            write!(f, ", winner={}", u8::from(winner))?;
        }
        write!(f, " }}")
    }
}

// ---------------------------------------------------------------------------
// Admin handshake types
// ---------------------------------------------------------------------------

/// The server's answer to a key request: a session plus the public key to
/// encrypt the shared secret with, still in its dash-joined wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOffer {
    session_id: String,
    public_key: String,
}

impl KeyOffer {
    pub fn new(
        session_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            public_key: public_key.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The `puk` string exactly as the server sent it.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

/// A credential for privileged endpoints.
///
/// Sent as the `sessionID` and `key` query parameters. The client holds no
/// expiry information; whether a token is still valid is for the server to
/// decide.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken {
    session_id: String,
    token: String,
}

impl AdminToken {
    pub fn new(session_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            token: token.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The serialized ciphertext (comma-joined signed bytes).
    pub fn token(&self) -> &str {
        &self.token
    }
}

// Hand-written so the ciphertext never ends up in logs.
impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminToken")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdminToken {}", self.session_id)
    }
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// A Fences server version: `major.minor.fix`.
///
/// Ordering compares major, then minor, then fix, which is exactly the
/// derived `Ord` for this field order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub fix: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, fix: u32) -> Self {
        Self { major, minor, fix }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.fix)
    }
}

impl FromStr for Version {
    type Err = ProtocolError;

    /// Parses `v1.2.3` or `1.2.3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = ProtocolError::InvalidField {
            field: "version",
            reason: "expected major.minor.fix",
        };
        let s = s.strip_prefix('v').unwrap_or(s);
        let mut parts = s.split('.').map(str::parse::<u32>);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(fix)), None) => {
                Ok(Self::new(major, minor, fix))
            }
            _ => Err(invalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&GameId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&PlayerId(42)).unwrap(), "42");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(GameId(7).to_string(), "G-7");
        assert_eq!(PlayerId(3).to_string(), "P-3");
    }

    // =====================================================================
    // Numeric codes
    // =====================================================================

    #[test]
    fn test_game_status_codes() {
        assert_eq!(GameStatus::from_code(1), Some(GameStatus::Waiting));
        assert_eq!(GameStatus::from_code(2), Some(GameStatus::Running));
        assert_eq!(GameStatus::from_code(3), Some(GameStatus::Finished));
        assert_eq!(GameStatus::from_code(0), None);
        assert_eq!(GameStatus::from_code(4), None);
        assert_eq!(GameStatus::Running.code(), 2);
    }

    #[test]
    fn test_field_codes_and_chars() {
        assert_eq!(Field::from_code(0), Some(Field::Empty));
        assert_eq!(Field::from_code(2), Some(Field::Player1));
        assert_eq!(Field::from_code(3), None);
        assert_eq!(Field::from_char('1'), Some(Field::Player0));
        assert_eq!(Field::from_char('7'), None);
        assert_eq!(Field::from_char('x'), None);
    }

    // =====================================================================
    // Game
    // =====================================================================

    fn board_game() -> Game {
        // 2 wide, 2 high: each logical row holds 3 cells.
        Game {
            width: Some(2),
            height: Some(2),
            content: Some(vec![
                Some(Field::Empty),
                Some(Field::Player0),
                Some(Field::Empty),
                Some(Field::Player1),
                None,
                Some(Field::Empty),
            ]),
            ..Game::new(GameId(1))
        }
    }

    #[test]
    fn test_new_game_knows_only_its_id() {
        let game = Game::new(GameId(7));
        assert_eq!(game.id(), GameId(7));
        assert!(game.status().is_none());
        assert!(game.width().is_none());
        assert!(game.player0().is_none());
        assert!(game.active_player().is_none());
        assert!(game.content().is_none());
    }

    #[test]
    fn test_field_at_uses_combined_row_length() {
        let game = board_game();
        assert_eq!(game.field_at(1, 0), Some(Field::Player0));
        assert_eq!(game.field_at(0, 1), Some(Field::Player1));
        // Unknown cell and off-board coordinates.
        assert_eq!(game.field_at(1, 1), None);
        assert_eq!(game.field_at(3, 0), None);
        assert_eq!(game.field_at(0, 2), None);
    }

    #[test]
    fn test_field_at_without_width_is_none() {
        assert_eq!(Game::new(GameId(1)).field_at(0, 0), None);
    }

    #[test]
    fn test_field_at_with_non_positive_width_is_none() {
        let mut game = board_game();
        game.width = Some(-2);
        assert_eq!(game.field_at(0, 0), None);
        game.width = Some(0);
        assert_eq!(game.field_at(0, 0), None);
    }

    #[test]
    fn test_content_string_marks_unknown_cells() {
        assert_eq!(board_game().content_string().as_deref(), Some("0102?0"));
        assert_eq!(Game::new(GameId(1)).content_string(), None);
    }

    #[test]
    fn test_game_display_omits_absent_fields() {
        assert_eq!(Game::new(GameId(7)).to_string(), "Game { gameID=7 }");
        let game = Game {
            status: Some(GameStatus::Running),
            width: Some(5),
            ..Game::new(GameId(7))
        };
        assert_eq!(
            game.to_string(),
            "Game { gameID=7, status=running, width=5 }"
        );
    }

    // =====================================================================
    // Other entities
    // =====================================================================

    #[test]
    fn test_player_display() {
        assert_eq!(Player::new(PlayerId(3)).to_string(), "Player { playerID=3 }");
        assert_eq!(
            Player::named(PlayerId(3), "ann").to_string(),
            "Player { playerID=3, name=\"ann\" }"
        );
    }

    #[test]
    fn test_join_result_wraps_ids_only() {
        let join = JoinResult::new(GameId(1), PlayerId(2), true);
        assert_eq!(join.game(), &Game::new(GameId(1)));
        assert!(join.player().name().is_none());
        assert!(join.role());
        assert_eq!(
            join.to_string(),
            "JoinResult { gameID=1, playerID=2, role=true }"
        );
    }

    #[test]
    fn test_turn_result_display() {
        assert_eq!(
            TurnResult::new(GameId(3), Some(true)).to_string(),
            "TurnResult { gameID=3, winner=1 }"
        );
        assert_eq!(
            TurnResult::new(GameId(3), None).to_string(),
            "TurnResult { gameID=3 }"
        );
    }

    #[test]
    fn test_admin_token_never_prints_ciphertext() {
        let token = AdminToken::new("sess-1", "12,-3,45");
        assert_eq!(token.to_string(), "AdminToken sess-1");
        assert!(!format!("{token:?}").contains("12,-3,45"));
        assert_eq!(token.token(), "12,-3,45");
    }

    // =====================================================================
    // Version
    // =====================================================================

    #[test]
    fn test_version_ordering() {
        assert!(Version::new(1, 0, 0) > Version::new(0, 9, 9));
        assert!(Version::new(1, 2, 0) > Version::new(1, 1, 7));
        assert!(Version::new(1, 2, 3) > Version::new(1, 2, 2));
        assert_eq!(Version::new(1, 2, 3), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_display_and_parse() {
        let v = Version::new(1, 4, 2);
        assert_eq!(v.to_string(), "v1.4.2");
        assert_eq!("v1.4.2".parse::<Version>().unwrap(), v);
        assert_eq!("1.4.2".parse::<Version>().unwrap(), v);
        assert!("1.4".parse::<Version>().is_err());
        assert!("1.4.2.0".parse::<Version>().is_err());
        assert!("v1.x.2".parse::<Version>().is_err());
    }
}
