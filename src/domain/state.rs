//! Wire payloads exchanged with the remote authority.
//!
//! Everything coming off the wire goes through [`BoardState::from_json`], so
//! a missing field or a bad mask is rejected in one place and never reaches
//! the view half-applied.

use serde::{Deserialize, Serialize};

use crate::domain::mask::BoardMask;
use crate::domain::square::Square;
use crate::error::SyncError;

/// A mask as sent by the authority: a JSON number, or a string when the
/// sender cannot represent a full 64-bit integer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawMask {
    Number(u64),
    Text(String),
}

impl RawMask {
    fn parse(&self, field: &str) -> Result<BoardMask, SyncError> {
        match self {
            RawMask::Number(value) => Ok(BoardMask(*value)),
            RawMask::Text(text) => {
                let trimmed = text.trim();
                let parsed = match trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => trimmed.parse::<u64>(),
                };
                parsed.map(BoardMask).map_err(|e| {
                    SyncError::MalformedState(format!("field `{field}` = {text:?}: {e}"))
                })
            }
        }
    }
}

pub fn decode_masks(
    raw_black: &RawMask,
    raw_white: &RawMask,
) -> Result<(BoardMask, BoardMask), SyncError> {
    Ok((raw_black.parse("black")?, raw_white.parse("white")?))
}

#[derive(Deserialize)]
struct WireState {
    black: RawMask,
    white: RawMask,
    black_turn: bool,
}

/// Complete game state as last reported by the remote authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardState {
    pub black: BoardMask,
    pub white: BoardMask,
    pub black_turn: bool,
}

impl BoardState {
    pub fn from_json(body: &[u8]) -> Result<Self, SyncError> {
        let wire: WireState = serde_json::from_slice(body)?;
        let (black, white) = decode_masks(&wire.black, &wire.white)?;

        if !(black & white).is_empty() {
            tracing::warn!(
                overlap = %format!("{:#018x}", black & white),
                "remote state marks cells as both black and white"
            );
        }

        Ok(BoardState {
            black,
            white,
            black_turn: wire.black_turn,
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct MoveRequest {
    #[serde(rename = "move")]
    pub square: Square,
}

/// Result of posting a move. A rejection is an ordinary answer, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResponse {
    Accepted(BoardState),
    Rejected { status: u16, reason: String },
}
