//! Wire contract with the external solving service.
//!
//! One POST endpoint, JSON body. Tiles travel as `[code, face]` pairs
//! where `code` is the single-letter color and `face` is 1-13 with the
//! Joker as the sentinel `0`:
//!
//! ```text
//! Request:  { "board": [[["B", 7], ...], ...], "rack": [["K", 0], ...] }
//! Response: { "best_play": [...same shape...], "from_rack": [["B", 7], ...] }
//! ```

use crate::{Board, Rack, Tile, TileSet};
use serde::{Deserialize, Serialize};

/// Minimum rack size for a solve to be meaningful; enforced before any
/// request is built, so an under-filled rack never reaches the network.
pub const MIN_RACK_TILES: usize = 3;

/// One tile on the wire: a `[code, face]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTile(pub String, pub u8);

impl From<Tile> for WireTile {
    fn from(tile: Tile) -> Self {
        WireTile(tile.color().code().to_string(), tile.number().unwrap_or(0))
    }
}

impl TryFrom<WireTile> for Tile {
    type Error = String;

    fn try_from(wire: WireTile) -> Result<Self, String> {
        let WireTile(code, face) = wire;
        let mut chars = code.chars();
        let color = match (chars.next(), chars.next()) {
            (Some(c), None) => crate::Color::from_code(c)?,
            _ => return Err(format!("Invalid color code: {:?}", code)),
        };
        match face {
            0 => Ok(Tile::joker(color)),
            1..=13 => Ok(Tile::new(color, face)),
            _ => Err(format!("Face must be 0-13, got {}", face)),
        }
    }
}

/// Request body for the solve endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub board: Vec<Vec<WireTile>>,
    pub rack: Vec<WireTile>,
}

/// Response body from the solve endpoint. Both fields may be absent;
/// an absent or empty `from_rack` is the no-solution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    #[serde(default)]
    pub best_play: Vec<Vec<WireTile>>,
    #[serde(default)]
    pub from_rack: Vec<WireTile>,
}

/// A proposed optimal play, decoded and ready for display. Receive-only:
/// the client renders it and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// New sets to form on the board, in solver-returned order.
    pub best_play: Vec<TileSet>,
    /// Tiles consumed from the rack, sorted for readability.
    pub from_rack: Vec<Tile>,
}

/// Outcome of a well-formed solver response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The solver proposed a play.
    Play(Solution),
    /// No moves can be made with the submitted rack.
    NoPlay,
}

/// Serialize the board and rack into a request body.
///
/// Fails when the rack holds fewer than [`MIN_RACK_TILES`] tiles; the
/// board may be a single empty set.
pub fn build_request(board: &Board, rack: &Rack) -> Result<SolveRequest, String> {
    if rack.len() < MIN_RACK_TILES {
        return Err(format!(
            "Rack must have at least {} tiles, got {}",
            MIN_RACK_TILES,
            rack.len()
        ));
    }

    Ok(SolveRequest {
        board: board
            .sets()
            .iter()
            .map(|set| set.tiles().iter().map(|&t| WireTile::from(t)).collect())
            .collect(),
        rack: rack.tiles().iter().map(|&t| WireTile::from(t)).collect(),
    })
}

/// Build the request and encode it as a JSON string.
pub fn request_json(board: &Board, rack: &Rack) -> Result<String, String> {
    let request = build_request(board, rack)?;
    serde_json::to_string(&request).map_err(|e| format!("Serialization error: {}", e))
}

/// Parse and normalize a solver response body.
///
/// Distinguishes the no-solution outcome (well-formed, empty `from_rack`)
/// from a parse failure (malformed JSON, unknown color codes, faces out
/// of range, oversized sets). `from_rack` comes back sorted for display;
/// `best_play` stays in solver order.
pub fn parse_response(body: &str) -> Result<SolveOutcome, String> {
    let response: SolveResponse =
        serde_json::from_str(body).map_err(|e| format!("Invalid response JSON: {}", e))?;

    if response.from_rack.is_empty() {
        return Ok(SolveOutcome::NoPlay);
    }

    let mut best_play = Vec::with_capacity(response.best_play.len());
    for wire_set in response.best_play {
        let tiles = wire_set
            .into_iter()
            .map(Tile::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        best_play.push(TileSet::from_tiles(tiles)?);
    }

    let mut from_rack = response
        .from_rack
        .into_iter()
        .map(Tile::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    sort_played_tiles(&mut from_rack);

    Ok(SolveOutcome::Play(Solution { best_play, from_rack }))
}

/// Display order for the tiles consumed from the rack: face ascending
/// with the Joker above 13, ties broken by color code letter.
pub fn sort_played_tiles(tiles: &mut [Tile]) {
    tiles.sort_by_key(|t| (t.number().unwrap_or(14), t.color().code()));
}
