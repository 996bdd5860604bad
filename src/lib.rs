pub mod drag;
pub mod protocol;
pub mod selector;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

/// Maximum number of tiles a board set may hold (the physical-game
/// maximum run/group size).
pub const SET_CAPACITY: usize = 5;

/// One of the four tile colors, identified on the wire by a single
/// canonical letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Blue,
    Orange,
    Red,
    Black,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Blue, Color::Orange, Color::Red, Color::Black];

    /// Canonical single-letter code: B, O, R, or K (blacK).
    pub fn code(self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Black => 'K',
        }
    }

    /// Parse a canonical color code letter.
    pub fn from_code(c: char) -> Result<Self, String> {
        match c {
            'B' => Ok(Color::Blue),
            'O' => Ok(Color::Orange),
            'R' => Ok(Color::Red),
            'K' => Ok(Color::Black),
            _ => Err(format!("Invalid color code: {}", c)),
        }
    }

    fn index(self) -> u8 {
        match self {
            Color::Blue => 0,
            Color::Orange => 1,
            Color::Red => 2,
            Color::Black => 3,
        }
    }

    fn from_index(i: u8) -> Self {
        match i & 0b11 {
            0 => Color::Blue,
            1 => Color::Orange,
            2 => Color::Red,
            _ => Color::Black,
        }
    }
}

/// A tile face: a number 1-13, or the Joker wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Number(u8),
    Joker,
}

/// A tile represented as a u8.
/// - Bits 0-1: Color (00 = Blue, 01 = Orange, 10 = Red, 11 = Black)
/// - Bits 2-5: Face (1-13, or 0 for the Joker)
///
/// Jokers keep a color here: the editor always stages a tile with a
/// concrete color, and the solver ignores the Joker's color anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

impl Tile {
    const COLOR_MASK: u8 = 0b0000_0011;
    const FACE_MASK: u8 = 0b0011_1100;
    const FACE_SHIFT: u8 = 2;
    const JOKER_FACE: u8 = 0;

    /// Create a numbered tile. The number must be 1-13.
    pub fn new(color: Color, number: u8) -> Self {
        assert!((1..=13).contains(&number), "Number must be 1-13");
        Tile((number << Self::FACE_SHIFT) | color.index())
    }

    /// Create a Joker tile of the given color.
    pub fn joker(color: Color) -> Self {
        Tile((Self::JOKER_FACE << Self::FACE_SHIFT) | color.index())
    }

    pub fn color(&self) -> Color {
        Color::from_index(self.0 & Self::COLOR_MASK)
    }

    pub fn face(&self) -> Face {
        match (self.0 & Self::FACE_MASK) >> Self::FACE_SHIFT {
            Self::JOKER_FACE => Face::Joker,
            n => Face::Number(n),
        }
    }

    /// Get the number (1-13), or None for the Joker.
    pub fn number(&self) -> Option<u8> {
        match self.face() {
            Face::Number(n) => Some(n),
            Face::Joker => None,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.face() == Face::Joker
    }

    /// Parse a tile from its canonical text form.
    /// Format: "B7" (blue 7), "R13" (red 13), "KJ" (black Joker).
    pub fn from_string(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        let color = match chars.next() {
            Some(c) => Color::from_code(c)?,
            None => return Err("Empty tile string".to_string()),
        };

        let rest = chars.as_str();
        if rest == "J" {
            return Ok(Tile::joker(color));
        }

        let number: u8 = rest
            .parse()
            .map_err(|_| format!("Invalid number: {}", rest))?;
        if !(1..=13).contains(&number) {
            return Err(format!("Number must be 1-13, got {}", number));
        }

        Ok(Tile::new(color, number))
    }

    /// Canonical text form: "B7", "R13", or "KJ" for a black Joker.
    pub fn to_string(&self) -> String {
        match self.number() {
            Some(n) => format!("{}{}", self.color().code(), n),
            None => format!("{}J", self.color().code()),
        }
    }
}

/// An ordered group of tiles placed together on the board.
///
/// Capacity is bounded by [`SET_CAPACITY`]; run/group legality is the
/// solver's concern, not the editor's.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileSet(Vec<Tile>);

impl TileSet {
    pub fn new() -> Self {
        TileSet(Vec::new())
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, String> {
        if tiles.len() > SET_CAPACITY {
            return Err(format!(
                "Set holds at most {} tiles, got {}",
                SET_CAPACITY,
                tiles.len()
            ));
        }
        Ok(TileSet(tiles))
    }

    /// Append a tile. Returns false (leaving the set unchanged) when the
    /// set is already full; this is the capacity guard, not an error.
    pub fn push(&mut self, tile: Tile) -> bool {
        if self.0.len() < SET_CAPACITY {
            self.0.push(tile);
            true
        } else {
            false
        }
    }

    /// Remove the tile at `index`. No-op when out of range.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= SET_CAPACITY
    }
}

/// The board: an ordered sequence of tile sets.
///
/// Never empty. Removing or clearing the last set leaves a single empty
/// set in place. Order is display order only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<TileSet>);

impl Board {
    pub fn new() -> Self {
        Board(vec![TileSet::new()])
    }

    pub fn from_sets(sets: Vec<TileSet>) -> Self {
        if sets.is_empty() { Board::new() } else { Board(sets) }
    }

    /// Append a new empty set.
    pub fn add_set(&mut self) {
        self.0.push(TileSet::new());
    }

    /// Append `tile` to the set at `set_index`. Silent no-op when the set
    /// is full or the index is out of range.
    pub fn add_to_set(&mut self, set_index: usize, tile: Tile) {
        if let Some(set) = self.0.get_mut(set_index) {
            set.push(tile);
        }
    }

    /// Remove one tile from one set, leaving the (possibly empty) set in
    /// place. No-op when either index is out of range.
    pub fn remove_tile(&mut self, set_index: usize, tile_index: usize) {
        if let Some(set) = self.0.get_mut(set_index) {
            set.remove(tile_index);
        }
    }

    /// Remove a whole set. Removing the last remaining set yields one
    /// empty set, never an empty board.
    pub fn remove_set(&mut self, set_index: usize) {
        if set_index >= self.0.len() {
            return;
        }
        if self.0.len() == 1 {
            self.0[0] = TileSet::new();
        } else {
            self.0.remove(set_index);
        }
    }

    /// Reset to a single empty set.
    pub fn clear(&mut self) {
        self.0 = vec![TileSet::new()];
    }

    pub fn sets(&self) -> &[TileSet] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Total number of tiles across all sets.
    pub fn tile_count(&self) -> usize {
        self.0.iter().map(TileSet::len).sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's rack: an insertion-ordered pool of tiles with no
/// client-side capacity bound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rack(Vec<Tile>);

impl Rack {
    pub fn new() -> Self {
        Rack(Vec::new())
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Rack(tiles)
    }

    /// Append a tile. Always succeeds.
    pub fn add(&mut self, tile: Tile) {
        self.0.push(tile);
    }

    /// Remove the tile at `index`. No-op when out of range; indices are
    /// always derived from the currently rendered list.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The transient edit buffer: the color and face currently selected for
/// the next tile to be created. Exists only while the editor is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedTile {
    pub color: Color,
    pub face: Face,
}

impl StagedTile {
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_face(&mut self, face: Face) {
        if let Face::Number(n) = face {
            assert!((1..=13).contains(&n), "Number must be 1-13");
        }
        self.face = face;
    }

    /// Materialize the staged selection as a tile.
    pub fn tile(&self) -> Tile {
        match self.face {
            Face::Number(n) => Tile::new(self.color, n),
            Face::Joker => Tile::joker(self.color),
        }
    }
}

impl Default for StagedTile {
    fn default() -> Self {
        StagedTile {
            color: Color::Blue,
            face: Face::Number(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_from_string() {
        assert_eq!(Tile::from_string("B7").unwrap(), Tile::new(Color::Blue, 7));
        assert_eq!(Tile::from_string("R13").unwrap(), Tile::new(Color::Red, 13));
        assert_eq!(Tile::from_string("O1").unwrap(), Tile::new(Color::Orange, 1));
        assert_eq!(Tile::from_string("KJ").unwrap(), Tile::joker(Color::Black));

        assert!(Tile::from_string("X5").is_err());
        assert!(Tile::from_string("B14").is_err());
        assert!(Tile::from_string("B0").is_err());
        assert!(Tile::from_string("B").is_err());
        assert!(Tile::from_string("").is_err());
    }

    #[test]
    fn test_tile_to_string() {
        assert_eq!(Tile::new(Color::Blue, 7).to_string(), "B7");
        assert_eq!(Tile::new(Color::Red, 13).to_string(), "R13");
        assert_eq!(Tile::joker(Color::Black).to_string(), "KJ");
    }

    #[test]
    fn test_tile_roundtrip() {
        let tiles = vec![
            Tile::new(Color::Blue, 1),
            Tile::new(Color::Orange, 13),
            Tile::new(Color::Red, 7),
            Tile::joker(Color::Black),
            Tile::joker(Color::Blue),
        ];

        for tile in tiles {
            let parsed = Tile::from_string(&tile.to_string()).unwrap();
            assert_eq!(tile, parsed);
        }
    }

    #[test]
    fn test_joker_keeps_color() {
        let joker = Tile::joker(Color::Red);
        assert!(joker.is_joker());
        assert_eq!(joker.color(), Color::Red);
        assert_eq!(joker.number(), None);
        assert_ne!(joker, Tile::joker(Color::Black));
    }

    #[test]
    fn test_set_capacity_guard() {
        let mut set = TileSet::new();
        for n in 1..=5 {
            assert!(set.push(Tile::new(Color::Blue, n)));
        }
        assert!(set.is_full());

        // The sixth push is a silent no-op.
        let before = set.clone();
        assert!(!set.push(Tile::new(Color::Red, 6)));
        assert_eq!(set, before);
        assert_eq!(set.len(), SET_CAPACITY);
    }

    #[test]
    fn test_set_length_bounds() {
        let mut set = TileSet::new();
        set.remove(0);
        assert_eq!(set.len(), 0);

        for n in 1..=13 {
            set.push(Tile::new(Color::Orange, n));
            assert!(set.len() <= SET_CAPACITY);
        }
        set.remove(99);
        assert_eq!(set.len(), SET_CAPACITY);
        set.remove(0);
        assert_eq!(set.len(), SET_CAPACITY - 1);
    }

    #[test]
    fn test_board_add_to_full_set_unchanged() {
        let mut board = Board::new();
        board.add_set();
        for n in 1..=5 {
            board.add_to_set(1, Tile::new(Color::Black, n));
        }

        let before = board.clone();
        board.add_to_set(1, Tile::new(Color::Black, 6));
        assert_eq!(board, before);

        // Out-of-range set index is also a no-op.
        board.add_to_set(7, Tile::new(Color::Blue, 1));
        assert_eq!(board, before);
    }

    #[test]
    fn test_board_never_empty() {
        let mut board = Board::new();
        assert_eq!(board.len(), 1);

        board.add_set();
        board.add_set();
        board.remove_set(2);
        board.remove_set(0);
        assert_eq!(board.len(), 1);

        // Removing the last set collapses to one empty set.
        board.add_to_set(0, Tile::new(Color::Red, 3));
        board.remove_set(0);
        assert_eq!(board.len(), 1);
        assert!(board.sets()[0].is_empty());

        board.clear();
        assert_eq!(board.len(), 1);
        assert!(board.sets()[0].is_empty());
    }

    #[test]
    fn test_board_from_sets_never_empty() {
        assert_eq!(Board::from_sets(Vec::new()), Board::new());

        let set = TileSet::from_tiles(vec![Tile::new(Color::Blue, 2)]).unwrap();
        let board = Board::from_sets(vec![set.clone()]);
        assert_eq!(board.sets(), &[set]);
    }

    #[test]
    fn test_board_remove_tile_keeps_set() {
        let mut board = Board::new();
        board.add_to_set(0, Tile::new(Color::Blue, 4));
        board.remove_tile(0, 0);
        assert_eq!(board.len(), 1);
        assert!(board.sets()[0].is_empty());

        board.remove_tile(0, 5);
        board.remove_tile(9, 0);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_rack_order_and_removal() {
        let mut rack = Rack::new();
        rack.add(Tile::new(Color::Red, 9));
        rack.add(Tile::joker(Color::Blue));
        rack.add(Tile::new(Color::Orange, 2));
        assert_eq!(rack.len(), 3);
        assert_eq!(rack.tiles()[1], Tile::joker(Color::Blue));

        rack.remove(1);
        assert_eq!(
            rack.tiles(),
            &[Tile::new(Color::Red, 9), Tile::new(Color::Orange, 2)]
        );

        rack.remove(10);
        assert_eq!(rack.len(), 2);

        rack.clear();
        assert!(rack.is_empty());
    }

    #[test]
    fn test_staged_tile() {
        let mut staged = StagedTile::default();
        assert_eq!(staged.tile(), Tile::new(Color::Blue, 1));

        staged.set_color(Color::Black);
        staged.set_face(Face::Joker);
        assert_eq!(staged.tile(), Tile::joker(Color::Black));

        staged.set_face(Face::Number(12));
        assert_eq!(staged.tile(), Tile::new(Color::Black, 12));
    }
}
