//! Drag-assignment: pointer geometry and the staged-tile drag controller.
//!
//! Drop resolution is a pure geometry query over live-measured zone
//! rectangles, so it needs no display surface to test.

use crate::{Board, Rack, Tile};

/// A point in the editor's coordinate space (screen pixels in practice).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect { left, top, right, bottom }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

/// Identifies a destination container for a dropped tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneId {
    /// The rack drop-zone.
    Rack,
    /// The drop-zone of the board set at this index.
    Set(usize),
}

/// A candidate drop destination: its id and its current bounding
/// rectangle, measured by the render layer at release time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub id: ZoneId,
    pub rect: Rect,
}

/// Find the zone a release at `point` lands in.
///
/// Zones are tested in declaration order (the rack zone first, then each
/// board-set zone in board order) and the first containing zone wins;
/// there is no best-overlap tie-break. Returns None when no zone
/// contains the point.
pub fn resolve_drop(point: Point, zones: &[DropZone]) -> Option<ZoneId> {
    zones.iter().find(|z| z.rect.contains(point)).map(|z| z.id)
}

/// Apply a resolved drop: append `tile` to the matched container.
///
/// Set appends go through the board's capacity guard, so a drop on a
/// full set is a silent no-op.
pub fn apply_drop(zone: ZoneId, tile: Tile, board: &mut Board, rack: &mut Rack) {
    match zone {
        ZoneId::Rack => rack.add(tile),
        ZoneId::Set(idx) => board.add_to_set(idx, tile),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    Dragging {
        /// The staged tile's resting rectangle, measured at pointer-down.
        origin: Rect,
        /// Pointer position at pointer-down.
        grab: Point,
        /// Live pointer offset from `grab`.
        offset: Point,
    },
}

/// Tracks one in-progress drag of the staged tile.
///
/// One drag at a time per editor instance: pointer-downs while a drag is
/// active are not honored. Released position resolves against the drop
/// zones and the visual offset resets to the origin unconditionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragController {
    phase: DragPhase,
}

impl DragController {
    pub fn new() -> Self {
        DragController { phase: DragPhase::Idle }
    }

    /// Start a drag from the staged tile's resting rectangle. Returns
    /// false (ignoring the event) when a drag is already active.
    pub fn pointer_down(&mut self, tile_rect: Rect, pointer: Point) -> bool {
        match self.phase {
            DragPhase::Idle => {
                self.phase = DragPhase::Dragging {
                    origin: tile_rect,
                    grab: pointer,
                    offset: Point::default(),
                };
                true
            }
            DragPhase::Dragging { .. } => false,
        }
    }

    /// Track pointer movement. Ignored when idle.
    pub fn pointer_move(&mut self, pointer: Point) {
        if let DragPhase::Dragging { grab, ref mut offset, .. } = self.phase {
            *offset = Point::new(pointer.x - grab.x, pointer.y - grab.y);
        }
    }

    /// Release the drag and resolve the destination from the dragged
    /// tile's current center. Always returns to Idle (the tile's visual
    /// offset resets whether or not a drop occurred).
    pub fn pointer_up(&mut self, zones: &[DropZone]) -> Option<ZoneId> {
        let resolved = match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { origin, offset, .. } => {
                let rest = origin.center();
                resolve_drop(Point::new(rest.x + offset.x, rest.y + offset.y), zones)
            }
        };
        self.phase = DragPhase::Idle;
        resolved
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Current offset of the dragged tile from its origin, for rendering.
    /// Zero when idle.
    pub fn offset(&self) -> Point {
        match self.phase {
            DragPhase::Idle => Point::default(),
            DragPhase::Dragging { offset, .. } => offset,
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn zones() -> Vec<DropZone> {
        vec![
            DropZone { id: ZoneId::Rack, rect: Rect::new(0.0, 0.0, 10.0, 10.0) },
            DropZone { id: ZoneId::Set(0), rect: Rect::new(20.0, 0.0, 30.0, 10.0) },
        ]
    }

    #[test]
    fn test_resolve_drop_first_match() {
        assert_eq!(resolve_drop(Point::new(5.0, 5.0), &zones()), Some(ZoneId::Rack));
        assert_eq!(resolve_drop(Point::new(25.0, 5.0), &zones()), Some(ZoneId::Set(0)));
        assert_eq!(resolve_drop(Point::new(50.0, 50.0), &zones()), None);

        // Overlapping zones: declaration order is the tie-break.
        let overlapping = vec![
            DropZone { id: ZoneId::Rack, rect: Rect::new(0.0, 0.0, 10.0, 10.0) },
            DropZone { id: ZoneId::Set(0), rect: Rect::new(0.0, 0.0, 10.0, 10.0) },
        ];
        assert_eq!(resolve_drop(Point::new(5.0, 5.0), &overlapping), Some(ZoneId::Rack));
    }

    #[test]
    fn test_rect_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
        assert_eq!(r.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_drop_into_rack_leaves_board_alone() {
        let mut board = Board::new();
        let mut rack = Rack::new();
        let tile = Tile::new(Color::Blue, 7);

        let mut drag = DragController::new();
        // Tile rests centered on (5, 5), inside the rack zone; no movement.
        assert!(drag.pointer_down(Rect::new(3.0, 3.0, 7.0, 7.0), Point::new(5.0, 5.0)));
        let hit = drag.pointer_up(&zones());
        assert_eq!(hit, Some(ZoneId::Rack));

        apply_drop(hit.unwrap(), tile, &mut board, &mut rack);
        assert_eq!(rack.tiles(), &[tile]);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_release_outside_all_zones_mutates_nothing() {
        let mut board = Board::new();
        let mut rack = Rack::new();

        let mut drag = DragController::new();
        drag.pointer_down(Rect::new(3.0, 3.0, 7.0, 7.0), Point::new(5.0, 5.0));
        drag.pointer_move(Point::new(50.0, 50.0));
        assert_eq!(drag.pointer_up(&zones()), None);

        assert!(rack.is_empty());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_drag_moves_center_into_set_zone() {
        let mut drag = DragController::new();
        drag.pointer_down(Rect::new(3.0, 3.0, 7.0, 7.0), Point::new(5.0, 5.0));
        // Grab at (5,5), move to (25,5): center lands at (25, 5) in set#0.
        drag.pointer_move(Point::new(25.0, 5.0));
        assert_eq!(drag.offset(), Point::new(20.0, 0.0));
        assert_eq!(drag.pointer_up(&zones()), Some(ZoneId::Set(0)));
    }

    #[test]
    fn test_offset_resets_after_release() {
        let mut drag = DragController::new();
        drag.pointer_down(Rect::new(0.0, 0.0, 4.0, 4.0), Point::new(2.0, 2.0));
        drag.pointer_move(Point::new(42.0, 42.0));
        drag.pointer_up(&zones());

        assert!(!drag.is_dragging());
        assert_eq!(drag.offset(), Point::default());
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let mut drag = DragController::new();
        assert!(drag.pointer_down(Rect::new(0.0, 0.0, 4.0, 4.0), Point::new(2.0, 2.0)));
        assert!(!drag.pointer_down(Rect::new(0.0, 0.0, 4.0, 4.0), Point::new(3.0, 3.0)));
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_pointer_up_when_idle() {
        let mut drag = DragController::new();
        assert_eq!(drag.pointer_up(&zones()), None);
    }
}
