//! View-level state: the editor, the solved (results) view, and the
//! in-memory navigation between them.
//!
//! Board and Rack live here as the single-writer snapshots; every
//! mutation goes through the operations below. Nothing is persisted —
//! state lives exactly as long as the session.

use crate::drag::{DragController, DropZone, Point, Rect, ZoneId, apply_drop};
use crate::protocol::{self, SolveOutcome, SolveRequest, Solution};
use crate::selector::ColorSelector;
use crate::{Board, Color, Face, Rack, StagedTile, Tile};

/// Which destructive clear is awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    Rack,
    Board,
}

/// Board and Rack as they travel between views: in-memory only, lost on
/// a hard reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub board: Board,
    pub rack: Rack,
}

/// The tile editor: board, rack, staged tile, and the interaction
/// controllers that feed them.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub board: Board,
    pub rack: Rack,
    staged: StagedTile,
    selector: ColorSelector,
    drag: DragController,
    pending_clear: Option<ClearTarget>,
}

impl EditorState {
    pub fn new() -> Self {
        EditorState {
            board: Board::new(),
            rack: Rack::new(),
            staged: StagedTile::default(),
            selector: ColorSelector::default(),
            drag: DragController::new(),
            pending_clear: None,
        }
    }

    /// Rebuild the editor around state carried back from the solved view.
    pub fn with_state(nav: NavState) -> Self {
        EditorState {
            board: nav.board,
            rack: nav.rack,
            ..EditorState::new()
        }
    }

    /// The tile the staged color/face selection would create.
    pub fn staged_tile(&self) -> Tile {
        self.staged.tile()
    }

    pub fn selector(&self) -> &ColorSelector {
        &self.selector
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    // Staged-tile editing. Selecting a color through the picker also
    // closes it; the face select is a plain closed-choice input.

    pub fn toggle_selector(&mut self) {
        self.selector.toggle();
    }

    pub fn select_color(&mut self, color: Color) {
        self.selector.select(color);
        self.staged.set_color(color);
    }

    pub fn set_face(&mut self, face: Face) {
        self.staged.set_face(face);
    }

    pub fn escape(&mut self) {
        self.selector.escape();
    }

    /// A pointer-down on the page background (not on the staged tile):
    /// only the selector's outside-click handling cares.
    pub fn background_pointer_down(&mut self, point: Point, selector_bounds: Rect) {
        self.selector.pointer_down(point, selector_bounds);
    }

    // Drag assignment of the staged tile.

    /// Pointer-down on the staged tile. Ignored while a drag is active.
    pub fn drag_start(&mut self, tile_rect: Rect, pointer: Point) -> bool {
        self.drag.pointer_down(tile_rect, pointer)
    }

    pub fn drag_move(&mut self, pointer: Point) {
        self.drag.pointer_move(pointer);
    }

    /// Pointer-up: resolve the drop against the zones the render layer
    /// measured, and append the staged tile to the matched container.
    /// Returns the zone hit, if any.
    pub fn drag_release(&mut self, zones: &[DropZone]) -> Option<ZoneId> {
        let hit = self.drag.pointer_up(zones);
        if let Some(zone) = hit {
            apply_drop(zone, self.staged.tile(), &mut self.board, &mut self.rack);
        }
        hit
    }

    // Direct removals (click on a rendered tile / a set's remove button).

    pub fn remove_rack_tile(&mut self, index: usize) {
        self.rack.remove(index);
    }

    pub fn remove_board_tile(&mut self, set_index: usize, tile_index: usize) {
        self.board.remove_tile(set_index, tile_index);
    }

    pub fn remove_board_set(&mut self, set_index: usize) {
        self.board.remove_set(set_index);
    }

    pub fn add_board_set(&mut self) {
        self.board.add_set();
    }

    // Destructive clears: request/confirm/cancel. Arming a new target
    // replaces any pending one.

    pub fn request_clear(&mut self, target: ClearTarget) {
        self.pending_clear = Some(target);
    }

    pub fn pending_clear(&self) -> Option<ClearTarget> {
        self.pending_clear
    }

    pub fn confirm_clear(&mut self) {
        match self.pending_clear.take() {
            Some(ClearTarget::Rack) => self.rack.clear(),
            Some(ClearTarget::Board) => self.board.clear(),
            None => {}
        }
    }

    pub fn cancel_clear(&mut self) {
        self.pending_clear = None;
    }

    /// Build the solve request for the current snapshot. Fails without
    /// touching the network when the rack is under-filled.
    pub fn solve_request(&self) -> Result<SolveRequest, String> {
        protocol::build_request(&self.board, &self.rack)
    }

    /// Snapshot the editor's collections for navigation.
    pub fn nav_state(&self) -> NavState {
        NavState {
            board: self.board.clone(),
            rack: self.rack.clone(),
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Editor,
    Solved,
}

/// Lifecycle of the one solve request a solved-view mount issues.
#[derive(Debug, Clone, PartialEq)]
pub enum SolvePhase {
    /// Request in flight; no retry or cancel is offered.
    Loading,
    /// The solver proposed a play.
    Solved(Solution),
    /// Well-formed response, but no moves can be made with this rack.
    NoSolution,
    /// Transport or parse failure; the message is generic.
    Failed(String),
}

/// The results view: the carried request state plus the solve lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedView {
    nav: NavState,
    phase: SolvePhase,
}

impl SolvedView {
    pub fn phase(&self) -> &SolvePhase {
        &self.phase
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }
}

/// The whole client: current route, the editor, and at most one mounted
/// solved view.
///
/// Each solved-view mount gets an epoch; a solve response tagged with a
/// stale epoch (the view has since been unmounted) is dropped instead of
/// being applied to stale state.
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    route: Route,
    editor: EditorState,
    solved: Option<SolvedView>,
    epoch: u32,
}

impl App {
    pub fn new() -> Self {
        App {
            route: Route::Editor,
            editor: EditorState::new(),
            solved: None,
            epoch: 0,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    pub fn solved(&self) -> Option<&SolvedView> {
        self.solved.as_ref()
    }

    /// Submit the editor's snapshot: validate, mount the solved view in
    /// its loading phase, and hand the caller the request to POST along
    /// with the epoch to tag the response with.
    ///
    /// An under-filled rack fails here, before any request exists, and
    /// the route does not change.
    pub fn start_solve(&mut self) -> Result<(u32, SolveRequest), String> {
        let request = self.editor.solve_request()?;
        self.epoch += 1;
        self.solved = Some(SolvedView {
            nav: self.editor.nav_state(),
            phase: SolvePhase::Loading,
        });
        self.route = Route::Solved;
        Ok((self.epoch, request))
    }

    /// Deliver the transport result for the request tagged `epoch`.
    /// Late responses to an abandoned mount are ignored.
    pub fn apply_response(&mut self, epoch: u32, transport: Result<String, String>) {
        if epoch != self.epoch {
            return;
        }
        let Some(view) = self.solved.as_mut() else {
            return;
        };

        view.phase = match transport {
            Ok(body) => match protocol::parse_response(&body) {
                Ok(SolveOutcome::Play(solution)) => SolvePhase::Solved(solution),
                Ok(SolveOutcome::NoPlay) => SolvePhase::NoSolution,
                Err(e) => SolvePhase::Failed(e),
            },
            Err(e) => SolvePhase::Failed(e),
        };
    }

    /// Navigate directly to a route. Entering the solved route without a
    /// mounted view (no carried state) redirects straight back to the
    /// editor; this is the routing guard, not an error.
    pub fn navigate(&mut self, route: Route) {
        match route {
            Route::Editor => self.back_to_editor(),
            Route::Solved => {
                if self.solved.is_some() {
                    self.route = Route::Solved;
                } else {
                    self.route = Route::Editor;
                }
            }
        }
    }

    /// Unmount the solved view and rebuild the editor around the carried
    /// state so the user can keep editing. Abandons any pending solve.
    pub fn back_to_editor(&mut self) {
        if let Some(view) = self.solved.take() {
            self.editor = EditorState::with_state(view.nav);
            self.epoch += 1;
        }
        self.route = Route::Editor;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
