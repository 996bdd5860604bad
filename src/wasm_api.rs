use crate::drag::{DropZone, Point, Rect, ZoneId};
use crate::protocol::Solution;
use crate::session::{App, ClearTarget, Route, SolvePhase};
use crate::{Board, Color, Face, Rack, Tile, TileSet};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JSON rectangle, matching what getBoundingClientRect reports
#[derive(Serialize, Deserialize)]
pub struct RectJson {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl From<RectJson> for Rect {
    fn from(r: RectJson) -> Self {
        Rect::new(r.left, r.top, r.right, r.bottom)
    }
}

/// JSON drop-zone: the rack region or one board set's region, in the
/// order the page declares them
#[derive(Serialize, Deserialize)]
#[serde(tag = "target")]
pub enum ZoneJson {
    #[serde(rename = "rack")]
    Rack { rect: RectJson },
    #[serde(rename = "set")]
    Set { index: usize, rect: RectJson },
}

impl From<ZoneJson> for DropZone {
    fn from(z: ZoneJson) -> Self {
        match z {
            ZoneJson::Rack { rect } => DropZone { id: ZoneId::Rack, rect: rect.into() },
            ZoneJson::Set { index, rect } => {
                DropZone { id: ZoneId::Set(index), rect: rect.into() }
            }
        }
    }
}

/// Render snapshot of the editor view, as JSON
#[derive(Serialize, Deserialize)]
pub struct EditorJson {
    pub board: Vec<Vec<String>>,
    pub rack: Vec<String>,
    pub staged: String,
    pub selector_open: bool,
    pub dragging: bool,
    pub drag_offset: (f64, f64),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_clear: Option<String>,
}

/// Render snapshot of the solved view, as JSON
#[derive(Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum SolvedJson {
    #[serde(rename = "loading")]
    Loading,
    #[serde(rename = "solved")]
    Solved {
        best_play: Vec<Vec<String>>,
        from_rack: Vec<String>,
    },
    #[serde(rename = "no_solution")]
    NoSolution,
    #[serde(rename = "failed")]
    Failed { error: String },
}

fn set_strings(set: &TileSet) -> Vec<String> {
    set.tiles().iter().map(|t| t.to_string()).collect()
}

fn solution_json(solution: &Solution) -> SolvedJson {
    SolvedJson::Solved {
        best_play: solution.best_play.iter().map(set_strings).collect(),
        from_rack: solution.from_rack.iter().map(|t| t.to_string()).collect(),
    }
}

fn parse_face(face: &str) -> Result<Face, String> {
    if face == "J" {
        return Ok(Face::Joker);
    }
    let n: u8 = face.parse().map_err(|_| format!("Invalid face: {}", face))?;
    if !(1..=13).contains(&n) {
        return Err(format!("Number must be 1-13, got {}", n));
    }
    Ok(Face::Number(n))
}

fn parse_color(code: &str) -> Result<Color, String> {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Color::from_code(c),
        _ => Err(format!("Invalid color code: {:?}", code)),
    }
}

fn js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

/// The whole client held behind one wasm handle. The page forwards DOM
/// events and measured rectangles in; render snapshots come out as JSON.
#[wasm_bindgen]
pub struct Editor {
    app: App,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor { app: App::new() }
    }

    pub fn route(&self) -> String {
        match self.app.route() {
            Route::Editor => "editor".to_string(),
            Route::Solved => "solved".to_string(),
        }
    }

    /// Navigate directly to "editor" or "solved". The solved route
    /// without carried state falls back to the editor.
    pub fn navigate(&mut self, route: &str) -> Result<(), JsValue> {
        match route {
            "editor" => self.app.navigate(Route::Editor),
            "solved" => self.app.navigate(Route::Solved),
            _ => return Err(js_err(format!("Unknown route: {}", route))),
        }
        Ok(())
    }

    // Staged-tile editing

    pub fn toggle_selector(&mut self) {
        self.app.editor_mut().toggle_selector();
    }

    pub fn select_color(&mut self, code: &str) -> Result<(), JsValue> {
        let color = parse_color(code).map_err(js_err)?;
        self.app.editor_mut().select_color(color);
        Ok(())
    }

    /// Face option as the page's select shows it: "1".."13" or "J"
    pub fn set_face(&mut self, face: &str) -> Result<(), JsValue> {
        let face = parse_face(face).map_err(js_err)?;
        self.app.editor_mut().set_face(face);
        Ok(())
    }

    pub fn escape(&mut self) {
        self.app.editor_mut().escape();
    }

    /// The picker's closed choice set, as color code letters.
    pub fn color_options(&self) -> Vec<String> {
        Color::ALL.iter().map(|c| c.code().to_string()).collect()
    }

    pub fn background_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        selector_bounds: &str,
    ) -> Result<(), JsValue> {
        let bounds: RectJson = serde_json::from_str(selector_bounds)
            .map_err(|e| js_err(format!("Invalid rect JSON: {}", e)))?;
        self.app
            .editor_mut()
            .background_pointer_down(Point::new(x, y), bounds.into());
        Ok(())
    }

    // Drag assignment

    pub fn drag_start(&mut self, tile_rect: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let rect: RectJson = serde_json::from_str(tile_rect)
            .map_err(|e| js_err(format!("Invalid rect JSON: {}", e)))?;
        Ok(self.app.editor_mut().drag_start(rect.into(), Point::new(x, y)))
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        self.app.editor_mut().drag_move(Point::new(x, y));
    }

    /// Release the drag against the zones the page measured, in
    /// declaration order. Returns true when a zone received the tile.
    pub fn drag_release(&mut self, zones_json: &str) -> Result<bool, JsValue> {
        let zones: Vec<ZoneJson> = serde_json::from_str(zones_json)
            .map_err(|e| js_err(format!("Invalid zones JSON: {}", e)))?;
        let zones: Vec<DropZone> = zones.into_iter().map(DropZone::from).collect();
        Ok(self.app.editor_mut().drag_release(&zones).is_some())
    }

    // Collection edits

    pub fn add_board_set(&mut self) {
        self.app.editor_mut().add_board_set();
    }

    pub fn remove_rack_tile(&mut self, index: usize) {
        self.app.editor_mut().remove_rack_tile(index);
    }

    pub fn remove_board_tile(&mut self, set_index: usize, tile_index: usize) {
        self.app.editor_mut().remove_board_tile(set_index, tile_index);
    }

    pub fn remove_board_set(&mut self, set_index: usize) {
        self.app.editor_mut().remove_board_set(set_index);
    }

    pub fn request_clear(&mut self, target: &str) -> Result<(), JsValue> {
        let target = match target {
            "rack" => ClearTarget::Rack,
            "board" => ClearTarget::Board,
            _ => return Err(js_err(format!("Unknown clear target: {}", target))),
        };
        self.app.editor_mut().request_clear(target);
        Ok(())
    }

    pub fn confirm_clear(&mut self) {
        self.app.editor_mut().confirm_clear();
    }

    pub fn cancel_clear(&mut self) {
        self.app.editor_mut().cancel_clear();
    }

    /// Replace the editor's collections with tiles in canonical text
    /// form, e.g. `[["B7","KJ"]]` and `["R1","R2"]`. Used when the page
    /// restores carried state.
    pub fn load_state(&mut self, board_json: &str, rack_json: &str) -> Result<(), JsValue> {
        let board: Vec<Vec<String>> = serde_json::from_str(board_json)
            .map_err(|e| js_err(format!("Invalid board JSON: {}", e)))?;
        let rack: Vec<String> = serde_json::from_str(rack_json)
            .map_err(|e| js_err(format!("Invalid rack JSON: {}", e)))?;

        let mut sets = Vec::with_capacity(board.len());
        for tile_strs in board {
            let tiles = tile_strs
                .iter()
                .map(|s| Tile::from_string(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(js_err)?;
            sets.push(TileSet::from_tiles(tiles).map_err(js_err)?);
        }
        let rack = rack
            .iter()
            .map(|s| Tile::from_string(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(js_err)?;

        let editor = self.app.editor_mut();
        editor.board = Board::from_sets(sets);
        editor.rack = Rack::from_tiles(rack);
        Ok(())
    }

    // Solving

    /// Validate and mount the solved view. Returns JSON
    /// `{"epoch": N, "request": {...}}`; the page POSTs the request and
    /// reports back through solve_ok/solve_failed with the same epoch.
    pub fn start_solve(&mut self) -> Result<String, JsValue> {
        let (epoch, request) = self.app.start_solve().map_err(js_err)?;
        serde_json::to_string(&serde_json::json!({ "epoch": epoch, "request": request }))
            .map_err(|e| js_err(format!("Serialization error: {}", e)))
    }

    pub fn solve_ok(&mut self, epoch: u32, body: &str) {
        self.app.apply_response(epoch, Ok(body.to_string()));
    }

    pub fn solve_failed(&mut self, epoch: u32, message: &str) {
        self.app.apply_response(epoch, Err(message.to_string()));
    }

    pub fn back_to_editor(&mut self) {
        self.app.back_to_editor();
    }

    // Render snapshots

    pub fn editor_json(&self) -> Result<String, JsValue> {
        let editor = self.app.editor();
        let offset = editor.drag().offset();
        let snapshot = EditorJson {
            board: editor.board.sets().iter().map(set_strings).collect(),
            rack: editor.rack.tiles().iter().map(|t| t.to_string()).collect(),
            staged: editor.staged_tile().to_string(),
            selector_open: editor.selector().is_open(),
            dragging: editor.drag().is_dragging(),
            drag_offset: (offset.x, offset.y),
            pending_clear: editor.pending_clear().map(|t| {
                match t {
                    ClearTarget::Rack => "rack".to_string(),
                    ClearTarget::Board => "board".to_string(),
                }
            }),
        };
        serde_json::to_string(&snapshot).map_err(|e| js_err(format!("Serialization error: {}", e)))
    }

    pub fn solved_json(&self) -> Result<String, JsValue> {
        let snapshot = match self.app.solved().map(|v| v.phase()) {
            None | Some(SolvePhase::Loading) => SolvedJson::Loading,
            Some(SolvePhase::Solved(solution)) => solution_json(solution),
            Some(SolvePhase::NoSolution) => SolvedJson::NoSolution,
            Some(SolvePhase::Failed(e)) => SolvedJson::Failed { error: e.clone() },
        };
        serde_json::to_string(&snapshot).map_err(|e| js_err(format!("Serialization error: {}", e)))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

/// POST the request body to the solve endpoint and return the response
/// body text. Transport errors come back as rejected promises; the page
/// routes either outcome to solve_ok/solve_failed.
#[wasm_bindgen]
pub async fn post_solve(endpoint: &str, request_json: &str) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(request_json));

    let request = Request::new_with_str_and_init(endpoint, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| js_err("No window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    if !response.ok() {
        return Err(js_err(format!("HTTP {}", response.status())));
    }

    let body: js_sys::Promise = response.text()?;
    let text = JsFuture::from(body).await?;
    text.as_string()
        .ok_or_else(|| js_err("Response body was not text".to_string()))
}

/// Get the git commit hash that this WASM module was built from
///
/// Returns the first 8 characters of the commit hash, or "unknown" if not available
#[wasm_bindgen]
pub fn get_build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}
