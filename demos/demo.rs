use rummikub_editor::drag::{DropZone, Point, Rect, ZoneId};
use rummikub_editor::session::{App, Route, SolvePhase};
use rummikub_editor::{Color, Face};

fn main() {
    println!("Rummikub Play Editor\n");

    let mut app = App::new();

    // Zones as the page would measure them: the rack region first, then
    // each board set's region in board order.
    let zones = vec![
        DropZone { id: ZoneId::Rack, rect: Rect::new(0.0, 0.0, 100.0, 40.0) },
        DropZone { id: ZoneId::Set(0), rect: Rect::new(0.0, 60.0, 100.0, 100.0) },
    ];

    // Stage and drag three red tiles into the rack.
    for n in [3, 4, 5] {
        let editor = app.editor_mut();
        editor.select_color(Color::Red);
        editor.set_face(Face::Number(n));

        editor.drag_start(Rect::new(45.0, 115.0, 55.0, 125.0), Point::new(50.0, 120.0));
        editor.drag_move(Point::new(50.0, 20.0));
        let hit = editor.drag_release(&zones);
        println!("Dropped {} into {:?}", editor.staged_tile().to_string(), hit);
    }

    // Drop a black Joker into the first board set.
    let editor = app.editor_mut();
    editor.select_color(Color::Black);
    editor.set_face(Face::Joker);
    editor.drag_start(Rect::new(45.0, 115.0, 55.0, 125.0), Point::new(50.0, 120.0));
    editor.drag_move(Point::new(50.0, 80.0));
    editor.drag_release(&zones);

    println!("\nRack:  {:?}", app.editor().rack.tiles());
    println!("Board: {:?}", app.editor().board.sets());

    // Submit. The request would go over the wire; here we answer it with
    // a canned solver response.
    let (epoch, request) = app.start_solve().expect("rack has three tiles");
    println!(
        "\nRequest body: {}",
        serde_json::to_string(&request).unwrap()
    );

    let body = r#"{
        "best_play": [[["R", 3], ["R", 4], ["R", 5]]],
        "from_rack": [["R", 5], ["R", 3], ["R", 4]]
    }"#;
    app.apply_response(epoch, Ok(body.to_string()));

    match app.solved().map(|v| v.phase()) {
        Some(SolvePhase::Solved(solution)) => {
            println!("\nOptimal play:");
            for set in &solution.best_play {
                let tiles: Vec<String> = set.tiles().iter().map(|t| t.to_string()).collect();
                println!("  {}", tiles.join(" "));
            }
            let used: Vec<String> = solution.from_rack.iter().map(|t| t.to_string()).collect();
            println!("Tiles used from the rack: {}", used.join(" "));
        }
        Some(SolvePhase::NoSolution) => println!("\nNo moves can be made with this rack."),
        Some(SolvePhase::Failed(e)) => println!("\nSolve failed: {}", e),
        _ => println!("\nStill loading?"),
    }

    // Back to the editor: the board and rack survive the round trip.
    app.back_to_editor();
    assert_eq!(app.route(), Route::Editor);
    println!("\nBack in the editor with {} rack tiles.", app.editor().rack.len());
}
