use stickerboard_shared::{
    BoardConfig, Drawable, Gesture, History, ImageId, ImageRef, MarkContent, Point, Recorder,
    Stroke, SurfaceOp, SvgSurface, Whiteboard,
};

fn glyph(text: &str) -> MarkContent {
    MarkContent::Glyph(text.to_string())
}

fn drag(board: &mut Whiteboard, surface: &mut Recorder, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    board.pointer_down(surface, (*first).into());
    for point in rest {
        board.pointer_move(surface, (*point).into());
    }
    board.pointer_up(surface);
}

#[test]
fn history_matches_reference_model() {
    // Small LCG so the interleaving is reproducible.
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as u32
    };

    let mut history = History::new();
    let mut active: Vec<Drawable> = Vec::new();
    let mut undone: Vec<Drawable> = Vec::new();

    for step in 0..2000 {
        match next() % 4 {
            0 | 1 => {
                let drawable: Drawable = Stroke::begin(Point::new(step as f64, 0.0), 5.0).into();
                history.commit(drawable.clone());
                active.push(drawable);
                undone.clear();
            }
            2 => {
                let expected = active.pop().map(|drawable| undone.push(drawable)).is_some();
                assert_eq!(history.undo(), expected);
            }
            _ => {
                let expected = undone.pop().map(|drawable| active.push(drawable)).is_some();
                assert_eq!(history.redo(), expected);
            }
        }
        assert_eq!(history.snapshot(), active.as_slice());
    }
}

#[test]
fn commit_after_undo_makes_redo_a_noop() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    drag(&mut board, &mut surface, &[(0.0, 0.0), (5.0, 5.0)]);
    drag(&mut board, &mut surface, &[(10.0, 0.0), (15.0, 5.0)]);

    assert!(board.undo(&mut surface));
    drag(&mut board, &mut surface, &[(20.0, 0.0), (25.0, 5.0)]);
    let before = board.history().snapshot().to_vec();

    assert!(!board.redo(&mut surface));
    assert_eq!(board.history().snapshot(), before.as_slice());
}

#[test]
fn stroke_replays_in_order_with_fixed_width() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    drag(&mut board, &mut surface, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    let frame = surface.last_frame();
    let start = frame
        .iter()
        .position(|op| *op == SurfaceOp::MoveTo(0.0, 0.0))
        .unwrap();
    assert_eq!(frame[start - 1], SurfaceOp::SetLineWidth(5.0));
    assert_eq!(frame[start + 1], SurfaceOp::LineTo(10.0, 0.0));
    assert_eq!(frame[start + 2], SurfaceOp::LineTo(10.0, 10.0));
    assert_eq!(frame[start + 3], SurfaceOp::Stroke);
}

#[test]
fn selecting_a_sticker_places_marks() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    board.select_mark(&mut surface, glyph("⭐"));
    board.pointer_down(&mut surface, Point::new(50.0, 50.0));

    assert_eq!(board.gesture(), Gesture::Idle);
    let mark = board.history().snapshot()[0].as_mark().unwrap();
    assert_eq!(mark.content(), Some(&glyph("⭐")));
    assert_eq!(mark.opacity(), 1.0);
    assert_eq!(mark.position(), Point::new(50.0, 50.0));

    board.select_brush(&mut surface, 10.0);
    board.pointer_down(&mut surface, Point::new(60.0, 60.0));
    assert_eq!(board.gesture(), Gesture::Drawing);
    assert_eq!(board.history().snapshot()[1].as_stroke().unwrap().width(), 10.0);
}

#[test]
fn preview_is_drawn_last_and_only_when_idle() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    board.select_mark(&mut surface, glyph("😀"));
    board.pointer_down(&mut surface, Point::new(1.0, 1.0));
    board.pointer_move(&mut surface, Point::new(30.0, 40.0));

    let frame = surface.last_frame();
    assert_eq!(
        &frame[frame.len() - 4..],
        &[
            SurfaceOp::SetGlobalAlpha(0.5),
            SurfaceOp::SetFont("30px sans-serif".to_string()),
            SurfaceOp::FillText("😀".to_string(), 30.0, 40.0),
            SurfaceOp::SetGlobalAlpha(1.0),
        ]
    );

    board.select_brush(&mut surface, 5.0);
    board.pointer_down(&mut surface, Point::new(0.0, 0.0));
    board.pointer_move(&mut surface, Point::new(3.0, 3.0));
    assert!(board.preview().is_some());
    assert!(!surface
        .last_frame()
        .iter()
        .any(|op| matches!(op, SurfaceOp::Arc(..))));

    board.pointer_up(&mut surface);
    assert!(surface
        .last_frame()
        .iter()
        .any(|op| matches!(op, SurfaceOp::Arc(..))));
}

#[test]
fn pointer_leave_seals_stroke_and_drops_preview() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    board.pointer_down(&mut surface, Point::new(0.0, 0.0));
    board.pointer_move(&mut surface, Point::new(1.0, 1.0));
    board.pointer_leave(&mut surface);

    assert_eq!(board.gesture(), Gesture::Idle);
    assert!(board.preview().is_none());

    board.pointer_move(&mut surface, Point::new(9.0, 9.0));
    let stroke = board.history().snapshot()[0].as_stroke().unwrap();
    assert_eq!(stroke.points(), &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
}

#[test]
fn undo_mid_stroke_stops_appending() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    drag(&mut board, &mut surface, &[(0.0, 0.0), (1.0, 0.0)]);
    board.pointer_down(&mut surface, Point::new(5.0, 5.0));
    board.undo(&mut surface);
    board.pointer_move(&mut surface, Point::new(6.0, 6.0));

    let stroke = board.history().snapshot()[0].as_stroke().unwrap();
    assert_eq!(stroke.points().len(), 2);
}

#[test]
fn clear_empties_any_depth() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    for i in 0..25 {
        let x = i as f64;
        drag(&mut board, &mut surface, &[(x, 0.0), (x, 10.0)]);
    }
    board.undo(&mut surface);
    board.clear(&mut surface);

    assert!(board.history().snapshot().is_empty());
    assert!(!board.redo(&mut surface));
    assert_eq!(
        surface.last_frame(),
        &[
            SurfaceOp::ClearRect(1024.0, 512.0),
            SurfaceOp::SetLineCap(stickerboard_shared::LineCap::Square),
            SurfaceOp::SetStrokeStyle("black".to_string()),
            SurfaceOp::SetGlobalAlpha(1.0),
            SurfaceOp::BeginPath,
            SurfaceOp::Arc(24.0, 10.0, 2.5, 0.0, std::f64::consts::TAU),
            SurfaceOp::SetStrokeStyle("black".to_string()),
            SurfaceOp::SetLineWidth(2.0),
            SurfaceOp::Stroke,
            SurfaceOp::SetGlobalAlpha(1.0),
        ]
    );
}

#[test]
fn export_replays_without_preview() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    let image = ImageRef {
        id: ImageId(1),
        width: 100.0,
        height: 100.0,
    };
    board.select_mark(&mut surface, MarkContent::Image(image));
    board.pointer_down(&mut surface, Point::new(10.0, 10.0));
    board.pointer_move(&mut surface, Point::new(20.0, 20.0));

    let mut export = Recorder::new();
    board.export(&mut export, 2.0);
    let draws: Vec<_> = export
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::DrawImage(..)))
        .collect();
    assert_eq!(export.ops()[0], SurfaceOp::Scale(2.0, 2.0));
    assert_eq!(draws, vec![&SurfaceOp::DrawImage(ImageId(1), 2.5, 2.5, 15.0, 15.0)]);
    assert_eq!(board.export_size(2.0), (2048.0, 1024.0));
}

#[test]
fn svg_export_has_one_node_per_drawable() {
    let mut board = Whiteboard::new(BoardConfig::default());
    let mut surface = Recorder::new();
    drag(&mut board, &mut surface, &[(0.0, 0.0), (10.0, 0.0)]);
    drag(&mut board, &mut surface, &[(20.0, 20.0)]);
    board.select_mark(&mut surface, glyph("🍀"));
    board.pointer_down(&mut surface, Point::new(5.0, 5.0));

    let mut svg = SvgSurface::new(1024.0, 512.0).with_background(true);
    board.export(&mut svg, 1.0);
    let out = svg.finish();

    assert_eq!(out.matches("<path").count(), 1);
    assert_eq!(out.matches("<text").count(), 1);
    assert!(out.contains("stroke-linecap=\"square\""));
}

#[test]
fn second_press_does_not_split_the_stroke() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    board.pointer_down(&mut surface, Point::new(0.0, 0.0));
    board.pointer_down(&mut surface, Point::new(100.0, 100.0));
    board.pointer_move(&mut surface, Point::new(1.0, 1.0));
    board.pointer_up(&mut surface);

    assert_eq!(board.history().len(), 1);
    let stroke = board.history().snapshot()[0].as_stroke().unwrap();
    assert_eq!(stroke.points(), &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
}

#[test]
fn selecting_a_brush_drops_the_sticker_preview() {
    let mut board = Whiteboard::default();
    let mut surface = Recorder::new();
    board.select_mark(&mut surface, glyph("😀"));
    board.pointer_move(&mut surface, Point::new(30.0, 40.0));
    assert!(board.preview().is_some());

    board.select_brush(&mut surface, 10.0);
    assert!(board.preview().is_none());
    assert!(!surface
        .last_frame()
        .iter()
        .any(|op| matches!(op, SurfaceOp::FillText(..) | SurfaceOp::Arc(..))));

    board.pointer_move(&mut surface, Point::new(31.0, 41.0));
    let preview = board.preview().unwrap();
    assert_eq!(preview.diameter(), Some(10.0));
    assert_eq!(preview.content(), None);
}
