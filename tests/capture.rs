use egui::{Pos2, Rect, vec2};
use image::Rgba;
use overlay_paint::assets::placeholder_backdrop;
use overlay_paint::capture::{Scene, capture};
use overlay_paint::command::Command;
use overlay_paint::editor::Editor;
use overlay_paint::error::CaptureError;
use overlay_paint::palette::PaletteIndex;
use overlay_paint::stroke::{Stroke, StrokeRef, StrokeStyle};
use overlay_paint::style::{StyleState, Variant};

fn canvas_rect() -> Rect {
    Rect::from_min_size(Pos2::new(40.0, 60.0), vec2(200.0, 300.0))
}

fn black_line() -> Stroke {
    let style = StrokeStyle {
        color_index: PaletteIndex::new(0),
        thickness: 6.0,
        opacity: None,
    };
    Stroke::new(style, vec![Pos2::new(20.0, 150.0), Pos2::new(180.0, 150.0)])
}

#[test]
fn test_bitmap_matches_region_size() {
    let backdrop = placeholder_backdrop();
    let strokes: Vec<StrokeRef> = vec![black_line().into()];
    let scene = Scene {
        canvas_rect: canvas_rect(),
        backdrop: &backdrop,
        strokes: &strokes,
    };

    let captured = capture(canvas_rect(), &scene, 1.0).unwrap();
    assert_eq!(captured.size(), [200, 300]);
    assert_eq!(captured.region(), canvas_rect());

    let hidpi = capture(canvas_rect(), &scene, 2.0).unwrap();
    assert_eq!(hidpi.size(), [400, 600]);
}

#[test]
fn test_stroke_pixels_carry_stroke_color() {
    let backdrop = placeholder_backdrop();
    let strokes: Vec<StrokeRef> = vec![black_line().into()];
    let scene = Scene {
        canvas_rect: canvas_rect(),
        backdrop: &backdrop,
        strokes: &strokes,
    };

    let captured = capture(canvas_rect(), &scene, 1.0).unwrap();
    let image = captured.image();
    assert_eq!(image.get_pixel(100, 150), &Rgba([0, 0, 0, 255]));
    // Far from the line only the backdrop shows
    assert_eq!(image.get_pixel(100, 20), backdrop.get_pixel(100, 20));
}

#[test]
fn test_degenerate_strokes_leave_backdrop_untouched() {
    let backdrop = placeholder_backdrop();
    let style = black_line().style();
    let strokes: Vec<StrokeRef> = vec![Stroke::new(style, vec![Pos2::new(50.0, 50.0)]).into()];
    let scene = Scene {
        canvas_rect: canvas_rect(),
        backdrop: &backdrop,
        strokes: &strokes,
    };

    let captured = capture(canvas_rect(), &scene, 1.0).unwrap();
    assert_eq!(captured.image(), &backdrop);
}

#[test]
fn test_empty_region_is_an_error() {
    let backdrop = placeholder_backdrop();
    let scene = Scene {
        canvas_rect: canvas_rect(),
        backdrop: &backdrop,
        strokes: &[],
    };
    let empty = Rect::from_min_size(Pos2::new(40.0, 60.0), vec2(0.0, 300.0));

    let err = capture(empty, &scene, 1.0).unwrap_err();
    assert!(matches!(err, CaptureError::EmptyRegion { .. }));
}

#[test]
fn test_editor_capture_requires_measured_canvas() {
    let backdrop = placeholder_backdrop();
    let mut editor = Editor::new(Variant::FlipCard, StyleState::default());

    let err = editor.capture(None, &backdrop, 1.0).unwrap_err();
    assert_eq!(err, CaptureError::CanvasNotMeasured);
    assert!(editor.captured().is_none());

    editor.capture(Some(canvas_rect()), &backdrop, 1.0).unwrap();
    assert_eq!(editor.captured().map(|c| c.size()), Some([200, 300]));

    editor.dismiss_capture();
    assert!(editor.captured().is_none());
}

#[test]
fn test_overlay_variant_cannot_capture() {
    let backdrop = placeholder_backdrop();
    let mut editor = Editor::new(Variant::Overlay, StyleState::default());

    let err = editor.capture(Some(canvas_rect()), &backdrop, 1.0).unwrap_err();
    assert!(matches!(err, CaptureError::NotAvailable(_)));

    editor.execute(Command::SetVariant(Variant::FlipCard));
    assert!(editor.capture(Some(canvas_rect()), &backdrop, 1.0).is_ok());
}
