//! Edge case tests for pane-render
//!
//! Boundary conditions of the compositing primitives the layout engine relies on.

use pane_render::*;

// ============================================================================
// COLOR EDGE CASES
// ============================================================================

#[test]
fn test_color_equality() {
    assert_eq!(Color::rgb(255, 0, 0), Color::RED);
    assert_ne!(Color::rgb(255, 0, 0), Color::rgb(254, 0, 0));
}

#[test]
fn test_color_from_hex_edge_cases() {
    assert!(Color::from_hex("#000000").is_some());
    assert!(Color::from_hex("#fff").is_some());
    assert!(Color::from_hex("").is_none());
    assert!(Color::from_hex("#").is_none());
    assert!(Color::from_hex("#gg0000").is_none());
    assert!(Color::from_hex("1234567890").is_none());
}

#[test]
fn test_double_invert_is_identity() {
    let c = Color::rgba(12, 34, 56, 78);
    assert_eq!(c.invert().invert(), c);
}

// ============================================================================
// CANVAS EDGE CASES
// ============================================================================

#[test]
fn test_canvas_zero_size_is_valid() {
    let canvas = Canvas::new(0, 0, Color::WHITE);
    assert!(canvas.is_empty());
    assert_eq!(canvas.as_bytes().len(), 0);

    let canvas = Canvas::new(0, 100, Color::WHITE);
    assert_eq!(canvas.size(), (0, 100));
}

#[test]
fn test_paste_fully_outside() {
    let mut canvas = Canvas::new(10, 10, Color::WHITE);
    canvas.paste(&Canvas::new(5, 5, Color::RED), 20, 20);
    canvas.paste(&Canvas::new(5, 5, Color::RED), -10, -10);
    assert!(canvas.as_bytes().chunks(4).all(|p| p == [255, 255, 255, 255]));
}

#[test]
fn test_paste_masked_with_circle() {
    let mut canvas = Canvas::new(40, 40, Color::TRANSPARENT);
    let content = Canvas::new(40, 40, Color::GREEN);
    canvas.paste_masked(&content, 0, 0, &AlphaMask::ellipse(40, 40));
    assert_eq!(canvas.get_pixel(20, 20), Some(Color::GREEN));
    assert_eq!(canvas.get_pixel(0, 0), Some(Color::TRANSPARENT));
}

#[test]
fn test_fill_rect_clips() {
    let mut canvas = Canvas::new(10, 10, Color::WHITE);
    canvas.fill_rect(-5, -5, 8, 8, Color::BLACK);
    assert_eq!(canvas.get_pixel(0, 0), Some(Color::BLACK));
    assert_eq!(canvas.get_pixel(2, 2), Some(Color::BLACK));
    assert_eq!(canvas.get_pixel(3, 3), Some(Color::WHITE));
}

#[test]
fn test_pie_slices_form_capsule_ends() {
    let mut canvas = Canvas::new(60, 20, Color::TRANSPARENT);
    canvas.fill_pie_slice(0.0, 0.0, 20.0, 20.0, 90.0, 270.0, Color::RED);
    canvas.fill_pie_slice(40.0, 0.0, 20.0, 20.0, -90.0, 90.0, Color::BLUE);
    assert_eq!(canvas.get_pixel(3, 10), Some(Color::RED));
    assert_eq!(canvas.get_pixel(56, 10), Some(Color::BLUE));
    assert_eq!(canvas.get_pixel(30, 10), Some(Color::TRANSPARENT));
}

#[test]
fn test_png_roundtrip_through_memory() {
    let dir = std::env::temp_dir().join(format!("pane-render-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("roundtrip.png");

    let mut canvas = Canvas::new(3, 2, Color::rgba(1, 2, 3, 4));
    canvas.set_pixel(2, 1, Color::RED);
    canvas.save_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let decoded = Canvas::decode(&bytes).unwrap();
    assert_eq!(decoded, canvas);
    assert_eq!(Canvas::open(&path).unwrap(), canvas);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_decode_garbage_fails() {
    assert!(matches!(Canvas::decode(b"not an image"), Err(RenderError::Decode(_))));
}
