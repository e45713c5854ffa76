use sketchpad::draw::{CairoSurface, RED, RasterSurface};
use sketchpad::events::{SketchEvent, StatusLevel};
use sketchpad::input::{PointerEvent, Tool};
use sketchpad::surface::{ResizeOutcome, SurfaceOptions};
use sketchpad::util::Size;
use sketchpad::{Config, SketchSurface};
use std::cell::RefCell;
use std::rc::Rc;

fn surface(width: f64, height: f64) -> SketchSurface {
    SketchSurface::from_config(Size::new(width, height), &Config::default()).unwrap()
}

fn drag(surface: &mut SketchSurface, rendered: Size, from: (f64, f64), to: (f64, f64)) {
    surface
        .pointer_down(&PointerEvent::new(from.0, from.1, rendered))
        .unwrap();
    surface
        .pointer_move(&PointerEvent::new(to.0, to.1, rendered))
        .unwrap();
    surface.pointer_up().unwrap();
}

fn exported(surface: &SketchSurface) -> CairoSurface {
    let image = surface.canvas_data().unwrap().expect("canvas has content");
    CairoSurface::from_png(&image.bytes).unwrap()
}

#[test]
fn line_on_scaled_element_lands_in_buffer_pixels() {
    let mut surface = surface(400.0, 300.0);
    surface.set_tool(Tool::Line);
    drag(&mut surface, Size::new(200.0, 150.0), (10.0, 10.0), (100.0, 75.0));

    let transparent = CairoSurface::create(400, 300).unwrap().encode_png().unwrap();
    assert_eq!(surface.overlay().encode_png().unwrap(), transparent);

    let mut image = exported(&surface);
    assert_eq!((image.width(), image.height()), (400, 300));
    assert_eq!(image.pixel(20, 20), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(110, 85), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(10, 150), Some([255, 255, 255, 255]));
}

#[test]
fn rectangle_direction_does_not_matter() {
    let view = Size::new(100.0, 100.0);
    let mut forward = surface(100.0, 100.0);
    forward.set_tool(Tool::Rectangle);
    drag(&mut forward, view, (20.0, 30.0), (80.0, 70.0));

    let mut backward = surface(100.0, 100.0);
    backward.set_tool(Tool::Rectangle);
    drag(&mut backward, view, (80.0, 70.0), (20.0, 30.0));

    assert_eq!(
        forward.canvas_data().unwrap(),
        backward.canvas_data().unwrap()
    );
}

#[test]
fn shape_color_change_mid_gesture_reaches_commit() {
    let view = Size::new(100.0, 100.0);
    let mut surface = surface(100.0, 100.0);
    surface.set_tool(Tool::Line);
    surface
        .pointer_down(&PointerEvent::new(10.0, 50.0, view))
        .unwrap();
    surface
        .pointer_move(&PointerEvent::new(50.0, 50.0, view))
        .unwrap();
    surface.set_color(RED);
    surface
        .pointer_move(&PointerEvent::new(90.0, 50.0, view))
        .unwrap();
    surface.pointer_up().unwrap();

    let mut image = exported(&surface);
    let [r, g, b, a] = image.pixel(50, 50).unwrap();
    assert_eq!((r, a), (255, 255));
    assert!(g < 100 && b < 100);
}

#[test]
fn circle_is_centered_on_anchor() {
    let view = Size::new(200.0, 200.0);
    let mut surface = surface(200.0, 200.0);
    surface.set_tool(Tool::Ellipse);
    drag(&mut surface, view, (100.0, 100.0), (140.0, 100.0));

    let mut image = exported(&surface);
    assert_eq!(image.pixel(140, 100), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(59, 100), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(100, 100), Some([255, 255, 255, 255]));
}

#[test]
fn deferred_resize_then_draw_and_send() {
    let mut surface: SketchSurface =
        SketchSurface::new(Size::new(0.0, 0.0), SurfaceOptions::default()).unwrap();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    surface.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    assert!(matches!(
        surface.request_resize(&Size::new(0.0, 0.0)).unwrap(),
        ResizeOutcome::Deferred { attempt: 1, .. }
    ));
    assert_eq!(
        surface.request_resize(&Size::new(150.5, 90.9)).unwrap(),
        ResizeOutcome::Applied {
            width: 150,
            height: 90
        }
    );
    assert!(surface.is_blank().unwrap());

    drag(&mut surface, Size::new(150.0, 90.0), (10.0, 10.0), (140.0, 80.0));
    assert!(!surface.is_blank().unwrap());

    let sent = surface.send_sketch().unwrap();
    assert_eq!((sent.width, sent.height), (150, 90));
    assert!(sent.to_data_url().starts_with("data:image/png;base64,"));

    surface.clear().unwrap();
    assert_eq!(surface.canvas_data().unwrap(), None);

    assert_eq!(
        *events.borrow(),
        vec![
            SketchEvent::SketchSubmitted(sent),
            SketchEvent::StatusNotify {
                message: "Canvas cleared!".into(),
                level: StatusLevel::Success
            },
        ]
    );
}

#[test]
fn blank_line_clear_round_trip_at_container_size() {
    let view = Size::new(400.0, 300.0);
    let mut surface = surface(400.0, 300.0);
    assert!(surface.is_blank().unwrap());

    surface.set_tool(Tool::Line);
    drag(&mut surface, view, (10.0, 10.0), (100.0, 100.0));
    assert!(!surface.is_blank().unwrap());
    let mut image = exported(&surface);
    assert_eq!(image.pixel(55, 55), Some([0, 0, 0, 255]));

    surface.clear().unwrap();
    assert!(surface.is_blank().unwrap());
    assert_eq!(surface.canvas_data().unwrap(), None);
}
