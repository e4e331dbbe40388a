//! Integration tests: drawing pad controller (dp-editor ↔ dp-render).
//!
//! Drives `DrawingPad` with a software raster and recording fakes for the
//! page-facing boundaries, the way the browser bridge drives it with DOM
//! events.

use dp_core::model::{Color, Preview, Region, StrokeStyle, Visibility};
use dp_core::{
    PadConfig, PadError, PixelBuffer, Point, PreviewTarget, Rect, RegionView, SubmitChannel,
    Surface,
};
use dp_editor::{DrawingPad, InputEvent};
use dp_render::Raster;
use pretty_assertions::assert_eq;

// ─── Fakes ──────────────────────────────────────────────────────────────

/// Raster that also records every stroked segment.
struct RecordingSurface {
    raster: Raster,
    segments: Vec<(Point, Point)>,
}

impl RecordingSurface {
    fn new(origin: Point) -> Self {
        Self {
            raster: Raster::new(280, 280).with_origin(origin),
            segments: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.raster.size()
    }

    fn client_rect(&self) -> Rect {
        self.raster.client_rect()
    }

    fn fill(&mut self, color: Color) {
        self.raster.fill(color);
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.segments.push((from, to));
        self.raster.stroke_segment(from, to, style);
    }

    fn read_rgba(&self) -> Result<Vec<u8>, PadError> {
        self.raster.read_rgba()
    }

    fn preview(&self) -> Result<Preview, PadError> {
        self.raster.preview()
    }
}

#[derive(Default)]
struct RecordingChannel {
    sent: Vec<(String, PixelBuffer)>,
    fail: bool,
}

impl SubmitChannel for RecordingChannel {
    fn submit(&mut self, channel: &str, pixels: &PixelBuffer) -> Result<(), PadError> {
        if self.fail {
            return Err(PadError::Backend("Shiny is not defined".into()));
        }
        self.sent.push((channel.to_string(), pixels.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingRegions {
    calls: Vec<(Region, bool)>,
    fail: bool,
}

impl RegionView for RecordingRegions {
    fn set_visible(&mut self, region: Region, visible: bool) -> Result<(), PadError> {
        if self.fail {
            return Err(PadError::MissingElement(region.name().to_string()));
        }
        self.calls.push((region, visible));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPreview {
    shown: usize,
}

impl PreviewTarget for RecordingPreview {
    fn show_preview(&mut self, preview: Preview) -> Result<(), PadError> {
        assert!(matches!(preview, Preview::Png(_)));
        self.shown += 1;
        Ok(())
    }
}

type TestPad = DrawingPad<RecordingSurface, RecordingChannel, RecordingRegions, RecordingPreview>;

const ORIGIN: Point = Point::new(100.0, 50.0);

fn build_pad_with_regions(
    channel: RecordingChannel,
    regions: RecordingRegions,
    config: PadConfig,
) -> TestPad {
    let _ = env_logger::builder().is_test(true).try_init();
    DrawingPad::new(
        RecordingSurface::new(ORIGIN),
        channel,
        regions,
        RecordingPreview::default(),
        config,
    )
    .unwrap()
}

fn build_pad(channel: RecordingChannel, config: PadConfig) -> TestPad {
    build_pad_with_regions(channel, RecordingRegions::default(), config)
}

fn make_pad_with(config: PadConfig) -> TestPad {
    build_pad(RecordingChannel::default(), config)
}

fn make_pad() -> TestPad {
    make_pad_with(PadConfig::default())
}

/// Client coordinates for a point on the surface.
fn client(x: f64, y: f64) -> (f64, f64) {
    (ORIGIN.x + x, ORIGIN.y + y)
}

fn down(pad: &mut TestPad, x: f64, y: f64) {
    let (cx, cy) = client(x, y);
    pad.handle(&InputEvent::from_pointer_down(cx, cy, 1)).unwrap();
}

fn drag(pad: &mut TestPad, x: f64, y: f64) -> bool {
    let (cx, cy) = client(x, y);
    pad.handle(&InputEvent::from_pointer_move(cx, cy, 1)).unwrap()
}

fn draw_horizontal_line(pad: &mut TestPad, y: f64) {
    down(pad, 0.0, y);
    drag(pad, 140.0, y);
    drag(pad, 280.0, y);
}

// ─── Construction ───────────────────────────────────────────────────────

#[test]
fn new_pad_is_black_and_capturing() {
    let pad = make_pad();
    assert!(pad.is_capturing());
    assert_eq!(pad.position(), Point::ZERO);
    let pixels = pad.extract().unwrap();
    assert_eq!(pixels.len(), 78_400);
    assert!(pixels.is_blank());
    assert!(pad.regions().calls.is_empty(), "construction must not touch regions");
}

#[test]
fn rejects_surface_config_size_mismatch() {
    let config = PadConfig {
        width: 28,
        height: 28,
        ..PadConfig::default()
    };
    let result = DrawingPad::new(
        RecordingSurface::new(ORIGIN),
        RecordingChannel::default(),
        RecordingRegions::default(),
        RecordingPreview::default(),
        config,
    );
    assert!(matches!(result, Err(PadError::InvalidConfig(_))));
}

// ─── Pointer threading ──────────────────────────────────────────────────

#[test]
fn pointer_down_records_position_relative_to_surface() {
    let mut pad = make_pad();
    down(&mut pad, 30.0, 45.0);
    assert_eq!(pad.position(), Point::new(30.0, 45.0));

    let (cx, cy) = client(5.0, 6.0);
    pad.handle(&InputEvent::from_pointer_enter(cx, cy, 0)).unwrap();
    assert_eq!(pad.position(), Point::new(5.0, 6.0));
}

#[test]
fn n_moves_paint_n_connected_segments() {
    let mut pad = make_pad();
    let path = [(20.0, 20.0), (40.0, 25.0), (60.0, 60.0), (61.0, 90.0), (100.0, 100.0)];

    down(&mut pad, 10.0, 10.0);
    for &(x, y) in &path {
        assert!(drag(&mut pad, x, y));
    }

    let segments = &pad.surface().segments;
    assert_eq!(segments.len(), path.len());
    assert_eq!(pad.segments_painted(), path.len() as u64);

    let mut prev = Point::new(10.0, 10.0);
    for (segment, &(x, y)) in segments.iter().zip(&path) {
        let next = Point::new(x, y);
        assert_eq!(*segment, (prev, next));
        prev = next;
    }
    assert_eq!(pad.preview_target().shown, path.len());
}

#[test]
fn moves_without_primary_button_have_no_effect() {
    let mut pad = make_pad();
    down(&mut pad, 10.0, 10.0);

    for buttons in [0, 2, 3, 4, 7] {
        let (cx, cy) = client(200.0, 200.0);
        let painted = pad
            .handle(&InputEvent::from_pointer_move(cx, cy, buttons))
            .unwrap();
        assert!(!painted);
    }

    assert!(pad.surface().segments.is_empty());
    assert_eq!(pad.preview_target().shown, 0);
    assert!(pad.extract().unwrap().is_blank());
    // Position is only threaded by drawing moves
    assert_eq!(pad.position(), Point::new(10.0, 10.0));
}

#[test]
fn double_begin_capture_does_not_duplicate_segments() {
    let mut pad = make_pad();
    assert!(!pad.begin_capture());
    assert!(!pad.begin_capture());

    down(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    drag(&mut pad, 90.0, 10.0);

    assert_eq!(pad.surface().segments.len(), 2);
}

#[test]
fn events_ignored_while_capture_off() {
    let mut pad = make_pad();
    assert!(pad.end_capture());
    assert!(!pad.end_capture());

    down(&mut pad, 10.0, 10.0);
    assert!(!drag(&mut pad, 50.0, 50.0));
    assert_eq!(pad.position(), Point::ZERO);
    assert!(pad.surface().segments.is_empty());
}

// ─── Raster contents ────────────────────────────────────────────────────

#[test]
fn clear_then_extract_is_all_zero() {
    let mut pad = make_pad();
    draw_horizontal_line(&mut pad, 140.0);
    assert!(!pad.extract().unwrap().is_blank());

    pad.clear();
    let pixels = pad.extract().unwrap();
    assert_eq!(pixels.len(), 78_400);
    assert!(pixels.as_slice().iter().all(|&v| v == 0));
}

#[test]
fn full_width_stroke_lights_its_band_only() {
    let mut pad = make_pad();
    draw_horizontal_line(&mut pad, 140.0);
    let pixels = pad.extract().unwrap();

    for x in 0..280 {
        assert_eq!(pixels.get(x, 140), Some(255), "midline at x={x}");
    }
    for y in 130..=150 {
        assert!(pixels.row(y).unwrap().iter().all(|&v| v == 255), "row {y}");
    }
    for y in (0..110).chain(170..280) {
        assert!(pixels.row(y).unwrap().iter().all(|&v| v == 0), "row {y}");
    }
}

// ─── Composites ─────────────────────────────────────────────────────────

#[test]
fn submit_sends_buffer_and_swaps_regions() {
    let mut pad = make_pad();
    draw_horizontal_line(&mut pad, 140.0);
    pad.submit().unwrap();

    assert!(!pad.is_capturing());
    let sent = &pad.channel().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "canvas_image");
    assert_eq!(sent[0].1.len(), 78_400);
    assert_eq!(sent[0].1.get(10, 140), Some(255));

    let states = pad.states();
    assert_eq!(states.count_plot, Visibility::Hidden);
    assert_eq!(states.count_matrix, Visibility::Hidden);
    assert_eq!(states.prob_plot, Visibility::Shown);
    assert!(!states.capturing);
}

#[test]
fn submit_regions_are_independent_of_prior_state() {
    let mut pad = make_pad();
    pad.hide_prediction().unwrap();
    pad.show_result_plots().unwrap();
    pad.submit().unwrap();
    pad.submit().unwrap();

    let states = pad.states();
    assert_eq!(states.count_plot, Visibility::Hidden);
    assert_eq!(states.count_matrix, Visibility::Hidden);
    assert_eq!(states.prob_plot, Visibility::Shown);
    assert_eq!(
        &pad.regions().calls[pad.regions().calls.len() - 3..],
        &[
            (Region::CountPlot, false),
            (Region::CountMatrix, false),
            (Region::ProbPlot, true),
        ]
    );
}

#[test]
fn strokes_after_submit_are_ignored_until_reset() {
    let mut pad = make_pad();
    pad.submit().unwrap();
    down(&mut pad, 10.0, 10.0);
    assert!(!drag(&mut pad, 200.0, 200.0));
    assert!(pad.extract().unwrap().is_blank());

    pad.reset().unwrap();
    down(&mut pad, 10.0, 10.0);
    assert!(drag(&mut pad, 200.0, 200.0));
}

#[test]
fn reset_restores_initial_state() {
    let mut pad = make_pad();
    draw_horizontal_line(&mut pad, 100.0);
    pad.submit().unwrap();
    pad.reset().unwrap();

    let states = pad.states();
    assert_eq!(states.count_plot, Visibility::Shown);
    assert_eq!(states.count_matrix, Visibility::Shown);
    assert_eq!(states.prob_plot, Visibility::Hidden);
    assert!(states.capturing);
    assert!(pad.extract().unwrap().is_blank());
}

#[test]
fn failed_submit_still_transitions_regions() {
    let failing = RecordingChannel {
        fail: true,
        ..RecordingChannel::default()
    };
    let mut pad = build_pad(failing, PadConfig::default());
    let err = pad.submit().unwrap_err();
    assert!(matches!(err, PadError::Backend(_)));

    let states = pad.states();
    assert_eq!(states.count_plot, Visibility::Hidden);
    assert_eq!(states.prob_plot, Visibility::Shown);
}

#[test]
fn submit_error_takes_precedence_over_region_error() {
    let failing = RecordingChannel {
        fail: true,
        ..RecordingChannel::default()
    };
    let broken = RecordingRegions {
        fail: true,
        ..RecordingRegions::default()
    };
    let mut pad = build_pad_with_regions(failing, broken, PadConfig::default());
    let err = pad.submit().unwrap_err();
    assert!(matches!(err, PadError::Backend(_)), "got {err:?}");
    assert!(!pad.is_capturing());
}

#[test]
fn region_error_surfaces_when_submit_succeeds() {
    let broken = RecordingRegions {
        fail: true,
        ..RecordingRegions::default()
    };
    let mut pad =
        build_pad_with_regions(RecordingChannel::default(), broken, PadConfig::default());
    let err = pad.submit().unwrap_err();
    assert!(matches!(err, PadError::MissingElement(_)), "got {err:?}");
    assert_eq!(pad.channel().sent.len(), 1);
}

#[test]
fn downsample_config_sends_mnist_sized_buffer() {
    let config = PadConfig {
        downsample: Some(10),
        ..PadConfig::default()
    };
    let mut pad = make_pad_with(config);
    draw_horizontal_line(&mut pad, 140.0);
    pad.submit().unwrap();

    let (_, pixels) = &pad.channel().sent[0];
    assert_eq!((pixels.width(), pixels.height()), (28, 28));
    // Rows 13 and 14 cover source rows 130..150, fully inked
    assert_eq!(pixels.get(5, 13), Some(255));
    assert_eq!(pixels.get(5, 14), Some(255));
    assert_eq!(pixels.get(5, 2), Some(0));
}
