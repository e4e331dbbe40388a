//! The drawing pad controller.
//!
//! Owns the surface and the pointer position, paints one round-capped
//! segment per primary-button move, and drives the result regions through
//! the submit/reset composites. Every page-facing collaborator is injected
//! through the traits in `dp_core::surface`.

use crate::capture::StrokeCapture;
use crate::input::InputEvent;
use dp_core::model::{BACKGROUND, Region, RegionStates, StrokeStyle, Visibility};
use dp_core::{
    PadConfig, PadError, PixelBuffer, Point, PreviewTarget, RegionView, SubmitChannel, Surface,
};

pub struct DrawingPad<S, C, V, P> {
    surface: S,
    channel: C,
    regions: V,
    preview: P,
    config: PadConfig,
    pen: StrokeStyle,
    /// Last recorded pointer position, relative to the surface.
    position: Point,
    capture: StrokeCapture,
    states: RegionStates,
    segments: u64,
}

impl<S, C, V, P> DrawingPad<S, C, V, P>
where
    S: Surface,
    C: SubmitChannel,
    V: RegionView,
    P: PreviewTarget,
{
    /// Wire up a pad and paint the surface black. Capture starts enabled.
    ///
    /// # Errors
    /// Fails if `config` is invalid or the surface size differs from it.
    pub fn new(
        mut surface: S,
        channel: C,
        regions: V,
        preview: P,
        config: PadConfig,
    ) -> Result<Self, PadError> {
        config.validate()?;
        let (width, height) = surface.size();
        if (width, height) != (config.width, config.height) {
            return Err(PadError::InvalidConfig(format!(
                "surface is {width}x{height}, config expects {}x{}",
                config.width, config.height
            )));
        }

        surface.fill(BACKGROUND);
        log::debug!("pad ready: {width}x{height}, pen {}px", config.line_width);

        Ok(Self {
            surface,
            channel,
            regions,
            preview,
            pen: StrokeStyle::pen(config.line_width),
            config,
            position: Point::ZERO,
            capture: StrokeCapture::new(),
            states: RegionStates::default(),
            segments: 0,
        })
    }

    // ─── Stroke capture ──────────────────────────────────────────────────

    /// Start accepting strokes. Returns `false` if already capturing.
    pub fn begin_capture(&mut self) -> bool {
        let changed = self.capture.begin();
        if changed {
            log::debug!("stroke capture on");
        }
        changed
    }

    /// Stop accepting strokes. Returns `false` if not capturing.
    pub fn end_capture(&mut self) -> bool {
        let changed = self.capture.end();
        if changed {
            log::debug!("stroke capture off");
        }
        changed
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }

    /// Dispatch one pointer event. Returns `true` if a segment was painted.
    ///
    /// Events arriving while capture is off are ignored entirely.
    pub fn handle(&mut self, event: &InputEvent) -> Result<bool, PadError> {
        if !self.capture.is_active() {
            return Ok(false);
        }
        match event {
            InputEvent::PointerEnter { .. } | InputEvent::PointerDown { .. } => {
                self.update_position(event);
                Ok(false)
            }
            InputEvent::PointerMove { .. } => self.render_segment(event),
        }
    }

    /// Record the event position relative to the surface's on-screen rectangle.
    pub fn update_position(&mut self, event: &InputEvent) {
        self.position = event.relative_to(self.surface.client_rect());
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Paint one segment from the previous position to the event position,
    /// then refresh the preview. No-op unless exactly the primary button is
    /// held.
    pub fn render_segment(&mut self, event: &InputEvent) -> Result<bool, PadError> {
        if !event.is_drawing() {
            return Ok(false);
        }

        let from = self.position;
        self.update_position(event);
        let to = self.position;

        self.surface.stroke_segment(from, to, &self.pen);
        self.segments += 1;
        log::trace!("segment ({:.1},{:.1}) -> ({:.1},{:.1})", from.x, from.y, to.x, to.y);

        let preview = self.surface.preview()?;
        self.preview.show_preview(preview)?;
        Ok(true)
    }

    /// Number of segments painted since construction.
    pub fn segments_painted(&self) -> u64 {
        self.segments
    }

    // ─── Surface ─────────────────────────────────────────────────────────

    /// Repaint the whole surface black.
    pub fn clear(&mut self) {
        self.surface.fill(BACKGROUND);
    }

    /// Grayscale snapshot of the surface at full resolution.
    pub fn extract(&self) -> Result<PixelBuffer, PadError> {
        let (width, height) = self.surface.size();
        let rgba = self.surface.read_rgba()?;
        PixelBuffer::from_rgba(&rgba, width, height)
    }

    /// Extract the pixel buffer (downsampled if configured) and hand it to
    /// the submit channel.
    pub fn extract_and_submit(&mut self) -> Result<PixelBuffer, PadError> {
        let mut pixels = self.extract()?;
        if let Some(factor) = self.config.downsample {
            pixels = pixels.downsample(factor)?;
        }
        log::debug!(
            "submitting {} pixels ({}x{}) to '{}'",
            pixels.len(),
            pixels.width(),
            pixels.height(),
            self.config.input_channel
        );
        self.channel.submit(&self.config.input_channel, &pixels)?;
        Ok(pixels)
    }

    // ─── Result regions ──────────────────────────────────────────────────

    pub fn hide_result_plots(&mut self) -> Result<(), PadError> {
        for region in Region::RESULT_PLOTS {
            self.set_region(region, Visibility::Hidden)?;
        }
        Ok(())
    }

    pub fn show_result_plots(&mut self) -> Result<(), PadError> {
        for region in Region::RESULT_PLOTS {
            self.set_region(region, Visibility::Shown)?;
        }
        Ok(())
    }

    pub fn hide_prediction(&mut self) -> Result<(), PadError> {
        self.set_region(Region::ProbPlot, Visibility::Hidden)
    }

    pub fn show_prediction(&mut self) -> Result<(), PadError> {
        self.set_region(Region::ProbPlot, Visibility::Shown)
    }

    fn set_region(&mut self, region: Region, visibility: Visibility) -> Result<(), PadError> {
        self.regions.set_visible(region, visibility.is_shown())?;
        self.states.set(region, visibility);
        Ok(())
    }

    /// Current UI-state flags.
    pub fn states(&self) -> RegionStates {
        RegionStates {
            capturing: self.capture.is_active(),
            ..self.states
        }
    }

    // ─── Composites ──────────────────────────────────────────────────────

    /// Stop drawing, send the image, and swap the result plots for the
    /// prediction.
    ///
    /// The region transitions are applied even when the submit fails. The
    /// submit error takes precedence over a region error; both are logged.
    pub fn submit(&mut self) -> Result<(), PadError> {
        // Stop painting before reading the raster back
        self.end_capture();
        let submitted = self.extract_and_submit();
        if let Err(err) = &submitted {
            log::warn!("image submit failed: {err}");
        }
        let swapped = self
            .hide_result_plots()
            .and_then(|()| self.show_prediction());
        if let Err(err) = &swapped {
            log::warn!("result region update failed: {err}");
        }
        submitted.map(|_| ()).and(swapped)
    }

    /// Clear the drawing, re-enable capture, and restore the result plots.
    pub fn reset(&mut self) -> Result<(), PadError> {
        self.clear();
        self.begin_capture();
        self.show_result_plots()?;
        self.hide_prediction()?;
        log::debug!("pad reset");
        Ok(())
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn regions(&self) -> &V {
        &self.regions
    }

    pub fn preview_target(&self) -> &P {
        &self.preview
    }
}
