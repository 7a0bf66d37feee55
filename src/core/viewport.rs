use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Fraction of the series removed from view per zoom step.
const ZOOM_STEP_FRACTION: f64 = 0.05;
/// Smallest visible fraction reachable by zooming in.
const MIN_VISIBLE_FRACTION: f64 = 0.05;
/// Zooming out past this visible fraction snaps back to the full view.
const SNAP_OUT_FRACTION: f64 = 0.97;
/// Zoom level of the first step in from the full view (~95% visible).
const FIRST_ZOOM_LEVEL: f64 = 1.053;
/// Zoom level entered when panning starts from the full view (50% visible).
const PAN_ENTRY_ZOOM_LEVEL: f64 = 2.0;
/// A derived window covering at least this share of all points snaps to full.
const FULL_COVERAGE_FRACTION: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Full,
    Zoomed,
}

/// Zoom/pan state machine over an already-derived series.
///
/// The visible window is recomputed deterministically from
/// `(zoom_level, center_index, mode, len)` alone, so replaying the same
/// transition sequence on the same series always yields the same window.
/// Every transition is total; no input sequence reaches an error state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportController {
    zoom_level: f64,
    center_index: usize,
    mode: ViewMode,
    len: usize,
}

impl ViewportController {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            zoom_level: 1.0,
            center_index: len / 2,
            mode: ViewMode::Full,
            len,
        }
    }

    /// Resets to the full view whenever the underlying series changes.
    pub fn set_series_len(&mut self, len: usize) {
        self.len = len;
        self.reset();
    }

    #[must_use]
    pub fn mode(self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn zoom_level(self) -> f64 {
        self.zoom_level
    }

    #[must_use]
    pub fn center_index(self) -> usize {
        self.center_index
    }

    #[must_use]
    pub fn series_len(self) -> usize {
        self.len
    }

    /// Fraction of the series the current zoom level keeps visible.
    #[must_use]
    pub fn visible_fraction(self) -> f64 {
        1.0 / self.zoom_level
    }

    /// Shrinks the visible fraction by one step, floored at 5% visible.
    pub fn zoom_in(&mut self) {
        self.zoom_level = if self.mode == ViewMode::Full {
            FIRST_ZOOM_LEVEL
        } else {
            let fraction =
                (self.visible_fraction() - ZOOM_STEP_FRACTION).max(MIN_VISIBLE_FRACTION);
            1.0 / fraction
        };
        self.mode = ViewMode::Zoomed;
        trace!(zoom = self.zoom_level, "zoom in");
    }

    /// Grows the visible fraction by one step.
    ///
    /// Reversing the first zoom-in level, or crossing 97% visible, snaps
    /// back to the full view instead of leaving a near-full zoomed state
    /// that would oscillate on floating-point noise.
    pub fn zoom_out(&mut self) {
        if (self.zoom_level - FIRST_ZOOM_LEVEL).abs() < 0.01 {
            self.reset();
            return;
        }

        let fraction = (self.visible_fraction() + ZOOM_STEP_FRACTION).min(1.0);
        if fraction > SNAP_OUT_FRACTION {
            self.reset();
            return;
        }

        self.zoom_level = 1.0 / fraction;
        self.mode = ViewMode::Zoomed;
        trace!(zoom = self.zoom_level, "zoom out");
    }

    pub fn pan_left(&mut self) {
        self.enter_zoom_for_pan();
        self.center_index = self.center_index.saturating_sub(self.pan_step());
        trace!(center = self.center_index, "pan left");
    }

    pub fn pan_right(&mut self) {
        self.enter_zoom_for_pan();
        self.center_index = (self.center_index + self.pan_step()).min(self.len.saturating_sub(1));
        trace!(center = self.center_index, "pan right");
    }

    /// Unconditionally returns to the full view, centered on the series.
    pub fn reset(&mut self) {
        self.zoom_level = 1.0;
        self.center_index = self.len / 2;
        self.mode = ViewMode::Full;
    }

    /// Derives the currently visible index range.
    ///
    /// A zoomed window covering 99% or more of the series snaps the
    /// controller back to the full view before returning.
    pub fn visible_window(&mut self) -> Range<usize> {
        if self.mode == ViewMode::Zoomed && self.zoomed_window_covers_series() {
            self.reset();
        }
        self.current_window()
    }

    /// The visible index range for the current state, without snapping.
    #[must_use]
    pub fn current_window(&self) -> Range<usize> {
        match self.mode {
            ViewMode::Full => 0..self.len,
            ViewMode::Zoomed => self.zoomed_window(),
        }
    }

    fn enter_zoom_for_pan(&mut self) {
        if self.mode == ViewMode::Full {
            self.mode = ViewMode::Zoomed;
            self.zoom_level = PAN_ENTRY_ZOOM_LEVEL;
        }
    }

    fn pan_step(&self) -> usize {
        let step = (self.len as f64 / self.zoom_level / 4.0).ceil() as usize;
        step.max(1)
    }

    fn points_to_show(&self) -> usize {
        (self.len as f64 / self.zoom_level).ceil() as usize
    }

    /// Half-open zoomed range centered on `center_index`, re-clamped at
    /// whichever edge it hits so the window keeps its full point budget
    /// unless that would exceed the series.
    fn zoomed_window(&self) -> Range<usize> {
        if self.len == 0 {
            return 0..0;
        }

        let points = self.points_to_show();
        let center = self.center_index as f64;
        let half = points as f64 / 2.0;

        let mut start = (center - half).floor().max(0.0) as usize;
        let mut end = ((center + half).floor() as usize).min(self.len - 1);

        if start == 0 {
            end = points.saturating_sub(1).min(self.len - 1);
        } else if end == self.len - 1 {
            start = self.len.saturating_sub(points);
        }

        start..end + 1
    }

    fn zoomed_window_covers_series(&self) -> bool {
        let window = self.zoomed_window();
        window.len() as f64 >= self.len as f64 * FULL_COVERAGE_FRACTION
    }
}
