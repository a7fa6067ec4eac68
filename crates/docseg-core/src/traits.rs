//! Collaborator interfaces
//!
//! The analysis algorithms never depend on a concrete image or geometry
//! type. They read pixels through [`Raster`], test polygon membership through
//! [`Outline`], and cooperate with long-running callers through
//! [`StopSignal`] and [`ProgressReporter`].

use std::sync::atomic::{AtomicBool, Ordering};

/// Read-only bitonal raster.
///
/// Coordinates passed to [`Raster::is_black`] are always inside
/// `[0, width) x [0, height)`.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Whether the pixel at (x, y) is foreground.
    fn is_black(&self, x: u32, y: u32) -> bool;

    /// Like [`Raster::is_black`], but accepts any coordinate and answers
    /// `border_value` for pixels outside the raster.
    fn is_black_bordered(&self, x: i32, y: i32, border_value: bool) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return border_value;
        }
        self.is_black(x as u32, y as u32)
    }
}

impl<R: Raster + ?Sized> Raster for &R {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        (**self).is_black(x, y)
    }
}

/// Luma threshold below which a gray pixel counts as black.
pub const GRAY_BLACK_THRESHOLD: u8 = 128;

/// A binarized grayscale image: dark pixels are foreground.
impl Raster for image::GrayImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).0[0] < GRAY_BLACK_THRESHOLD
    }
}

/// Closed 2-D region used to select components.
pub trait Outline {
    /// Even-odd membership test. With `include_contour`, points lying on
    /// the outline itself count as inside.
    fn is_point_inside(&self, x: i32, y: i32, include_contour: bool) -> bool;
}

/// Cooperative cancellation, polled by long-running algorithms.
pub trait StopSignal {
    /// Whether the caller asked the running algorithm to stop.
    fn has_stop_signal(&self) -> bool;
}

impl StopSignal for AtomicBool {
    fn has_stop_signal(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Receives progress updates from long-running algorithms.
pub trait ProgressReporter {
    /// Report progress in percent (0..=100).
    fn set_progress(&mut self, percent: u32);
}

impl<F: FnMut(u32)> ProgressReporter for F {
    fn set_progress(&mut self, percent: u32) {
        self(percent)
    }
}
