use crate::Tolerance;

/// Tunable tolerances and scales of an enclosure engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Maximum distance, in pixels, between two coordinates considered the same logical vertex.
    pub epsilon: f64,
    /// Minimum angle, in degrees, allowed between two fences meeting at a vertex.
    pub min_angle: f64,
    /// Amount of pixels representing a real-world meter.
    pub pixels_per_meter: f64,
    /// Radius, in pixels at zoom level 1, within which a drawn endpoint snaps to a connection
    /// point.
    pub snap_distance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            min_angle: 15.,
            pixels_per_meter: 100.,
            snap_distance: 50.,
        }
    }
}

impl Config {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    pub fn with_min_angle(mut self, degrees: f64) -> Self {
        self.min_angle = degrees;
        self
    }

    pub fn with_pixels_per_meter(mut self, pixels: f64) -> Self {
        self.pixels_per_meter = pixels;
        self
    }

    pub fn with_snap_distance(mut self, pixels: f64) -> Self {
        self.snap_distance = pixels.abs();
        self
    }

    /// Returns the tolerance for logical equality of coordinates.
    pub fn tolerance(&self) -> Tolerance<f64> {
        Tolerance::absolute(self.epsilon)
    }

    /// Converts an area in squared pixels into squared meters.
    pub fn square_meters(&self, square_pixels: f64) -> f64 {
        square_pixels / self.pixels_per_meter.powi(2)
    }
}
