//! Boundary naming and the inflow profile.

use std::fmt;

use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// Named boundary segment of a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryName {
    /// Walls. On the channel this also covers the lower wall and the obstacle.
    Top,
    /// Lower wall of a structured square.
    Bottom,
    /// Inflow segment.
    Left,
    /// Outflow segment.
    Right,
}

impl BoundaryName {
    /// Lowercase name as used by mesh generators.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryName::Top => "top",
            BoundaryName::Bottom => "bottom",
            BoundaryName::Left => "left",
            BoundaryName::Right => "right",
        }
    }
}

impl fmt::Display for BoundaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parabolic velocity profile prescribed on the inflow segment.
///
/// `u(y) = peak * 4 * y * (height - y) / height^2` in the x direction, zero in y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InflowProfile {
    /// Velocity at mid-height.
    pub peak: f64,
    /// Channel height the profile vanishes at.
    pub height: f64,
}

impl Default for InflowProfile {
    fn default() -> Self {
        Self {
            peak: 1.5,
            height: 0.41,
        }
    }
}

impl InflowProfile {
    /// Evaluate the profile at a boundary point.
    ///
    /// # Examples
    /// ```
    /// use festokes::InflowProfile;
    /// use nalgebra::Point2;
    ///
    /// let profile = InflowProfile::default();
    /// let middle = profile.velocity(&Point2::new(0.0, 0.205));
    /// assert!((middle.x - 1.5).abs() < 1.0e-12);
    /// assert_eq!(middle.y, 0.0);
    /// ```
    #[must_use]
    pub fn velocity(&self, at: &Point2<f64>) -> Vector2<f64> {
        let y = at.y;
        let ux = self.peak * 4.0 * y * (self.height - y) / (self.height * self.height);
        Vector2::new(ux, 0.0)
    }
}

/// Boundary segment a point on the unit square lies on, if any.
///
/// Corners belong to the bottom or top segments.
#[must_use]
pub fn unit_square_side(at: &Point2<f64>) -> Option<BoundaryName> {
    const TOL: f64 = 1.0e-12;
    if at.y.abs() < TOL {
        Some(BoundaryName::Bottom)
    } else if (at.y - 1.0).abs() < TOL {
        Some(BoundaryName::Top)
    } else if at.x.abs() < TOL {
        Some(BoundaryName::Left)
    } else if (at.x - 1.0).abs() < TOL {
        Some(BoundaryName::Right)
    } else {
        None
    }
}
