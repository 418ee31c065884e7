#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State centroid, bounding-box, and map-framing types.
//!
//! Centroids backfill records that lack coordinates; bounding boxes frame
//! the map view when a single state is selected. Both lookup tables are
//! loaded once and read-only thereafter.

use serde::{Deserialize, Serialize};

/// Fallback map point for a state, used when a record has no coordinates
/// of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateCentroid {
    /// State name as it appears in the primary table.
    pub state: String,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
}

/// Rectangular extent of a state, as `(x1, y1)`–`(x2, y2)` =
/// (min-lon, min-lat)–(max-lon, max-lat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBounds {
    /// State name as it appears in the primary table.
    pub state: String,
    /// Western edge (minimum longitude).
    pub x1: f64,
    /// Southern edge (minimum latitude).
    pub y1: f64,
    /// Eastern edge (maximum longitude).
    pub x2: f64,
    /// Northern edge (maximum latitude).
    pub y2: f64,
}

/// How the map view should be framed for the current filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MapFrame {
    /// Fit the view to a south-west / north-east rectangle.
    #[serde(rename_all = "camelCase")]
    Bounds {
        /// Southern edge (minimum latitude).
        south: f64,
        /// Western edge (minimum longitude).
        west: f64,
        /// Northern edge (maximum latitude).
        north: f64,
        /// Eastern edge (maximum longitude).
        east: f64,
    },
    /// Center the view on a single point at a fixed zoom level.
    #[serde(rename_all = "camelCase")]
    Center {
        /// Center latitude.
        latitude: f64,
        /// Center longitude.
        longitude: f64,
        /// Tile zoom level.
        zoom: u8,
    },
}

impl MapFrame {
    /// Default frame covering the continental U.S. plus Alaska, Hawaii,
    /// and the territories, used when no points are visible.
    pub const CONTINENTAL: Self = Self::Bounds {
        south: -14.0,
        west: -179.0,
        north: 72.0,
        east: -60.0,
    };

    /// Frame matching a state's stored bounding box.
    #[must_use]
    pub const fn from_state_bounds(bounds: &StateBounds) -> Self {
        Self::Bounds {
            south: bounds.y1,
            west: bounds.x1,
            north: bounds.y2,
            east: bounds.x2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_bounds_frame_orientation() {
        let bounds = StateBounds {
            state: "Texas".to_string(),
            x1: -106.6,
            y1: 25.8,
            x2: -93.5,
            y2: 36.5,
        };
        let MapFrame::Bounds {
            south,
            west,
            north,
            east,
        } = MapFrame::from_state_bounds(&bounds)
        else {
            panic!("expected bounds frame");
        };
        assert!(south < north);
        assert!(west < east);
        assert!((south - 25.8).abs() < f64::EPSILON);
        assert!((west - -106.6).abs() < f64::EPSILON);
    }

    #[test]
    fn continental_frame_is_bounds() {
        assert!(matches!(MapFrame::CONTINENTAL, MapFrame::Bounds { .. }));
    }
}
