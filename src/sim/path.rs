//! Polyline path geometry
//!
//! A path is an ordered list of waypoints. Enemies address a point on it by
//! `(segment, progress)`: the segment index and the fraction of that segment
//! already covered.

use glam::Vec2;
use serde::Serialize;

use super::grid::GridCell;
use crate::error::PathError;
use crate::{distance_to_segment, lerp};

/// An immutable polyline enemies travel along
#[derive(Debug, Clone, Serialize)]
pub struct PathModel {
    waypoints: Vec<Vec2>,
    /// Length of segment i (waypoint i to i+1)
    segment_lengths: Vec<f32>,
}

impl PathModel {
    /// Build a path, rejecting fewer than two waypoints or coincident neighbours
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints(waypoints.len()));
        }
        let mut segment_lengths = Vec::with_capacity(waypoints.len() - 1);
        for (index, pair) in waypoints.windows(2).enumerate() {
            let length = pair[0].distance(pair[1]);
            if length <= f32::EPSILON {
                return Err(PathError::ZeroLengthSegment { index });
            }
            segment_lengths.push(length);
        }
        Ok(Self {
            waypoints,
            segment_lengths,
        })
    }

    /// Build a path through the centers of the given grid cells
    pub fn from_cells(cells: &[GridCell]) -> Result<Self, PathError> {
        Self::new(cells.iter().map(GridCell::center).collect())
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Number of segments (always waypoints - 1)
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Length of a segment, or 0 past the final waypoint
    #[inline]
    pub fn segment_length(&self, segment: usize) -> f32 {
        self.segment_lengths.get(segment).copied().unwrap_or(0.0)
    }

    pub fn total_length(&self) -> f32 {
        self.segment_lengths.iter().sum()
    }

    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    pub fn end(&self) -> Vec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Point at `progress` (0..1) along `segment`
    ///
    /// Segments past the end clamp to the final waypoint.
    pub fn position_at(&self, segment: usize, progress: f32) -> Vec2 {
        if segment >= self.segment_count() {
            return self.end();
        }
        lerp(
            self.waypoints[segment],
            self.waypoints[segment + 1],
            progress.clamp(0.0, 1.0),
        )
    }

    /// Check if a point lies within `threshold` of any segment
    pub fn is_near_segment(&self, point: Vec2, threshold: f32) -> bool {
        self.waypoints
            .windows(2)
            .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_path() -> PathModel {
        PathModel::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_short_path() {
        assert_eq!(
            PathModel::new(vec![Vec2::ZERO]).unwrap_err(),
            PathError::TooFewWaypoints(1)
        );
    }

    #[test]
    fn test_rejects_coincident_waypoints() {
        let err = PathModel::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, PathError::ZeroLengthSegment { index: 1 });
    }

    #[test]
    fn test_segment_lengths() {
        let path = l_path();
        assert_eq!(path.segment_count(), 2);
        assert!((path.segment_length(0) - 100.0).abs() < 1e-4);
        assert!((path.segment_length(1) - 50.0).abs() < 1e-4);
        assert_eq!(path.segment_length(2), 0.0);
        assert!((path.total_length() - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_position_at() {
        let path = l_path();
        assert_eq!(path.position_at(0, 0.0), Vec2::new(0.0, 0.0));
        assert_eq!(path.position_at(0, 0.25), Vec2::new(25.0, 0.0));
        assert_eq!(path.position_at(1, 0.5), Vec2::new(100.0, 25.0));
        // Past the end clamps to the final waypoint
        assert_eq!(path.position_at(2, 0.0), Vec2::new(100.0, 50.0));
        assert_eq!(path.position_at(7, 0.3), path.end());
    }

    #[test]
    fn test_is_near_segment() {
        let path = l_path();
        assert!(path.is_near_segment(Vec2::new(50.0, 5.0), 6.0));
        assert!(path.is_near_segment(Vec2::new(104.0, 30.0), 6.0));
        assert!(!path.is_near_segment(Vec2::new(50.0, 30.0), 6.0));
    }

    #[test]
    fn test_from_cells_uses_centers() {
        let path = PathModel::from_cells(&[GridCell::new(0, 0), GridCell::new(2, 0)]).unwrap();
        assert_eq!(path.start(), GridCell::new(0, 0).center());
        assert!((path.total_length() - 90.0).abs() < 1e-4);

        let err = PathModel::from_cells(&[GridCell::new(1, 1), GridCell::new(1, 1)]).unwrap_err();
        assert_eq!(err, PathError::ZeroLengthSegment { index: 0 });
    }
}
