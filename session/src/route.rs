//! Route data model: ordered endpoints and waypoints plus derived geometry.

use waveroute_core::{EditError, Point};

/// Ordered polyline route sketched by the user.
///
/// A route is *complete* once both endpoints are set; the traversal
/// sequence and the derived midpoints are only defined for complete
/// routes. Waypoint insertion order is traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    start: Option<Point>,
    end: Option<Point>,
    waypoints: Vec<Point>,
}

impl Route {
    /// Creates an empty route with no endpoints and no waypoints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start marker of the route, if placed.
    #[must_use]
    pub const fn start(&self) -> Option<Point> {
        self.start
    }

    /// End marker of the route, if placed.
    #[must_use]
    pub const fn end(&self) -> Option<Point> {
        self.end
    }

    /// Ordered waypoint sequence between the endpoints.
    #[must_use]
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Reports whether both endpoints are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Places or replaces the start marker.
    pub fn set_start(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// Places or replaces the end marker.
    pub fn set_end(&mut self, point: Point) {
        self.end = Some(point);
    }

    /// Inserts a waypoint at `index`; an index equal to the waypoint
    /// count appends.
    pub fn insert_waypoint(&mut self, index: usize, point: Point) -> Result<(), EditError> {
        if index > self.waypoints.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            });
        }
        self.waypoints.insert(index, point);
        Ok(())
    }

    /// Replaces the coordinates of an existing waypoint in place.
    pub fn move_waypoint(&mut self, index: usize, point: Point) -> Result<(), EditError> {
        match self.waypoints.get_mut(index) {
            Some(slot) => {
                *slot = point;
                Ok(())
            }
            None => Err(EditError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            }),
        }
    }

    /// Replaces the start coordinates in place; reports whether a start
    /// marker existed to move.
    pub fn move_start(&mut self, point: Point) -> bool {
        match self.start.as_mut() {
            Some(start) => {
                *start = point;
                true
            }
            None => false,
        }
    }

    /// Replaces the end coordinates in place; reports whether an end
    /// marker existed to move.
    pub fn move_end(&mut self, point: Point) -> bool {
        match self.end.as_mut() {
            Some(end) => {
                *end = point;
                true
            }
            None => false,
        }
    }

    /// Replaces the whole route wholesale.
    pub fn replace(&mut self, start: Option<Point>, end: Option<Point>, waypoints: Vec<Point>) {
        self.start = start;
        self.end = end;
        self.waypoints = waypoints;
    }

    /// Ordered sequence of points an actor must pass through, start to
    /// end. Empty unless the route is complete.
    #[must_use]
    pub fn traversal(&self) -> Vec<Point> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Vec::new();
        };

        let mut sequence = Vec::with_capacity(self.waypoints.len() + 2);
        sequence.push(start);
        sequence.extend_from_slice(&self.waypoints);
        sequence.push(end);
        sequence
    }

    /// Midpoint of every consecutive traversal pair, recomputed on demand
    /// and never stored. Produces `traversal.len() - 1` entries, or none
    /// while the route is incomplete.
    #[must_use]
    pub fn midpoints(&self) -> Vec<Point> {
        let traversal = self.traversal();
        traversal
            .windows(2)
            .map(|pair| pair[0].midpoint(pair[1]))
            .collect()
    }
}
