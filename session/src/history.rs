//! Bounded undo/redo stacks of whole-route snapshots.
//!
//! Whole-state snapshots are deliberately preferred over diffs: routes
//! hold tens of points at most, so copies are cheap and undo/redo stays
//! trivially correct with no merge logic. Memory is bounded by the undo
//! cap; the redo stack is cleared on every newly recorded action.

use std::collections::VecDeque;

use waveroute_core::Point;

use crate::route::Route;

/// Maximum number of undo snapshots retained before the oldest is evicted.
pub const UNDO_CAP: usize = 50;

/// Immutable deep copy of the route state at one instant.
///
/// Snapshots own independent storage, so mutating the live route after a
/// snapshot never retroactively changes history.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSnapshot {
    start: Option<Point>,
    end: Option<Point>,
    waypoints: Vec<Point>,
}

impl RouteSnapshot {
    /// Captures a deep copy of the provided route.
    #[must_use]
    pub fn capture(route: &Route) -> Self {
        Self {
            start: route.start(),
            end: route.end(),
            waypoints: route.waypoints().to_vec(),
        }
    }

    fn restore_into(self, route: &mut Route) {
        route.replace(self.start, self.end, self.waypoints);
    }
}

/// Bounded undo stack and companion redo stack of route snapshots.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo: VecDeque<RouteSnapshot>,
    redo: Vec<RouteSnapshot>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the pre-mutation state onto the undo stack and clears redo.
    ///
    /// Must be called once per discrete user action before the route is
    /// mutated — once at drag begin, not per drag motion event.
    pub fn record_before_change(&mut self, route: &Route) {
        self.undo.push_back(RouteSnapshot::capture(route));
        if self.undo.len() > UNDO_CAP {
            let _ = self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Restores the most recent undo snapshot into the route.
    ///
    /// The pre-undo state moves onto the redo stack. Returns `false`
    /// without touching the route when nothing can be undone.
    pub fn undo(&mut self, route: &mut Route) -> bool {
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(RouteSnapshot::capture(route));
        snapshot.restore_into(route);
        true
    }

    /// Restores the most recent redo snapshot into the route.
    ///
    /// The pre-redo state moves back onto the undo stack. Returns `false`
    /// without touching the route when nothing can be redone.
    pub fn redo(&mut self, route: &mut Route) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(RouteSnapshot::capture(route));
        snapshot.restore_into(route);
        true
    }

    /// Number of restorable undo steps.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of restorable redo steps.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
