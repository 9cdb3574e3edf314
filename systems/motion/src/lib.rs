#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic motion system that advances actors by arc length.
//!
//! Motion is computed against a read-only traversal borrowed for the
//! duration of one tick; the system owns no route state and emits only
//! commit/retire commands for the session to execute.

use glam::DVec2;
use waveroute_core::{ActorProgress, ActorView, Command, Event, Point};

/// Outcome of advancing one actor for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
    /// The actor remains on the route with updated segment and offset.
    Traversing(ActorProgress),
    /// The actor crossed the final segment and leaves the live set.
    Finished,
}

/// Advances a single actor along the traversal by `step_distance` pixels.
///
/// Zero-length segments are crossed without consuming any step distance
/// and re-evaluated within the same tick, so a waypoint placed exactly on
/// top of its neighbour can never stall an actor. Crossing a segment
/// boundary carries the residual offset into the next segment. A negative
/// offset models an actor still queued behind the wave front: it
/// accumulates toward zero while the reported position stays clamped to
/// the head of its segment.
#[must_use]
pub fn advance(
    segment: usize,
    arc_offset: f64,
    traversal: &[Point],
    step_distance: f64,
) -> Progress {
    if traversal.len() < 2 {
        return Progress::Finished;
    }
    let last = traversal.len() - 1;

    let mut segment = segment;
    let Some(mut length) = skip_degenerate(traversal, &mut segment, last) else {
        return Progress::Finished;
    };

    let mut arc_offset = arc_offset + step_distance;
    while arc_offset >= length {
        arc_offset -= length;
        segment += 1;
        match skip_degenerate(traversal, &mut segment, last) {
            Some(next) => length = next,
            None => return Progress::Finished,
        }
    }

    let head = traversal[segment];
    let position = if arc_offset <= 0.0 {
        head
    } else {
        interpolate(head, traversal[segment + 1], arc_offset / length)
    };

    Progress::Traversing(ActorProgress {
        segment,
        arc_offset,
        position,
    })
}

/// Walks past zero-length segments, returning the length of the first
/// positive segment at or after `*segment`, or `None` when the route ends
/// first.
fn skip_degenerate(traversal: &[Point], segment: &mut usize, last: usize) -> Option<f64> {
    loop {
        if *segment >= last {
            return None;
        }
        let length = traversal[*segment].distance(traversal[*segment + 1]);
        if length > 0.0 {
            return Some(length);
        }
        *segment += 1;
    }
}

fn interpolate(from: Point, to: Point, t: f64) -> Point {
    let position = DVec2::new(from.x(), from.y()).lerp(DVec2::new(to.x(), to.y()), t);
    Point::new(position.x, position.y)
}

/// Pure system that turns elapsed-time events into actor motion commands.
#[derive(Debug, Default)]
pub struct Motion;

impl Motion {
    /// Consumes events and immutable views to emit motion commands.
    pub fn handle(
        &self,
        events: &[Event],
        actors: &ActorView,
        traversal: &[Point],
        out: &mut Vec<Command>,
    ) {
        let mut step_distance = 0.0;
        for event in events {
            if let Event::TimeAdvanced { step_distance: step } = event {
                step_distance += step;
            }
        }
        if step_distance <= 0.0 || traversal.len() < 2 {
            return;
        }

        for actor in actors.iter() {
            match advance(actor.segment, actor.arc_offset, traversal, step_distance) {
                Progress::Traversing(progress) => out.push(Command::CommitActorMotion {
                    actor: actor.id,
                    progress,
                }),
                Progress::Finished => out.push(Command::RetireActor { actor: actor.id }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_route() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(500.0, 0.0)]
    }

    fn traversing(progress: Progress) -> ActorProgress {
        match progress {
            Progress::Traversing(progress) => progress,
            Progress::Finished => panic!("actor finished unexpectedly"),
        }
    }

    #[test]
    fn straight_route_reaches_midpoint_at_tick_fifty() {
        let traversal = straight_route();
        let mut segment = 0;
        let mut arc_offset = 0.0;

        for _ in 0..50 {
            let progress = traversing(advance(segment, arc_offset, &traversal, 5.0));
            segment = progress.segment;
            arc_offset = progress.arc_offset;
        }

        assert_eq!(arc_offset, 250.0);
        let progress = traversing(advance(0, 245.0, &traversal, 5.0));
        assert_eq!(progress.position, Point::new(250.0, 0.0));
    }

    #[test]
    fn straight_route_finishes_at_tick_one_hundred() {
        let traversal = straight_route();
        let mut segment = 0;
        let mut arc_offset = 0.0;

        for tick in 1..=100 {
            match advance(segment, arc_offset, &traversal, 5.0) {
                Progress::Traversing(progress) => {
                    assert!(tick < 100, "finished late");
                    segment = progress.segment;
                    arc_offset = progress.arc_offset;
                }
                Progress::Finished => {
                    assert_eq!(tick, 100, "finished early at tick {tick}");
                    return;
                }
            }
        }
        panic!("actor never finished");
    }

    #[test]
    fn residual_step_carries_into_the_next_segment() {
        let traversal = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];

        let progress = traversing(advance(0, 95.0, &traversal, 10.0));
        assert_eq!(progress.segment, 1);
        assert_eq!(progress.arc_offset, 5.0);
        assert_eq!(progress.position, Point::new(100.0, 5.0));
    }

    #[test]
    fn degenerate_segment_is_skipped_without_consuming_step() {
        let traversal = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        ];

        // The skip itself consumes nothing and moves nothing.
        let progress = traversing(advance(0, 0.0, &traversal, 0.0));
        assert_eq!(progress.segment, 1);
        assert_eq!(progress.arc_offset, 0.0);
        assert_eq!(progress.position, Point::new(0.0, 0.0));

        // The full step is still available to the following segment.
        let progress = traversing(advance(0, 0.0, &traversal, 5.0));
        assert_eq!(progress.segment, 1);
        assert_eq!(progress.arc_offset, 5.0);
        assert_eq!(progress.position, Point::new(5.0, 0.0));
    }

    #[test]
    fn route_of_coincident_points_terminates() {
        let traversal = vec![Point::new(3.0, 3.0), Point::new(3.0, 3.0)];
        assert_eq!(advance(0, 0.0, &traversal, 5.0), Progress::Finished);
    }

    #[test]
    fn queued_actor_holds_at_the_route_head() {
        let traversal = straight_route();

        let progress = traversing(advance(0, -100.0, &traversal, 5.0));
        assert_eq!(progress.segment, 0);
        assert_eq!(progress.arc_offset, -95.0);
        assert_eq!(progress.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn queued_actors_keep_their_spacing_once_departed() {
        let traversal = straight_route();
        let mut offsets = [0.0, -100.0];

        for _ in 0..30 {
            for offset in &mut offsets {
                *offset = traversing(advance(0, *offset, &traversal, 5.0)).arc_offset;
            }
        }

        assert_eq!(offsets[0], 150.0);
        assert_eq!(offsets[1], 50.0);
        assert_eq!(offsets[0] - offsets[1], 100.0);
    }

    #[test]
    fn finished_actor_performs_no_further_motion() {
        let traversal = straight_route();
        assert_eq!(advance(1, 0.0, &traversal, 5.0), Progress::Finished);
        assert_eq!(advance(5, 0.0, &traversal, 5.0), Progress::Finished);
    }

    #[test]
    fn handle_ignores_ticks_without_elapsed_time() {
        let motion = Motion;
        let mut out = Vec::new();
        motion.handle(
            &[Event::RouteChanged],
            &ActorView::default(),
            &straight_route(),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
