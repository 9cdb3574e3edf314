#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for seeding wave actors.

use waveroute_core::{Command, Event, Point, DEFAULT_ACTOR_COUNT, DEFAULT_ACTOR_SPACING};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    actor_count: u32,
    spacing: f64,
}

impl Config {
    /// Creates a new configuration using the provided wave size and the
    /// arc-length gap between consecutive actors.
    #[must_use]
    pub const fn new(actor_count: u32, spacing: f64) -> Self {
        Self {
            actor_count,
            spacing,
        }
    }

    /// Number of actors seeded per wave.
    #[must_use]
    pub const fn actor_count(&self) -> u32 {
        self.actor_count
    }

    /// Arc-length gap between consecutive actors.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ACTOR_COUNT, DEFAULT_ACTOR_SPACING)
    }
}

/// Pure system that seeds spaced actors whenever a wave is due.
///
/// Actor `i` receives an initial arc offset of `-i * spacing`: the first
/// actor starts exactly at the route head and every follower is queued a
/// fixed arc length behind it. Spacing by negative arc length rather than
/// by delayed spawn time keeps the gap uniform in pixels no matter how
/// the speed factor changes later.
#[derive(Debug, Default)]
pub struct Spawning {
    config: Config,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes events and the current traversal to emit spawn commands.
    ///
    /// A traversal with fewer than two points cannot carry actors, so a
    /// due wave on such a route seeds nothing.
    pub fn handle(&self, events: &[Event], traversal: &[Point], out: &mut Vec<Command>) {
        if traversal.len() < 2 {
            return;
        }

        for event in events {
            if let Event::WaveDue = event {
                for index in 0..self.config.actor_count {
                    out.push(Command::SpawnActor {
                        arc_offset: -f64::from(index) * self.config.spacing,
                    });
                }
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

    #[test]
    fn wave_of_ten_is_spaced_one_hundred_pixels_apart() {
        let spawning = Spawning::new(Config::new(10, 100.0));
        let mut out = Vec::new();
        spawning.handle(&[Event::WaveDue], &straight_route(), &mut out);

        let offsets: Vec<f64> = out
            .iter()
            .map(|command| match command {
                Command::SpawnActor { arc_offset } => *arc_offset,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        let expected: Vec<f64> = (0..10).map(|index| -100.0 * index as f64).collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn short_traversal_produces_a_no_op_wave() {
        let spawning = Spawning::default();
        let mut out = Vec::new();
        spawning.handle(&[Event::WaveDue], &[Point::new(1.0, 1.0)], &mut out);
        spawning.handle(&[Event::WaveDue], &[], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn quiet_ticks_spawn_nothing() {
        let spawning = Spawning::default();
        let mut out = Vec::new();
        spawning.handle(
            &[Event::TimeAdvanced { step_distance: 2.0 }],
            &straight_route(),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn each_due_wave_seeds_a_full_batch() {
        let spawning = Spawning::new(Config::new(3, 50.0));
        let mut out = Vec::new();
        spawning.handle(
            &[Event::WaveDue, Event::WaveDue],
            &straight_route(),
            &mut out,
        );
        assert_eq!(out.len(), 6);
    }
}
