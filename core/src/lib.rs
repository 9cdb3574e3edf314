#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Waveroute engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative editor session, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the session executes
//! those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values for systems to react to deterministically. Systems
//! consume event streams, query immutable snapshots, and respond
//! exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Distance covered per simulation tick at a speed factor of 1.0,
/// measured in pixels.
pub const BASE_SPEED: f64 = 2.0;

/// Default number of simulated seconds between consecutive waves.
pub const DEFAULT_WAVE_INTERVAL: f64 = 60.0;

/// Default number of actors seeded into each wave.
pub const DEFAULT_ACTOR_COUNT: u32 = 10;

/// Default gap between consecutive actors of a wave, in pixels of
/// arc length along the route.
pub const DEFAULT_ACTOR_SPACING: f64 = 100.0;

/// Upper bound accepted for the playback speed factor.
pub const MAX_SPEED_FACTOR: f64 = 5.0;

/// 2D coordinate expressed in pixels. Copied freely.
///
/// Serializes as a two-element `[x, y]` array to match the persistence
/// format consumed by the I/O shell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point from pixel coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Computes the Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Computes the component-wise average of two points.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(value: Point) -> Self {
        [value.x, value.y]
    }
}

/// Monotonic clock reading supplied by the driving adapter, in seconds.
///
/// The session never reads the wall clock itself; adapters decide whether
/// timestamps originate from a real clock or a synthetic one, which keeps
/// every timing property replayable in tests.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Creates a timestamp from a number of elapsed seconds.
    #[must_use]
    pub const fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Retrieves the timestamp as seconds.
    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.0
    }

    /// Seconds elapsed between `earlier` and this timestamp.
    #[must_use]
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// Returns a timestamp shifted backwards by the provided seconds.
    #[must_use]
    pub fn rewound_by(self, seconds: f64) -> Self {
        Self(self.0 - seconds)
    }
}

/// Unique identifier assigned to a live actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Describes the active playback mode of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    /// No wave is running; the route is editable.
    Stopped,
    /// Waves spawn and actors advance each tick.
    Playing,
    /// Timer decay and actor advancement are frozen.
    Paused,
}

/// Point of the route grabbed by an in-progress drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The route's start marker.
    Start,
    /// The route's end marker.
    End,
    /// The waypoint at the provided position in the waypoint sequence.
    Waypoint {
        /// Zero-based index into the waypoint sequence.
        index: usize,
    },
}

/// Reasons a route edit may be rejected by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditError {
    /// The provided waypoint index lies outside the waypoint sequence.
    IndexOutOfRange {
        /// Index supplied by the caller.
        index: usize,
        /// Number of waypoints currently in the sequence.
        len: usize,
    },
    /// Route edits are disabled while playback is running.
    PlaybackLocked,
}

/// Reasons a playback request may be rejected by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayError {
    /// Playback requires both a start and an end marker.
    IncompletePath,
}

/// Motion result computed by the motion system for one actor and one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorProgress {
    /// Index into the traversal sequence of the segment being traversed.
    pub segment: usize,
    /// Signed arc length already covered into the current segment.
    pub arc_offset: f64,
    /// Interpolated position derived from segment and offset.
    pub position: Point,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Places or replaces the route's start marker.
    PlaceStart {
        /// Location of the start marker in pixels.
        point: Point,
    },
    /// Places or replaces the route's end marker.
    PlaceEnd {
        /// Location of the end marker in pixels.
        point: Point,
    },
    /// Inserts a waypoint at the provided position in the sequence.
    ///
    /// An index equal to the current waypoint count appends.
    InsertWaypoint {
        /// Zero-based insertion index.
        index: usize,
        /// Location of the new waypoint in pixels.
        point: Point,
    },
    /// Begins dragging the provided route point.
    ///
    /// Recording for undo happens once here, not per drag motion.
    BeginDrag {
        /// Point of the route grabbed by the drag.
        target: DragTarget,
    },
    /// Moves the dragged point to a new location.
    DragTo {
        /// Current cursor location in pixels.
        point: Point,
    },
    /// Releases the in-progress drag, if any.
    EndDrag,
    /// Restores the most recent undo snapshot.
    Undo,
    /// Restores the most recent redo snapshot.
    Redo,
    /// Replaces the live route wholesale as a single undoable action.
    ImportRoute {
        /// Start marker of the imported route.
        start: Option<Point>,
        /// End marker of the imported route.
        end: Option<Point>,
        /// Ordered waypoint sequence of the imported route.
        waypoints: Vec<Point>,
    },
    /// Adjusts the number of seconds between consecutive waves.
    ConfigureWaveTimer {
        /// New wave cadence in simulated seconds.
        interval_seconds: f64,
    },
    /// Adjusts the multiplier applied to timer decay and actor speed.
    SetSpeedFactor {
        /// New speed factor; non-positive values are ignored.
        factor: f64,
    },
    /// Starts playback from `Stopped` or resumes it from `Paused`.
    Play {
        /// Clock reading at the instant of the request.
        now: Timestamp,
    },
    /// Freezes timer decay and actor advancement.
    Pause,
    /// Halts playback, clears all live actors and resets the wave timer.
    Stop,
    /// Advances the simulation by one tick.
    Tick {
        /// Clock reading at the instant of the tick.
        now: Timestamp,
    },
    /// Seeds a new actor at the head of the route.
    SpawnActor {
        /// Initial signed arc offset; negative values queue the actor
        /// behind the wave front.
        arc_offset: f64,
    },
    /// Commits a motion step computed by the motion system.
    CommitActorMotion {
        /// Identifier of the actor that moved.
        actor: ActorId,
        /// Updated segment, offset and position for the actor.
        progress: ActorProgress,
    },
    /// Removes an actor that traversed the final segment.
    RetireActor {
        /// Identifier of the actor to remove.
        actor: ActorId,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the live route changed shape or position.
    RouteChanged,
    /// Reports that a route edit was rejected.
    EditRejected {
        /// Specific reason the edit failed.
        reason: EditError,
    },
    /// Reports that a playback request was rejected.
    PlayRejected {
        /// Specific reason the request failed.
        reason: PlayError,
    },
    /// Announces that the simulation entered a new playback mode.
    PlaybackChanged {
        /// Mode that became active after processing commands.
        mode: PlaybackMode,
    },
    /// Indicates that the simulation clock advanced while playing.
    TimeAdvanced {
        /// Arc length every live actor should cover this tick.
        step_distance: f64,
    },
    /// Announces that the wave timer elapsed and a wave should launch.
    WaveDue,
    /// Confirms that an actor was seeded onto the route.
    ActorSpawned {
        /// Identifier assigned to the new actor.
        actor: ActorId,
        /// Initial signed arc offset of the actor.
        arc_offset: f64,
    },
    /// Confirms that an actor traversed the final segment and was removed.
    ActorFinished {
        /// Identifier of the actor that finished the route.
        actor: ActorId,
    },
}

/// Immutable representation of a single actor's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Unique identifier assigned to the actor.
    pub id: ActorId,
    /// Index of the traversal segment currently being traversed.
    pub segment: usize,
    /// Signed arc length already covered into the current segment.
    pub arc_offset: f64,
    /// Derived position of the actor in pixels.
    pub position: Point,
}

impl ActorSnapshot {
    /// Reports whether the actor has crossed the wave front and is
    /// visibly traversing the route.
    #[must_use]
    pub fn departed(&self) -> bool {
        self.arc_offset >= 0.0
    }
}

/// Read-only snapshot describing all live actors.
#[derive(Clone, Debug, Default)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ActorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured actor snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live actors captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}
