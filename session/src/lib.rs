#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative editor session state for Waveroute.
//!
//! The session owns the live route, the undo/redo history, the set of
//! live actors and the playback clock. Adapters mutate it exclusively
//! through [`apply`]; systems and renderers observe it exclusively
//! through [`query`]. All work completes synchronously within the tick
//! that submitted it, so derived geometry queried after `apply` is never
//! stale.

pub mod history;
pub mod route;

use waveroute_core::{
    ActorId, ActorProgress, Command, DragTarget, EditError, Event, PlayError, PlaybackMode, Point,
    Timestamp, BASE_SPEED, DEFAULT_WAVE_INTERVAL, MAX_SPEED_FACTOR,
};

use history::History;
use route::Route;

#[derive(Clone, Copy, Debug)]
struct Actor {
    id: ActorId,
    segment: usize,
    arc_offset: f64,
    position: Point,
}

/// Represents the authoritative Waveroute editor session.
#[derive(Debug)]
pub struct Session {
    route: Route,
    history: History,
    actors: Vec<Actor>,
    next_actor_id: u32,
    drag: Option<DragTarget>,
    mode: PlaybackMode,
    speed_factor: f64,
    wave_interval: f64,
    timer_remaining: f64,
    last_wave_at: Timestamp,
    last_tick_at: Timestamp,
}

impl Session {
    /// Creates a new session with an empty route and stopped playback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            route: Route::new(),
            history: History::new(),
            actors: Vec::new(),
            next_actor_id: 0,
            drag: None,
            mode: PlaybackMode::Stopped,
            speed_factor: 1.0,
            wave_interval: DEFAULT_WAVE_INTERVAL,
            timer_remaining: DEFAULT_WAVE_INTERVAL,
            last_wave_at: Timestamp::from_seconds(0.0),
            last_tick_at: Timestamp::from_seconds(0.0),
        }
    }

    fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    /// Edits are only legal while stopped; playback owns the route
    /// geometry once a wave is in flight.
    fn ensure_editable(&self, out_events: &mut Vec<Event>) -> bool {
        if self.mode == PlaybackMode::Stopped {
            return true;
        }
        out_events.push(Event::EditRejected {
            reason: EditError::PlaybackLocked,
        });
        false
    }

    fn begin_drag(&mut self, target: DragTarget, out_events: &mut Vec<Event>) {
        let grabbed = match target {
            DragTarget::Start => self.route.start().is_some(),
            DragTarget::End => self.route.end().is_some(),
            DragTarget::Waypoint { index } => {
                if index >= self.route.waypoints().len() {
                    out_events.push(Event::EditRejected {
                        reason: EditError::IndexOutOfRange {
                            index,
                            len: self.route.waypoints().len(),
                        },
                    });
                    return;
                }
                true
            }
        };
        if !grabbed {
            return;
        }

        self.history.record_before_change(&self.route);
        self.drag = Some(target);
    }

    fn drag_to(&mut self, point: Point, out_events: &mut Vec<Event>) {
        let Some(target) = self.drag else {
            return;
        };

        let moved = match target {
            DragTarget::Start => self.route.move_start(point),
            DragTarget::End => self.route.move_end(point),
            DragTarget::Waypoint { index } => self.route.move_waypoint(index, point).is_ok(),
        };
        if moved {
            out_events.push(Event::RouteChanged);
        }
    }

    fn resume(&mut self, now: Timestamp) {
        // The timer is driven by (now - reference) * speed rather than a
        // counter decrement, so resuming must rewind the reference far
        // enough to reproduce the remaining time under the current factor.
        let consumed = self.wave_interval - self.timer_remaining;
        self.last_wave_at = now.rewound_by(consumed / self.speed_factor);
        self.last_tick_at = now;
        self.mode = PlaybackMode::Playing;
    }

    fn set_speed_factor(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let factor = factor.min(MAX_SPEED_FACTOR);
        if self.mode == PlaybackMode::Playing {
            // Rebase the wave reference so the new factor applies from the
            // next tick instead of rescaling time already elapsed.
            let consumed = self.wave_interval - self.timer_remaining;
            self.last_wave_at = self.last_tick_at.rewound_by(consumed / factor);
        }
        self.speed_factor = factor;
    }

    fn tick(&mut self, now: Timestamp, out_events: &mut Vec<Event>) {
        self.last_tick_at = now;
        if self.mode != PlaybackMode::Playing {
            return;
        }

        let elapsed = now.seconds_since(self.last_wave_at) * self.speed_factor;
        self.timer_remaining = (self.wave_interval - elapsed).max(0.0);
        if elapsed >= self.wave_interval {
            out_events.push(Event::WaveDue);
            self.last_wave_at = now;
            self.timer_remaining = self.wave_interval;
        }

        out_events.push(Event::TimeAdvanced {
            step_distance: BASE_SPEED * self.speed_factor,
        });
    }

    fn spawn_actor(&mut self, arc_offset: f64, out_events: &mut Vec<Event>) {
        let traversal = self.route.traversal();
        if traversal.len() < 2 {
            return;
        }

        let id = ActorId::new(self.next_actor_id);
        self.next_actor_id = self.next_actor_id.saturating_add(1);
        self.actors.push(Actor {
            id,
            segment: 0,
            arc_offset,
            position: traversal[0],
        });
        out_events.push(Event::ActorSpawned {
            actor: id,
            arc_offset,
        });
    }

    fn retire_actor(&mut self, id: ActorId, out_events: &mut Vec<Event>) {
        if let Some(position) = self.actors.iter().position(|actor| actor.id == id) {
            let _ = self.actors.remove(position);
            out_events.push(Event::ActorFinished { actor: id });
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the session, mutating state
/// deterministically and appending resulting events.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceStart { point } => {
            if session.ensure_editable(out_events) {
                session.history.record_before_change(&session.route);
                session.route.set_start(point);
                out_events.push(Event::RouteChanged);
            }
        }
        Command::PlaceEnd { point } => {
            if session.ensure_editable(out_events) {
                session.history.record_before_change(&session.route);
                session.route.set_end(point);
                out_events.push(Event::RouteChanged);
            }
        }
        Command::InsertWaypoint { index, point } => {
            if session.ensure_editable(out_events) {
                if index > session.route.waypoints().len() {
                    out_events.push(Event::EditRejected {
                        reason: EditError::IndexOutOfRange {
                            index,
                            len: session.route.waypoints().len(),
                        },
                    });
                } else {
                    session.history.record_before_change(&session.route);
                    if session.route.insert_waypoint(index, point).is_ok() {
                        out_events.push(Event::RouteChanged);
                    }
                }
            }
        }
        Command::BeginDrag { target } => {
            if session.ensure_editable(out_events) {
                session.begin_drag(target, out_events);
            }
        }
        Command::DragTo { point } => {
            if session.ensure_editable(out_events) {
                session.drag_to(point, out_events);
            }
        }
        Command::EndDrag => {
            session.drag = None;
        }
        Command::Undo => {
            if session.ensure_editable(out_events) {
                session.drag = None;
                if session.history.undo(&mut session.route) {
                    out_events.push(Event::RouteChanged);
                }
            }
        }
        Command::Redo => {
            if session.ensure_editable(out_events) {
                session.drag = None;
                if session.history.redo(&mut session.route) {
                    out_events.push(Event::RouteChanged);
                }
            }
        }
        Command::ImportRoute {
            start,
            end,
            waypoints,
        } => {
            if session.ensure_editable(out_events) {
                session.history.record_before_change(&session.route);
                session.route.replace(start, end, waypoints);
                session.drag = None;
                out_events.push(Event::RouteChanged);
            }
        }
        Command::ConfigureWaveTimer { interval_seconds } => {
            if session.mode == PlaybackMode::Stopped && interval_seconds > 0.0 {
                session.wave_interval = interval_seconds;
                session.timer_remaining = interval_seconds;
            }
        }
        Command::SetSpeedFactor { factor } => {
            session.set_speed_factor(factor);
        }
        Command::Play { now } => match session.mode {
            PlaybackMode::Stopped => {
                if session.route.is_complete() {
                    session.drag = None;
                    session.mode = PlaybackMode::Playing;
                    session.timer_remaining = session.wave_interval;
                    session.last_wave_at = now;
                    session.last_tick_at = now;
                    out_events.push(Event::PlaybackChanged {
                        mode: PlaybackMode::Playing,
                    });
                    // The first wave launches immediately on play.
                    out_events.push(Event::WaveDue);
                } else {
                    out_events.push(Event::PlayRejected {
                        reason: PlayError::IncompletePath,
                    });
                }
            }
            PlaybackMode::Paused => {
                session.resume(now);
                out_events.push(Event::PlaybackChanged {
                    mode: PlaybackMode::Playing,
                });
            }
            PlaybackMode::Playing => {}
        },
        Command::Pause => {
            if session.mode == PlaybackMode::Playing {
                session.mode = PlaybackMode::Paused;
                out_events.push(Event::PlaybackChanged {
                    mode: PlaybackMode::Paused,
                });
            }
        }
        Command::Stop => {
            if session.mode != PlaybackMode::Stopped {
                session.actors.clear();
                session.timer_remaining = session.wave_interval;
                session.mode = PlaybackMode::Stopped;
                out_events.push(Event::PlaybackChanged {
                    mode: PlaybackMode::Stopped,
                });
            }
        }
        Command::Tick { now } => {
            session.tick(now, out_events);
        }
        Command::SpawnActor { arc_offset } => {
            session.spawn_actor(arc_offset, out_events);
        }
        Command::CommitActorMotion { actor, progress } => {
            if let Some(actor) = session.actor_mut(actor) {
                actor.segment = progress.segment;
                actor.arc_offset = progress.arc_offset;
                actor.position = progress.position;
            }
        }
        Command::RetireActor { actor } => {
            session.retire_actor(actor, out_events);
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use waveroute_core::{ActorSnapshot, ActorView, PlaybackMode, Point};

    use super::{Route, Session};

    /// Provides read-only access to the live route.
    #[must_use]
    pub fn route(session: &Session) -> &Route {
        &session.route
    }

    /// Ordered sequence of points an actor traverses, start to end.
    /// Empty unless the route is complete.
    #[must_use]
    pub fn traversal(session: &Session) -> Vec<Point> {
        session.route.traversal()
    }

    /// Midpoint of every consecutive traversal pair, for midpoint-driven
    /// waypoint insertion and rendering.
    #[must_use]
    pub fn midpoints(session: &Session) -> Vec<Point> {
        session.route.midpoints()
    }

    /// Captures a read-only view of the live actors.
    #[must_use]
    pub fn actor_view(session: &Session) -> ActorView {
        let snapshots: Vec<ActorSnapshot> = session
            .actors
            .iter()
            .map(|actor| ActorSnapshot {
                id: actor.id,
                segment: actor.segment,
                arc_offset: actor.arc_offset,
                position: actor.position,
            })
            .collect();
        ActorView::from_snapshots(snapshots)
    }

    /// Captures the playback state polled once per frame by renderers.
    #[must_use]
    pub fn playback(session: &Session) -> PlaybackSnapshot {
        PlaybackSnapshot {
            mode: session.mode,
            timer_remaining: session.timer_remaining,
            speed_factor: session.speed_factor,
            wave_interval: session.wave_interval,
        }
    }

    /// Exports the route as the `(start, end, waypoints)` triple consumed
    /// by the persistence shell.
    #[must_use]
    pub fn export_route(session: &Session) -> (Option<Point>, Option<Point>, Vec<Point>) {
        (
            session.route.start(),
            session.route.end(),
            session.route.waypoints().to_vec(),
        )
    }

    /// Number of restorable undo steps.
    #[must_use]
    pub fn undo_depth(session: &Session) -> usize {
        session.history.undo_depth()
    }

    /// Number of restorable redo steps.
    #[must_use]
    pub fn redo_depth(session: &Session) -> usize {
        session.history.redo_depth()
    }

    /// Immutable playback state captured at one instant.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlaybackSnapshot {
        /// Active playback mode.
        pub mode: PlaybackMode,
        /// Simulated seconds until the next wave launches.
        pub timer_remaining: f64,
        /// Multiplier applied to timer decay and actor advance rate.
        pub speed_factor: f64,
        /// Configured cadence between waves in simulated seconds.
        pub wave_interval: f64,
    }
}
