use waveroute_core::{Command, Event, Point, Timestamp};
use waveroute_session::{self as session, query, Session};
use waveroute_system_spawning::{Config, Spawning};

fn sketch_route(session: &mut Session, events: &mut Vec<Event>) {
    session::apply(
        session,
        Command::PlaceStart {
            point: Point::new(0.0, 0.0),
        },
        events,
    );
    session::apply(
        session,
        Command::PlaceEnd {
            point: Point::new(500.0, 0.0),
        },
        events,
    );
}

#[test]
fn play_seeds_a_spaced_wave_into_the_session() {
    let mut session = Session::new();
    let mut events = Vec::new();
    sketch_route(&mut session, &mut events);

    events.clear();
    session::apply(
        &mut session,
        Command::Play {
            now: Timestamp::from_seconds(0.0),
        },
        &mut events,
    );

    let spawning = Spawning::new(Config::new(10, 100.0));
    let mut commands = Vec::new();
    spawning.handle(&events, &query::traversal(&session), &mut commands);
    assert_eq!(commands.len(), 10);

    let mut spawn_events = Vec::new();
    for command in commands {
        session::apply(&mut session, command, &mut spawn_events);
    }

    let view = query::actor_view(&session);
    assert_eq!(view.len(), 10);
    let offsets: Vec<f64> = view.iter().map(|actor| actor.arc_offset).collect();
    let expected: Vec<f64> = (0..10).map(|index| -100.0 * index as f64).collect();
    assert_eq!(offsets, expected);
    assert!(view
        .iter()
        .all(|actor| actor.segment == 0 && actor.position == Point::new(0.0, 0.0)));
}

#[test]
fn wave_on_incomplete_route_leaves_the_session_untouched() {
    let mut session = Session::new();
    let spawning = Spawning::default();
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::WaveDue],
        &query::traversal(&session),
        &mut commands,
    );
    assert!(commands.is_empty());
    assert!(query::actor_view(&session).is_empty());
}
