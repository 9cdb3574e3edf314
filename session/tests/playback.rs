use waveroute_core::{Command, Event, PlaybackMode, Point, Timestamp};
use waveroute_session::{self as session, query, Session};

fn pump(session: &mut Session, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    session::apply(session, command, &mut events);
    events
}

fn playing_session() -> Session {
    let mut session = Session::new();
    let _ = pump(
        &mut session,
        Command::PlaceStart {
            point: Point::new(0.0, 0.0),
        },
    );
    let _ = pump(
        &mut session,
        Command::PlaceEnd {
            point: Point::new(500.0, 0.0),
        },
    );
    let _ = pump(
        &mut session,
        Command::Play {
            now: Timestamp::from_seconds(0.0),
        },
    );
    session
}

#[test]
fn pausing_freezes_the_wave_timer() {
    let mut session = playing_session();
    let _ = pump(
        &mut session,
        Command::Tick {
            now: Timestamp::from_seconds(40.0),
        },
    );
    assert_eq!(query::playback(&session).timer_remaining, 20.0);

    let events = pump(&mut session, Command::Pause);
    assert_eq!(
        events,
        vec![Event::PlaybackChanged {
            mode: PlaybackMode::Paused,
        }]
    );

    // Ticks while paused neither decay the timer nor advance actors.
    let events = pump(
        &mut session,
        Command::Tick {
            now: Timestamp::from_seconds(75.0),
        },
    );
    assert!(events.is_empty());
    assert_eq!(query::playback(&session).timer_remaining, 20.0);
}

#[test]
fn resuming_does_not_jump_the_timer() {
    let mut session = playing_session();
    let _ = pump(
        &mut session,
        Command::Tick {
            now: Timestamp::from_seconds(40.0),
        },
    );
    let _ = pump(&mut session, Command::Pause);

    // A long paused stretch of wall-clock time must not count.
    let _ = pump(
        &mut session,
        Command::Play {
            now: Timestamp::from_seconds(100.0),
        },
    );
    let events = pump(
        &mut session,
        Command::Tick {
            now: Timestamp::from_seconds(100.0),
        },
    );

    assert!(!events.contains(&Event::WaveDue));
    let remaining = query::playback(&session).timer_remaining;
    assert!((remaining - 20.0).abs() < 1e-9, "remaining was {remaining}");
}

#[test]
fn doubling_speed_after_resume_halves_ticks_to_next_spawn() {
    let ticks_at = |factor: f64| -> u32 {
        let mut session = playing_session();
        let _ = pump(
            &mut session,
            Command::Tick {
                now: Timestamp::from_seconds(40.0),
            },
        );
        let _ = pump(&mut session, Command::Pause);
        let _ = pump(
            &mut session,
            Command::Play {
                now: Timestamp::from_seconds(100.0),
            },
        );
        let _ = pump(
            &mut session,
            Command::Tick {
                now: Timestamp::from_seconds(100.0),
            },
        );
        let _ = pump(&mut session, Command::SetSpeedFactor { factor });

        let mut ticks = 0;
        for second in 1..=200 {
            ticks += 1;
            let events = pump(
                &mut session,
                Command::Tick {
                    now: Timestamp::from_seconds(100.0 + second as f64),
                },
            );
            if events.contains(&Event::WaveDue) {
                return ticks;
            }
        }
        panic!("no wave fired within 200 ticks");
    };

    let at_normal_speed = ticks_at(1.0);
    let at_double_speed = ticks_at(2.0);
    assert_eq!(at_normal_speed, 20);
    assert_eq!(at_double_speed, 10);
}

#[test]
fn play_while_playing_is_a_no_op() {
    let mut session = playing_session();
    let events = pump(
        &mut session,
        Command::Play {
            now: Timestamp::from_seconds(5.0),
        },
    );
    assert!(events.is_empty());
}

#[test]
fn wave_cadence_repeats_while_playing() {
    let mut session = Session::new();
    let _ = pump(
        &mut session,
        Command::PlaceStart {
            point: Point::new(0.0, 0.0),
        },
    );
    let _ = pump(
        &mut session,
        Command::PlaceEnd {
            point: Point::new(500.0, 0.0),
        },
    );
    let _ = pump(
        &mut session,
        Command::ConfigureWaveTimer {
            interval_seconds: 5.0,
        },
    );
    let _ = pump(
        &mut session,
        Command::Play {
            now: Timestamp::from_seconds(0.0),
        },
    );

    let mut waves = 0;
    for second in 1..=20 {
        let events = pump(
            &mut session,
            Command::Tick {
                now: Timestamp::from_seconds(second as f64),
            },
        );
        waves += events.iter().filter(|event| **event == Event::WaveDue).count();
    }
    assert_eq!(waves, 4);
}
