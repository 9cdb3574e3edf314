#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives headless Waveroute simulations.

mod route_file;
mod route_transfer;
mod scene;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use waveroute_core::{Command, Event, Timestamp};
use waveroute_session::{self as session, query, Session};
use waveroute_system_motion::Motion;
use waveroute_system_spawning::{Config as SpawnConfig, Spawning};

use crate::route_file::RouteFile;

#[derive(Parser)]
#[command(name = "waveroute", about = "Route editing and wave simulation driver")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Simulates waves along a saved route and reports the outcome.
    Run(RunArgs),
    /// Prints a single-line share string for a saved route.
    Encode {
        /// Route file produced by the editor or the decode subcommand.
        route: PathBuf,
    },
    /// Decodes a share string back into a route.
    Decode {
        /// Share string produced by the encode subcommand.
        snapshot: String,
        /// Saves the decoded route to this file instead of printing it.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Route file describing the start, end and waypoints to traverse.
    route: PathBuf,
    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 3600)]
    ticks: u32,
    /// Ticks per simulated second.
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f64,
    /// Speed multiplier applied to simulated time.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,
    /// Simulated seconds between wave launches.
    #[arg(long)]
    interval: Option<f64>,
    /// Actors spawned per wave.
    #[arg(long)]
    count: Option<u32>,
    /// Arc-length gap between consecutive actors, in pixels.
    #[arg(long)]
    spacing: Option<f64>,
}

fn main() -> Result<()> {
    match Cli::parse().command {
        CliCommand::Run(args) => run(args),
        CliCommand::Encode { route } => encode_route(&route),
        CliCommand::Decode { snapshot, out } => decode_route(&snapshot, out.as_deref()),
    }
}

fn run(args: RunArgs) -> Result<()> {
    if args.tick_rate <= 0.0 {
        bail!("tick rate must be positive (received {})", args.tick_rate);
    }

    let route = RouteFile::load(&args.route)?;
    if !route.is_complete() {
        bail!(
            "route file {} is missing its start or end marker",
            args.route.display()
        );
    }

    let mut session = Session::new();
    let mut events = Vec::new();
    session::apply(
        &mut session,
        Command::ImportRoute {
            start: route.start,
            end: route.end,
            waypoints: route.waypoints,
        },
        &mut events,
    );
    if let Some(interval) = args.interval {
        session::apply(
            &mut session,
            Command::ConfigureWaveTimer {
                interval_seconds: interval,
            },
            &mut events,
        );
    }
    session::apply(
        &mut session,
        Command::SetSpeedFactor { factor: args.speed },
        &mut events,
    );
    check_rejections(&events)?;

    let spawning = Spawning::new(spawn_config(&args));
    let motion = Motion;
    let mut report = RunReport::default();

    events.clear();
    session::apply(
        &mut session,
        Command::Play {
            now: Timestamp::from_seconds(0.0),
        },
        &mut events,
    );
    check_rejections(&events)?;
    pump_systems(&mut session, &spawning, &motion, &mut events);
    report.absorb(0.0, &events);

    for tick in 1..=args.ticks {
        let now = Timestamp::from_seconds(f64::from(tick) / args.tick_rate);
        events.clear();
        session::apply(&mut session, Command::Tick { now }, &mut events);
        pump_systems(&mut session, &spawning, &motion, &mut events);
        report.absorb(now.seconds(), &events);
    }

    let scene = scene::compose(&session)?;
    println!(
        "simulated {} ticks at {:.0} Hz (speed x{:.1}): {} waves launched, \
         {} actors spawned, {} finished, {} still on the route, next wave in {:.1}s",
        args.ticks,
        args.tick_rate,
        scene.hud.speed_factor,
        report.waves,
        report.spawned,
        report.finished,
        scene.hud.live_actors,
        scene.hud.timer_remaining,
    );
    Ok(())
}

/// Runs the pure systems once against the events of the current frame and
/// applies whatever commands they produced.
fn pump_systems(
    session: &mut Session,
    spawning: &Spawning,
    motion: &Motion,
    events: &mut Vec<Event>,
) {
    let mut commands = Vec::new();
    spawning.handle(events, &query::traversal(session), &mut commands);
    for command in commands {
        session::apply(session, command, events);
    }

    let mut commands = Vec::new();
    motion.handle(
        events,
        &query::actor_view(session),
        &query::traversal(session),
        &mut commands,
    );
    for command in commands {
        session::apply(session, command, events);
    }
}

fn spawn_config(args: &RunArgs) -> SpawnConfig {
    let defaults = SpawnConfig::default();
    SpawnConfig::new(
        args.count.unwrap_or_else(|| defaults.actor_count()),
        args.spacing.unwrap_or_else(|| defaults.spacing()),
    )
}

fn check_rejections(events: &[Event]) -> Result<()> {
    for event in events {
        match event {
            Event::EditRejected { reason } => bail!("edit rejected: {reason:?}"),
            Event::PlayRejected { reason } => bail!("playback rejected: {reason:?}"),
            _ => {}
        }
    }
    Ok(())
}

#[derive(Default)]
struct RunReport {
    waves: u32,
    spawned: u32,
    finished: u32,
}

impl RunReport {
    fn absorb(&mut self, now_seconds: f64, events: &[Event]) {
        for event in events {
            match event {
                Event::WaveDue => {
                    self.waves += 1;
                    println!("[{now_seconds:8.2}s] wave {} launched", self.waves);
                }
                Event::ActorSpawned { .. } => self.spawned += 1,
                Event::ActorFinished { actor } => {
                    self.finished += 1;
                    println!(
                        "[{now_seconds:8.2}s] actor {} finished the route",
                        actor.get()
                    );
                }
                _ => {}
            }
        }
    }
}

fn encode_route(path: &Path) -> Result<()> {
    let route = RouteFile::load(path)?;
    println!("{}", route_transfer::encode(&route));
    Ok(())
}

fn decode_route(snapshot: &str, out: Option<&Path>) -> Result<()> {
    let route = route_transfer::decode(snapshot)?;
    match out {
        Some(path) => {
            route.save(path)?;
            println!("saved route to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&route)?),
    }
    Ok(())
}
