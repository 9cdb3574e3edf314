//! Composes presentation scenes from session query snapshots.

use anyhow::Result;
use glam::Vec2;
use waveroute_core::Point;
use waveroute_rendering::{
    ActorPresentation, Color, HudPresentation, MarkerPresentation, RoutePresentation, RouteStyle,
    Scene,
};
use waveroute_session::{query, Session};

const LINE_COLOR: Color = Color::from_rgb_u8(90, 90, 90);
const START_COLOR: Color = Color::from_rgb_u8(40, 200, 40);
const END_COLOR: Color = Color::from_rgb_u8(200, 40, 40);
const WAYPOINT_COLOR: Color = Color::from_rgb_u8(60, 120, 220);
const ACTOR_COLOR: Color = Color::from_rgb_u8(220, 60, 60);

const STROKE_WIDTH: f32 = 3.0;
const HANDLE_RADIUS: f32 = 8.0;
const MIDPOINT_RADIUS: f32 = 5.0;

fn vec2(point: Point) -> Vec2 {
    Vec2::new(point.x() as f32, point.y() as f32)
}

/// Flattens the session's queryable state into a drawable scene.
pub(crate) fn compose(session: &Session) -> Result<Scene> {
    let style = RouteStyle::new(STROKE_WIDTH, HANDLE_RADIUS, MIDPOINT_RADIUS, LINE_COLOR)?;

    let (start, end, waypoints) = query::export_route(session);
    let waypoints = waypoints
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            let label = char::from_digit((index as u32 + 1) % 10, 10).unwrap_or('+');
            MarkerPresentation::new(vec2(point), WAYPOINT_COLOR, label)
        })
        .collect();
    let route = RoutePresentation::new(
        query::traversal(session).into_iter().map(vec2).collect(),
        start.map(|point| MarkerPresentation::new(vec2(point), START_COLOR, 'S')),
        end.map(|point| MarkerPresentation::new(vec2(point), END_COLOR, 'E')),
        waypoints,
        query::midpoints(session).into_iter().map(vec2).collect(),
        style,
    );

    let view = query::actor_view(session);
    let actors: Vec<ActorPresentation> = view
        .iter()
        .map(|actor| ActorPresentation::new(vec2(actor.position), ACTOR_COLOR, actor.departed()))
        .collect();

    let playback = query::playback(session);
    let hud = HudPresentation::new(
        playback.mode,
        playback.timer_remaining,
        playback.speed_factor,
        actors.len(),
    );

    Ok(Scene::new(route, actors, hud))
}
