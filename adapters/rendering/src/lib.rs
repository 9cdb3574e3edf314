#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Waveroute adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use waveroute_core::PlaybackMode;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position expressed in world units, if the cursor is inside the window.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the primary button transitioned to pressed on this frame.
    pub primary_pressed: bool,
    /// Whether the primary button transitioned to released on this frame.
    pub primary_released: bool,
    /// Whether the adapter detected a play/pause toggle press on this frame.
    pub playback_toggle: bool,
    /// Whether the adapter detected an undo request on this frame.
    pub undo_requested: bool,
    /// Whether the adapter detected a redo request on this frame.
    pub redo_requested: bool,
}

/// Labelled circular marker drawn at a route endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPresentation {
    /// Center of the marker in world units.
    pub position: Vec2,
    /// Fill color of the marker body.
    pub color: Color,
    /// Single-character label drawn over the marker.
    pub label: char,
}

impl MarkerPresentation {
    /// Creates a new marker descriptor.
    #[must_use]
    pub const fn new(position: Vec2, color: Color, label: char) -> Self {
        Self {
            position,
            color,
            label,
        }
    }
}

/// Stroke and handle sizing shared by every route drawing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteStyle {
    /// Width of the polyline stroke in world units.
    pub stroke_width: f32,
    /// Radius of endpoint and waypoint handles in world units.
    pub handle_radius: f32,
    /// Radius of midpoint insertion handles in world units.
    pub midpoint_radius: f32,
    /// Color used when drawing the polyline stroke.
    pub line_color: Color,
}

impl RouteStyle {
    /// Creates a new route style descriptor.
    ///
    /// Returns an error when any of the sizes is not strictly positive.
    pub fn new(
        stroke_width: f32,
        handle_radius: f32,
        midpoint_radius: f32,
        line_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if stroke_width <= 0.0 || handle_radius <= 0.0 || midpoint_radius <= 0.0 {
            return Err(RenderingError::NonPositiveSize {
                stroke_width,
                handle_radius,
                midpoint_radius,
            });
        }

        Ok(Self {
            stroke_width,
            handle_radius,
            midpoint_radius,
            line_color,
        })
    }
}

/// Route geometry flattened into drawable primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePresentation {
    /// Full traversal polyline from start through waypoints to end.
    ///
    /// Empty while the route is missing either endpoint.
    pub polyline: Vec<Vec2>,
    /// Start marker, if the start has been placed.
    pub start: Option<MarkerPresentation>,
    /// End marker, if the end has been placed.
    pub end: Option<MarkerPresentation>,
    /// Draggable intermediate waypoints in route order.
    pub waypoints: Vec<MarkerPresentation>,
    /// Insertion handles centered on each traversal segment.
    pub midpoints: Vec<Vec2>,
    /// Sizing and stroke colors shared by the drawing passes.
    pub style: RouteStyle,
}

impl RoutePresentation {
    /// Creates a new route presentation descriptor.
    #[must_use]
    pub fn new(
        polyline: Vec<Vec2>,
        start: Option<MarkerPresentation>,
        end: Option<MarkerPresentation>,
        waypoints: Vec<MarkerPresentation>,
        midpoints: Vec<Vec2>,
        style: RouteStyle,
    ) -> Self {
        Self {
            polyline,
            start,
            end,
            waypoints,
            midpoints,
            style,
        }
    }

    /// Determines whether the route has enough geometry to draw a stroke.
    #[must_use]
    pub fn has_stroke(&self) -> bool {
        self.polyline.len() >= 2
    }
}

/// Wave actor rendered as a filled circle on the route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Center of the actor in world units.
    pub position: Vec2,
    /// Fill color of the actor's body.
    pub color: Color,
    /// Whether the actor has already departed from the route head.
    ///
    /// Queued actors waiting behind the head are conventionally hidden or
    /// drawn dimmed by backends.
    pub departed: bool,
}

impl ActorPresentation {
    /// Creates a new actor presentation descriptor.
    #[must_use]
    pub const fn new(position: Vec2, color: Color, departed: bool) -> Self {
        Self {
            position,
            color,
            departed,
        }
    }
}

/// Playback readout drawn as a heads-up overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Current playback mode of the simulation.
    pub mode: PlaybackMode,
    /// Simulated seconds remaining until the next wave launches.
    pub timer_remaining: f64,
    /// Speed multiplier applied to simulated time.
    pub speed_factor: f64,
    /// Number of actors currently live on the route.
    pub live_actors: usize,
}

impl HudPresentation {
    /// Creates a new HUD descriptor.
    #[must_use]
    pub const fn new(
        mode: PlaybackMode,
        timer_remaining: f64,
        speed_factor: f64,
        live_actors: usize,
    ) -> Self {
        Self {
            mode,
            timer_remaining,
            speed_factor,
            live_actors,
        }
    }
}

/// Scene description combining the route, its actors and the HUD overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Route geometry and edit handles.
    pub route: RoutePresentation,
    /// Actors currently visible on the route.
    pub actors: Vec<ActorPresentation>,
    /// Playback overlay drawn above the scene.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(route: RoutePresentation, actors: Vec<ActorPresentation>, hud: HudPresentation) -> Self {
        Self { route, actors, hud }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Waveroute scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Stroke and handle sizes must be strictly positive.
    NonPositiveSize {
        /// Provided stroke width.
        stroke_width: f32,
        /// Provided handle radius.
        handle_radius: f32,
        /// Provided midpoint handle radius.
        midpoint_radius: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSize {
                stroke_width,
                handle_radius,
                midpoint_radius,
            } => {
                write!(
                    f,
                    "route style sizes must be positive (received stroke {stroke_width}, \
                     handle {handle_radius}, midpoint {midpoint_radius})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> RouteStyle {
        RouteStyle::new(3.0, 8.0, 5.0, Color::from_rgb_u8(0, 0, 0)).expect("valid style")
    }

    #[test]
    fn route_style_rejects_non_positive_sizes() {
        let error = RouteStyle::new(0.0, 8.0, 5.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("zero stroke width must be rejected");

        assert!(matches!(error, RenderingError::NonPositiveSize { .. }));
    }

    #[test]
    fn incomplete_route_has_no_stroke() {
        let route = RoutePresentation::new(
            Vec::new(),
            Some(MarkerPresentation::new(
                Vec2::new(10.0, 10.0),
                Color::from_rgb_u8(0, 200, 0),
                'S',
            )),
            None,
            Vec::new(),
            Vec::new(),
            style(),
        );

        assert!(!route.has_stroke());
    }

    #[test]
    fn scene_new_preserves_every_channel() {
        let route = RoutePresentation::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)],
            Some(MarkerPresentation::new(
                Vec2::ZERO,
                Color::from_rgb_u8(0, 200, 0),
                'S',
            )),
            Some(MarkerPresentation::new(
                Vec2::new(100.0, 0.0),
                Color::from_rgb_u8(200, 0, 0),
                'E',
            )),
            Vec::new(),
            vec![Vec2::new(50.0, 0.0)],
            style(),
        );
        let actors = vec![ActorPresentation::new(
            Vec2::new(25.0, 0.0),
            Color::from_rgb_u8(200, 40, 40),
            true,
        )];
        let hud = HudPresentation::new(PlaybackMode::Playing, 42.5, 2.0, 1);

        let scene = Scene::new(route.clone(), actors.clone(), hud);

        assert!(scene.route.has_stroke());
        assert_eq!(scene.route, route);
        assert_eq!(scene.actors, actors);
        assert_eq!(scene.hud, hud);
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(100, 100, 100).lighten(0.5);

        assert!(color.red > 100.0 / 255.0);
        assert!((color.alpha - 1.0).abs() < f32::EPSILON);
    }
}
