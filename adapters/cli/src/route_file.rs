//! JSON persistence for sketched routes.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use waveroute_core::Point;

/// On-disk route description: endpoints encoded as `[x, y]` pairs or `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteFile {
    /// Start marker of the route, if placed.
    pub start: Option<Point>,
    /// End marker of the route, if placed.
    pub end: Option<Point>,
    /// Intermediate waypoints in traversal order.
    #[serde(default)]
    pub waypoints: Vec<Point>,
}

impl RouteFile {
    /// Reads and parses a route from the file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not read route file {}", path.display()))?;
        let route = serde_json::from_str(&contents)
            .with_context(|| format!("could not parse route file {}", path.display()))?;
        Ok(route)
    }

    /// Serialises the route and writes it to the file at `path`.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("could not serialise route")?;
        fs::write(path, contents)
            .with_context(|| format!("could not write route file {}", path.display()))?;
        Ok(())
    }

    /// Determines whether both endpoints have been placed.
    pub(crate) fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
