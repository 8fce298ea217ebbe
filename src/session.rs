//! The seam between warp commands and the runtime hosting the caller.

use std::collections::BTreeSet;

use crate::warp::Location;

/// What the hosting runtime exposes about the caller of a command.
pub trait Session {
    /// Current location of the caller, or `None` for callers without a body
    /// (such as the server console).
    fn location(&self) -> Option<Location>;

    /// Whether `world` is currently loaded and can be teleported into.
    fn world_loaded(&self, world: &str) -> bool;

    /// Move the caller. Only called after `world_loaded` returned true.
    fn teleport(&mut self, target: &Location);
}

/// A self-contained session used by the console host.
#[derive(Clone, Debug, Default)]
pub struct LocalSession {
    location: Option<Location>,
    worlds: BTreeSet<String>,
}

impl LocalSession {
    pub fn new<I, S>(location: Option<Location>, worlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            location,
            worlds: worlds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn worlds(&self) -> impl Iterator<Item = &str> {
        self.worlds.iter().map(String::as_str)
    }
}

impl Session for LocalSession {
    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn world_loaded(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    fn teleport(&mut self, target: &Location) {
        self.location = Some(target.clone());
    }
}
