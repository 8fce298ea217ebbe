//! The warp registry: every read and write of warp records goes through here.

use tracing::{debug, info};

use crate::error::{RegistryError, StoreError};
use crate::store::{self, WarpStore};
use crate::warp::{Position, Warp};

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Create, update, remove and resolve warps on top of a [`WarpStore`].
pub struct WarpRegistry {
    store: WarpStore,
}

impl WarpRegistry {
    pub fn new(store: WarpStore) -> Self {
        Self { store }
    }

    /// Define a new warp. The name check and the insert are one statement, so
    /// two callers racing on the same name cannot both succeed.
    pub fn create(&self, name: &str, position: Position, world: &str) -> Result<Warp> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let warp = Warp {
            name: name.to_string(),
            position,
            world: world.to_string(),
        };
        match store::insert_warp(self.store.conn()?, &warp)? {
            Some(id) => {
                info!(warp = name, id, world, %position, "created warp");
                Ok(warp)
            }
            None => Err(RegistryError::DuplicateName(name.to_string())),
        }
    }

    /// Delete a warp, reporting whether one existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let removed = store::delete_warp(self.store.conn()?, name)?;
        if removed {
            info!(warp = name, "removed warp");
        } else {
            debug!(warp = name, "remove: no such warp");
        }
        Ok(removed)
    }

    /// Move an existing warp. Only the coordinates change; the world stays.
    pub fn update(&self, name: &str, position: Position) -> Result<bool> {
        let updated = store::update_position(self.store.conn()?, name, &position)?;
        if updated {
            info!(warp = name, %position, "updated warp");
        } else {
            debug!(warp = name, "update: no such warp");
        }
        Ok(updated)
    }

    pub fn resolve(&self, name: &str) -> Result<Option<Warp>> {
        Ok(store::load_warp(self.store.conn()?, name)?)
    }

    /// All warp names, ordered by name.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(store::list_names(self.store.conn()?)?)
    }

    pub fn list_warps(&self, prefix: Option<&str>) -> Result<Vec<Warp>> {
        Ok(store::list_warps(self.store.conn()?, prefix)?)
    }

    /// Shut down, releasing the store connection.
    pub fn close(self) -> std::result::Result<(), StoreError> {
        self.store.close()
    }
}
