//! Named, persistent warp points and the `/warp` command surface over them.

pub mod auth;
pub mod complete;
pub mod config;
pub mod error;
pub mod registry;
pub mod router;
pub mod session;
pub mod store;
pub mod warp;

pub use auth::{ADMIN_PERMISSION, AuthContext};
pub use complete::CompletionProvider;
pub use config::{StoreConfig, WarpConfig};
pub use error::{CommandError, RegistryError, StoreError};
pub use registry::WarpRegistry;
pub use router::{CommandRouter, Reply, ReplyKind, SUBCOMMANDS};
pub use session::{LocalSession, Session};
pub use store::{WarpStore, derive_db_path};
pub use warp::{Location, Position, Warp};
