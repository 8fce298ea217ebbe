//! Parsing and dispatch of `/warp` invocations.
//!
//! Each call to [`CommandRouter::dispatch`] validates the argument vector,
//! checks the caller's authorization, performs at most one registry
//! operation, and always yields exactly one [`Reply`].

use std::fmt;

use tracing::{debug, error};

use crate::auth::AuthContext;
use crate::error::{CommandError, RegistryError};
use crate::registry::WarpRegistry;
use crate::session::Session;
use crate::warp::Position;

/// Tokens accepted as the first argument, in suggestion order.
pub const SUBCOMMANDS: [&str; 5] = ["new", "remove", "edit", "teleport", "tp"];

const USAGE: &str = "Usage: /warp <new|remove|edit|teleport|tp> [arguments]";
const INVALID_SUBCOMMAND: &str = "Invalid subcommand. Use: /warp <new|remove|edit|teleport|tp>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Subcommand {
    New,
    Remove,
    Edit,
    Teleport,
}

impl Subcommand {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "new" => Some(Subcommand::New),
            "remove" => Some(Subcommand::Remove),
            "edit" => Some(Subcommand::Edit),
            "teleport" | "tp" => Some(Subcommand::Teleport),
            _ => None,
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Subcommand::New => "Usage: /warp new <name> [<x> <y> <z>]",
            Subcommand::Remove => "Usage: /warp remove <name>",
            Subcommand::Edit => "Usage: /warp edit <name> [<x> <y> <z>]",
            Subcommand::Teleport => "Usage: /warp teleport|tp <name>",
        }
    }
}

/// Classification of a command outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    UsageError,
    PermissionDenied,
    RequiresPlayer,
    DuplicateName,
    NotFound,
    InvalidCoordinate,
    UnknownWorld,
    StorageFailure,
}

/// The single response produced for every invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub message: String,
}

impl Reply {
    fn success(message: String) -> Self {
        Self {
            kind: ReplyKind::Success,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ReplyKind::Success
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl CommandError {
    pub fn kind(&self) -> ReplyKind {
        match self {
            CommandError::Usage(_) => ReplyKind::UsageError,
            CommandError::PermissionDenied => ReplyKind::PermissionDenied,
            CommandError::RequiresPlayer => ReplyKind::RequiresPlayer,
            CommandError::DuplicateName(_) => ReplyKind::DuplicateName,
            CommandError::NotFound(_) => ReplyKind::NotFound,
            CommandError::InvalidCoordinate(_) => ReplyKind::InvalidCoordinate,
            CommandError::UnknownWorld { .. } => ReplyKind::UnknownWorld,
            CommandError::Storage { .. } => ReplyKind::StorageFailure,
        }
    }
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        Reply {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Routes `/warp` argument vectors to the registry.
pub struct CommandRouter<'r> {
    registry: &'r WarpRegistry,
}

impl<'r> CommandRouter<'r> {
    pub fn new(registry: &'r WarpRegistry) -> Self {
        Self { registry }
    }

    /// Run one invocation. `args` excludes the `warp` label itself.
    pub fn dispatch(&self, args: &[&str], auth: &AuthContext, session: &mut dyn Session) -> Reply {
        match self.execute(args, auth, session) {
            Ok(message) => Reply::success(message),
            Err(err) => {
                if let CommandError::Storage { action, source } = &err {
                    error!(action, error = %source, "warp command failed");
                } else {
                    debug!(kind = ?err.kind(), "warp command rejected");
                }
                Reply::from(err)
            }
        }
    }

    fn execute(
        &self,
        args: &[&str],
        auth: &AuthContext,
        session: &mut dyn Session,
    ) -> Result<String, CommandError> {
        let Some((first, rest)) = args.split_first() else {
            return Err(CommandError::Usage(USAGE.to_string()));
        };
        let sub = Subcommand::parse(first)
            .ok_or_else(|| CommandError::Usage(INVALID_SUBCOMMAND.to_string()))?;
        match sub {
            Subcommand::New => self.handle_new(rest, auth, session),
            Subcommand::Remove => self.handle_remove(rest, auth),
            Subcommand::Edit => self.handle_edit(rest, auth, session),
            Subcommand::Teleport => self.handle_teleport(rest, session),
        }
    }

    fn handle_new(
        &self,
        rest: &[&str],
        auth: &AuthContext,
        session: &dyn Session,
    ) -> Result<String, CommandError> {
        require_admin(auth)?;
        let (name, trailing) = split_name(rest, Subcommand::New)?;
        let explicit = parse_coordinates(trailing, Subcommand::New)?;
        let here = session.location().ok_or(CommandError::RequiresPlayer)?;
        let position = explicit.unwrap_or(here.position);

        let warp = self
            .registry
            .create(name, position, &here.world)
            .map_err(|err| match err {
                RegistryError::DuplicateName(name) => CommandError::DuplicateName(name),
                RegistryError::EmptyName => {
                    CommandError::Usage(Subcommand::New.usage().to_string())
                }
                other => storage("create", other),
            })?;
        Ok(format!(
            "Warp '{}' created at {} in world '{}'.",
            warp.name, warp.position, warp.world
        ))
    }

    fn handle_remove(&self, rest: &[&str], auth: &AuthContext) -> Result<String, CommandError> {
        require_admin(auth)?;
        let (name, _) = split_name(rest, Subcommand::Remove)?;
        let removed = self
            .registry
            .remove(name)
            .map_err(|err| storage("remove", err))?;
        if removed {
            Ok(format!("Warp '{name}' removed."))
        } else {
            Err(CommandError::NotFound(name.to_string()))
        }
    }

    fn handle_edit(
        &self,
        rest: &[&str],
        auth: &AuthContext,
        session: &dyn Session,
    ) -> Result<String, CommandError> {
        require_admin(auth)?;
        let (name, trailing) = split_name(rest, Subcommand::Edit)?;
        let position = match parse_coordinates(trailing, Subcommand::Edit)? {
            Some(position) => position,
            None => {
                session
                    .location()
                    .ok_or(CommandError::RequiresPlayer)?
                    .position
            }
        };

        let updated = self
            .registry
            .update(name, position)
            .map_err(|err| storage("edit", err))?;
        if updated {
            Ok(format!("Warp '{name}' updated to {position}."))
        } else {
            Err(CommandError::NotFound(name.to_string()))
        }
    }

    fn handle_teleport(
        &self,
        rest: &[&str],
        session: &mut dyn Session,
    ) -> Result<String, CommandError> {
        let (name, _) = split_name(rest, Subcommand::Teleport)?;
        if session.location().is_none() {
            return Err(CommandError::RequiresPlayer);
        }
        let warp = self
            .registry
            .resolve(name)
            .map_err(|err| storage("teleport to", err))?
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;
        if !session.world_loaded(&warp.world) {
            return Err(CommandError::UnknownWorld {
                name: warp.name,
                world: warp.world,
            });
        }
        session.teleport(&warp.location());
        Ok(format!("Teleported to warp '{name}'."))
    }
}

fn require_admin(auth: &AuthContext) -> Result<(), CommandError> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(CommandError::PermissionDenied)
    }
}

fn storage(action: &'static str, source: RegistryError) -> CommandError {
    CommandError::Storage { action, source }
}

fn split_name<'a, 'b>(
    rest: &'b [&'a str],
    sub: Subcommand,
) -> Result<(&'a str, &'b [&'a str]), CommandError> {
    match rest.split_first() {
        Some((name, trailing)) => Ok((*name, trailing)),
        None => Err(CommandError::Usage(sub.usage().to_string())),
    }
}

/// No trailing tokens means "use the caller's position"; exactly three are
/// explicit coordinates; any other count is malformed.
fn parse_coordinates(tokens: &[&str], sub: Subcommand) -> Result<Option<Position>, CommandError> {
    match tokens {
        [] => Ok(None),
        [x, y, z] => Ok(Some(Position::new(
            parse_coordinate(x)?,
            parse_coordinate(y)?,
            parse_coordinate(z)?,
        ))),
        _ => Err(CommandError::Usage(sub.usage().to_string())),
    }
}

fn parse_coordinate(token: &str) -> Result<f64, CommandError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidCoordinate(token.to_string())),
    }
}
