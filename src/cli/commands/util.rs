use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::cli::CallerArgs;
use warpstone::{AuthContext, LocalSession, Location, Position, WarpConfig, WarpRegistry, WarpStore};

pub(crate) fn open_registry(config: &WarpConfig) -> WarpRegistry {
    WarpRegistry::new(WarpStore::new(config.store()))
}

/// Release the store; a failed close is logged and does not fail the command.
pub(crate) fn close_registry(registry: WarpRegistry) {
    if let Err(err) = registry.close() {
        warn!(error = %err, "warp database did not close cleanly");
    }
}

pub(crate) fn build_session(caller: &CallerArgs, config: &WarpConfig) -> Result<LocalSession> {
    let location = match caller.at.as_deref() {
        Some(spec) => Some(Location::new(caller.world.clone(), parse_position(spec)?)),
        None => None,
    };
    Ok(LocalSession::new(location, config.worlds.iter().cloned()))
}

pub(crate) fn caller_auth(caller: &CallerArgs, config: &WarpConfig) -> AuthContext {
    AuthContext::from_grants(
        caller.grants.iter().map(String::as_str),
        &config.admin_permission,
    )
}

/// Parse `X,Y,Z` into a position.
pub(crate) fn parse_position(spec: &str) -> Result<Position> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        bail!("invalid position `{spec}`; expected X,Y,Z");
    };
    Ok(Position::new(
        parse_axis(x, spec)?,
        parse_axis(y, spec)?,
        parse_axis(z, spec)?,
    ))
}

fn parse_axis(token: &str, spec: &str) -> Result<f64> {
    let value: f64 = token
        .parse()
        .with_context(|| format!("invalid coordinate `{token}` in `{spec}`"))?;
    if !value.is_finite() {
        bail!("coordinate `{token}` in `{spec}` must be finite");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_position() -> Result<()> {
        assert_eq!(parse_position("1, -2.5,3")?, Position::new(1.0, -2.5, 3.0));
        Ok(())
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!(parse_position("1,2").is_err());
        assert!(parse_position("1,2,3,4").is_err());
        assert!(parse_position("a,b,c").is_err());
        assert!(parse_position("1,NaN,3").is_err());
    }
}
