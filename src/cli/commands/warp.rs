use anyhow::Result;

use super::util::{build_session, caller_auth, close_registry, open_registry};
use crate::cli::CallerArgs;
use warpstone::{CommandRouter, WarpConfig};

pub(crate) fn cmd_warp(config: &WarpConfig, caller: &CallerArgs, args: &[String]) -> Result<()> {
    let mut session = build_session(caller, config)?;
    let auth = caller_auth(caller, config);
    let registry = open_registry(config);

    let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
    let reply = CommandRouter::new(&registry).dispatch(&tokens, &auth, &mut session);
    println!("{reply}");

    close_registry(registry);
    Ok(())
}
