use anyhow::{Result, anyhow};

use super::util::{close_registry, open_registry};
use warpstone::WarpConfig;

pub(crate) fn cmd_list(config: &WarpConfig, prefix: Option<&str>, json: bool) -> Result<()> {
    let registry = open_registry(config);
    let warps = registry.list_warps(prefix)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&warps)?);
    } else if warps.is_empty() {
        println!("no warps defined");
    } else {
        for warp in &warps {
            println!("{} -> {}", warp.name, warp.location());
        }
    }
    close_registry(registry);
    Ok(())
}

pub(crate) fn cmd_show(config: &WarpConfig, name: &str) -> Result<()> {
    let registry = open_registry(config);
    let warp = registry
        .resolve(name)?
        .ok_or_else(|| anyhow!("warp `{name}` not found"))?;
    println!("{}", serde_json::to_string_pretty(&warp)?);
    close_registry(registry);
    Ok(())
}
