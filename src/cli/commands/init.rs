use anyhow::{Context, Result};

use warpstone::{WarpConfig, WarpStore, derive_db_path};

pub(crate) fn cmd_init(config: &WarpConfig, name: &str) -> Result<()> {
    let path = derive_db_path(name);
    let mut store_config = config.store();
    store_config.path = path.clone();
    let store = WarpStore::create(store_config)
        .with_context(|| format!("failed to create {}", path.display()))?;
    store.close()?;
    println!("created warp database at {}", path.display());
    Ok(())
}
