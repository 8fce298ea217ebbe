use anyhow::Result;

use super::util::{close_registry, open_registry};
use warpstone::{CompletionProvider, WarpConfig};

pub(crate) fn cmd_complete(config: &WarpConfig, args: &[String]) -> Result<()> {
    let registry = open_registry(config);
    let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
    for suggestion in CompletionProvider::new(&registry).suggest(&tokens) {
        println!("{suggestion}");
    }
    close_registry(registry);
    Ok(())
}
