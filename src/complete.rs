//! Argument suggestions for partially typed `/warp` commands.

use tracing::error;

use crate::registry::WarpRegistry;
use crate::router::SUBCOMMANDS;

/// Suggests subcommands and existing warp names.
pub struct CompletionProvider<'r> {
    registry: &'r WarpRegistry,
}

impl<'r> CompletionProvider<'r> {
    pub fn new(registry: &'r WarpRegistry) -> Self {
        Self { registry }
    }

    /// `args` holds the tokens typed so far; the last one is the argument
    /// being completed and may be empty.
    pub fn suggest(&self, args: &[&str]) -> Vec<String> {
        match args {
            [] | [_] => SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
            [first, _] if !first.eq_ignore_ascii_case("new") => self.warp_names(),
            _ => Vec::new(),
        }
    }

    fn warp_names(&self) -> Vec<String> {
        match self.registry.list() {
            Ok(names) => names,
            Err(err) => {
                error!(error = %err, "failed to fetch warp names for completion");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::store::WarpStore;
    use crate::warp::Position;
    use anyhow::Result;

    fn populated() -> Result<WarpRegistry> {
        let reg = WarpRegistry::new(WarpStore::open_in_memory()?);
        reg.create("spawn", Position::default(), "world")?;
        reg.create("mine", Position::default(), "world")?;
        Ok(reg)
    }

    #[test]
    fn first_argument_offers_subcommands() -> Result<()> {
        let reg = populated()?;
        let provider = CompletionProvider::new(&reg);
        let expected = vec!["new", "remove", "edit", "teleport", "tp"];
        assert_eq!(provider.suggest(&[""]), expected);
        assert_eq!(provider.suggest(&["te"]), expected);
        assert_eq!(provider.suggest(&[]), expected);
        Ok(())
    }

    #[test]
    fn second_argument_offers_names_except_for_new() -> Result<()> {
        let reg = populated()?;
        let provider = CompletionProvider::new(&reg);
        let names = vec!["mine".to_string(), "spawn".to_string()];
        assert_eq!(provider.suggest(&["tp", ""]), names);
        assert_eq!(provider.suggest(&["remove", "s"]), names);
        assert_eq!(provider.suggest(&["edit", ""]), names);
        assert!(provider.suggest(&["new", ""]).is_empty());
        assert!(provider.suggest(&["NeW", ""]).is_empty());
        Ok(())
    }

    #[test]
    fn later_arguments_offer_nothing() -> Result<()> {
        let reg = populated()?;
        let provider = CompletionProvider::new(&reg);
        assert!(provider.suggest(&["edit", "spawn", ""]).is_empty());
        assert!(provider.suggest(&["new", "x", "1", "2", ""]).is_empty());
        Ok(())
    }

    #[test]
    fn storage_failure_yields_no_suggestions() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut config = StoreConfig::new(dir.path().join("absent.db"));
        config.create_if_missing = false;
        let reg = WarpRegistry::new(WarpStore::new(config));
        let provider = CompletionProvider::new(&reg);
        assert!(provider.suggest(&["tp", ""]).is_empty());
        assert_eq!(provider.suggest(&[""]).len(), 5);
        Ok(())
    }
}
