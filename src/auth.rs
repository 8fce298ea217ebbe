//! Capability check for mutating warp commands.

/// Default permission node granting warp administration.
pub const ADMIN_PERMISSION: &str = "warp.admin";

/// Authorization state of the caller for one command invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthContext {
    admin: bool,
}

impl AuthContext {
    pub const fn new(admin: bool) -> Self {
        Self { admin }
    }

    /// Derive the context from the permission nodes granted to a caller.
    pub fn from_grants<'a, I>(grants: I, admin_permission: &str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let admin = grants
            .into_iter()
            .any(|grant| grant == admin_permission || grant == "*");
        Self { admin }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_must_match_admin_node() {
        assert!(AuthContext::from_grants(["warp.admin"], ADMIN_PERMISSION).is_admin());
        assert!(AuthContext::from_grants(["chat", "*"], ADMIN_PERMISSION).is_admin());
        assert!(!AuthContext::from_grants(["warp.use"], ADMIN_PERMISSION).is_admin());
        assert!(!AuthContext::from_grants(Vec::<&str>::new(), ADMIN_PERMISSION).is_admin());
    }

    #[test]
    fn custom_admin_node() {
        assert!(AuthContext::from_grants(["ops"], "ops").is_admin());
        assert!(!AuthContext::from_grants(["warp.admin"], "ops").is_admin());
    }
}
