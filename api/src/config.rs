//! Service configuration loading
//!
//! All three binaries read the same environment; only the port variable
//! and its default differ.

use ms_shared::config::AppConfig;

/// Which binary is starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Auth,
    User,
    Order,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Auth => "auth-service",
            ServiceKind::User => "user-service",
            ServiceKind::Order => "order-service",
        }
    }

    pub fn port_var(&self) -> &'static str {
        match self {
            ServiceKind::Auth => "AUTH_PORT",
            ServiceKind::User => "USER_PORT",
            ServiceKind::Order => "ORDER_PORT",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Auth => 7001,
            ServiceKind::User => 8000,
            ServiceKind::Order => 9000,
        }
    }
}

/// Read the environment and refuse unsafe settings
///
/// Call after `dotenv()` so values from `.env` are visible.
pub fn load(kind: ServiceKind) -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env(kind.port_var(), kind.default_port());
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid {} configuration: {}", kind.name(), e))?;

    if config.auth.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET not set, using the development default");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(ServiceKind::Auth.default_port(), 7001);
        assert_eq!(ServiceKind::User.default_port(), 8000);
        assert_eq!(ServiceKind::Order.default_port(), 9000);
        assert_eq!(ServiceKind::Order.port_var(), "ORDER_PORT");
    }
}
