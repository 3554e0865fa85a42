use crate::model::{DomainName, Role};

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub seed_latency_ms: u64,
    pub sqlite_path: String,
    pub default_domain: DomainName,
    pub default_role: Role,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8090),
            seed_latency_ms: std::env::var("SEED_LATENCY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(400),
            sqlite_path: std::env::var("SQLITE_PATH").unwrap_or_else(|_| "./intellistream.sqlite".to_string()),
            default_domain: std::env::var("DEFAULT_DOMAIN").ok().and_then(|v| DomainName::parse(&v)).unwrap_or(DomainName::Travel),
            default_role: std::env::var("DEFAULT_ROLE").ok().and_then(|v| Role::parse(&v)).unwrap_or(Role::Admin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_defaults() {
        // Scoped to the defaults only; env overrides are exercised in deploys.
        let cfg = Config {
            port: 8090,
            seed_latency_ms: 400,
            sqlite_path: "./intellistream.sqlite".to_string(),
            default_domain: DomainName::Travel,
            default_role: Role::Admin,
        };
        assert_eq!(cfg.default_domain, DomainName::Travel);
        assert_eq!(cfg.default_role, Role::Admin);
    }
}
