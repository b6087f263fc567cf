use std::env;

use anyhow::{Context, Result};

#[derive(Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub jwt_secret: String,
    pub port: u16,
    pub allowed_origins: String,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Ok(Config {
            supabase_url: env::var("SUPABASE_URL").context("SUPABASE_URL not set")?,
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .context("SUPABASE_SERVICE_ROLE_KEY not set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .context("PORT is not a valid port number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into()),
        })
    }

    #[cfg(test)]
    pub fn test() -> Config {
        Config {
            supabase_url: "http://localhost:54321".into(),
            supabase_service_role_key: "service-role-test-key".into(),
            jwt_secret: "test-secret".into(),
            port: 0,
            allowed_origins: String::new(),
        }
    }
}

pub fn mask_key(k: &str) -> String {
    if k.len() <= 8 {
        "[REDACTED]".to_string()
    } else {
        format!("{}***{}", &k[..4], &k[k.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_are_fully_redacted() {
        assert_eq!(mask_key("abc"), "[REDACTED]");
        assert_eq!(mask_key("12345678"), "[REDACTED]");
    }

    #[test]
    fn long_keys_keep_only_the_edges() {
        assert_eq!(mask_key("service-role-secret"), "serv***cret");
    }
}
