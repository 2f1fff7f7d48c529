use std::env;
use std::str::FromStr;

use crate::clustering::DEFAULT_GRID_SIZE;

/// Retrieves an environment variable and parses it, falling back to `default`
/// when it is unset or does not parse.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `default`: Value used when the variable is missing or invalid.
pub fn get_env_var_or<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty entries are dropped, so an unset variable yields an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Browser origins allowed to call the API when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:8000",
    "http://localhost:3000",
    "http://127.0.0.1:8000",
    "http://127.0.0.1:3000",
    "https://knn-votantes-frontend.onrender.com",
];

/// Retrieves an optional parsed environment variable.
pub fn get_env_var_opt<T: FromStr>(var: &str) -> Option<T> {
    env::var(var).ok().and_then(|v| v.trim().parse::<T>().ok())
}

/// Server settings read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub grid_size: usize,
    pub seed: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDRESS`, `PORT`, `GRID_SIZE`, `KMEANS_SEED` and the
    /// `;`-separated `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let origins = get_env_var_as_vec("ALLOWED_ORIGINS", ';');
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: get_env_var_or("PORT", defaults.port),
            grid_size: get_env_var_or("GRID_SIZE", defaults.grid_size),
            seed: get_env_var_opt("KMEANS_SEED"),
            allowed_origins: if origins.is_empty() {
                defaults.allowed_origins
            } else {
                origins
            },
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parsing_falls_back() {
        env::set_var("HOSPITAL_GRID_TEST_PORT", "not-a-port");
        assert_eq!(get_env_var_or("HOSPITAL_GRID_TEST_PORT", 8080_u16), 8080);
        env::set_var("HOSPITAL_GRID_TEST_PORT", " 9090 ");
        assert_eq!(get_env_var_or("HOSPITAL_GRID_TEST_PORT", 8080_u16), 9090);
        assert_eq!(get_env_var_opt::<u64>("HOSPITAL_GRID_TEST_UNSET"), None);
    }

    #[test]
    fn test_env_var_as_vec() {
        env::set_var("HOSPITAL_GRID_TEST_ORIGINS", " http://a.test ;; http://b.test ");
        assert_eq!(
            get_env_var_as_vec("HOSPITAL_GRID_TEST_ORIGINS", ';'),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(get_env_var_as_vec("HOSPITAL_GRID_TEST_ORIGINS_UNSET", ';').is_empty());
    }

    #[test]
    fn test_default_origins() {
        let config = ServerConfig::default();
        assert_eq!(config.allowed_origins.len(), DEFAULT_ALLOWED_ORIGINS.len());
        assert!(config
            .allowed_origins
            .contains(&"http://localhost:3000".to_string()));
    }

    #[test]
    fn test_default_addr() {
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:8080");
    }
}
