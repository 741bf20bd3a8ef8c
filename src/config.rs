use std::{net::{IpAddr, Ipv4Addr}, path::PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    let args = std::env::args().collect::<Vec<_>>();
    let Some(arg_path) = args.get(1) else {
        println!("Using default configuration");
        return Config::default();
    };
    let arg_path = PathBuf::from(arg_path);
    println!("Reading config at {}", arg_path.display());
    let s = std::fs::read_to_string(arg_path).expect("Reading config file failed. Does it exist?");
    toml::from_str(&s).expect("Invalid configuration TOML")
});

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub net: NetConfig,
    pub metadata: MetadataConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct NetConfig {
    pub ip: IpAddr,
    pub port: u16,
    pub threads: Option<usize>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 7878,
            threads: Some(10)
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct MetadataConfig {
    /// Directory searched when a request carries no x-metadata-path header.
    /// Relative paths are resolved against the working directory.
    pub path: PathBuf,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("../../metadata")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn full_toml_round_trip() {
        let toml = r#"
            [net]
            ip = "0.0.0.0"
            port = 8080
            threads = 4

            [metadata]
            path = "fixtures/metadata"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.net.port, 8080);
        assert_eq!(config.net.threads, Some(4));
        assert_eq!(config.metadata.path.to_str(), Some("fixtures/metadata"));
    }

    #[test]
    fn default_points_two_levels_up() {
        let config = Config::default();
        assert_eq!(config.metadata.path.to_str(), Some("../../metadata"));
    }
}
