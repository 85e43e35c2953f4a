//! Process configuration from flags, environment and `.env`.

use clap::Parser;
use notekeep_api::CorsOrigins;
use std::path::PathBuf;

/// notekeep server settings.
///
/// Every flag can also be supplied through the named environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "notekeep", version, about = "Personal notes REST backend")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// SQLite database file; created with its parent directories if missing.
    #[arg(long, env = "NOTES_DB_PATH", default_value = "notes.sqlite3")]
    pub db_path: PathBuf,

    /// HS256 signing secret for session tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Deployment label reported by `GET /`.
    #[arg(long = "env", env = "APP_ENV", default_value = "development")]
    pub environment: String,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotated log files; stderr when unset.
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,

    /// Comma-separated allowed origins; any origin when unset.
    #[arg(long, env = "CORS_ORIGINS", default_value = "")]
    pub cors_origins: String,
}

impl Config {
    /// Host and port for `TcpListener::bind`; host names are resolved there.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.trim(), self.port)
    }

    pub fn cors(&self) -> CorsOrigins {
        CorsOrigins::parse(&self.cors_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_secret_is_given() {
        let config = Config::try_parse_from(["notekeep", "--jwt-secret", "s3cret"]).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.db_path, PathBuf::from("notes.sqlite3"));
        assert_eq!(config.bind_target(), ("0.0.0.0", 3001));
    }

    #[test]
    fn host_accepts_names_and_bare_ipv6() {
        for host in ["localhost", "::", "127.0.0.1"] {
            let config =
                Config::try_parse_from(["notekeep", "--jwt-secret", "s3cret", "--host", host])
                    .unwrap();
            assert_eq!(config.bind_target(), (host, 3001));
        }
    }

    #[tokio::test]
    async fn localhost_host_binds() {
        let config = Config::try_parse_from([
            "notekeep",
            "--jwt-secret",
            "s3cret",
            "--host",
            "localhost",
            "--port",
            "0",
        ])
        .unwrap();

        let listener = tokio::net::TcpListener::bind(config.bind_target())
            .await
            .unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn cors_list_is_parsed() {
        let config = Config::try_parse_from([
            "notekeep",
            "--jwt-secret",
            "s3cret",
            "--cors-origins",
            "http://localhost:3000",
        ])
        .unwrap();
        assert_eq!(
            config.cors(),
            CorsOrigins::List(vec!["http://localhost:3000".to_string()])
        );
    }
}
