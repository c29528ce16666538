//! Command-line and environment configuration.

use clap::Parser;

/// Repository webhook receiver and activity feed.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "HOOKFEED_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Postgres connection string. Events are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Table holding event documents.
    #[arg(long, env = "EVENTS_COLLECTION", default_value = "events")]
    pub collection: String,

    /// Size of the database connection pool.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value = "5")]
    pub max_connections: u32,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Explicit flags win over the environment, so these don't depend on the caller's env.
    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "hookfeed",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--database-url",
            "postgres://localhost/github_events",
            "--collection",
            "webhook_events",
            "--max-connections",
            "2",
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/github_events")
        );
        assert_eq!(config.collection, "webhook_events");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Config::try_parse_from(["hookfeed", "--port", "http"]).is_err());
    }
}
