//! Process configuration (flags, each backed by an environment variable).

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

use stockroom_infra::{SessionLimits, SessionSeed};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom", about = "Single-page in-memory inventory editor")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "STOCKROOM_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Start new sessions with an empty inventory instead of the sample items.
    #[arg(long, env = "STOCKROOM_EMPTY")]
    pub empty: bool,

    /// Minutes of inactivity after which a session is dropped.
    #[arg(long, env = "STOCKROOM_SESSION_TTL_MINUTES", default_value_t = 30, value_parser = clap::value_parser!(i64).range(1..))]
    pub session_ttl_minutes: i64,

    /// Upper bound on live sessions; the least recently seen is evicted.
    #[arg(long, env = "STOCKROOM_MAX_SESSIONS", default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_sessions: u64,

    /// Log output format.
    #[arg(long, env = "STOCKROOM_LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn seed(&self) -> SessionSeed {
        if self.empty {
            SessionSeed::Empty
        } else {
            SessionSeed::Seeded
        }
    }

    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            idle_ttl: chrono::Duration::minutes(self.session_ttl_minutes),
            max_sessions: usize::try_from(self.max_sessions).unwrap_or(usize::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally_with_seeded_sessions() {
        let config = Config::try_parse_from(["stockroom"]).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.seed(), SessionSeed::Seeded);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.limits(), SessionLimits::default());
    }

    #[test]
    fn session_limits_are_configurable() {
        let config = Config::try_parse_from([
            "stockroom",
            "--session-ttl-minutes",
            "5",
            "--max-sessions",
            "100",
        ])
        .unwrap();
        let limits = config.limits();
        assert_eq!(limits.idle_ttl, chrono::Duration::minutes(5));
        assert_eq!(limits.max_sessions, 100);

        assert!(Config::try_parse_from(["stockroom", "--max-sessions", "0"]).is_err());
        assert!(Config::try_parse_from(["stockroom", "--session-ttl-minutes", "0"]).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "stockroom",
            "--bind",
            "0.0.0.0:9000",
            "--empty",
            "--log-format",
            "pretty",
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.seed(), SessionSeed::Empty);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_malformed_bind_address() {
        assert!(Config::try_parse_from(["stockroom", "--bind", "nowhere"]).is_err());
    }
}
