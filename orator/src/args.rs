use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Orator speaking-practice coach
#[derive(Debug, Parser)]
#[command(name = "orator", about = "AI feedback gateway for speaking practice")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "orator.toml", env = "ORATOR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ORATOR_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directives, e.g. `info,orator_coach=debug`
    #[arg(long = "log", default_value = "info", env = "RUST_LOG")]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = temp_env::with_vars_unset(["ORATOR_CONFIG", "ORATOR_LISTEN", "RUST_LOG"], || {
            Args::try_parse_from(["orator"]).unwrap()
        });

        assert_eq!(args.config, PathBuf::from("orator.toml"));
        assert!(args.listen.is_none());
        assert_eq!(args.log_filter, "info");
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "orator",
            "--config",
            "/etc/orator/prod.toml",
            "--listen",
            "127.0.0.1:8080",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("/etc/orator/prod.toml"));
        assert_eq!(args.listen, Some(SocketAddr::from(([127, 0, 0, 1], 8080))));
        assert_eq!(args.log_filter, "debug");
    }
}
