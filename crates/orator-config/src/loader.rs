use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// A missing provider credential is not a validation error: the server
    /// still starts and reports the problem on every evaluation request.
    ///
    /// # Errors
    ///
    /// Returns an error if a limit or timeout is zero or the health path is malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than 0");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_timeouts(&self) -> anyhow::Result<()> {
        if self.provider.timeout.is_zero() {
            anyhow::bail!("provider.timeout must be greater than 0");
        }

        if self.coach.request_timeout.is_zero() {
            anyhow::bail!("coach.request_timeout must be greater than 0");
        }

        if self.coach.secondary_synthesis_timeout.is_zero() {
            anyhow::bail!("coach.secondary_synthesis_timeout must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use crate::{Config, LogFormat};

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();

        assert!(config.server.listen_address.is_none());
        assert_eq!(config.server.max_upload_bytes, 25 << 20);
        assert!(config.server.health.enabled);
        assert!(config.provider.credential().is_none());
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_file() {
        temp_env::with_var("ORATOR_LOADER_KEY", Some("sk-loader"), || {
            let config = Config::from_toml(
                r#"
                [server]
                listen_address = "127.0.0.1:4000"
                max_upload_bytes = 1048576

                [server.cors]
                origins = ["http://localhost:3000"]

                [provider]
                api_key = "{{ env.ORATOR_LOADER_KEY }}"

                [coach]
                request_timeout = "30s"
                max_previous_exchanges = 4

                [telemetry]
                log_format = "json"
                "#,
            )
            .unwrap();

            assert_eq!(config.server.listen_address.unwrap().port(), 4000);
            assert_eq!(config.server.max_upload_bytes, 1_048_576);
            assert!(config.server.cors.is_some());
            assert_eq!(
                config.provider.credential().map(|key| key.expose_secret()),
                Some("sk-loader")
            );
            assert_eq!(config.coach.request_timeout, Duration::from_secs(30));
            assert_eq!(config.coach.max_previous_exchanges, 4);
            assert_eq!(config.telemetry.unwrap().log_format, LogFormat::Json);
        });
    }

    #[test]
    fn unset_key_with_empty_default_loads_without_credential() {
        temp_env::with_var_unset("ORATOR_LOADER_MISSING", || {
            let config = Config::from_toml(
                r#"
                [provider]
                api_key = "{{ env.ORATOR_LOADER_MISSING | default("") }}"
                "#,
            )
            .unwrap();

            assert!(config.provider.credential().is_none());
        });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml("[provider]\nmodel = \"gpt-4o\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn zero_upload_limit_is_rejected() {
        let err = Config::from_toml("[server]\nmax_upload_bytes = 0").unwrap_err();
        assert!(err.to_string().contains("max_upload_bytes"));
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        let err = Config::from_toml("[coach]\nrequest_timeout = \"0s\"").unwrap_err();
        assert!(err.to_string().contains("coach.request_timeout"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\ncompletion_model = \"gpt-4o-mini\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.provider.completion_model, "gpt-4o-mini");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/orator.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
