use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if the routing table references an unconfigured
    /// backend, or if any numeric threshold is out of range.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_routing()?;
        self.validate_thresholds()?;
        Ok(())
    }

    fn validate_routing(&self) -> anyhow::Result<()> {
        for (logical_id, target) in &self.routing.routing_table {
            if !self.backends.contains_key(&target.backend) {
                anyhow::bail!(
                    "routing_table entry '{logical_id}' references unconfigured backend {:?}",
                    target.backend
                );
            }
        }

        for backend in &self.routing.fallback_chain {
            if !self.backends.contains_key(backend) {
                anyhow::bail!("fallback_chain references unconfigured backend {backend:?}");
            }
        }

        Ok(())
    }

    fn validate_thresholds(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.cascade.min_confidence_to_proceed) {
            anyhow::bail!("cascade.min_confidence_to_proceed must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.refinement.convergence_threshold) {
            anyhow::bail!("refinement.convergence_threshold must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.strategy.confidence_threshold) {
            anyhow::bail!("strategy.confidence_threshold must be in [0, 1]");
        }
        if self.refinement.max_iterations == 0 {
            anyhow::bail!("refinement.max_iterations must be greater than 0");
        }
        for (name, backend) in &self.backends {
            if backend.rpm_limit == 0 {
                anyhow::bail!("backend {name:?} has rpm_limit of 0");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const MINIMAL: &str = r#"
        [backends.primary_gateway]
        name = "primary_gateway"
        rpm_limit = 60

        [routing.routing_table.logical-a]
        backend = "primary_gateway"
        native_id = "gpt-test"
    "#;

    #[test]
    fn parses_minimal_config() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend(BackendName::PrimaryGateway).unwrap().rpm_limit, 60);
    }

    #[test]
    fn rejects_routing_table_referencing_unknown_backend() {
        let toml_str = r#"
            [routing.routing_table.logical-a]
            backend = "together"
            native_id = "llama"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn expands_env_var_before_parsing() {
        temp_env::with_var("HIVE_LOADER_TEST_KEY", Some("sk-test-123"), || {
            let toml_str = r#"
                [backends.primary_gateway]
                name = "primary_gateway"
                rpm_limit = 60
                api_key_env = "HIVE_LOADER_TEST_KEY"
            "#;
            let expanded = crate::env::expand_env(toml_str).unwrap();
            let config: Config = toml::from_str(&expanded).unwrap();
            let backend = config.backend(BackendName::PrimaryGateway).unwrap();
            assert_eq!(backend.api_key_env.as_deref(), Some("HIVE_LOADER_TEST_KEY"));
        });
    }

    #[test]
    fn load_missing_file_errors() {
        let err = Config::load(Path::new("/nonexistent/hive-config-test.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
