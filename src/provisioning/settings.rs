use serde::Deserialize;
use crate::contract::lib::{Error, Result};
use crate::utils::config::Config;

/// Names the provisioning flows share: where workflows run and which secret
/// and keys hold the credentials they need.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProvisioningSettings {
    pub workflow_namespace: String,
    pub external_secrets_namespace: String,
    pub credentials_secret_name: String,
    pub api_token_key: String,
    pub source_control_token_key: String,
}

impl ProvisioningSettings {
    /// Built-in defaults, then `PROVISIONER_CONFIG_FILE` if set, then
    /// `PROVISIONER_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Config::provisioner_config_file().as_deref())
    }

    pub fn load_from(file: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("workflow_namespace", "argo")
            .and_then(|b| b.set_default("external_secrets_namespace", "external-secrets"))
            .and_then(|b| b.set_default("credentials_secret_name", "provisioner-credentials"))
            .and_then(|b| b.set_default("api_token_key", "token"))
            .and_then(|b| b.set_default("source_control_token_key", "source-control-token"))
            .map_err(Error::ConfigurationError)?;

        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file));
        }

        builder
            .add_source(config::Environment::with_prefix("PROVISIONER"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(Error::ConfigurationError)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::env::temp_dir;
    use serial_test::serial;
    use super::*;

    #[test]
    #[serial]
    fn defaults_apply_without_sources() {
        env::remove_var("PROVISIONER_WORKFLOW_NAMESPACE");

        let settings = ProvisioningSettings::load_from(None).unwrap();

        assert_eq!(settings.workflow_namespace, "argo");
        assert_eq!(settings.credentials_secret_name, "provisioner-credentials");
        assert_eq!(settings.api_token_key, "token");
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        let file = temp_dir().join(format!("platform-applier-settings-{}.yaml", std::process::id()));
        std::fs::write(
            &file,
            "workflow_namespace: workflows\ncredentials_secret_name: from-file\n",
        )
        .unwrap();
        env::set_var("PROVISIONER_WORKFLOW_NAMESPACE", "from-env");

        let settings = ProvisioningSettings::load_from(file.to_str()).unwrap();

        assert_eq!(settings.workflow_namespace, "from-env");
        assert_eq!(settings.credentials_secret_name, "from-file");
        assert_eq!(settings.external_secrets_namespace, "external-secrets");

        env::remove_var("PROVISIONER_WORKFLOW_NAMESPACE");
        std::fs::remove_file(file).unwrap();
    }

    #[test]
    #[serial]
    fn missing_file_is_a_configuration_error() {
        let err = ProvisioningSettings::load_from(Some("/nonexistent/platform-applier")).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }
}
