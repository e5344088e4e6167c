use secrecy::SecretString;
use serde::Deserialize;

/// One of the backends the Provider Router may dispatch to (`spec.md` §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendName {
    PrimaryGateway,
    Google,
    Xai,
    Anthropic,
    Deepseek,
    Together,
    Groq,
    Cerebras,
    Huggingface,
    LocalStub,
}

impl BackendName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryGateway => "primary_gateway",
            Self::Google => "google",
            Self::Xai => "xai",
            Self::Anthropic => "anthropic",
            Self::Deepseek => "deepseek",
            Self::Together => "together",
            Self::Groq => "groq",
            Self::Cerebras => "cerebras",
            Self::Huggingface => "huggingface",
            Self::LocalStub => "local_stub",
        }
    }
}

/// Configuration for a single enabled backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    pub name: BackendName,
    /// Requests per 60s sliding window.
    pub rpm_limit: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: String,
    #[serde(default = "default_read_timeout")]
    pub read_timeout: String,
    /// Name of the environment variable holding this backend's API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Base URL override, mainly for `local_stub` and self-hosted gateways.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_connect_timeout() -> String {
    "5s".to_owned()
}

fn default_read_timeout() -> String {
    "30s".to_owned()
}

impl BackendConfig {
    /// Resolve the API key from its configured environment variable, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key_env` names a variable that is unset.
    pub fn resolve_api_key(&self) -> anyhow::Result<Option<SecretString>> {
        match &self.api_key_env {
            None => Ok(None),
            Some(var) => {
                let value = std::env::var(var)
                    .map_err(|_| anyhow::anyhow!("api_key_env `{var}` is not set for backend {:?}", self.name))?;
                Ok(Some(SecretString::from(value)))
            }
        }
    }
}
