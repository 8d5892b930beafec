use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub bind_address: String,
    pub allowed_origin: String,
    pub store_timeout_secs: u64,
    pub critical_zone_limit: usize,
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_key: Option<String>,
}

/// Credentials for the hosted complaint store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseSettings {
    pub url: String,
    pub key: String,
}

impl GatewayConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Store credentials, or `None` when either one is missing or blank.
    pub fn supabase(&self) -> Option<SupabaseSettings> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (non_blank(&self.supabase_url), non_blank(&self.supabase_key)) {
            (Some(url), Some(key)) => Some(SupabaseSettings { url, key }),
            _ => None,
        }
    }
}

pub fn load_gateway_config() -> anyhow::Result<GatewayConfig> {
    load_gateway_config_from("config/gateway", std::env::vars().collect())
}

/// Defaults, then the optional config file, then `GATEWAY_*` variables.
/// Store credentials come from `SUPABASE_URL` and `SUPABASE_KEY`.
pub fn load_gateway_config_from(
    file: &str,
    env: config::Map<String, String>,
) -> anyhow::Result<GatewayConfig> {
    let settings = config::Config::builder()
        .set_default("bind_address", "0.0.0.0:8000")?
        .set_default("allowed_origin", "http://localhost:3000")?
        .set_default("store_timeout_secs", 10)?
        .set_default("critical_zone_limit", 5)?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix("GATEWAY")
                .try_parsing(true)
                .source(Some(env.clone())),
        )
        .set_override_option("supabase_url", env.get("SUPABASE_URL").cloned())?
        .set_override_option("supabase_key", env.get("SUPABASE_KEY").cloned())?
        .build()?;

    Ok(settings.try_deserialize()?)
}
