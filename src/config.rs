use anyhow::Result;
use config::{Config, File};
use directories::ProjectDirs;
use serde::Deserialize;

/// Environment variable the API key is read from (after `.env` loading).
pub const KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Scaffolding value shipped in `.env` examples; treated as "no key".
pub const KEY_PLACEHOLDER: &str = "your_gemini_api_key_here";

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub bg: String,      // background
    pub main: String,    // brand color (stepper, highlights)
    pub caret: String,   // focused input marker
    pub text: String,    // entered text / generated output
    pub sub: String,     // labels, hints, placeholder text
    #[serde(alias = "subAlt")]
    pub sub_alt: String, // subtle UI elements (footer, borders)
    pub error: String,   // validation notices, failed generations
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: "#2c2e34".to_string(),
            main: "#e2b714".to_string(),
            caret: "#e2b714".to_string(),
            text: "#d1d0c5".to_string(),
            sub: "#646669".to_string(),
            sub_alt: "#45474d".to_string(),
            error: "#ca4754".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-pro".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl ApiConfig {
    /// The key that may actually be sent. Blank and placeholder values count
    /// as absent so a copied `.env` template never reaches the network.
    pub fn resolved_key(&self) -> Option<&str> {
        match self.api_key.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(key) if key == KEY_PLACEHOLDER => None,
            Some(key) => Some(key),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let theme = Theme::default();
        let api = ApiConfig::default();

        let mut builder = Config::builder()
            .set_default("theme.bg", theme.bg)?
            .set_default("theme.main", theme.main)?
            .set_default("theme.caret", theme.caret)?
            .set_default("theme.text", theme.text)?
            .set_default("theme.sub", theme.sub)?
            .set_default("theme.subAlt", theme.sub_alt)?
            .set_default("theme.error", theme.error)?
            .set_default("api.model", api.model)?
            .set_default("api.endpoint", api.endpoint)?
            .set_default("api.timeout_secs", api.timeout_secs)?;

        if let Some(proj_dirs) = ProjectDirs::from("", "", "drafta") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                builder = builder.add_source(File::from(config_path));
            }
        }

        let cfg = builder.build()?;
        let mut app_config: AppConfig = cfg.try_deserialize()?;

        // the environment always wins over the config file for the key
        if let Ok(key) = std::env::var(KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                app_config.api.api_key = Some(key);
            }
        }

        Ok(app_config)
    }
}
