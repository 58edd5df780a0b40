//! Application configuration. API endpoints, credentials, paths.

use serde::Deserialize;

/// Public GraphQL country dataset.
pub const DEFAULT_COUNTRIES_API_URL: &str = "https://countries.trevorblades.com/";

/// OpenAI-compatible chat completions endpoint (NVIDIA NIM).
pub const DEFAULT_CHAT_API_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";

/// Completion model served by the default endpoint.
pub const DEFAULT_CHAT_MODEL: &str = "meta/llama-3.1-405b-instruct";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// GraphQL endpoint for the country dataset. Read from WAYFARER_COUNTRIES_API_URL.
    #[serde(default)]
    pub countries_api_url: Option<String>,

    /// Chat completions endpoint. Read from WAYFARER_CHAT_API_URL.
    #[serde(default)]
    pub chat_api_url: Option<String>,

    /// Bearer key for the chat endpoint. Read from WAYFARER_CHAT_API_KEY.
    /// When unset, the mock assistant adapter is used.
    #[serde(default)]
    pub chat_api_key: Option<String>,

    /// Completion model name. Read from WAYFARER_CHAT_MODEL.
    #[serde(default)]
    pub chat_model: Option<String>,

    /// Google OAuth client id (device flow). Read from WAYFARER_GOOGLE_CLIENT_ID.
    #[serde(default)]
    pub google_client_id: Option<String>,

    /// Google OAuth client secret. Read from WAYFARER_GOOGLE_CLIENT_SECRET.
    /// Required by Google's token endpoint even for installed apps.
    #[serde(default)]
    pub google_client_secret: Option<String>,

    /// Path of the persisted session token file. Read from WAYFARER_TOKEN_PATH.
    #[serde(default)]
    pub token_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("WAYFARER"));
        if let Ok(path) = std::env::var("WAYFARER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// GraphQL endpoint, defaulting to the public countries API.
    pub fn countries_api_url_or_default(&self) -> String {
        self.countries_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_COUNTRIES_API_URL.to_string())
    }

    /// Chat endpoint, defaulting to the NIM proxy target.
    pub fn chat_api_url_or_default(&self) -> String {
        self.chat_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_string())
    }

    /// Completion model, defaulting to the Llama 3.1 405B instruct model.
    pub fn chat_model_or_default(&self) -> String {
        self.chat_model
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string())
    }

    /// Returns the chat API key if configured.
    pub fn chat_api_key(&self) -> Option<String> {
        self.chat_api_key
            .clone()
            .or_else(|| std::env::var("WAYFARER_CHAT_API_KEY").ok())
    }

    /// Returns true if the real assistant adapter can be used.
    pub fn is_chat_configured(&self) -> bool {
        self.chat_api_key().is_some()
    }

    /// Google OAuth client id from config or WAYFARER_GOOGLE_CLIENT_ID env.
    pub fn google_client_id(&self) -> Option<String> {
        self.google_client_id
            .clone()
            .or_else(|| std::env::var("WAYFARER_GOOGLE_CLIENT_ID").ok())
    }

    /// Google OAuth client secret from config or WAYFARER_GOOGLE_CLIENT_SECRET env.
    pub fn google_client_secret(&self) -> Option<String> {
        self.google_client_secret
            .clone()
            .or_else(|| std::env::var("WAYFARER_GOOGLE_CLIENT_SECRET").ok())
    }

    /// Token file path, defaulting to ./auth_token.json.
    pub fn token_path_or_default(&self) -> String {
        self.token_path
            .clone()
            .unwrap_or_else(|| "./auth_token.json".to_string())
    }
}
