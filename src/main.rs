//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; session restore is delegated to SessionService.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer::adapters::assistant::{MockAssistant, NimAdapter};
use wayfarer::adapters::auth::GoogleAuth;
use wayfarer::adapters::countries::GraphqlCountries;
use wayfarer::adapters::persistence::TokenFile;
use wayfarer::adapters::ui::TuiInputPort;
use wayfarer::ports::{AssistantPort, AuthPort, CountryGateway, InputPort, TokenStorePort};
use wayfarer::shared::config::AppConfig;
use wayfarer::usecases::{CatalogService, ChatService, SessionService, SessionState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    wayfarer::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();
    let client_id = cfg.google_client_id().unwrap_or_default();
    if client_id.is_empty() {
        anyhow::bail!(
            "Set WAYFARER_GOOGLE_CLIENT_ID (env or .env). Create a device-flow OAuth client at \
             https://console.cloud.google.com/apis/credentials"
        );
    }
    let client_secret = cfg.google_client_secret().unwrap_or_default();

    let token_path = PathBuf::from(cfg.token_path_or_default());
    info!(path = %token_path.display(), "session token file");

    // --- Adapters ---
    let tokens: Arc<dyn TokenStorePort> = Arc::new(TokenFile::new(&token_path));
    let auth: Arc<dyn AuthPort> = Arc::new(GoogleAuth::new(client_id, client_secret));
    let countries: Arc<dyn CountryGateway> =
        Arc::new(GraphqlCountries::new(cfg.countries_api_url_or_default()));

    let assistant: Arc<dyn AssistantPort> = if cfg.is_chat_configured() {
        info!(
            model = %cfg.chat_model_or_default(),
            url = %cfg.chat_api_url_or_default(),
            "travel assistant enabled"
        );
        Arc::new(NimAdapter::new(
            cfg.chat_api_url_or_default(),
            cfg.chat_api_key().unwrap_or_default(),
            cfg.chat_model_or_default(),
        ))
    } else {
        warn!("WAYFARER_CHAT_API_KEY not set, using mock assistant");
        Arc::new(MockAssistant::new())
    };

    // --- Services ---
    let session = Arc::new(SessionService::new(auth, tokens));
    let catalog = Arc::new(CatalogService::new(countries));
    let chat = Arc::new(ChatService::new(assistant));

    // Restore from the persisted token before showing the gate.
    match session.restore().await {
        SessionState::Authenticated(user) => info!(email = %user.email, "welcome back"),
        SessionState::Failed(reason) => warn!(reason, "stored session invalid, sign in again"),
        _ => info!("no stored session"),
    }

    // --- Run (sign-in gate -> main menu) ---
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        Arc::clone(&session),
        Arc::clone(&catalog),
        Arc::clone(&chat),
    ));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
