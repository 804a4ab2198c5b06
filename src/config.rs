// src/config.rs

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use uuid::Uuid;

use crate::api::client::ApiClient;
use crate::flow::sequencer::DEFAULT_HOP;
use crate::flow::store::DraftState;
use crate::flow::wizard::EventFlow;
use crate::services::auth::AuthService;
use crate::services::catalog::{CATALOG_TTL, CatalogService};
use crate::services::dashboard::DashboardService;
use crate::services::orders::OrderService;
use crate::services::pricing::PricingService;
use crate::storage::draft_store::DraftStore;
use crate::storage::local::FileStore;

// Inicializa o logger global. Quem embarca a crate chama uma vez na
// subida da aplicação.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}

pub struct AppConfig {
    pub api_base_url: String,
    pub storage_dir: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("API_BASE_URL").context("API_BASE_URL deve ser definida")?;
        let storage_dir = env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".dados_locais"));
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Ok(Self { api_base_url, storage_dir, http_timeout })
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub dashboard: DashboardService,
    store: Arc<FileStore>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        // --- Monta o gráfico de dependências ---
        let api = Arc::new(ApiClient::new(config.api_base_url.as_str(), config.http_timeout)?);
        let auth = Arc::new(AuthService::new(api.clone()));
        let catalog = Arc::new(CatalogService::new(api.clone(), CATALOG_TTL));
        let dashboard = DashboardService::new(api.clone());
        let store = Arc::new(FileStore::new(config.storage_dir.clone()));

        tracing::info!("✅ Aplicação montada apontando para {}.", config.api_base_url);

        Ok(Self { config, api, auth, catalog, dashboard, store })
    }

    // Um assistente de personalização novo (sessão avulsa).
    pub fn event_flow(&self) -> EventFlow {
        self.build_flow(DraftStore::new(self.store.clone()))
    }

    // Personalização de um pacote pronto: cada pacote tem seu próprio
    // rascunho persistido.
    pub fn package_flow(&self, package_id: Uuid) -> EventFlow {
        self.build_flow(DraftStore::for_package(self.store.clone(), package_id))
    }

    fn build_flow(&self, draft_store: DraftStore) -> EventFlow {
        EventFlow::new(
            DraftState::open(draft_store),
            DEFAULT_HOP,
            PricingService::new(self.api.clone()),
            OrderService::new(self.api.clone()),
            self.catalog.clone(),
        )
    }
}
