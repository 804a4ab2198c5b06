// src/services/dashboard.rs

use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::common::error::AppError;
use crate::models::dashboard::{CompletedVsPending, CountTotal, MonthlyEventsEntry, RevenueTotal};

// Tudo que a tela do dashboard precisa, em uma carga só.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub revenue: RevenueTotal,
    pub active: CountTotal,
    pub pending: CountTotal,
    pub this_month: CountTotal,
    pub events_per_month: Vec<MonthlyEventsEntry>,
    pub completed_vs_pending: CompletedVsPending,
}

// ---
// DashboardService
// ---
// Fachada fina sobre as seis rotas GET /dash/get/*. As leituras são
// independentes entre si, então disparam em paralelo; qualquer falha
// derruba a carga inteira e a tela mostra o placeholder (leitura de
// dashboard nunca é crítica).
pub struct DashboardService {
    api: Arc<ApiClient>,
}

impl DashboardService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> Result<DashboardData, AppError> {
        let (revenue, active, pending, this_month, events_per_month, completed_vs_pending) =
            tokio::try_join!(
                self.api.dash_revenue(),
                self.api.dash_active(),
                self.api.dash_pending(),
                self.api.dash_this_month(),
                self.api.dash_events_per_month(),
                self.api.dash_completed_vs_pending(),
            )?;

        Ok(DashboardData {
            revenue,
            active,
            pending,
            this_month,
            events_per_month,
            completed_vs_pending,
        })
    }
}
