// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Agregados consumidos pelas rotas GET /dash/get/*.
// Cada struct espelha o JSON de uma rota; o frontend só exibe.

// /dash/get/receita
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTotal {
    pub total: Decimal,
}

// /dash/get/ativos, /dash/get/pendentes, /dash/get/thisMonth
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTotal {
    pub total: i64,
}

// Uma barra do gráfico /dash/get/eventosPorMes ("2025-06" -> 12)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEventsEntry {
    pub month: String,
    pub total: i64,
}

// /dash/get/completados_vs_pendentes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedVsPending {
    #[serde(rename = "completados")]
    pub completed: i64,
    #[serde(rename = "pendentes")]
    pub pending: i64,
}
