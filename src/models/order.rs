// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Status do pedido ---
// "Orcado" = orçamento salvo; "Pendente" = pedido firme aguardando
// pagamento/confirmação. Os outros dois existem para o back-office
// (PATCH de status e o gráfico completados vs pendentes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Orcado,
    Pendente,
    Completado,
    Cancelado,
}

// Um item do pedido: derivado do rascunho na hora, nunca armazenado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: Uuid,
    pub quantity: u32,
}

// Cabeçalho do pedido enviado ao backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    pub buyer_id: Uuid,
    pub guest_count: u32,
    pub event_name: String,
    // HH:MM
    pub start_time: String,
    // HH:MM, já com a virada de meia-noite resolvida
    pub end_time: String,
    // YYYY-MM-DD
    pub event_date: String,
    // YYYY-MM-DD (a data de hoje, no fuso do cliente)
    pub purchase_date: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub header: OrderHeader,
    pub items: Vec<LineItem>,
}

// --- Pedido visto pelo back-office ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: Uuid,
    pub event_name: String,
    pub event_date: String,
    pub status: OrderStatus,
    pub total: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}
