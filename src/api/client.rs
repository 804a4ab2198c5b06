// src/api/client.rs

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;
use crate::models::auth::{CreateUserPayload, Credentials, TokenResponse, User};
use crate::models::catalog::{Item, ItemCategory};
use crate::models::dashboard::{CompletedVsPending, CountTotal, MonthlyEventsEntry, RevenueTotal};
use crate::models::order::{LineItem, OrderPayload, OrderStatus, Pedido};
use crate::models::payment::PaymentRedirect;
use crate::services::catalog::CatalogSource;
use crate::services::orders::OrderSink;
use crate::services::pricing::PricingSource;

// ---
// Validação customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O preço não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: criação/edição de item do catálogo (admin)
// ---
#[derive(Debug, Clone, serde::Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertItemPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    pub category: ItemCategory,

    pub image_url: Option<String>,
}

// Corpo do POST /pedidos/preco e sua resposta.
#[derive(Debug, serde::Serialize)]
struct PriceRequest<'a> {
    items: &'a [LineItem],
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    total: Decimal,
}

// ---
// ApiClient
// ---
// Cliente HTTP único para todas as rotas do backend. Guarda a URL base e
// o bearer token da sessão; o `reqwest::Client` interno já vem com
// timeout, então nenhuma chamada fica pendurada para sempre.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    // Reaproveita um `reqwest::Client` existente (pooling de conexões).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().unwrap().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // Transforma a resposta em T, normalizando qualquer corpo de erro em
    // UMA mensagem legível (e logando o bruto para diagnóstico).
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("🔥 Backend respondeu {status}: {body}");
            return Err(AppError::from_backend(status.as_u16(), &body));
        }
        Ok(response.json().await?)
    }

    // Igual ao `parse`, para rotas que não devolvem corpo útil.
    async fn check(response: reqwest::Response) -> Result<(), AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("🔥 Backend respondeu {status}: {body}");
            return Err(AppError::from_backend(status.as_u16(), &body));
        }
        Ok(())
    }

    // --- Autenticação e usuários ---

    // POST /auth/token, credenciais form-encoded (padrão OAuth2).
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(self.url("/auth/token"))
            .form(credentials)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        let response = self
            .http
            .post(self.url("/users/create/"))
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    // --- Catálogo ---

    pub async fn get_items(&self) -> Result<Vec<Item>, AppError> {
        let response = self.authorized(self.http.get(self.url("/items"))).send().await?;
        Self::parse(response).await
    }

    pub async fn create_item(&self, payload: &UpsertItemPayload) -> Result<Item, AppError> {
        payload.validate()?;
        let response = self
            .authorized(self.http.post(self.url("/items")))
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_item(
        &self,
        id: Uuid,
        payload: &UpsertItemPayload,
    ) -> Result<Item, AppError> {
        payload.validate()?;
        let response = self
            .authorized(self.http.put(self.url(&format!("/items/{id}"))))
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    // Liga/desliga a visibilidade do item na vitrine.
    pub async fn toggle_item_status(&self, id: Uuid) -> Result<(), AppError> {
        let response = self
            .authorized(self.http.patch(self.url(&format!("/items/{id}/status"))))
            .send()
            .await?;
        Self::check(response).await
    }

    // --- Dashboard ---

    async fn get_dash<T: DeserializeOwned>(&self, resource: &str) -> Result<T, AppError> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/dash/get/{resource}"))))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn dash_revenue(&self) -> Result<RevenueTotal, AppError> {
        self.get_dash("receita").await
    }

    pub async fn dash_active(&self) -> Result<CountTotal, AppError> {
        self.get_dash("ativos").await
    }

    pub async fn dash_pending(&self) -> Result<CountTotal, AppError> {
        self.get_dash("pendentes").await
    }

    pub async fn dash_this_month(&self) -> Result<CountTotal, AppError> {
        self.get_dash("thisMonth").await
    }

    pub async fn dash_events_per_month(&self) -> Result<Vec<MonthlyEventsEntry>, AppError> {
        self.get_dash("eventosPorMes").await
    }

    pub async fn dash_completed_vs_pending(&self) -> Result<CompletedVsPending, AppError> {
        self.get_dash("completados_vs_pendentes").await
    }

    // --- Pedidos ---

    pub async fn list_orders(&self) -> Result<Vec<Pedido>, AppError> {
        let response = self.authorized(self.http.get(self.url("/pedidos"))).send().await?;
        Self::parse(response).await
    }

    pub async fn set_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), AppError> {
        let response = self
            .authorized(self.http.patch(self.url(&format!("/pedidos/{id}/status"))))
            .json(&serde_json::json!({ "id": id, "status": status }))
            .send()
            .await?;
        Self::check(response).await
    }

    // --- Pagamento ---

    // Devolve a URL de redirecionamento do Mercado Pago; a UI abre em
    // pop-up e reconsulta o status do pedido quando ele fecha.
    pub async fn get_payment_url(&self, order_id: Uuid) -> Result<String, AppError> {
        let response = self
            .authorized(self.http.get(self.url("/payment/getPayment")))
            .query(&[("id", order_id.to_string())])
            .send()
            .await?;
        let redirect: PaymentRedirect = Self::parse(response).await?;
        Ok(redirect.url)
    }
}

// --- As seams que o fluxo de personalização injeta ---

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_items(&self) -> Result<Vec<Item>, AppError> {
        self.get_items().await
    }
}

#[async_trait]
impl PricingSource for ApiClient {
    async fn confirm_total(&self, items: &[LineItem]) -> Result<Decimal, AppError> {
        let response = self
            .authorized(self.http.post(self.url("/pedidos/preco")))
            .json(&PriceRequest { items })
            .send()
            .await?;
        let parsed: PriceResponse = Self::parse(response).await?;
        Ok(parsed.total)
    }
}

#[async_trait]
impl OrderSink for ApiClient {
    async fn create_order(&self, payload: &OrderPayload) -> Result<Pedido, AppError> {
        let response = self
            .authorized(self.http.post(self.url("/pedidos")))
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_perde_a_barra_final() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://localhost:8000/");
        assert_eq!(client.url("/items"), "http://localhost:8000/items");
    }

    #[test]
    fn payload_de_item_sem_descricao_nao_passa() {
        let payload = UpsertItemPayload {
            description: String::new(),
            price: Decimal::new(1000, 2),
            category: ItemCategory::Shots,
            image_url: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_de_item_com_preco_negativo_nao_passa() {
        let payload = UpsertItemPayload {
            description: "Tequila".to_string(),
            price: Decimal::new(-100, 2),
            category: ItemCategory::Shots,
            image_url: None,
        };
        assert!(payload.validate().is_err());
    }
}
