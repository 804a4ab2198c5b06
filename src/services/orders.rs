// src/services/orders.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Timelike};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::event::EventDraft;
use crate::models::order::{OrderHeader, OrderPayload, OrderStatus, Pedido};
use crate::storage::draft_store::DraftStore;

// Seam de rede da criação de pedidos (POST /pedidos).
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn create_order(&self, payload: &OrderPayload) -> Result<Pedido, AppError>;
}

// Horário de término = início + duração, com a virada de meia-noite
// resolvida módulo 24h ("22:00" + "04:00" -> "02:00").
pub fn compute_end_time(start: &str, duration: &str) -> Result<String, AppError> {
    let start =
        NaiveTime::parse_from_str(start, "%H:%M").map_err(|_| AppError::InvalidEventTime)?;
    let duration =
        NaiveTime::parse_from_str(duration, "%H:%M").map_err(|_| AppError::InvalidEventTime)?;

    let total = (start.hour() * 60 + start.minute() + duration.hour() * 60 + duration.minute())
        % (24 * 60);
    Ok(format!("{:02}:{:02}", total / 60, total % 60))
}

// Monta o payload final a partir do rascunho. A rejeição de pedido vazio
// vale para os DOIS status (orçamento e pedido firme), independente da
// validação por passo: ela é a última linha de defesa antes da rede.
pub fn build_payload(
    draft: &EventDraft,
    buyer_id: Uuid,
    status: OrderStatus,
    today: NaiveDate,
) -> Result<OrderPayload, AppError> {
    let items = draft.derive_line_items();
    if items.is_empty() {
        return Err(AppError::EmptyOrder);
    }

    let guest_count: u32 = draft
        .info
        .guest_count
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidGuestCount)?;

    let header = OrderHeader {
        buyer_id,
        guest_count,
        event_name: draft.info.name.clone(),
        start_time: draft.info.start_time.clone(),
        end_time: compute_end_time(&draft.info.start_time, &draft.info.duration)?,
        event_date: draft.info.date.clone(),
        purchase_date: today.format("%Y-%m-%d").to_string(),
        status,
    };

    Ok(OrderPayload { header, items })
}

// ---
// OrderService
// ---
// Envia o pedido montado e, no sucesso, apaga o rascunho persistido, e a
// próxima montagem do assistente começa do zero. Na falha o estado fica
// intacto para o usuário tentar de novo.
pub struct OrderService {
    sink: Arc<dyn OrderSink>,
    // Guarda uniforme contra duplo clique: vale para os dois caminhos de
    // envio (orçamento e pedido firme).
    submitting: AtomicBool,
}

impl OrderService {
    pub fn new(sink: Arc<dyn OrderSink>) -> Self {
        Self { sink, submitting: AtomicBool::new(false) }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub async fn submit(
        &self,
        payload: &OrderPayload,
        draft_store: &DraftStore,
    ) -> Result<Pedido, AppError> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(AppError::SubmissionInFlight);
        }

        let result = self.sink.create_order(payload).await;
        self.submitting.store(false, Ordering::SeqCst);

        match result {
            Ok(pedido) => {
                tracing::info!("✅ Pedido {} criado com status {:?}.", pedido.id, pedido.status);
                draft_store.clear();
                Ok(pedido)
            }
            Err(e) => {
                // A mensagem do backend sobe como veio; o estado local
                // permanece para a nova tentativa.
                tracing::error!("Falha ao enviar o pedido: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::MemoryStore;
    use std::sync::atomic::AtomicUsize;

    fn rascunho_completo() -> EventDraft {
        let mut draft = EventDraft::default();
        draft.selected_event_type = "Casamento".to_string();
        draft.info.name = "Ana e João".to_string();
        draft.info.date = "2025-06-21".to_string();
        draft.info.start_time = "18:00".to_string();
        draft.info.guest_count = "80".to_string();
        draft.info.duration = "06:00".to_string();
        draft.info.address = "Rua das Flores, 100".to_string();
        draft.selected_alcoholic.insert(Uuid::new_v4());
        draft
    }

    #[test]
    fn fim_simples_sem_virada() {
        assert_eq!(compute_end_time("18:00", "06:00").unwrap(), "00:00");
        assert_eq!(compute_end_time("10:30", "02:15").unwrap(), "12:45");
    }

    #[test]
    fn fim_com_virada_de_meia_noite() {
        assert_eq!(compute_end_time("22:00", "04:00").unwrap(), "02:00");
        assert_eq!(compute_end_time("23:30", "01:00").unwrap(), "00:30");
    }

    #[test]
    fn horario_invalido_e_erro() {
        assert!(compute_end_time("25:00", "01:00").is_err());
        assert!(compute_end_time("", "01:00").is_err());
    }

    #[test]
    fn payload_carrega_cabecalho_e_itens() {
        let draft = rascunho_completo();
        let buyer = Uuid::new_v4();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let payload = build_payload(&draft, buyer, OrderStatus::Pendente, today).unwrap();
        assert_eq!(payload.header.buyer_id, buyer);
        assert_eq!(payload.header.guest_count, 80);
        assert_eq!(payload.header.end_time, "00:00");
        assert_eq!(payload.header.purchase_date, "2025-06-01");
        assert_eq!(payload.header.status, OrderStatus::Pendente);
        assert_eq!(payload.items.len(), 1);
    }

    #[test]
    fn pedido_sem_itens_e_rejeitado_para_os_dois_status() {
        let mut draft = rascunho_completo();
        draft.selected_alcoholic.clear();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        for status in [OrderStatus::Orcado, OrderStatus::Pendente] {
            let err = build_payload(&draft, Uuid::new_v4(), status, today).unwrap_err();
            assert!(matches!(err, AppError::EmptyOrder));
        }
    }

    struct FakeSink {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl OrderSink for FakeSink {
        async fn create_order(&self, payload: &OrderPayload) -> Result<Pedido, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Backend("Data indisponível para eventos.".to_string()));
            }
            Ok(Pedido {
                id: Uuid::new_v4(),
                event_name: payload.header.event_name.clone(),
                event_date: payload.header.event_date.clone(),
                status: payload.header.status,
                total: None,
                created_at: None,
            })
        }
    }

    #[tokio::test]
    async fn sucesso_limpa_o_rascunho_persistido() {
        let draft_store = DraftStore::new(Arc::new(MemoryStore::new()));
        let draft = rascunho_completo();
        draft_store.save(&draft);

        let sink = Arc::new(FakeSink { calls: AtomicUsize::new(0), fail: false });
        let service = OrderService::new(sink);
        let payload = build_payload(
            &draft,
            Uuid::new_v4(),
            OrderStatus::Pendente,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
        .unwrap();

        service.submit(&payload, &draft_store).await.unwrap();
        // A próxima montagem começa do rascunho vazio.
        assert_eq!(draft_store.load(), EventDraft::default());
    }

    #[tokio::test]
    async fn falha_preserva_o_rascunho_e_devolve_a_mensagem_do_backend() {
        let draft_store = DraftStore::new(Arc::new(MemoryStore::new()));
        let draft = rascunho_completo();
        draft_store.save(&draft);

        let sink = Arc::new(FakeSink { calls: AtomicUsize::new(0), fail: true });
        let service = OrderService::new(sink);
        let payload = build_payload(
            &draft,
            Uuid::new_v4(),
            OrderStatus::Orcado,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
        .unwrap();

        let err = service.submit(&payload, &draft_store).await.unwrap_err();
        assert_eq!(err.to_string(), "Data indisponível para eventos.");
        assert_eq!(draft_store.load(), draft, "estado intacto para a nova tentativa");
    }
}
