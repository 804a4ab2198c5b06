// src/flow/wizard.rs

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Local;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::flow::sequencer::{StepPosition, StepSequencer};
use crate::flow::store::DraftState;
use crate::flow::validator::{Step, are_all_previous_steps_valid, is_step_valid};
use crate::models::event::EventDraft;
use crate::models::order::{OrderStatus, Pedido};
use crate::services::catalog::CatalogService;
use crate::services::orders::{self, OrderService};
use crate::services::pricing::{self, PricingService};

// ---
// EventFlow: o assistente de personalização inteiro
// ---
// Amarra o estado da sessão, o validador, o sequenciador de animação, o
// cálculo de preço e o envio do pedido. A UI segura um Arc<EventFlow> e
// chama os métodos direto dos handlers de clique; todo o estado interno
// usa mutabilidade interior e nenhum lock atravessa await.
pub struct EventFlow {
    state: Mutex<DraftState>,
    sequencer: StepSequencer,
    pricing: PricingService,
    orders: OrderService,
    catalog: Arc<CatalogService>,
    calculating: AtomicBool,
}

impl EventFlow {
    pub fn new(
        state: DraftState,
        hop: Duration,
        pricing: PricingService,
        orders: OrderService,
        catalog: Arc<CatalogService>,
    ) -> Self {
        // Sessão reidratada retoma do passo em que parou.
        let start = Step::from_index(state.draft().current_step as usize)
            .unwrap_or(Step::EventType);
        Self {
            state: Mutex::new(state),
            sequencer: StepSequencer::new(start, hop),
            pricing,
            orders,
            catalog,
            calculating: AtomicBool::new(false),
        }
    }

    pub fn position(&self) -> StepPosition {
        self.sequencer.position()
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating.load(Ordering::SeqCst)
    }

    pub fn is_submitting(&self) -> bool {
        self.orders.is_submitting()
    }

    // Leitura de um snapshot do rascunho.
    pub fn with_draft<R>(&self, f: impl FnOnce(&EventDraft) -> R) -> R {
        f(self.state.lock().unwrap().draft())
    }

    // Acesso de mutação: os componentes de passo chamam os setters do
    // `DraftState` por aqui.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut DraftState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn is_step_valid(&self, step: Step) -> bool {
        let st = self.state.lock().unwrap();
        is_step_valid(step, st.draft())
    }

    // --- Navegação ---

    // Avança um passo, se o atual estiver válido.
    pub async fn advance(&self) -> Result<StepPosition, AppError> {
        let from = self.sequencer.position().current;
        let Some(to) = from.next() else {
            return Ok(self.sequencer.position());
        };

        let valid = {
            let st = self.state.lock().unwrap();
            is_step_valid(from, st.draft())
        };
        if !valid {
            return Err(AppError::StepInvalid);
        }

        self.go(from, to).await?;
        Ok(self.sequencer.position())
    }

    // Voltar é sempre permitido.
    pub async fn retreat(&self) -> StepPosition {
        let from = self.sequencer.position().current;
        if let Some(to) = from.previous() {
            // Voltar não dispara cálculo de preço; ignoramos o resultado.
            let _ = self.go(from, to).await;
        }
        self.sequencer.position()
    }

    // Navegação por salto (clique direto no indicador de passo).
    pub async fn goto(&self, to: Step) -> Result<StepPosition, AppError> {
        let from = self.sequencer.position().current;
        if to == from {
            return Ok(self.sequencer.position());
        }

        let allowed = {
            let st = self.state.lock().unwrap();
            are_all_previous_steps_valid(to, st.draft())
        };
        if !allowed {
            return Err(AppError::PreviousStepsInvalid);
        }

        self.go(from, to).await?;
        Ok(self.sequencer.position())
    }

    // Caminho comum: persiste, anima, comita o passo e, entrando no
    // resumo, dispara a confirmação de preço.
    async fn go(&self, from: Step, to: Step) -> Result<(), AppError> {
        self.state.lock().unwrap().persist();

        let committed = self.sequencer.transition(to).await;
        if !committed {
            // Outra navegação superou esta; quem venceu cuida do resto.
            return Ok(());
        }

        {
            let mut st = self.state.lock().unwrap();
            st.set_current_step(to.index() as u32);
            st.persist();
        }

        if to == Step::Summary && from != Step::Summary {
            return self.confirm_backend_price().await;
        }
        Ok(())
    }

    // --- Preço ---

    // Pede ao backend o total para os itens derivados NESTE momento.
    // Roda uma vez por entrada no resumo; reentrar dispara de novo (é
    // idempotente do ponto de vista do servidor).
    async fn confirm_backend_price(&self) -> Result<(), AppError> {
        if self.calculating.swap(true, Ordering::SeqCst) {
            // Já existe um cálculo em voo.
            return Ok(());
        }

        let items = {
            let st = self.state.lock().unwrap();
            st.derive_line_items()
        };

        let result = self.pricing.confirm(&items).await;
        let outcome = {
            let mut st = self.state.lock().unwrap();
            match result {
                Ok(total) => {
                    st.set_backend_price(Some(total));
                    st.persist();
                    Ok(())
                }
                Err(e) => {
                    // A UI cai para a estimativa local e mostra o toast.
                    st.set_backend_price(None);
                    st.persist();
                    Err(e)
                }
            }
        };

        self.calculating.store(false, Ordering::SeqCst);
        outcome
    }

    // O total que o resumo exibe: o confirmado pelo backend quando
    // existe, senão a estimativa local com os preços do catálogo.
    pub async fn display_total(&self) -> Decimal {
        let (backend, items) = {
            let st = self.state.lock().unwrap();
            (st.draft().backend_price, st.derive_line_items())
        };
        if let Some(total) = backend {
            return total;
        }
        match self.catalog.fetch().await {
            Ok(catalog) => pricing::estimate_local(&items, &catalog),
            Err(_) => pricing::estimate_local(&items, &[]),
        }
    }

    // --- Envio ---

    // Os dois botões do resumo passam por aqui: "salvar orçamento"
    // (Orcado) e "enviar pedido" (Pendente). No sucesso o rascunho
    // persistido é apagado e o estado volta ao zero.
    pub async fn submit(&self, buyer_id: Uuid, status: OrderStatus) -> Result<Pedido, AppError> {
        let (payload, store) = {
            let st = self.state.lock().unwrap();
            let payload = orders::build_payload(
                st.draft(),
                buyer_id,
                status,
                Local::now().date_naive(),
            )?;
            (payload, st.store_handle())
        };

        let pedido = self.orders.submit(&payload, &store).await?;
        self.state.lock().unwrap().reset();
        Ok(pedido)
    }
}
