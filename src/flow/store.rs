// src/flow/store.rs

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::event::{EventDraft, InfoField};
use crate::models::order::LineItem;
use crate::storage::draft_store::DraftStore;

// As duas categorias de marcação (conjunto liga/desliga).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrinkCategory {
    Alcoholic,
    NonAlcoholic,
}

// As três categorias de quantidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityCategory {
    OtherBeverages,
    Shots,
    Staff,
}

// ---
// DraftState: o estado vivo da sessão de personalização
// ---
// Guarda o rascunho em memória e o canal de persistência. Mutações só
// marcam o estado como sujo; a serialização acontece na fronteira
// explícita `persist()` (o assistente chama a cada navegação), então a
// frequência de gravação não acompanha a frequência de clique.
pub struct DraftState {
    draft: EventDraft,
    store: DraftStore,
    dirty: bool,
}

impl DraftState {
    // Monta (ou remonta) a sessão: reidrata o que tiver sido salvo.
    pub fn open(store: DraftStore) -> Self {
        let draft = store.load();
        Self { draft, store, dirty: false }
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- Mutações ---

    pub fn set_event_type(&mut self, event_type: &str) {
        self.draft.selected_event_type = event_type.to_string();
        self.dirty = true;
    }

    pub fn set_info_field(&mut self, field: InfoField, value: &str) {
        let info = &mut self.draft.info;
        match field {
            InfoField::Name => info.name = value.to_string(),
            InfoField::Date => info.date = value.to_string(),
            InfoField::StartTime => info.start_time = value.to_string(),
            InfoField::GuestCount => info.guest_count = value.to_string(),
            InfoField::Duration => info.duration = value.to_string(),
            InfoField::Address => info.address = value.to_string(),
        }
        self.dirty = true;
    }

    // Liga/desliga uma bebida: adiciona se ausente, remove se presente.
    pub fn toggle_drink(&mut self, category: DrinkCategory, id: Uuid) {
        let set: &mut BTreeSet<Uuid> = match category {
            DrinkCategory::Alcoholic => &mut self.draft.selected_alcoholic,
            DrinkCategory::NonAlcoholic => &mut self.draft.selected_non_alcoholic,
        };
        if !set.remove(&id) {
            set.insert(id);
        }
        self.dirty = true;
    }

    // Quantidade negativa é no-op; zero remove a entrada (equivale a
    // "não selecionado" para a validação).
    pub fn set_quantity(&mut self, category: QuantityCategory, id: Uuid, quantity: i64) {
        if quantity < 0 {
            return;
        }
        let map: &mut BTreeMap<Uuid, u32> = match category {
            QuantityCategory::OtherBeverages => &mut self.draft.other_beverage_quantities,
            QuantityCategory::Shots => &mut self.draft.shot_quantities,
            QuantityCategory::Staff => &mut self.draft.staff_quantities,
        };
        if quantity == 0 {
            map.remove(&id);
        } else {
            map.insert(id, quantity as u32);
        }
        self.dirty = true;
    }

    // Seleção única da estrutura: `None` limpa; selecionar o id que já
    // está selecionado também limpa (toggle de singleton).
    pub fn select_structure(&mut self, id: Option<Uuid>) {
        self.draft.selected_structure = match (self.draft.selected_structure, id) {
            (Some(current), Some(clicked)) if current == clicked => None,
            (_, new) => new,
        };
        self.dirty = true;
    }

    pub fn set_backend_price(&mut self, price: Option<Decimal>) {
        self.draft.backend_price = price;
        self.dirty = true;
    }

    pub fn set_current_step(&mut self, index: u32) {
        self.draft.current_step = index;
        self.dirty = true;
    }

    // Handle clonável do canal de persistência (o envio do pedido limpa a
    // chave por ele).
    pub fn store_handle(&self) -> DraftStore {
        self.store.clone()
    }

    // --- Derivação e persistência ---

    pub fn derive_line_items(&self) -> Vec<LineItem> {
        self.draft.derive_line_items()
    }

    // A fronteira de serialização: grava o snapshot inteiro uma vez, só
    // se houve mutação desde a última gravação.
    pub fn persist(&mut self) {
        if !self.dirty {
            return;
        }
        self.store.save(&self.draft);
        self.dirty = false;
    }

    // Pós-envio: apaga a chave persistida e volta ao rascunho vazio.
    pub fn reset(&mut self) {
        self.store.clear();
        self.draft = EventDraft::default();
        self.dirty = false;
    }
}
