// src/models/event.rs

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::order::LineItem;

// --- Informações do evento (passo 2 do fluxo) ---
// Tudo aqui é texto livre digitado pelo cliente; o validador de passos é
// quem decide se os formatos (data, horário, duração) estão corretos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInfo {
    pub name: String,
    // YYYY-MM-DD
    pub date: String,
    // HH:MM
    pub start_time: String,
    pub guest_count: String,
    // Duração do evento, também HH:MM
    pub duration: String,
    pub address: String,
}

// Campos editáveis de `EventInfo`, para o setter genérico do formulário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    Name,
    Date,
    StartTime,
    GuestCount,
    Duration,
    Address,
}

// --- Rascunho do evento ---
// O estado de trabalho de UMA sessão de personalização. É serializado
// inteiro para o armazenamento local e recarregado quando o assistente
// monta de novo; `default` no serde tolera blobs antigos ou parciais.
//
// Toda seleção é chaveada pelo id do item do catálogo. Os mapas de
// quantidade nunca guardam zero nem valores negativos (zero remove a
// entrada); as coleções são BTree para que a derivação de itens do
// pedido saia sempre na mesma ordem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    // Índice do passo lógico comitado; persiste junto para a sessão
    // abandonada retomar de onde parou.
    pub current_step: u32,
    pub selected_event_type: String,
    pub info: EventInfo,
    pub selected_alcoholic: BTreeSet<Uuid>,
    pub selected_non_alcoholic: BTreeSet<Uuid>,
    pub other_beverage_quantities: BTreeMap<Uuid, u32>,
    pub shot_quantities: BTreeMap<Uuid, u32>,
    pub selected_structure: Option<Uuid>,
    pub staff_quantities: BTreeMap<Uuid, u32>,
    // Preço confirmado pelo backend na entrada do resumo.
    // `None` = ainda não calculado (ou a última tentativa falhou) e a UI
    // mostra a estimativa local.
    pub backend_price: Option<Decimal>,
}

impl EventDraft {
    // Projeta todas as seleções na lista achatada de itens do pedido.
    // Determinística: duas chamadas seguidas sobre o mesmo rascunho
    // produzem vetores estruturalmente iguais.
    pub fn derive_line_items(&self) -> Vec<LineItem> {
        let mut items = Vec::new();

        for id in &self.selected_alcoholic {
            items.push(LineItem { id: *id, quantity: 1 });
        }
        for id in &self.selected_non_alcoholic {
            items.push(LineItem { id: *id, quantity: 1 });
        }
        for (id, qty) in &self.other_beverage_quantities {
            if *qty > 0 {
                items.push(LineItem { id: *id, quantity: *qty });
            }
        }
        for (id, qty) in &self.shot_quantities {
            if *qty > 0 {
                items.push(LineItem { id: *id, quantity: *qty });
            }
        }
        if let Some(id) = self.selected_structure {
            items.push(LineItem { id, quantity: 1 });
        }
        for (id, qty) in &self.staff_quantities {
            if *qty > 0 {
                items.push(LineItem { id: *id, quantity: *qty });
            }
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivacao_e_deterministica() {
        let mut draft = EventDraft::default();
        draft.selected_alcoholic.insert(Uuid::new_v4());
        draft.other_beverage_quantities.insert(Uuid::new_v4(), 3);
        draft.selected_structure = Some(Uuid::new_v4());

        assert_eq!(draft.derive_line_items(), draft.derive_line_items());
    }

    #[test]
    fn blob_parcial_ganha_defaults_de_campo() {
        // Blob antigo, só com um campo: o resto vem vazio.
        let draft: EventDraft =
            serde_json::from_str(r#"{"selectedEventType": "Casamento"}"#).unwrap();
        assert_eq!(draft.selected_event_type, "Casamento");
        assert!(draft.selected_alcoholic.is_empty());
        assert_eq!(draft.backend_price, None);
    }

    #[test]
    fn rascunho_sobrevive_a_ida_e_volta_em_json() {
        let mut draft = EventDraft::default();
        draft.selected_event_type = "Formatura".to_string();
        draft.info.name = "Turma 2025".to_string();
        draft.shot_quantities.insert(Uuid::new_v4(), 4);
        draft.backend_price = Some(Decimal::new(123450, 2));

        let json = serde_json::to_string(&draft).unwrap();
        let back: EventDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
