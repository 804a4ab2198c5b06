// src/storage/draft_store.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::models::event::EventDraft;
use crate::storage::local::KeyValueStore;

// Chave fixa da sessão avulsa do assistente de personalização.
const DRAFT_KEY: &str = "personalize_evento";

// ---
// DraftStore: o adaptador de persistência do rascunho
// ---
// Serializa o `EventDraft` inteiro sob uma chave namespaçada. As regras:
//   - `load` NUNCA falha: chave ausente, JSON corrompido ou com o formato
//     errado viram o rascunho vazio padrão;
//   - `save` engole erros de escrita (só loga): perder um autosave não
//     pode derrubar o fluxo;
//   - `clear` remove a chave, chamado depois de um envio bem-sucedido.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, key: DRAFT_KEY.to_string() }
    }

    // Variante "pacote pronto": cada pacote pré-montado tem seu próprio
    // blob de personalização, chaveado pelo id do pacote.
    pub fn for_package(store: Arc<dyn KeyValueStore>, package_id: Uuid) -> Self {
        Self { store, key: format!("pacote_pronto:{package_id}") }
    }

    pub fn load(&self) -> EventDraft {
        let Some(raw) = self.store.get(&self.key) else {
            return EventDraft::default();
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("Rascunho salvo em '{}' está corrompido, recomeçando: {e}", self.key);
                EventDraft::default()
            }
        }
    }

    pub fn save(&self, draft: &EventDraft) {
        let json = match serde_json::to_string(draft) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Falha ao serializar o rascunho: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &json) {
            // Sem espaço, sem permissão... o usuário segue com o estado em
            // memória e tentamos de novo na próxima gravação.
            tracing::warn!("Falha ao persistir o rascunho em '{}': {e}", self.key);
        }
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }
}
