// src/models/catalog.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Categorias da vitrine ---
// São os 6 grupos fixos que o assistente de personalização conhece.
// Qualquer categoria nova que o backend inventar cai em `Desconhecida`
// e é descartada na hora de agrupar (nunca derruba a vitrine inteira).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    #[serde(rename = "alcoolicos")]
    Alcoolicos,
    #[serde(rename = "nao_alcoolicos")]
    NaoAlcoolicos,
    #[serde(rename = "outras_bebidas")]
    OutrasBebidas,
    #[serde(rename = "shots")]
    Shots,
    #[serde(rename = "estrutura")]
    Estrutura,
    #[serde(rename = "funcionarios")]
    Funcionarios,
    #[serde(other, rename = "desconhecida")]
    Desconhecida,
}

impl ItemCategory {
    // As categorias reais, na ordem em que aparecem no fluxo.
    pub const FIXAS: [ItemCategory; 6] = [
        ItemCategory::Alcoolicos,
        ItemCategory::NaoAlcoolicos,
        ItemCategory::OutrasBebidas,
        ItemCategory::Shots,
        ItemCategory::Estrutura,
        ItemCategory::Funcionarios,
    ];
}

// --- Item do catálogo ---
// Carregado uma vez por sessão via GET /items; imutável depois disso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub description: String,
    pub price: Decimal,
    pub category: ItemCategory,
    pub image_url: Option<String>,
    // Itens desativados pelo admin continuam existindo para pedidos antigos,
    // mas somem da vitrine.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categoria_desconhecida_nao_quebra_a_desserializacao() {
        let json = r#"{
            "id": "11111111-2222-3333-4444-555555555555",
            "description": "Gelo seco",
            "price": 50.0,
            "category": "efeitos_especiais"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, ItemCategory::Desconhecida);
        assert!(item.active, "sem o campo, o item vem ativo por padrão");
    }

    #[test]
    fn categorias_conhecidas_usam_os_nomes_do_backend() {
        let json = r#"{
            "id": "11111111-2222-3333-4444-555555555555",
            "description": "Caipirinha",
            "price": 18.0,
            "category": "alcoolicos",
            "imageUrl": "https://cdn.exemplo.com/caipirinha.png",
            "active": true
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, ItemCategory::Alcoolicos);
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.exemplo.com/caipirinha.png"));
    }
}
