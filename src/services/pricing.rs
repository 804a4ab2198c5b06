// src/services/pricing.rs

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::common::error::AppError;
use crate::models::catalog::Item;
use crate::models::order::LineItem;

// Seam de rede do cálculo de preço (POST /pedidos/preco).
#[async_trait]
pub trait PricingSource: Send + Sync {
    async fn confirm_total(&self, items: &[LineItem]) -> Result<Decimal, AppError>;
}

// Estimativa instantânea com os preços que o cliente já tem em mãos.
// Itens que não estão no catálogo carregado contribuem com zero; o valor
// que vale de verdade é sempre o confirmado pelo backend.
pub fn estimate_local(line_items: &[LineItem], catalog: &[Item]) -> Decimal {
    line_items
        .iter()
        .map(|li| {
            catalog
                .iter()
                .find(|item| item.id == li.id)
                .map(|item| item.price * Decimal::from(li.quantity))
                .unwrap_or(Decimal::ZERO)
        })
        .sum()
}

// ---
// PricingService
// ---
// Pede ao backend o total autoritativo para a lista de itens derivada na
// entrada do resumo. Quem chama decide o que fazer com a falha (guardar
// `None` e cair para a estimativa local).
pub struct PricingService {
    source: Arc<dyn PricingSource>,
}

impl PricingService {
    pub fn new(source: Arc<dyn PricingSource>) -> Self {
        Self { source }
    }

    pub async fn confirm(&self, line_items: &[LineItem]) -> Result<Decimal, AppError> {
        let total = self.source.confirm_total(line_items).await?;
        tracing::info!("Preço confirmado pelo backend: {total}");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::ItemCategory;
    use uuid::Uuid;

    fn item(id: Uuid, centavos: i64) -> Item {
        Item {
            id,
            description: "item".to_string(),
            price: Decimal::new(centavos, 2),
            category: ItemCategory::Alcoolicos,
            image_url: None,
            active: true,
        }
    }

    #[test]
    fn estimativa_soma_preco_vezes_quantidade() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let catalog = vec![item(a, 1800), item(b, 2550)];
        let line_items = vec![
            LineItem { id: a, quantity: 2 },
            LineItem { id: b, quantity: 1 },
        ];

        // 2 * 18,00 + 1 * 25,50 = 61,50
        assert_eq!(estimate_local(&line_items, &catalog), Decimal::new(6150, 2));
    }

    #[test]
    fn item_fora_do_catalogo_contribui_com_zero() {
        let a = Uuid::new_v4();
        let catalog = vec![item(a, 1000)];
        let line_items = vec![
            LineItem { id: a, quantity: 1 },
            LineItem { id: Uuid::new_v4(), quantity: 5 },
        ];

        assert_eq!(estimate_local(&line_items, &catalog), Decimal::new(1000, 2));
    }

    #[test]
    fn lista_vazia_estima_zero() {
        assert_eq!(estimate_local(&[], &[]), Decimal::ZERO);
    }
}
