// src/services/catalog.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::error::AppError;
use crate::models::catalog::{Item, ItemCategory};

// Janela padrão de validade do cache do catálogo.
pub const CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

// Seam de rede: o ApiClient implementa isso em produção; os testes usam
// um dublê que conta chamadas.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<Item>, AppError>;
}

struct CacheSlot {
    loaded_at: Instant,
    items: Arc<Vec<Item>>,
}

// ---
// CatalogService
// ---
// Dono explícito do cache do catálogo (nada de global de módulo): quem
// monta a aplicação decide a vida dele e os testes resetam com
// `invalidate`. O slot fica atrás de um Mutex assíncrono, então chamadas
// concorrentes serializam e só a primeira vai à rede, e as demais acordam
// com o cache já quente.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    ttl: Duration,
    slot: Mutex<Option<CacheSlot>>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        Self { source, ttl, slot: Mutex::new(None) }
    }

    pub async fn fetch(&self) -> Result<Arc<Vec<Item>>, AppError> {
        let mut slot = self.slot.lock().await;

        if let Some(cache) = slot.as_ref() {
            if cache.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cache.items));
            }
        }

        let items = match self.source.fetch_items().await {
            Ok(items) => items,
            Err(e) => {
                // O cache fica vazio; os passos dependentes mostram o
                // placeholder de carregando em vez de derrubar o fluxo.
                tracing::error!("Falha ao carregar o catálogo: {e}");
                return Err(e);
            }
        };

        // Itens desativados pelo admin não aparecem na vitrine.
        let items: Arc<Vec<Item>> = Arc::new(items.into_iter().filter(|i| i.active).collect());
        tracing::info!("✅ Catálogo carregado com {} itens ativos.", items.len());

        *slot = Some(CacheSlot { loaded_at: Instant::now(), items: Arc::clone(&items) });
        Ok(items)
    }

    // Descarta o cache. Usado pelos testes e depois de mutações de admin
    // no catálogo.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}

// Particiona a lista achatada nos 6 grupos fixos do fluxo.
// `Desconhecida` é descartada em silêncio.
pub fn group_by_category(items: &[Item]) -> HashMap<ItemCategory, Vec<Item>> {
    let mut groups: HashMap<ItemCategory, Vec<Item>> =
        ItemCategory::FIXAS.iter().map(|c| (*c, Vec::new())).collect();

    for item in items {
        if let Some(bucket) = groups.get_mut(&item.category) {
            bucket.push(item.clone());
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct FakeSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), fail })
        }
    }

    #[async_trait]
    impl CatalogSource for FakeSource {
        async fn fetch_items(&self) -> Result<Vec<Item>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Backend("catálogo indisponível".to_string()));
            }
            Ok(vec![
                item(ItemCategory::Alcoolicos, true),
                item(ItemCategory::Shots, true),
                item(ItemCategory::Estrutura, false),
                item(ItemCategory::Desconhecida, true),
            ])
        }
    }

    fn item(category: ItemCategory, active: bool) -> Item {
        Item {
            id: Uuid::new_v4(),
            description: "item".to_string(),
            price: Decimal::new(1000, 2),
            category,
            image_url: None,
            active,
        }
    }

    #[tokio::test]
    async fn dentro_da_janela_so_ha_uma_chamada_de_rede() {
        let source = FakeSource::new(false);
        let service = CatalogService::new(source.clone(), CATALOG_TTL);

        let a = service.fetch().await.unwrap();
        let b = service.fetch().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b), "a segunda chamada devolve o mesmo vetor em cache");
    }

    #[tokio::test]
    async fn chamadas_concorrentes_compartilham_uma_unica_busca() {
        let source = FakeSource::new(false);
        let service = Arc::new(CatalogService::new(source.clone(), CATALOG_TTL));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move { service.fetch().await }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ttl_zero_forca_nova_busca() {
        let source = FakeSource::new(false);
        let service = CatalogService::new(source.clone(), Duration::ZERO);

        service.fetch().await.unwrap();
        service.fetch().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn falha_propaga_e_nao_envenena_o_cache() {
        let source = FakeSource::new(true);
        let service = CatalogService::new(source.clone(), CATALOG_TTL);

        assert!(service.fetch().await.is_err());
        assert!(service.fetch().await.is_err());
        // Sem cache de erro: cada tentativa volta à rede.
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_descarta_o_cache() {
        let source = FakeSource::new(false);
        let service = CatalogService::new(source.clone(), CATALOG_TTL);

        service.fetch().await.unwrap();
        service.invalidate().await;
        service.fetch().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn agrupamento_descarta_desconhecidas_e_inativos_ja_sairam() {
        let source = FakeSource::new(false);
        let service = CatalogService::new(source, CATALOG_TTL);

        let items = service.fetch().await.unwrap();
        // O item de estrutura estava inativo e já saiu no fetch.
        assert_eq!(items.len(), 3);

        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 6, "sempre os 6 grupos fixos, mesmo vazios");
        assert_eq!(groups[&ItemCategory::Alcoolicos].len(), 1);
        assert_eq!(groups[&ItemCategory::Shots].len(), 1);
        assert_eq!(groups[&ItemCategory::Estrutura].len(), 0);
        assert!(!groups.contains_key(&ItemCategory::Desconhecida));
    }
}
