// src/storage/local.rs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use crate::common::error::AppError;

// ---
// O armazenamento local chave-valor
// ---
// Abstração mínima sobre "um blob de texto por chave". É o equivalente do
// localStorage do navegador: o fluxo de personalização grava o rascunho
// serializado aqui para sobreviver a recarregamentos de página.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str);
}

// ---
// FileStore: um arquivo por chave, dentro de um diretório configurado
// ---
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    // Chaves podem conter ':' e outros separadores; o nome do arquivo não.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("criando o diretório {}", self.dir.display()))?;
        fs::write(self.path_for(key), value)
            .with_context(|| format!("gravando a chave '{key}'"))?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        // Remover uma chave que não existe não é erro.
        let _ = fs::remove_file(self.path_for(key));
    }
}

// ---
// MemoryStore: para testes e embarcadores efêmeros
// ---
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.inner.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.inner.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_faz_ida_e_volta() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("personalize_evento", r#"{"ok":true}"#).unwrap();
        assert_eq!(store.get("personalize_evento").as_deref(), Some(r#"{"ok":true}"#));

        store.remove("personalize_evento");
        assert_eq!(store.get("personalize_evento"), None);
    }

    #[test]
    fn chaves_com_separadores_viram_nomes_de_arquivo_validos() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("pacote_pronto:abc/123", "x").unwrap();
        assert_eq!(store.get("pacote_pronto:abc/123").as_deref(), Some("x"));
    }

    #[test]
    fn remover_chave_inexistente_nao_falha() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.remove("nunca_existiu");
    }

    #[test]
    fn memory_store_isola_por_chave() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }
}
