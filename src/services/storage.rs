use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::{Mutex, RwLock};

use crate::models::StorageError;

/// Chave do token de acesso no armazenamento local.
pub const CHAVE_TOKEN: &str = "access_token";

/// Chave do nickname do usuário logado.
pub const CHAVE_NICKNAME: &str = "nickname";

/// Chave da cópia local da foto de perfil.
pub const CHAVE_FOTO_PERFIL: &str = "profileImage";

/// Capacidade de armazenamento chave-valor assíncrono.
///
/// Abstrai o armazenamento local do dispositivo; o cliente recebe a
/// implementação por injeção e só depende desta trait.
///
/// Contrato:
/// - `get` de chave ausente devolve `Ok(None)`
/// - `remove` de chave ausente é bem-sucedido (operações de limpeza de sessão
///   precisam ser idempotentes)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, chave: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, chave: &str, valor: &str) -> Result<(), StorageError>;

    async fn remove(&self, chave: &str) -> Result<(), StorageError>;
}

/// Armazenamento em arquivo JSON único.
///
/// Cada operação lê e regrava o mapa completo, sob um mutex para serializar
/// leitura-modificação-gravação concorrentes no mesmo processo. Adequado ao
/// volume de dados em jogo (token, nickname, foto).
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Cria um armazenamento apontando para `path`.
    ///
    /// O arquivo é criado na primeira gravação; um arquivo ausente equivale a
    /// um mapa vazio.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::info!(path = %path.display(), "File store initialized");
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    async fn carregar(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(conteudo) if conteudo.trim().is_empty() => Ok(HashMap::new()),
            Ok(conteudo) => Ok(serde_json::from_str(&conteudo)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn gravar(&self, mapa: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let conteudo = serde_json::to_string_pretty(mapa)?;
        tokio::fs::write(&self.path, conteudo).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, chave: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.carregar().await?.remove(chave))
    }

    async fn set(&self, chave: &str, valor: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut mapa = self.carregar().await?;
        mapa.insert(chave.to_string(), valor.to_string());
        self.gravar(&mapa).await
    }

    async fn remove(&self, chave: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut mapa = self.carregar().await?;
        if mapa.remove(chave).is_some() {
            self.gravar(&mapa).await?;
        }
        Ok(())
    }
}

/// Armazenamento em memória.
///
/// Para testes e sessões efêmeras; mesmo contrato do `FileStore`.
#[derive(Default)]
pub struct MemoryStore {
    mapa: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, chave: &str) -> Result<Option<String>, StorageError> {
        Ok(self.mapa.read().await.get(chave).cloned())
    }

    async fn set(&self, chave: &str, valor: &str) -> Result<(), StorageError> {
        self.mapa
            .write()
            .await
            .insert(chave.to_string(), valor.to_string());
        Ok(())
    }

    async fn remove(&self, chave: &str) -> Result<(), StorageError> {
        self.mapa.write().await.remove(chave);
        Ok(())
    }
}
