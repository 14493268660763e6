//! Cliente REST do ESALQ Explorer.
//!
//! Camada de acesso tipado ao backend do aplicativo de exploração do campus:
//! autenticação com token persistido, métodos por recurso (cartas, coleção,
//! missões, usuários, amizades) e o agregador que deriva o progresso das
//! missões no cliente a partir de várias fontes buscadas em paralelo.
//!
//! # Uso
//!
//! ```no_run
//! use std::sync::Arc;
//! use esalq_explorer_client::services::{ApiClient, ClientConfig, FileStore};
//!
//! # async fn exemplo() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(FileStore::new("storage.json"));
//! let cliente = ApiClient::new(ClientConfig::from_env(), store)?;
//!
//! cliente.login("alice", "senha-secreta").await?;
//!
//! let colecao = cliente.minha_colecao().await?;
//! let progresso = cliente.calcular_progresso_missoes().await;
//! for missao in &progresso.missoes {
//!     println!("{}: {}/{} ({}%)", missao.tipo, missao.progresso, missao.meta, missao.porcentagem);
//! }
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod services;
pub mod utils;
