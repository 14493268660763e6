//! Camada de serviços do cliente.
//!
//! - `storage`: armazenamento chave-valor injetável (arquivo ou memória)
//! - `config`: configuração carregada do ambiente
//! - `client`: núcleo HTTP (token, envelope canônico, classificação de erros)
//! - `cartas` / `colecao` / `missoes` / `usuarios` / `amizades`: métodos de
//!   recurso, um bloco `impl` por família de endpoints
//! - `progresso`: agregador de progresso de missões
//!
//! # Arquitetura
//!
//! ```text
//! ┌──────────────────────────────┐
//! │       Telas do aplicativo    │
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │   Métodos de recurso         │  cartas, coleção, missões,
//! │   + agregador de progresso   │  usuários, amizades
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │   ApiClient (núcleo HTTP)    │  token, envelope, erros
//! └──────┬───────────────┬───────┘
//!        │               │
//! ┌──────▼──────┐  ┌─────▼─────────┐
//! │ Backend REST│  │ KeyValueStore │
//! └─────────────┘  └───────────────┘
//! ```

pub mod amizades;
pub mod cartas;
pub mod client;
pub mod colecao;
pub mod config;
pub mod missoes;
pub mod progresso;
pub mod storage;
pub mod usuarios;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
