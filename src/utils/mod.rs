//! Utilitários transversais.

pub mod logger;
