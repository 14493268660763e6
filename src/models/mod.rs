//! Modelos de dados do cliente.
//!
//! - `errors`: taxonomia de erros (transporte vs. status HTTP) e armazenamento
//! - `envelope`: envelope canônico `{success, data, error}` das respostas
//! - `session`: sessão autenticada e respostas de autenticação
//! - `carta`: cartas, itens de coleção e estatísticas
//! - `missao`: missões cruas, detalhes por tipo e missões enriquecidas
//! - `usuario`: perfil, ranking e amizades

pub mod carta;
pub mod envelope;
pub mod errors;
pub mod missao;
pub mod session;
pub mod usuario;

pub use carta::{Carta, EstatisticasColecao, ItemColecao, Raridade};
pub use envelope::Envelope;
pub use errors::{ApiError, StorageError};
pub use missao::{
    Degradacao, FonteDados, Missao, MissaoComProgresso, MissaoQtd, MissaoRaridade,
    ParticipacaoQuantidade, ParticipacaoRaridade, ProgressoMissoes, TipoMissao,
};
pub use session::{LoginResponse, RegisterResponse, Session};
pub use usuario::{
    Amigo, Confirmacao, FotoPerfil, ProfileStats, SolicitacaoAmizade, StatusAmizade,
    StatusAmizadeResposta, UsuarioBusca, UsuarioRanking,
};
