use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Linha do ranking (`GET /api/usuarios/?limit=N`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioRanking {
    pub nickname: String,

    #[serde(default)]
    pub xp: Option<i64>,

    #[serde(default)]
    pub nivel: Option<i32>,

    #[serde(default)]
    pub qtdcartas: Option<i32>,

    #[serde(default)]
    pub foto: Option<String>,
}

/// Estatísticas completas de perfil
/// (`GET /api/usuarios/{nickname}/profile-stats`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStats {
    pub nickname: String,

    #[serde(default)]
    pub xp: Option<i64>,

    #[serde(default)]
    pub nivel: Option<i32>,

    #[serde(default)]
    pub qtdcartas: Option<i32>,

    #[serde(default)]
    pub ranking: Option<String>,

    #[serde(default)]
    pub foto: Option<String>,
}

/// Confirmação do upload de foto de perfil.
#[derive(Debug, Clone, Deserialize)]
pub struct FotoPerfil {
    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Estado de amizade entre dois usuários.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAmizade {
    Nenhum,
    Pendente,
    Aceito,
}

/// Resposta de `GET /api/amizades/status/{nickname}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusAmizadeResposta {
    pub status: StatusAmizade,
}

/// Amigo confirmado (`GET /api/amizades/meus-amigos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amigo {
    pub nickname: String,

    #[serde(default)]
    pub xp: Option<i64>,

    #[serde(default)]
    pub nivel: Option<i32>,

    #[serde(default)]
    pub foto: Option<String>,
}

/// Solicitação de amizade pendente
/// (`GET /api/amizades/solicitacoes-pendentes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolicitacaoAmizade {
    pub solicitacao_id: i64,

    pub nickname: String,

    #[serde(default)]
    pub foto: Option<String>,
}

/// Usuário devolvido pela busca (`GET /api/amizades/buscar`).
///
/// Carrega o estado de amizade em relação ao usuário logado, para a interface
/// decidir entre "adicionar", "pendente" e "amigo".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioBusca {
    pub nickname: String,

    #[serde(default, rename = "statusAmizade", alias = "status_amizade")]
    pub status_amizade: Option<StatusAmizade>,

    #[serde(default)]
    pub foto: Option<String>,
}

/// Confirmação genérica de operações de amizade (solicitar/aceitar/recusar/
/// remover), cujo conteúdo útil é apenas a mensagem.
#[derive(Debug, Clone, Deserialize)]
pub struct Confirmacao {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: Value,
}
