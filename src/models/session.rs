use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sessão autenticada persistida no armazenamento local.
///
/// Invariante: token presente implica nickname presente - os dois campos são
/// gravados juntos no login e removidos juntos no logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub nickname: String,
}

/// Resposta do `POST /login`.
///
/// Endpoint de bootstrap de autenticação: não usa o envelope canônico e
/// devolve o token diretamente no corpo.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Token de acesso; ausente quando o backend não abriu sessão
    #[serde(default)]
    pub access_token: Option<String>,

    /// Dados do usuário autenticado, no formato do provedor de identidade
    #[serde(default)]
    pub user: Value,
}

/// Resposta do `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Value,
}
