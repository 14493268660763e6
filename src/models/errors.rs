use serde_json::Value;
use thiserror::Error;

/// Falhas de chamadas à API.
///
/// Taxonomia em dois níveis:
/// - `Network`: o transporte falhou (DNS, conexão, corpo ilegível) e não há
///   código de status disponível.
/// - `Http`: o servidor respondeu com status não-2xx; carrega o status e o
///   corpo já decodificado.
///
/// As demais variantes cobrem o envelope canônico e o estado de sessão.
#[derive(Debug, Error)]
pub enum ApiError {
    /// O servidor respondeu com status de erro (não-2xx)
    #[error("HTTP {status}")]
    Http {
        /// Código de status HTTP
        status: u16,
        /// Corpo JSON da resposta de erro
        body: Value,
    },

    /// Falha de transporte: sem conectividade ou resposta ilegível
    ///
    /// Possíveis causas:
    /// - conexão recusada ou interrompida
    /// - falha de DNS
    /// - timeout da requisição
    /// - corpo que não é JSON válido
    #[error("falha de rede: {0}")]
    Network(String),

    /// Resposta 2xx cujo envelope `{success, data, error}` está malformado
    #[error("resposta malformada: {0}")]
    InvalidResponse(String),

    /// O servidor reportou `success: false` no envelope canônico
    #[error("operação recusada pelo servidor: {0}")]
    Rejected(String),

    /// Operação exige sessão, mas não há usuário logado
    #[error("usuário não logado")]
    NotAuthenticated,

    /// Falha no armazenamento local (leitura/gravação do token)
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Status HTTP, quando a falha veio de uma resposta do servidor.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Mensagem pronta para exibição ao usuário.
    ///
    /// Mapeamento herdado do aplicativo:
    /// - 401 -> credenciais incorretas
    /// - 404 -> recurso não encontrado
    /// - 500 -> erro interno
    /// - demais status: inspeciona `body.detail`; mensagens de banco no estilo
    ///   "0 rows" são tratadas como falha de credenciais
    /// - falha de rede -> orientação de conectividade
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Http { status: 401, .. } => "Usuário ou senha incorretos.",
            ApiError::Http { status: 404, .. } => "Recurso não encontrado.",
            ApiError::Http { status: 500, .. } => {
                "Erro interno do servidor. Tente novamente mais tarde."
            }
            ApiError::Http { body, .. } => match body.get("detail") {
                Some(Value::String(detail)) => {
                    if detail.contains("0 rows") {
                        "Usuário ou senha incorretos."
                    } else {
                        "Erro de autenticação. Verifique suas credenciais."
                    }
                }
                Some(Value::Object(detail)) => {
                    match detail.get("message").and_then(Value::as_str) {
                        Some(message)
                            if message.contains("0 rows") || message.contains("no rows") =>
                        {
                            "Usuário ou senha incorretos."
                        }
                        _ => "Erro de autenticação. Verifique suas credenciais.",
                    }
                }
                Some(_) => "Erro de autenticação. Verifique suas credenciais.",
                None => "Erro desconhecido. Tente novamente.",
            },
            ApiError::Network(_) => {
                "Não foi possível conectar ao servidor. Verifique sua conexão com a internet."
            }
            ApiError::NotAuthenticated => "Usuário não logado.",
            ApiError::InvalidResponse(_) | ApiError::Rejected(_) | ApiError::Storage(_) => {
                "Erro desconhecido. Tente novamente."
            }
        }
    }
}

/// Classificação de falhas do reqwest na camada de transporte.
///
/// Qualquer erro do reqwest acontece antes de existir um status utilizável
/// (a classificação por status é feita no núcleo do cliente), portanto tudo
/// aqui vira `Network`.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("tempo limite da requisição excedido".to_string())
        } else if err.is_connect() {
            ApiError::Network("não foi possível conectar ao servidor".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Falhas do armazenamento chave-valor local.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Falha de E/S ao ler ou gravar o arquivo de armazenamento
    #[error("falha de E/S no armazenamento local: {0}")]
    Io(String),

    /// Conteúdo do armazenamento não pôde ser (de)serializado
    #[error("falha de serialização no armazenamento local: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_401() {
        let err = ApiError::Http {
            status: 401,
            body: json!({"detail": "Invalid login credentials"}),
        };
        assert_eq!(err.user_message(), "Usuário ou senha incorretos.");
    }

    #[test]
    fn test_user_message_404_e_500() {
        let not_found = ApiError::Http {
            status: 404,
            body: json!({}),
        };
        assert_eq!(not_found.user_message(), "Recurso não encontrado.");

        let internal = ApiError::Http {
            status: 500,
            body: json!({}),
        };
        assert_eq!(
            internal.user_message(),
            "Erro interno do servidor. Tente novamente mais tarde."
        );
    }

    #[test]
    fn test_user_message_detail_zero_rows() {
        let err = ApiError::Http {
            status: 400,
            body: json!({"detail": "JSON object requested, multiple (or 0 rows) returned"}),
        };
        assert_eq!(err.user_message(), "Usuário ou senha incorretos.");
    }

    #[test]
    fn test_user_message_detail_objeto_no_rows() {
        let err = ApiError::Http {
            status: 400,
            body: json!({"detail": {"message": "no rows returned"}}),
        };
        assert_eq!(err.user_message(), "Usuário ou senha incorretos.");

        let err = ApiError::Http {
            status: 400,
            body: json!({"detail": {"message": "constraint violation"}}),
        };
        assert_eq!(
            err.user_message(),
            "Erro de autenticação. Verifique suas credenciais."
        );
    }

    #[test]
    fn test_user_message_sem_detail() {
        let err = ApiError::Http {
            status: 418,
            body: json!({}),
        };
        assert_eq!(err.user_message(), "Erro desconhecido. Tente novamente.");
    }

    #[test]
    fn test_user_message_rede() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "Não foi possível conectar ao servidor. Verifique sua conexão com a internet."
        );
    }

    #[test]
    fn test_status_disponivel_apenas_em_http() {
        let http = ApiError::Http {
            status: 404,
            body: json!({}),
        };
        assert_eq!(http.status(), Some(404));
        assert_eq!(ApiError::Network("x".into()).status(), None);
    }
}
