use std::env;
use std::time::Duration;

/// URL padrão do backend em desenvolvimento local.
const BACKEND_URL_PADRAO: &str = "http://localhost:8000";

/// Timeout padrão de requisição, em segundos.
///
/// Herdado do comportamento da tela inicial do aplicativo, que impunha uma
/// corrida de 8 segundos sobre o carregamento da coleção; aqui o limite vale
/// para todas as requisições do núcleo.
const TIMEOUT_PADRAO_SEGUNDOS: u64 = 8;

/// Configuração do cliente.
///
/// Superfície de configuração externa mínima: a URL base do backend e o
/// timeout de requisição.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL base do backend, sem barra final
    pub backend_url: String,

    /// Timeout aplicado a cada requisição HTTP
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Configuração com a URL informada e timeout padrão.
    pub fn new(backend_url: impl Into<String>) -> Self {
        let mut backend_url = backend_url.into();
        while backend_url.ends_with('/') {
            backend_url.pop();
        }
        Self {
            backend_url,
            request_timeout: Duration::from_secs(TIMEOUT_PADRAO_SEGUNDOS),
        }
    }

    /// Substitui o timeout de requisição.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Carrega a configuração do ambiente.
    ///
    /// Variáveis lidas (um `.env` no diretório de trabalho é considerado):
    /// - `BACKEND_URL`: URL base do backend (padrão: `http://localhost:8000`)
    /// - `REQUEST_TIMEOUT_SECS`: timeout por requisição (padrão: 8)
    pub fn from_env() -> Self {
        // Ausência de .env não é erro
        let _ = dotenvy::dotenv();

        let backend_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| BACKEND_URL_PADRAO.to_string());

        let timeout_segundos = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(TIMEOUT_PADRAO_SEGUNDOS);

        let config = Self::new(backend_url).with_timeout(Duration::from_secs(timeout_segundos));

        tracing::info!(
            backend_url = %config.backend_url,
            timeout_segundos = %timeout_segundos,
            "Client configuration loaded"
        );

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(BACKEND_URL_PADRAO)
    }
}
