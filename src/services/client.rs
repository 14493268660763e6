use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{ApiError, Envelope, LoginResponse, RegisterResponse, Session};
use crate::services::config::ClientConfig;
use crate::services::storage::{KeyValueStore, CHAVE_NICKNAME, CHAVE_TOKEN};

/// Núcleo HTTP do cliente ESALQ Explorer.
///
/// Ponto único de passagem de todas as chamadas de rede:
/// - monta a URL a partir da base configurada
/// - anexa `Authorization: Bearer <token>` quando há sessão
/// - decodifica o corpo JSON e classifica falhas em
///   `ApiError::Network` (transporte) ou `ApiError::Http` (status não-2xx)
///
/// O cache de token pertence à instância (nada de estado global): é populado
/// preguiçosamente a partir do armazenamento injetado e invalidado por
/// `clear_token`. Os métodos de recurso (cartas, coleção, missões, usuários,
/// amizades) vivem em blocos `impl` próprios sobre esta struct.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Cria o cliente com a configuração e o armazenamento injetado.
    ///
    /// O timeout de `config.request_timeout` vale para todas as requisições.
    pub fn new(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        tracing::info!(
            backend_url = %config.backend_url,
            timeout = ?config.request_timeout,
            "API client initialized"
        );

        Ok(Self {
            base_url: config.backend_url,
            http,
            store,
            token: RwLock::new(None),
        })
    }

    /// URL base configurada, sem barra final.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Armazenamento chave-valor injetado.
    pub(crate) fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // === Ciclo de vida do token ===

    /// Token de acesso atual.
    ///
    /// Memoizado na instância; na primeira consulta é carregado do
    /// armazenamento local (chave `access_token`).
    pub async fn token(&self) -> Result<Option<String>, ApiError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(Some(token));
        }

        let carregado = self.store.get(CHAVE_TOKEN).await?;
        if let Some(ref token) = carregado {
            *self.token.write().await = Some(token.clone());
        }
        Ok(carregado)
    }

    /// Substitui apenas o cache em memória.
    ///
    /// A persistência acontece nos pontos que também gravam o nickname
    /// (ver `login`).
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Encerra a sessão local: limpa o cache e remove token e nickname do
    /// armazenamento. Idempotente.
    pub async fn clear_token(&self) -> Result<(), ApiError> {
        *self.token.write().await = None;
        self.store.remove(CHAVE_TOKEN).await?;
        self.store.remove(CHAVE_NICKNAME).await?;
        Ok(())
    }

    /// Sessão persistida, quando token e nickname estão presentes.
    pub async fn session(&self) -> Result<Option<Session>, ApiError> {
        let token = self.store.get(CHAVE_TOKEN).await?;
        let nickname = self.store.get(CHAVE_NICKNAME).await?;
        Ok(match (token, nickname) {
            (Some(token), Some(nickname)) => Some(Session { token, nickname }),
            _ => None,
        })
    }

    // === Núcleo de requisição ===

    /// Envia uma requisição para `base_url + endpoint` e devolve o corpo JSON.
    ///
    /// Classificação de falhas, na ordem observada pelo chamador:
    /// - transporte (conexão, DNS, timeout) -> `Network`
    /// - corpo ilegível como JSON -> `Network` (não há dado confiável de status)
    /// - status não-2xx -> `Http { status, body }` com o corpo já decodificado
    pub(crate) async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.request_url(method, &url, body).await
    }

    /// Variante de `request` para URLs já montadas (endpoints com query).
    pub(crate) async fn request_url(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut req = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.token().await? {
            req = req.bearer_auth(token);
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(method = %method, url = %url, "Sending request");

        let response = req.send().await?;
        let status = response.status();
        let texto = response.text().await?;

        let data: Value = serde_json::from_str(&texto).map_err(|e| {
            tracing::error!(
                method = %method,
                url = %url,
                status = %status.as_u16(),
                error = %e,
                "Response body is not valid JSON"
            );
            ApiError::Network(format!("corpo da resposta não é JSON válido: {}", e))
        })?;

        if !status.is_success() {
            tracing::warn!(
                method = %method,
                url = %url,
                status = %status.as_u16(),
                "Request failed with error status"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: data,
            });
        }

        Ok(data)
    }

    /// GET com decodificação do envelope canônico.
    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let body = self.request(Method::GET, endpoint, None).await?;
        Envelope::decode(body)
    }

    /// POST com decodificação do envelope canônico.
    pub(crate) async fn post_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let resposta = self.request(Method::POST, endpoint, body).await?;
        Envelope::decode(resposta)
    }

    /// DELETE com decodificação do envelope canônico.
    ///
    /// Alguns endpoints de remoção carregam corpo (ex.: remover carta com
    /// quantidade), padrão herdado do contrato do backend.
    pub(crate) async fn delete_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let resposta = self.request(Method::DELETE, endpoint, body).await?;
        Envelope::decode(resposta)
    }

    /// Decodificação direta, sem envelope, para os endpoints de bootstrap de
    /// autenticação e legados.
    fn decode_raw<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
        serde_json::from_value(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    // === Autenticação ===

    /// Autentica o usuário (`POST /login`).
    ///
    /// Quando a resposta traz `access_token`, persiste token e nickname juntos
    /// no armazenamento e atualiza o cache em memória. Credenciais inválidas
    /// chegam como `ApiError::Http { status: 401, .. }`.
    pub async fn login(&self, nickname: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "nickname": nickname, "password": password });
        let data = self.request(Method::POST, "/login", Some(&body)).await?;
        let resposta: LoginResponse = Self::decode_raw(data)?;

        if let Some(ref token) = resposta.access_token {
            self.store.set(CHAVE_TOKEN, token).await?;
            self.store.set(CHAVE_NICKNAME, nickname).await?;
            self.set_token(token.clone()).await;

            tracing::info!(nickname = %nickname, "Login successful, session persisted");
        }

        Ok(resposta)
    }

    /// Encerra a sessão local.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.clear_token().await
    }

    /// Registra um novo usuário (`POST /register`).
    pub async fn register(
        &self,
        nickname: &str,
        email: &str,
        password: &str,
        tipo: &str,
    ) -> Result<RegisterResponse, ApiError> {
        let body = json!({
            "nickname": nickname,
            "email": email,
            "password": password,
            "tipo": tipo,
        });
        let data = self.request(Method::POST, "/register", Some(&body)).await?;
        Self::decode_raw(data)
    }

    /// Solicita redefinição de senha (`POST /reset-password`).
    pub async fn reset_password(&self, nickname: &str) -> Result<Value, ApiError> {
        let body = json!({ "nickname": nickname });
        self.request(Method::POST, "/reset-password", Some(&body))
            .await
    }

    /// Verifica se o token persistido ainda vale (`GET /api/me`).
    ///
    /// - resposta 2xx -> `Ok(true)`
    /// - 401 -> limpa a sessão local e devolve `Ok(false)`
    /// - qualquer outra falha propaga, para que o chamador distinga
    ///   "não autenticado" de "backend inacessível"
    pub async fn validate_token(&self) -> Result<bool, ApiError> {
        match self.request(Method::GET, "/api/me", None).await {
            Ok(_) => Ok(true),
            Err(ApiError::Http { status: 401, .. }) => {
                tracing::info!("Token rejected with 401, clearing local session");
                self.clear_token().await?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Dados do usuário logado (`GET /usuarios/{nickname}`, endpoint legado
    /// sem envelope).
    pub async fn current_user(&self) -> Result<Value, ApiError> {
        let nickname = self
            .store
            .get(CHAVE_NICKNAME)
            .await?
            .ok_or(ApiError::NotAuthenticated)?;
        self.request(Method::GET, &format!("/usuarios/{}", nickname), None)
            .await
    }
}
