use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::ApiError;

/// Envelope canônico de resposta do backend.
///
/// Todos os endpoints de recurso (`/api/*`) respondem
/// `{ "success": bool, "data": ..., "error": ... }`. A decodificação acontece
/// em um único ponto (`Envelope::decode`), de modo que nenhum método de
/// recurso precisa adivinhar o formato:
/// - corpo sem `success` ou `data` com formato inesperado -> `InvalidResponse`
/// - `success: false` -> `Rejected` com a mensagem do servidor
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodifica um corpo 2xx no envelope canônico e extrai `data`.
    pub fn decode(body: Value) -> Result<T, ApiError> {
        let envelope: Envelope<T> = serde_json::from_value(body)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .error
                    .unwrap_or_else(|| "falha não especificada".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("envelope sem campo data".to_string()))
    }
}
