use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Missão crua, como devolvida por `GET /api/missoes`.
///
/// `tipo` é o rótulo semântico da missão ("Coletor Iniciante", "Caçador de
/// Raras", ...). O tipo efetivo (quantidade/raridade/evento/geral) não vem do
/// backend: é resolvido pelo agregador de progresso.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missao {
    pub codigo: i64,

    #[serde(default)]
    pub tipo: String,

    #[serde(default)]
    pub educador: Option<String>,

    #[serde(default)]
    pub datainicio: Option<String>,

    /// Data de término; as cargas observadas alternam a grafia do campo
    #[serde(default, alias = "dataFim", alias = "DataFim")]
    pub datafim: Option<String>,
}

impl Missao {
    /// Data de término decodificada, quando presente e legível.
    ///
    /// Aceita RFC 3339 e data simples `YYYY-MM-DD` (meia-noite UTC).
    pub fn fim(&self) -> Option<DateTime<Utc>> {
        let raw = self.datafim.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Verdadeiro quando a data de término já passou em relação a `agora`.
    pub fn encerrada_em(&self, agora: DateTime<Utc>) -> bool {
        self.fim().map(|fim| agora > fim).unwrap_or(false)
    }
}

/// Detalhe de missão por quantidade (`GET /api/missaoqtd/{codigo}`).
///
/// A existência deste registro é o que marca a missão como baseada em
/// quantidade; `quantidadetotal` é a meta de coleta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissaoQtd {
    pub codigo: i64,

    #[serde(default)]
    pub quantidadetotal: Option<u32>,
}

/// Detalhe de missão por raridade (`GET /api/missoes/raridade`).
///
/// Apenas a presença do registro importa para a classificação; `cartarara`
/// aponta a carta-alvo quando a missão exige uma carta específica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissaoRaridade {
    pub codigo: i64,

    #[serde(default)]
    pub cartarara: Option<String>,
}

/// Participação do usuário em missão de quantidade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipacaoQuantidade {
    pub codigo: i64,

    #[serde(default)]
    pub usuario: Option<String>,
}

/// Participação do usuário em missão de raridade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipacaoRaridade {
    pub codigo: i64,

    #[serde(default)]
    pub usuario: Option<String>,

    #[serde(default)]
    pub cartarara: Option<String>,
}

/// Tipo efetivo de uma missão, resolvido pelo agregador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoMissao {
    Quantidade,
    Raridade,
    Evento,
    Geral,
}

/// Missão enriquecida com progresso - derivada, nunca persistida.
///
/// Recalculada a cada chamada do agregador; a ordem das missões segue a ordem
/// devolvida pelo backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissaoComProgresso {
    pub codigo: i64,
    pub tipo: String,
    pub educador: String,
    pub datainicio: Option<String>,
    pub datafim: Option<String>,
    pub progresso: u32,
    pub meta: u32,
    /// 0-100, arredondado
    pub porcentagem: u32,
    pub concluida: bool,
    pub descricao: String,
    pub recompensa: String,
    pub icone: String,
    #[serde(rename = "tipoMissao")]
    pub tipo_missao: TipoMissao,
}

/// Fonte de dados consultada pelo agregador de progresso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FonteDados {
    Missoes,
    Colecao,
    ParticipacoesQuantidade,
    ParticipacoesRaridade,
    MissoesRaridade,
}

/// Registro de fonte degradada durante a agregação.
///
/// Uma fonte inacessível vira lista vazia no cálculo, mas fica registrada
/// aqui para que a interface distinga "zero missões" de "endpoint fora do ar".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degradacao {
    pub fonte: FonteDados,
    pub motivo: String,
}

/// Resultado completo da agregação de progresso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressoMissoes {
    pub missoes: Vec<MissaoComProgresso>,
    pub degradacoes: Vec<Degradacao>,
}

impl ProgressoMissoes {
    /// Verdadeiro quando todas as fontes responderam.
    pub fn completo(&self) -> bool {
        self.degradacoes.is_empty()
    }
}
