use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::models::{
    ApiError, Degradacao, FonteDados, ItemColecao, Missao, MissaoComProgresso, MissaoQtd,
    MissaoRaridade, ProgressoMissoes, TipoMissao,
};
use crate::services::client::ApiClient;

/// Rótulos de missão conhecidos como raridade/evento mesmo sem registro de
/// detalhe no backend.
const ROTULOS_RARIDADE: [&str; 3] = ["Caçador de Raras", "Lenda Viva", "Evento Especial"];

/// Tipo efetivo de uma missão, resolvido uma única vez antes do cálculo.
///
/// O backend não declara um discriminante: a classificação sonda o detalhe de
/// quantidade (`/api/missaoqtd/{codigo}`), depois o registro de raridade e a
/// lista fixa de rótulos conhecidos, e só então cai no genérico. Resolver o
/// tipo aqui mantém o cálculo de progresso livre de comparações de string
/// espalhadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissaoKind {
    /// Detalhe de quantidade encontrado; `meta` já resolvida
    Quantidade { meta: u32 },
    /// "Caçador de Raras": 3 cartas raras ou melhores
    CacadorDeRaras,
    /// "Lenda Viva": uma carta lendária
    LendaViva,
    /// "Evento Especial": 15 cartas distintas durante o evento
    EventoEspecial,
    /// Registro de raridade presente, rótulo sem regra implementada
    RaridadeOutra,
    /// Nenhum detalhe e rótulo desconhecido: progresso genérico
    Geral,
}

impl ApiClient {
    /// Calcula o progresso de todas as missões do usuário.
    ///
    /// O backend expõe apenas dados crus; toda a derivação (progresso, meta,
    /// porcentagem, conclusão e recompensa) acontece aqui:
    ///
    /// 1. Busca em paralelo missões, coleção e as duas listas de
    ///    participação; cada fonte inacessível degrada para lista vazia e é
    ///    registrada em `degradacoes` em vez de abortar o lote.
    /// 2. Sonda os detalhes de quantidade de todas as missões em paralelo
    ///    (ordem preservada) e carrega a lista de registros de raridade.
    /// 3. Resolve o `MissaoKind` de cada missão uma única vez e computa a
    ///    missão enriquecida a partir dele.
    ///
    /// O resultado segue a ordem devolvida pelo backend e é recalculado a
    /// cada chamada - nenhum estado fica retido entre execuções.
    pub async fn calcular_progresso_missoes(&self) -> ProgressoMissoes {
        self.calcular_progresso_missoes_em(Utc::now()).await
    }

    /// Variante com instante explícito, para o corte de "Evento encerrado".
    pub(crate) async fn calcular_progresso_missoes_em(
        &self,
        agora: DateTime<Utc>,
    ) -> ProgressoMissoes {
        let mut degradacoes = Vec::new();

        let (missoes, colecao, participacoes_qtd, participacoes_rar) = tokio::join!(
            self.missoes(),
            self.minha_colecao(),
            self.participacoes_quantidade(),
            self.participacoes_raridade(),
        );

        let missoes = degradar(missoes, FonteDados::Missoes, &mut degradacoes);
        let colecao = degradar(colecao, FonteDados::Colecao, &mut degradacoes);
        // As participações fazem parte do lote consultado, mas nenhuma regra
        // de progresso as usa hoje; a indisponibilidade é reportada do mesmo
        // jeito.
        let _ = degradar(
            participacoes_qtd,
            FonteDados::ParticipacoesQuantidade,
            &mut degradacoes,
        );
        let _ = degradar(
            participacoes_rar,
            FonteDados::ParticipacoesRaridade,
            &mut degradacoes,
        );

        let (registros_raridade, detalhes_qtd) = if missoes.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let (raridade, detalhes) = tokio::join!(
                self.missoes_raridade(),
                join_all(
                    missoes
                        .iter()
                        .map(|missao| self.detalhe_quantidade(missao.codigo))
                ),
            );
            (
                degradar(raridade, FonteDados::MissoesRaridade, &mut degradacoes),
                detalhes,
            )
        };

        let enriquecidas = missoes
            .iter()
            .zip(detalhes_qtd.iter())
            .map(|(missao, detalhe)| {
                let kind = classificar(missao, detalhe.as_ref(), &registros_raridade);
                tracing::debug!(
                    codigo = %missao.codigo,
                    tipo = %missao.tipo,
                    kind = ?kind,
                    "Mission classified"
                );
                enriquecer(missao, kind, &colecao, agora)
            })
            .collect();

        ProgressoMissoes {
            missoes: enriquecidas,
            degradacoes,
        }
    }

    /// Sonda o detalhe de quantidade; ausência (404) ou falha conta como
    /// "não é missão de quantidade".
    async fn detalhe_quantidade(&self, codigo: i64) -> Option<MissaoQtd> {
        match self.missao_quantidade(codigo).await {
            Ok(detalhe) => Some(detalhe),
            Err(e) => {
                tracing::debug!(
                    codigo = %codigo,
                    error = %e,
                    "Mission has no quantity detail"
                );
                None
            }
        }
    }
}

/// Degrada uma fonte inacessível para lista vazia, registrando o motivo.
fn degradar<T>(
    resultado: Result<Vec<T>, ApiError>,
    fonte: FonteDados,
    degradacoes: &mut Vec<Degradacao>,
) -> Vec<T> {
    match resultado {
        Ok(lista) => lista,
        Err(e) => {
            tracing::warn!(
                fonte = ?fonte,
                error = %e,
                "Progress source unavailable, degrading to empty list"
            );
            degradacoes.push(Degradacao {
                fonte,
                motivo: e.to_string(),
            });
            Vec::new()
        }
    }
}

/// Resolve o tipo efetivo da missão.
///
/// Precedência: detalhe de quantidade > registro de raridade ou rótulo
/// conhecido > genérico. O fallback genérico só dispara quando as duas
/// sondagens falham E o rótulo não está na lista fixa.
fn classificar(
    missao: &Missao,
    detalhe_qtd: Option<&MissaoQtd>,
    registros_raridade: &[MissaoRaridade],
) -> MissaoKind {
    if let Some(detalhe) = detalhe_qtd {
        return MissaoKind::Quantidade {
            meta: detalhe.quantidadetotal.unwrap_or(5),
        };
    }

    let tem_registro = registros_raridade
        .iter()
        .any(|registro| registro.codigo == missao.codigo);
    let rotulo_conhecido = ROTULOS_RARIDADE.contains(&missao.tipo.as_str());

    if tem_registro || rotulo_conhecido {
        match missao.tipo.as_str() {
            "Caçador de Raras" => MissaoKind::CacadorDeRaras,
            "Lenda Viva" => MissaoKind::LendaViva,
            "Evento Especial" => MissaoKind::EventoEspecial,
            _ => MissaoKind::RaridadeOutra,
        }
    } else {
        MissaoKind::Geral
    }
}

/// Computa a missão enriquecida a partir do tipo resolvido e da coleção.
fn enriquecer(
    missao: &Missao,
    kind: MissaoKind,
    colecao: &[ItemColecao],
    agora: DateTime<Utc>,
) -> MissaoComProgresso {
    let rotulo = if missao.tipo.is_empty() {
        "Missão"
    } else {
        missao.tipo.as_str()
    };

    let mut enriquecida = MissaoComProgresso {
        codigo: missao.codigo,
        tipo: rotulo.to_string(),
        educador: missao
            .educador
            .clone()
            .unwrap_or_else(|| "Sistema".to_string()),
        datainicio: missao.datainicio.clone(),
        datafim: missao.datafim.clone(),
        progresso: 0,
        meta: 0,
        porcentagem: 0,
        concluida: false,
        descricao: String::new(),
        recompensa: "50 XP".to_string(),
        icone: "🎯".to_string(),
        tipo_missao: TipoMissao::Geral,
    };

    let total_cartas: u32 = colecao.iter().map(|item| item.quantidade).sum();
    let cartas_unicas = colecao.len() as u32;

    match kind {
        MissaoKind::Quantidade { meta } => {
            enriquecida.meta = meta;
            enriquecida.progresso = total_cartas.min(meta);
            enriquecida.tipo_missao = TipoMissao::Quantidade;

            let (descricao, icone) = match missao.tipo.as_str() {
                "Coletor Iniciante" => {
                    (format!("Colete suas primeiras {} cartas", meta), "🌱")
                }
                "Explorador" => (format!("Colete {} cartas diferentes", meta), "🗺️"),
                "Veterano" => (format!("Colete {} cartas no total", meta), "🏆"),
                _ => (format!("Colete {} cartas", meta), "📦"),
            };
            enriquecida.descricao = descricao;
            enriquecida.icone = icone.to_string();
        }
        MissaoKind::CacadorDeRaras => {
            enriquecida.meta = 3;
            let raras = colecao
                .iter()
                .filter(|item| item.carta.raridade.rara_ou_melhor())
                .count() as u32;
            enriquecida.progresso = raras.min(3);
            enriquecida.descricao = "Encontre 3 cartas raras".to_string();
            enriquecida.icone = "⭐".to_string();
            enriquecida.tipo_missao = TipoMissao::Raridade;
        }
        MissaoKind::LendaViva => {
            enriquecida.meta = 1;
            let tem_lendaria = colecao
                .iter()
                .any(|item| item.carta.raridade == crate::models::Raridade::Lendaria);
            enriquecida.progresso = u32::from(tem_lendaria);
            enriquecida.descricao = "Encontre uma carta lendária".to_string();
            enriquecida.icone = "👑".to_string();
            enriquecida.tipo_missao = TipoMissao::Raridade;
        }
        MissaoKind::EventoEspecial => {
            enriquecida.meta = 15;
            enriquecida.progresso = cartas_unicas.min(15);
            enriquecida.descricao = "Colete 15 cartas durante o evento".to_string();
            enriquecida.icone = "🎉".to_string();
            enriquecida.tipo_missao = TipoMissao::Evento;

            // Evento vencido muda apenas a apresentação; a conclusão continua
            // valendo para quem atingiu a meta
            if missao.encerrada_em(agora) {
                enriquecida.descricao.push_str(" (Evento encerrado)");
                enriquecida.icone = "⏰".to_string();
            }
        }
        MissaoKind::RaridadeOutra => {
            enriquecida.meta = 1;
            enriquecida.progresso = 0;
            enriquecida.descricao = format!("Complete a missão {}", rotulo_especial(missao));
            enriquecida.tipo_missao = TipoMissao::Raridade;
        }
        MissaoKind::Geral => {
            enriquecida.meta = 5;
            enriquecida.progresso = cartas_unicas.min(5);
            enriquecida.descricao = format!("Complete a missão {}", rotulo_geral(missao));
            enriquecida.tipo_missao = TipoMissao::Geral;
        }
    }

    if enriquecida.meta > 0 {
        enriquecida.porcentagem = ((enriquecida.progresso as f64 / enriquecida.meta as f64)
            * 100.0)
            .round() as u32;
        enriquecida.concluida = enriquecida.progresso >= enriquecida.meta;
    }

    enriquecida.recompensa = recompensa(&enriquecida);
    enriquecida
}

fn rotulo_especial(missao: &Missao) -> &str {
    if missao.tipo.is_empty() {
        "Especial"
    } else {
        &missao.tipo
    }
}

fn rotulo_geral(missao: &Missao) -> &str {
    if missao.tipo.is_empty() {
        "Geral"
    } else {
        &missao.tipo
    }
}

/// Escada de recompensas.
///
/// Conclusão prevalece sobre as faixas de porcentagem: missão concluída
/// sempre recebe a recompensa do seu tipo.
fn recompensa(missao: &MissaoComProgresso) -> String {
    if missao.concluida {
        match missao.tipo_missao {
            TipoMissao::Raridade => "200 XP",
            TipoMissao::Evento => "300 XP + Carta Especial",
            TipoMissao::Quantidade | TipoMissao::Geral => "100 XP",
        }
    } else if missao.porcentagem >= 75 {
        "75 XP"
    } else if missao.porcentagem >= 50 {
        "50 XP"
    } else {
        "25 XP"
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Carta, Raridade};

    fn missao(codigo: i64, tipo: &str) -> Missao {
        Missao {
            codigo,
            tipo: tipo.to_string(),
            educador: None,
            datainicio: None,
            datafim: None,
        }
    }

    fn item(qrcode: &str, quantidade: u32, raridade: Raridade) -> ItemColecao {
        ItemColecao {
            qrcode: qrcode.to_string(),
            quantidade,
            carta: Carta {
                qrcode: qrcode.to_string(),
                nome: None,
                raridade,
                descricao: None,
                imagem: None,
                audio: None,
                localizacao: None,
                latitude: None,
                longitude: None,
            },
        }
    }

    #[test]
    fn test_classificar_prioriza_detalhe_de_quantidade() {
        let detalhe = MissaoQtd {
            codigo: 1,
            quantidadetotal: Some(10),
        };
        // Mesmo com rótulo de raridade, o detalhe de quantidade vence
        let kind = classificar(&missao(1, "Caçador de Raras"), Some(&detalhe), &[]);
        assert_eq!(kind, MissaoKind::Quantidade { meta: 10 });
    }

    #[test]
    fn test_classificar_meta_padrao_sem_quantidadetotal() {
        let detalhe = MissaoQtd {
            codigo: 1,
            quantidadetotal: None,
        };
        let kind = classificar(&missao(1, "Coletor Iniciante"), Some(&detalhe), &[]);
        assert_eq!(kind, MissaoKind::Quantidade { meta: 5 });
    }

    #[test]
    fn test_classificar_raridade_por_registro_ou_rotulo() {
        let registros = vec![MissaoRaridade {
            codigo: 7,
            cartarara: None,
        }];

        // Registro presente, rótulo fora da lista -> raridade sem regra
        assert_eq!(
            classificar(&missao(7, "Colecionador Noturno"), None, &registros),
            MissaoKind::RaridadeOutra
        );

        // Sem registro, rótulo conhecido
        assert_eq!(
            classificar(&missao(8, "Lenda Viva"), None, &[]),
            MissaoKind::LendaViva
        );
    }

    #[test]
    fn test_classificar_fallback_geral_somente_com_dupla_falha() {
        // Nenhum detalhe, nenhum registro, rótulo desconhecido
        assert_eq!(
            classificar(&missao(9, "Missão Surpresa"), None, &[]),
            MissaoKind::Geral
        );
    }

    #[test]
    fn test_missao_de_quantidade_exemplo_do_contrato() {
        // Coleção somando 3 cartas, meta 5 -> 60%, "50 XP"
        let colecao = vec![
            item("QR001", 2, Raridade::Comum),
            item("QR002", 1, Raridade::Incomum),
        ];
        let enriquecida = enriquecer(
            &missao(1, "Coletor Iniciante"),
            MissaoKind::Quantidade { meta: 5 },
            &colecao,
            Utc::now(),
        );

        assert_eq!(enriquecida.progresso, 3);
        assert_eq!(enriquecida.meta, 5);
        assert_eq!(enriquecida.porcentagem, 60);
        assert!(!enriquecida.concluida);
        assert_eq!(enriquecida.recompensa, "50 XP");
        assert_eq!(enriquecida.tipo_missao, TipoMissao::Quantidade);
        assert_eq!(enriquecida.descricao, "Colete suas primeiras 5 cartas");
        assert_eq!(enriquecida.icone, "🌱");
    }

    #[test]
    fn test_cacador_de_raras_exemplo_do_contrato() {
        // Duas entradas raras -> 2/3, 67%
        let colecao = vec![
            item("QR001", 1, Raridade::Rara),
            item("QR002", 1, Raridade::Rara),
            item("QR003", 4, Raridade::Comum),
        ];
        let enriquecida = enriquecer(
            &missao(2, "Caçador de Raras"),
            MissaoKind::CacadorDeRaras,
            &colecao,
            Utc::now(),
        );

        assert_eq!(enriquecida.progresso, 2);
        assert_eq!(enriquecida.meta, 3);
        assert_eq!(enriquecida.porcentagem, 67);
        assert!(!enriquecida.concluida);
    }

    #[test]
    fn test_lenda_viva_binaria() {
        let sem_lendaria = vec![item("QR001", 5, Raridade::Epica)];
        let com_lendaria = vec![item("QR002", 1, Raridade::Lendaria)];

        let m = missao(3, "Lenda Viva");
        assert_eq!(
            enriquecer(&m, MissaoKind::LendaViva, &sem_lendaria, Utc::now()).progresso,
            0
        );

        let concluida = enriquecer(&m, MissaoKind::LendaViva, &com_lendaria, Utc::now());
        assert_eq!(concluida.progresso, 1);
        assert!(concluida.concluida);
        assert_eq!(concluida.recompensa, "200 XP");
    }

    #[test]
    fn test_recompensa_de_conclusao_prevalece_sobre_faixas() {
        let colecao: Vec<ItemColecao> = (0..15)
            .map(|i| item(&format!("QR{i:03}"), 1, Raridade::Comum))
            .collect();

        let quantidade = enriquecer(
            &missao(1, "Veterano"),
            MissaoKind::Quantidade { meta: 10 },
            &colecao,
            Utc::now(),
        );
        assert!(quantidade.concluida);
        assert_eq!(quantidade.recompensa, "100 XP");

        let evento = enriquecer(
            &missao(2, "Evento Especial"),
            MissaoKind::EventoEspecial,
            &colecao,
            Utc::now(),
        );
        assert!(evento.concluida);
        assert_eq!(evento.recompensa, "300 XP + Carta Especial");
    }

    #[test]
    fn test_faixas_de_porcentagem() {
        // 4/5 = 80% -> "75 XP"
        let colecao: Vec<ItemColecao> = (0..4)
            .map(|i| item(&format!("QR{i:03}"), 1, Raridade::Comum))
            .collect();
        let alta = enriquecer(
            &missao(1, "Coletor Iniciante"),
            MissaoKind::Quantidade { meta: 5 },
            &colecao,
            Utc::now(),
        );
        assert_eq!(alta.porcentagem, 80);
        assert_eq!(alta.recompensa, "75 XP");

        // 1/5 = 20% -> "25 XP"
        let baixa = enriquecer(
            &missao(1, "Coletor Iniciante"),
            MissaoKind::Quantidade { meta: 5 },
            &colecao[..1],
            Utc::now(),
        );
        assert_eq!(baixa.porcentagem, 20);
        assert_eq!(baixa.recompensa, "25 XP");
    }

    #[test]
    fn test_fallback_geral() {
        let colecao: Vec<ItemColecao> = (0..8)
            .map(|i| item(&format!("QR{i:03}"), 2, Raridade::Comum))
            .collect();
        let enriquecida = enriquecer(&missao(9, "Missão Surpresa"), MissaoKind::Geral, &colecao, Utc::now());

        // Entradas distintas (não soma de quantidades), teto em 5
        assert_eq!(enriquecida.meta, 5);
        assert_eq!(enriquecida.progresso, 5);
        assert!(enriquecida.concluida);
        assert_eq!(enriquecida.tipo_missao, TipoMissao::Geral);
        assert_eq!(enriquecida.descricao, "Complete a missão Missão Surpresa");
    }

    #[test]
    fn test_evento_encerrado_anota_sem_afetar_conclusao() {
        let colecao: Vec<ItemColecao> = (0..15)
            .map(|i| item(&format!("QR{i:03}"), 1, Raridade::Comum))
            .collect();
        let mut m = missao(4, "Evento Especial");
        m.datafim = Some("2020-01-01".to_string());

        let enriquecida = enriquecer(&m, MissaoKind::EventoEspecial, &colecao, Utc::now());
        assert!(enriquecida.descricao.ends_with("(Evento encerrado)"));
        assert_eq!(enriquecida.icone, "⏰");
        // A anotação é só apresentação: meta atingida continua concluída
        assert!(enriquecida.concluida);
        assert_eq!(enriquecida.recompensa, "300 XP + Carta Especial");
    }

    #[test]
    fn test_raridade_sem_regra_fica_zerada() {
        let colecao = vec![item("QR001", 1, Raridade::Lendaria)];
        let enriquecida = enriquecer(
            &missao(7, "Colecionador Noturno"),
            MissaoKind::RaridadeOutra,
            &colecao,
            Utc::now(),
        );
        assert_eq!(enriquecida.meta, 1);
        assert_eq!(enriquecida.progresso, 0);
        assert_eq!(enriquecida.porcentagem, 0);
        assert_eq!(enriquecida.recompensa, "25 XP");
    }
}
