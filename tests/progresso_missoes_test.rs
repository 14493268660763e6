//! Agregador de progresso de missões contra um backend simulado.
//!
//! Exercita o pipeline completo: busca paralela das fontes, sondagem de
//! detalhes por missão, classificação e enriquecimento, incluindo degradação
//! por fonte indisponível e idempotência entre chamadas.

use serde_json::json;
use std::sync::Arc;

use esalq_explorer_client::models::{FonteDados, TipoMissao};
use esalq_explorer_client::services::{ApiClient, ClientConfig, MemoryStore};

fn cliente(url: &str) -> ApiClient {
    ApiClient::new(ClientConfig::new(url), Arc::new(MemoryStore::new())).unwrap()
}

fn envelope(data: serde_json::Value) -> String {
    json!({"success": true, "data": data}).to_string()
}

fn nao_encontrado() -> String {
    json!({"success": false, "error": "Missão não encontrada"}).to_string()
}

/// Monta o cenário padrão: três missões (quantidade, raridade por rótulo,
/// desconhecida) e uma coleção com 3 cartas no total, 2 distintas, 1 rara.
async fn montar_backend(server: &mut mockito::Server) {
    server
        .mock("GET", "/api/missoes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([
            {"codigo": 1, "tipo": "Coletor Iniciante"},
            {"codigo": 2, "tipo": "Caçador de Raras"},
            {"codigo": 3, "tipo": "Missão Surpresa"}
        ])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/minha-colecao")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([
            {"qrcode": "QR001", "quantidade": 2, "carta": {"qrcode": "QR001", "raridade": "rara"}},
            {"qrcode": "QR002", "quantidade": 1, "carta": {"qrcode": "QR002", "raridade": "comum"}}
        ])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/participacoes/quantidade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/participacoes/raridade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/missoes/raridade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    // Só a missão 1 tem detalhe de quantidade
    server
        .mock("GET", "/api/missaoqtd/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"codigo": 1, "quantidadetotal": 5})))
        .create_async()
        .await;

    for codigo in [2, 3] {
        server
            .mock("GET", &*format!("/api/missaoqtd/{codigo}"))
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(nao_encontrado())
            .create_async()
            .await;
    }
}

#[tokio::test]
async fn test_agregacao_completa_classifica_e_enriquece() {
    let mut server = mockito::Server::new_async().await;
    montar_backend(&mut server).await;

    let cliente = cliente(&server.url());
    let progresso = cliente.calcular_progresso_missoes().await;

    assert!(progresso.completo());
    assert_eq!(progresso.missoes.len(), 3);

    // Ordem do backend preservada
    let quantidade = &progresso.missoes[0];
    assert_eq!(quantidade.codigo, 1);
    assert_eq!(quantidade.tipo_missao, TipoMissao::Quantidade);
    assert_eq!(quantidade.progresso, 3);
    assert_eq!(quantidade.meta, 5);
    assert_eq!(quantidade.porcentagem, 60);
    assert_eq!(quantidade.recompensa, "50 XP");
    assert_eq!(quantidade.educador, "Sistema");

    // Sem registro de raridade, o rótulo conhecido basta
    let raridade = &progresso.missoes[1];
    assert_eq!(raridade.tipo_missao, TipoMissao::Raridade);
    assert_eq!(raridade.meta, 3);
    assert_eq!(raridade.progresso, 1);
    assert_eq!(raridade.porcentagem, 33);
    assert_eq!(raridade.recompensa, "25 XP");

    // Rótulo desconhecido e sem detalhe: progresso genérico por cartas únicas
    let geral = &progresso.missoes[2];
    assert_eq!(geral.tipo_missao, TipoMissao::Geral);
    assert_eq!(geral.meta, 5);
    assert_eq!(geral.progresso, 2);
    assert_eq!(geral.porcentagem, 40);
}

#[tokio::test]
async fn test_agregacao_idempotente_entre_chamadas() {
    let mut server = mockito::Server::new_async().await;
    montar_backend(&mut server).await;

    let cliente = cliente(&server.url());
    let primeira = cliente.calcular_progresso_missoes().await;
    let segunda = cliente.calcular_progresso_missoes().await;

    // Nenhum estado retido entre execuções
    assert_eq!(primeira.missoes, segunda.missoes);
    assert!(segunda.degradacoes.is_empty());
}

#[tokio::test]
async fn test_fonte_indisponivel_degrada_sem_abortar() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/missoes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([{"codigo": 9, "tipo": "Missão Surpresa"}])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/minha-colecao")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(json!({"detail": "database offline"}).to_string())
        .create_async()
        .await;

    server
        .mock("GET", "/api/participacoes/quantidade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/participacoes/raridade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/missoes/raridade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/missaoqtd/9")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(nao_encontrado())
        .create_async()
        .await;

    let cliente = cliente(&server.url());
    let progresso = cliente.calcular_progresso_missoes().await;

    // A missão ainda sai, com coleção vazia
    assert_eq!(progresso.missoes.len(), 1);
    assert_eq!(progresso.missoes[0].progresso, 0);
    assert_eq!(progresso.missoes[0].porcentagem, 0);

    // E a degradação fica registrada com a fonte certa
    assert!(!progresso.completo());
    assert_eq!(progresso.degradacoes.len(), 1);
    assert_eq!(progresso.degradacoes[0].fonte, FonteDados::Colecao);
}

#[tokio::test]
async fn test_todas_as_fontes_fora_produz_lote_vazio_degradado() {
    let mut server = mockito::Server::new_async().await;

    for endpoint in [
        "/api/missoes",
        "/api/minha-colecao",
        "/api/participacoes/quantidade",
        "/api/participacoes/raridade",
    ] {
        server
            .mock("GET", endpoint)
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(json!({"detail": "down"}).to_string())
            .create_async()
            .await;
    }

    let cliente = cliente(&server.url());
    let progresso = cliente.calcular_progresso_missoes().await;

    // Sem missões não há sondagem de detalhes nem consulta de raridade
    assert!(progresso.missoes.is_empty());
    assert_eq!(progresso.degradacoes.len(), 4);
}

#[tokio::test]
async fn test_registro_de_raridade_sem_rotulo_conhecido() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/missoes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([{"codigo": 7, "tipo": "Colecionador Noturno"}])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/minha-colecao")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    for endpoint in ["/api/participacoes/quantidade", "/api/participacoes/raridade"] {
        server
            .mock("GET", endpoint)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(json!([])))
            .create_async()
            .await;
    }

    // O registro marca a missão como raridade, mesmo com rótulo fora da lista
    server
        .mock("GET", "/api/missoes/raridade")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([{"codigo": 7, "cartarara": "QR050"}])))
        .create_async()
        .await;

    server
        .mock("GET", "/api/missaoqtd/7")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(nao_encontrado())
        .create_async()
        .await;

    let cliente = cliente(&server.url());
    let progresso = cliente.calcular_progresso_missoes().await;

    let missao = &progresso.missoes[0];
    assert_eq!(missao.tipo_missao, TipoMissao::Raridade);
    assert_eq!(missao.meta, 1);
    assert_eq!(missao.progresso, 0);
    assert_eq!(missao.descricao, "Complete a missão Colecionador Noturno");
}
