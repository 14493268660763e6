use std::io;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Inicializa o sistema de logs.
///
/// Saída dupla:
/// - arquivo JSON com rotação diária em `logs/` (`esalq-explorer.AAAA-MM-DD.log`),
///   para análise posterior
/// - console em formato legível, para desenvolvimento
///
/// Nível padrão INFO, ajustável via `RUST_LOG` (ex.: `RUST_LOG=debug`).
/// Tokens e senhas nunca são logados; os campos estruturados carregam apenas
/// identificadores e contagens.
pub fn init() -> Result<(), io::Error> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("esalq-explorer")
        .filename_suffix("log")
        .build("logs")
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    let console_layer = fmt::layer()
        .with_writer(io::stdout)
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}
