use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use services::{
    create_clipboard_store, create_input_sink, create_target_activator, AutomationSequencer,
    ClipboardWatcher, MonitorController,
};

#[derive(Parser, Debug)]
#[command(name = "clipship-rust")]
#[command(about = "Отслеживание буфера обмена с автопересылкой текста в окно мессенджера")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "clipship.toml")]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Инициализация системы логирования
    init_tracing(&args.log_level)?;

    info!("Запуск ClipShip Rust v{}", env!("CARGO_PKG_VERSION"));

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    if config.target.username.trim().is_empty() {
        warn!("target.username не задан - изменения буфера будут замечены, но никуда не отправлены");
    }

    // Проверка прав доступа: сбой не останавливает запуск,
    // инъекция будет отклонена на уровне прогона
    if let Err(e) = utils::permissions::check_permissions() {
        warn!("Проблема с правами доступа: {}", e);
    }

    // Инициализация компонентов
    let input = create_input_sink(config.clone(), args.dry_run)?;
    let activator = create_target_activator(args.dry_run)?;
    let store = create_clipboard_store(args.dry_run)?;
    let watcher = ClipboardWatcher::new(store);
    let sequencer = Arc::new(AutomationSequencer::new(
        config.clone(),
        activator,
        input.clone(),
    ));
    let monitor = MonitorController::new(config.clone(), watcher, sequencer, input);

    info!("Все компоненты инициализированы");

    monitor.check_permissions();

    if config.monitor.autostart {
        monitor.start();
    } else {
        info!("Автозапуск мониторинга отключён, ожидаем команды toggle");
    }

    // Ожидание сигнала завершения
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Получен сигнал завершения (Ctrl+C)");
        }
        Err(err) => {
            error!("Ошибка при ожидании сигнала завершения: {}", err);
        }
    }

    info!("Завершение работы...");

    // Гасим таймер опроса; начатый прогон автоматизации дорабатывает до конца
    monitor.stop();

    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    match tokio::time::timeout(shutdown_timeout, monitor.wait_idle()).await {
        Ok(_) => info!("Все прогоны автоматизации завершены корректно"),
        Err(_) => warn!("Таймаут при ожидании прогона автоматизации"),
    }

    info!("ClipShip Rust завершил работу");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}
