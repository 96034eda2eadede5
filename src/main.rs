//! DoseBuddy chat assistant
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, error};

use DoseBuddy::{
    config::{FrontendMode, Settings},
    utils::logging,
    services::ServiceFactory,
    state::SessionStore,
    handlers::{handle_command, handle_message, run_console, Command},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Console mode owns the terminal, so logs go to the file only
    let telegram = settings.frontend.mode == FrontendMode::Telegram;
    let _log_guard = logging::init_logging(&settings.logging, telegram)?;

    info!("Starting {}...", DoseBuddy::info());

    // Initialize services
    let services = ServiceFactory::new(&settings)?;
    let health = services.health_check().await;
    if health.is_healthy() {
        info!(base_url = services.backend.base_url(), "Prediction backend is ready");
    } else {
        for issue in health.get_issues() {
            warn!(issue = %issue, "Backend health check reported a problem");
        }
    }

    match settings.frontend.mode {
        FrontendMode::Console => {
            let reader = tokio::io::BufReader::new(tokio::io::stdin());
            run_console(reader, tokio::io::stdout(), &services.backend).await?;
        }
        FrontendMode::Telegram => run_telegram(settings, services).await?,
    }

    info!("DoseBuddy has been shut down.");
    Ok(())
}

async fn run_telegram(settings: Settings, services: ServiceFactory) -> anyhow::Result<()> {
    let bot = Bot::new(&settings.bot.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let session_store = SessionStore::new(&settings.session);
    spawn_session_cleanup(session_store.clone(), settings.session.cleanup_interval_seconds);

    let services_arc = Arc::new(services);

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![services_arc, session_store])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;
    Ok(())
}

/// Periodically drop idle conversations
fn spawn_session_cleanup(session_store: SessionStore, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));
        loop {
            interval.tick().await;
            session_store.cleanup_expired().await;
        }
    });
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry().branch(
        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_commands),
            )
            .branch(dptree::endpoint(handle_messages)),
    )
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, session_store: SessionStore) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, session_store).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    session_store: SessionStore,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, services, session_store).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
