use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use auth_api::{build_router, cookie::SessionCookie, AppState};
use auth_core::repositories::Notifier;
use auth_core::services::{EventBus, FanoutNotifier, SessionManager, SignupService};
use auth_core::SessionStore;
use auth_infrastructure::{
    create_pool, create_redis_pool, run_migrations, PgUserRepository, RedisSessionBackend,
    WebhookNotifier,
};
use auth_security::JwtService;
use auth_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    auth_shared::telemetry::init_telemetry("info,auth_server=debug,tower_http=info");

    info!("Auth server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let jwt = match JwtService::new(&config.jwt.secret) {
        Ok(jwt) => Arc::new(jwt),
        Err(e) => {
            error!("Invalid signing secret: {}", e);
            std::process::exit(1);
        }
    };

    if config.is_production() && !config.cookie.secure {
        warn!("cookie.secure is false in production; session cookies will be sent over plain HTTP");
    }

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    run_migrations(&pool).await?;
    info!("Database connection established, migrations applied.");

    // Connect to session store
    let redis_pool = create_redis_pool(&config.redis.url, config.redis.max_connections)?;
    let session_backend = RedisSessionBackend::new(redis_pool);
    session_backend.ping().await?;
    info!("Session store reachable.");

    // Services
    let user_repo = Arc::new(PgUserRepository::new(pool));
    let session_manager = SessionManager::new(
        user_repo.clone(),
        SessionStore::new(Arc::new(session_backend)),
        jwt,
    );
    let signup_service = SignupService::new(user_repo);

    // Notifications: in-process bus, plus the webhook when configured
    let event_bus = Arc::new(EventBus::new(config.notifications.capacity));
    let notifier: Arc<dyn Notifier> = match &config.notifications.webhook_url {
        Some(url) => {
            let webhook = WebhookNotifier::new(url.clone(), config.notifications.webhook_secret.clone())?;
            info!("Forwarding notifications to webhook");
            let targets: Vec<Arc<dyn Notifier>> = vec![event_bus.clone(), Arc::new(webhook)];
            Arc::new(FanoutNotifier::new(targets))
        }
        None => event_bus.clone() as Arc<dyn Notifier>,
    };

    // Create App State
    let state = AppState {
        session_manager: Arc::new(session_manager),
        signup_service: Arc::new(signup_service),
        notifier,
        event_bus,
        cookie: SessionCookie::from(&config.cookie),
        notify_channel: config.notifications.channel.clone(),
        notify_event: config.notifications.event.clone(),
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("{} listening on {}", config.app.name, addr);
    info!("Cookie: {} (secure: {})", config.cookie.name, config.cookie.secure);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
