//! Grievance Desk HTTP server.

use std::sync::Arc;

use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grievance_desk::adapters::http::{api_router, AppState};
use grievance_desk::adapters::{
    FixedPriorityPolicy, InMemoryComplaintStore, InMemoryEventBus, InMemoryNotificationStore,
    InMemoryUserDirectory, PostgresComplaintStore, PostgresNotificationRepository,
    PostgresUserDirectory,
};
use grievance_desk::application::handlers::{NotificationProjector, PROJECTED_EVENTS};
use grievance_desk::config::{AppConfig, ServerConfig};
use grievance_desk::ports::{
    ComplaintReader, ComplaintRepository, EventSubscriber, NotificationRepository, UserDirectory,
};

struct Stores {
    complaints: Arc<dyn ComplaintRepository>,
    reader: Arc<dyn ComplaintReader>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationRepository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;
    config.validate()?;

    let stores = match &config.database {
        Some(database) => {
            let pool = database.pool_options().connect(&database.url).await?;
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("database migrations applied");
            }
            let complaints = Arc::new(PostgresComplaintStore::new(pool.clone()));
            Stores {
                complaints: complaints.clone(),
                reader: complaints,
                users: Arc::new(PostgresUserDirectory::new(pool.clone())),
                notifications: Arc::new(PostgresNotificationRepository::new(pool)),
            }
        }
        None => {
            tracing::warn!("no database configured, using in-memory stores with an empty user directory");
            let complaints = Arc::new(InMemoryComplaintStore::new());
            Stores {
                complaints: complaints.clone(),
                reader: complaints,
                users: Arc::new(InMemoryUserDirectory::new()),
                notifications: Arc::new(InMemoryNotificationStore::new()),
            }
        }
    };

    let bus = Arc::new(InMemoryEventBus::transient());
    bus.subscribe_all(
        &PROJECTED_EVENTS,
        Arc::new(NotificationProjector::new(
            stores.complaints.clone(),
            stores.reader.clone(),
            stores.users.clone(),
            stores.notifications.clone(),
        )),
    );

    let lifecycle = &config.lifecycle;
    let state = AppState::new(
        stores.complaints,
        stores.reader,
        stores.users,
        stores.notifications,
        Arc::new(FixedPriorityPolicy::new(lifecycle.priority()?)),
        bus,
    )
    .with_retry_limits(lifecycle.max_transition_retries, lifecycle.max_cluster_retries);

    let app = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "grievance desk listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&server.log_level))?;
    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).try_init()?;
    }
    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<http::HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
