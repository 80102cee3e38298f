use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use vconsult::config::{self, Config, ProcessEnv};
use vconsult::server::{AppState, app_router};
use vconsult::supabase::build_http_client;
use vconsult::utils::logging::init_tracing;
use vconsult::{MessageBoard, SupabaseClient};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_optional_toml()?;
    init_tracing(&cfg.basic.loglevel);

    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        table = %cfg.supabase.table,
        list_limit = cfg.supabase.list_limit,
        proxy = %cfg.supabase.proxy.as_ref().map_or("<none>", url::Url::as_str),
    );

    let credentials = config::resolve(&ProcessEnv);
    let http = build_http_client(&cfg.supabase)?;
    let client = SupabaseClient::new(credentials, http);
    let board = MessageBoard::new(client, cfg.supabase.table.clone(), cfg.supabase.list_limit);
    if !board.is_configured() {
        warn!(
            table = %board.table(),
            "Messages board is running without Supabase; /api/messages will answer 503"
        );
    }

    let app = app_router(AppState::new(board));

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM. A handler that fails to install only disables that signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "SIGTERM",
    };
    info!(signal = received, "Shutdown requested; draining connections");
}
