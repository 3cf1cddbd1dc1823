use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

use models::Gift;
use common::utils::logging::{init_logging, LogFormat};
use service::file::GiftStore;
use service::identity::StaticPrincipal;
use service::storage::JsonFileSnapshot;

async fn run(cfg: &configs::AppConfig) -> anyhow::Result<()> {
    let data_dir = std::path::PathBuf::from(&cfg.storage.data_dir);
    service::runtime::ensure_data_dir(&data_dir).await?;

    let snapshot = JsonFileSnapshot::<Gift>::new(cfg.storage.snapshot_path()).await?;
    let snapshot_path = snapshot.path().to_path_buf();
    let principal = Arc::new(StaticPrincipal::new(cfg.identity.principal.clone()));
    let store = GiftStore::open(snapshot, principal, cfg.storage.persistent).await?;

    let count = store.len().await;
    info!(
        service = "gifts",
        event = "store_ready",
        path = %snapshot_path.display(),
        persistent = store.is_persistent(),
        count,
        "gift store opened"
    );

    let page = store.list(None, None, 0, cfg.listing.default_size).await;
    if page.is_empty() {
        warn!(service = "gifts", event = "empty_store", "no gifts stored yet");
    }
    for gift in &page {
        info!(service = "gifts", id = %gift.id, title = %gift.title, modified_at = %gift.modified_at, "gift");
    }
    let json = serde_json::to_string(&page)?;
    info!(service = "gifts", event = "first_page", %json, "first page listed");
    Ok(())
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and GIFTS_* take effect
    dotenv().ok();
    // a missing file already yields defaults; anything else is a broken config
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(LogFormat::Compact);
            error!(service = "gifts", event = "config_invalid", error = %e, "failed to load config");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(LogFormat::from_name(&cfg.logging.format));

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "gifts", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    info!(service = "gifts", event = "start", %service_id, pid, version, "gift store starting");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "gifts", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(&cfg)) {
        Ok(()) => {
            info!(service = "gifts", event = "stop", %service_id, pid, "gift store stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "gifts", event = "run_failed", error = %e, "gift store startup failed");
            std::process::ExitCode::FAILURE
        }
    }
}
