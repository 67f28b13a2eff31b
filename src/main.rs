use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{error, info, warn};

use obras_api::application::ports::mailer::Mailer;
use obras_api::bootstrap::app_context::{AppContext, AppServices};
use obras_api::bootstrap::config::Config;
use obras_api::infrastructure::db::repositories::{
    image_repository_sqlx::SqlxImageRepository, supplier_repository_sqlx::SqlxSupplierRepository,
    user_repository_sqlx::SqlxUserRepository, work_repository_sqlx::SqlxWorkRepository,
    work_supplier_repository_sqlx::SqlxWorkSupplierRepository,
};
use obras_api::infrastructure::mail::{DisabledMailer, SmtpMailer};
use obras_api::infrastructure::storage::s3::S3ObjectStorage;
use obras_api::presentation::http::{api_routes, health, with_middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            obras_api::presentation::http::health::hello,
            obras_api::presentation::http::health::health,
            obras_api::presentation::http::works::list_works,
            obras_api::presentation::http::works::create_work,
            obras_api::presentation::http::works::delete_work,
            obras_api::presentation::http::works::list_work_suppliers,
            obras_api::presentation::http::suppliers::list_suppliers,
            obras_api::presentation::http::suppliers::create_supplier,
            obras_api::presentation::http::suppliers::delete_supplier,
            obras_api::presentation::http::work_suppliers::list_links,
            obras_api::presentation::http::work_suppliers::create_link,
            obras_api::presentation::http::work_suppliers::delete_link,
            obras_api::presentation::http::images::list_images,
            obras_api::presentation::http::images::create_image,
            obras_api::presentation::http::images::delete_image,
            obras_api::presentation::http::images::upload_image,
            obras_api::presentation::http::images::get_images,
            obras_api::presentation::http::users::list_users,
            obras_api::presentation::http::users::create_user,
            obras_api::presentation::http::users::validate_user,
            obras_api::presentation::http::users::delete_user,
            obras_api::presentation::http::mail::send_email,
        ),
        components(schemas(
            obras_api::presentation::http::error::ErrorBody,
            obras_api::presentation::http::responses::CreatedResponse,
            obras_api::presentation::http::responses::DeleteResponse,
            obras_api::presentation::http::health::HelloResp,
            obras_api::presentation::http::health::HealthResp,
            obras_api::presentation::http::works::Work,
            obras_api::presentation::http::works::WorkSupplier,
            obras_api::presentation::http::works::CreateWorkRequest,
            obras_api::presentation::http::suppliers::Supplier,
            obras_api::presentation::http::suppliers::CreateSupplierRequest,
            obras_api::presentation::http::work_suppliers::Link,
            obras_api::presentation::http::work_suppliers::CreateLinkRequest,
            obras_api::presentation::http::images::Image,
            obras_api::presentation::http::images::CreateImageRequest,
            obras_api::presentation::http::images::ImageUrl,
            obras_api::presentation::http::images::UploadImageResponse,
            obras_api::presentation::http::images::UploadImageMultipart,
            obras_api::presentation::http::users::User,
            obras_api::presentation::http::users::CreateUserRequest,
            obras_api::presentation::http::users::ValidateResponse,
            obras_api::presentation::http::mail::SendEmailRequest,
            obras_api::presentation::http::mail::SendEmailResponse,
        )),
        tags(
            (name = "Works", description = "Construction works"),
            (name = "Suppliers", description = "Suppliers"),
            (name = "Work suppliers", description = "Supplier to work assignments"),
            (name = "Images", description = "Image records and uploads"),
            (name = "Users", description = "User accounts and credential checks"),
            (name = "Mail", description = "Password reset notifications"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "obras_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting obras API");

    // Database
    let pool = obras_api::infrastructure::db::connect_pool(&cfg.database).await?;
    obras_api::infrastructure::db::migrate(&pool).await?;

    let object_storage = Arc::new(S3ObjectStorage::new(&cfg.storage).await?);
    let mailer: Arc<dyn Mailer> = if cfg.mail.is_enabled() {
        Arc::new(SmtpMailer::new(&cfg.mail)?)
    } else {
        warn!("smtp_credentials_missing_mail_disabled");
        Arc::new(DisabledMailer)
    };

    let services = AppServices::new(
        Arc::new(SqlxWorkRepository::new(pool.clone())),
        Arc::new(SqlxSupplierRepository::new(pool.clone())),
        Arc::new(SqlxWorkSupplierRepository::new(pool.clone())),
        Arc::new(SqlxImageRepository::new(pool.clone())),
        Arc::new(SqlxUserRepository::new(pool.clone())),
        object_storage,
        mailer,
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = with_middleware(
        api_routes(ctx)
            .merge(health::routes(pool.clone()))
            .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi())),
        &cfg,
    );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    info!(%api_addr, "HTTP API listening");

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        res = &mut server => {
            report_server_exit(res);
            pool.close().await;
            anyhow::bail!("HTTP server stopped unexpectedly");
        }
        _ = shutdown_signal() => {}
    }

    let _ = stop_tx.send(true);
    let grace = Duration::from_secs(cfg.shutdown_grace_secs);
    match tokio::time::timeout(grace, &mut server).await {
        Ok(res) => report_server_exit(res),
        Err(_) => {
            warn!(grace_secs = cfg.shutdown_grace_secs, "shutdown_grace_elapsed_aborting");
            server.abort();
        }
    }

    pool.close().await;
    info!("HTTP server stopped");
    Ok(())
}

fn report_server_exit(res: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match res {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "ctrl_c_handler_install_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!(?e, "sigterm_handler_install_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => info!("Received SIGTERM, starting shutdown"),
    }
}
