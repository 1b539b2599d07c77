use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use facturador::api::{AppState, app_router};
use facturador::config::{Config, StorageConfig};
use facturador::core::SystemClock;
use facturador::pipeline::EmissionService;
use facturador::report::{ArtifactGenerator, WkhtmltopdfRenderer};
use facturador::storage::{ArtifactStore, LocalStore, Publisher, S3Store};
use facturador::sunat::{CommandSigner, WsBillClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn ArtifactStore> = match &config.storage {
        StorageConfig::Local { dir } => Arc::new(LocalStore::new(dir)),
        StorageConfig::S3 {
            bucket,
            endpoint_url,
            region,
        } => Arc::new(
            S3Store::connect(bucket.clone(), endpoint_url.as_deref(), region.clone()).await,
        ),
    };

    let signer = Arc::new(CommandSigner::new(&config.signer_cmd, config.signer_timeout));
    let biller = Arc::new(WsBillClient::new(
        config.environment,
        config.credentials.clone(),
        signer,
        config.soap_timeout,
    )?);

    let renderer = Arc::new(WkhtmltopdfRenderer::new(
        &config.wkhtmltopdf_bin,
        config.render_timeout,
    ));

    let service = EmissionService::new(
        config.issuer.clone(),
        Arc::new(SystemClock),
        biller,
        ArtifactGenerator::new(renderer),
        Publisher::new(
            store,
            config.public_base_url.as_str(),
            config.environment.is_beta(),
        ),
    );

    let router = app_router(AppState::new(service));

    tracing::info!(
        addr = %config.bind_addr,
        env = ?config.environment,
        "facturador listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
