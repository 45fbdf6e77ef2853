use std::sync::Arc;

use account_application::AccountServiceImpl;
use account_domain::persist::AccountRepository;
use account_server::rpc::RpcServer;
use account_server::{ServiceConfig, startup, telemetry};
use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.log_level)?;

    let repository = Arc::new(
        startup::connect_repository(&config)
            .await
            .context("failed to connect to account store")?,
    );

    let result = run(&config, Arc::clone(&repository)).await;
    if let Err(e) = &result {
        error!(error = %e, "account server exited with error");
    }

    repository.close().await;
    info!("account store closed");
    result
}

async fn run<R>(config: &ServiceConfig, repository: Arc<R>) -> anyhow::Result<()>
where
    R: AccountRepository + 'static,
{
    let service = Arc::new(AccountServiceImpl::new(repository));
    let server = RpcServer::bind(config.listen_addr(), service, config.request_timeout())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;

    info!(addr = %server.local_addr()?, "account server started");
    server.serve(shutdown_signal()).await?;
    info!("account server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
