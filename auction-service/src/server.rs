use {
    crate::{
        auction::service::{
            Config,
            Service,
        },
        config::RunOptions,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let exit_token = CancellationToken::new();
    tokio::spawn({
        let exit_token = exit_token.clone();
        async move {
            tracing::info!("Registered shutdown signal handler...");
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = ?e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shut down signal received, waiting for tasks...");
            exit_token.cancel();
        }
    });

    let pool = PgPoolOptions::new()
        .max_connections(run_options.server.database_max_connections)
        .connect(&run_options.server.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run database migrations: {:?}", err))?;

    let config = Config::from(&run_options.auction);
    tracing::info!(
        auction_interval = ?config.auction_interval,
        sweep_interval = ?config.sweep_interval,
        "Loaded auction config"
    );

    let task_tracker = TaskTracker::new();
    let service = Service::new(pool, config, task_tracker);
    service.start_expiration_worker(exit_token.clone());

    exit_token.cancelled().await;
    service.shutdown().await;
    Ok(())
}
