//! Order fulfillment demo entry point.

use app::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Wire the catalog, order side and orchestrator
    let ctx = match app::create_default_context(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "failed to build application context");
            std::process::exit(1);
        }
    };

    // 4. Seed and confirm the demo orders
    let order_ids = match ctx.seed_demo_orders().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "failed to seed demo orders");
            std::process::exit(1);
        }
    };
    let report = ctx.run_demo(&order_ids).await;
    let notifications = ctx.notifier.sent_count().await;
    tracing::info!(
        confirmed = report.confirmed.len(),
        rejected = report.rejected.len(),
        notifications,
        "demo finished"
    );

    if let Err(e) = ctx.log_stock().await {
        tracing::error!(error = %e, "failed to list stock");
    }

    tracing::debug!(metrics = %metrics_handle.render(), "metrics snapshot");
}
