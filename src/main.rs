use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use purge_completed_jobs::cli::Cli;
use purge_completed_jobs::core::cluster::KubeCluster;
use purge_completed_jobs::core::runner;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let options = cli.purge_options();

    let cluster = match KubeCluster::connect().await {
        Ok(cluster) => cluster,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let result = runner::purge(&cluster, &cli.namespace, cli.before_hours, &options).await;
    if result.success {
        info!("{}", result.message);
    } else if let Some(err) = result.error {
        error!("Failed to delete some / all of the completed job(s), error: {err}");
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
