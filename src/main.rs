use altar::cli::commands::Runner;
use altar::cli::output::Output;
use altar::cli::Cli;
use altar::utils::logging;
use altar::{AltarConfig, BackendClient, IdentityStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let output = Output::new(!cli.no_color);

    let mut config = AltarConfig::load_with_env(&cli.config)?;
    if let Some(base) = cli.api_base {
        config.api.base_url = base;
    }
    if let Some(path) = cli.token_file {
        config.identity.token_file = Some(path);
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;

    logging::init(&config.logging.level, cli.json_logs || config.logging.json);

    let backend = BackendClient::new(config.api.base_url.clone());
    tracing::debug!("Using backend {}", backend.base_url());
    let store = IdentityStore::new(config.identity.token_path());
    let runner = Runner::new(config, Box::new(backend), store, output);

    runner.run(cli.command).await
}
