use crate::cli::{load_config, open_source, save_cache, Cli};
use crate::config::Templates;
use crate::report::{planning_report, TitleRenderer};
use tracing::info;

pub async fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    // Templates are required up front so a missing file fails before any request
    info!("Loading templates from {:?}", config.templates);
    let templates = Templates::load(&config.templates)?;

    let mut source = open_source(cli, &config)?;
    let titles = TitleRenderer::new(config.base_url());

    let report = planning_report(&mut source, &titles, &templates).await;
    save_cache(&mut source);

    print!("{}", report?);
    Ok(())
}
