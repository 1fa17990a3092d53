use crate::cli::{load_config, open_source, save_cache, Cli, RetroArgs};
use crate::report::{retro_report, TitleRenderer};
use tracing::info;

pub async fn execute(cli: &Cli, args: &RetroArgs) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let mut source = open_source(cli, &config)?;
    let titles = TitleRenderer::new(config.base_url());

    info!("Collecting work resolved since {}", args.since);
    let report = retro_report(&mut source, &titles, &config.jira.project, args.since).await;
    save_cache(&mut source);

    print!("{}", report?);
    Ok(())
}
