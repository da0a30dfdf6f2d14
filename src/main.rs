use clap::Parser as _;

mod adapters;
mod cli;
mod config;
mod gateways;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = cli::Cli::parse();
    let cfg = config::Config::try_load_from_file_or_default(cli.config.as_ref())?;
    cli::run(cli, cfg)
}
