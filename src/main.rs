use anyhow::Result;
use authenticator_mobile::{
    config::{default_log_filter, ShellConfig},
    http_client::ReqwestExecutor,
    shell,
};
use env_logger::{Builder, Env, Target};
use log::{error, info};
use std::io::Write;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    log_panics::init();

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_log_filter()));

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    info!("module version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ShellConfig::get()?;
    let executor = ReqwestExecutor::new()?;

    shell::run(config, executor).await
}
