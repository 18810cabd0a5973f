use std::num::NonZeroUsize;

use aplus::{handler, run_to_completion, NotifyMode, Promise, RuntimeOptions, Value};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aplus", version, about = "Runs the basic promise scenarios")]
struct Cli {
    /// Run handlers registered on a pending promise inside fulfill/reject.
    #[arg(long, default_value_t = false)]
    sync: bool,
    /// Bound on nested thenable adoption, at least 1.
    #[arg(long)]
    max_adoption_depth: Option<NonZeroUsize>,
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> anyhow::Result<RuntimeOptions> {
        let mut options = RuntimeOptions::from_env()?;
        if self.sync {
            options = options.with_notify_mode(NotifyMode::Synchronous);
        }
        if let Some(depth) = self.max_adoption_depth {
            options = options.with_max_adoption_depth(depth.get());
        }
        Ok(options)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn watch(promise: &Promise) {
    promise.then(
        Some(handler(|value: Value| println!("Fulfilled: {}", value))),
        Some(handler(|reason: Value| println!("Rejected: {}", reason))),
    );
}

fn scenarios() {
    debug!("handlers registered before fulfill");
    let promise = Promise::new();
    watch(&promise);
    promise.fulfill("Hi!");

    debug!("handlers registered before reject");
    let promise = Promise::new();
    watch(&promise);
    promise.reject("Boo!");

    debug!("handlers registered after fulfill");
    let promise = Promise::new();
    promise.fulfill("Hi again!");
    watch(&promise);

    debug!("handlers registered after reject");
    let promise = Promise::new();
    promise.reject("Boo again!");
    watch(&promise);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options()?;
    debug!(?options, "starting");
    run_to_completion(options, scenarios);
    Ok(())
}
