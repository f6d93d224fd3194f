//! HD Wallet Vanity Address Generator CLI
//!
//! Usage:
//!   hd_vanity -v dead                    # bc1qdead...
//!   hd_vanity -c cosmos -v xyz --words 24 # cosmos1xyz... with a 24-word mnemonic
//!   hd_vanity -v q -p "extra words" -w 4  # with a BIP39 passphrase, 4 workers

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hd_vanity::{Bip39Source, Config, CurrencyRegistry, WorkerPool};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hd_vanity=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();

    let settings = match CurrencyRegistry::new().and_then(|registry| config.validate(&registry)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    info!(
        currency = %settings.currency.currency(),
        path = %settings.currency.path(),
        target = %format!("{}{}", settings.pattern.address_prefix(), settings.pattern.vanity()),
        difficulty = %settings.pattern.difficulty_description(),
        words = %settings.words,
        workers = config.worker_count(),
        "starting search"
    );

    let pool = WorkerPool::new(config.worker_count(), settings, Arc::new(Bip39Source));

    ctrlc_handler(pool.stop_flag_clone());

    match pool.wait(config.report_interval(), config.timeout()) {
        Ok(result) => {
            println!("Address:  {}", result.address);
            println!("Mnemonic: {}", result.mnemonic);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Release);
    }) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }
}
