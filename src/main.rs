use std::io::{self, Write};

use clap::Parser;
use log::{info, LevelFilter};

use trafficbot::configuration::{load_lines, RunConfig};
use trafficbot::error::{Error, Result};
use trafficbot::fetch::url_in_body;
use trafficbot::recorder::{LogFormat, Recorder};

#[derive(Debug, Parser)]
#[command(name = "trafficbot", version, about = "Web traffic bot with SOCKS & HTTP/HTTPS proxy support")]
struct Args {
    /// Path to the proxy list file (one [scheme://]host:port per line)
    #[arg(long)]
    proxylist: Option<String>,

    /// Path to the file with URLs to visit (one per line)
    #[arg(long)]
    urls: Option<String>,

    /// How many times to loop through the full proxy list
    #[arg(long)]
    loops: Option<u32>,

    /// Seconds to wait between each proxy
    #[arg(long)]
    wait: Option<f64>,

    /// Save success logs as txt or json
    #[arg(long, value_name = "txt|json")]
    logformat: Option<String>,
}

fn prompt(label: &str) -> Result<String> {
    print!("--> {label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Flags win; anything missing falls back to an interactive prompt.
fn resolve_config(args: Args) -> Result<RunConfig> {
    let url_path = match args.urls {
        Some(p) => p,
        None => prompt("Path to file with URLs to visit")?,
    };
    let proxy_path = match args.proxylist {
        Some(p) => p,
        None => prompt("Path to your proxylist file")?,
    };

    let urls = load_lines(&url_path)?;
    let proxies = load_lines(&proxy_path)?;

    let loops = match args.loops {
        Some(n) => n,
        None => {
            let raw = prompt("How many times to loop through the full proxy list?")?;
            raw.parse().map_err(|_| Error::InvalidNumber(raw))?
        }
    };
    let wait_secs = match args.wait {
        Some(w) => w,
        None => {
            let raw = prompt("How many seconds to wait between each proxy request?")?;
            raw.parse().map_err(|_| Error::InvalidNumber(raw))?
        }
    };
    if loops == 0 {
        return Err(Error::InvalidNumber("loop count must be positive".to_string()));
    }
    if !wait_secs.is_finite() || wait_secs < 0.0 {
        return Err(Error::InvalidNumber(format!(
            "wait seconds must be a non-negative number, got {wait_secs}"
        )));
    }

    let log_format: LogFormat = match args.logformat {
        Some(f) => f.parse()?,
        None => prompt("Save success logs as TXT or JSON? (txt/json)")?.parse()?,
    };

    Ok(RunConfig {
        proxies,
        urls,
        loops,
        wait_secs,
        log_format,
    })
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(args)?;

    info!(
        "loaded {} proxies and {} urls, {} loop(s), logging to {}",
        config.proxies.len(),
        config.urls.len(),
        config.loops,
        config.log_format.default_path()
    );

    let recorder = Recorder::new(config.log_format);
    let stats = trafficbot::run(&config, &recorder, url_in_body).await?;

    println!(
        "[*] Done: {} attempts, {} successes, {} proxies skipped",
        stats.attempts, stats.successes, stats.skipped_proxies
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("trafficbot", LevelFilter::Info)
        .init();

    println!("######################################");
    println!("#  trafficbot - proxy traffic tool   #");
    println!("######################################");

    if let Err(e) = run().await {
        eprintln!("[-] {e}");
        std::process::exit(1);
    }
}
