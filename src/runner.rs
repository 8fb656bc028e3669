use std::time::Duration;

use log::{info, warn};

use crate::client::build_client;
use crate::configuration::RunConfig;
use crate::error::{Error, Result};
use crate::fetch::{fetch_url, FetchOutcome, SuccessCheck};
use crate::proxy::ProxyDescriptor;
use crate::recorder::{Recorder, SuccessRecord};

/// Attempt accounting for one whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// GET requests issued, failures included.
    pub attempts: u64,
    /// Attempts whose body passed the success check.
    pub successes: u64,
    /// Proxies skipped for bad format or failed client setup.
    pub skipped_proxies: u64,
}

/// Drives the whole run: `loops` passes over the proxy list in file order,
/// every proxy tried against every URL, with `wait_secs` of sleep after each
/// proxy. Fully sequential; a failure anywhere only skips that proxy or URL.
pub async fn run(config: &RunConfig, recorder: &Recorder, check: SuccessCheck) -> Result<RunStats> {
    let mut stats = RunStats::default();
    // Rejects NaN, infinities and negatives; the CLI checks too, but the
    // engine must not panic on a config it was handed directly.
    let wait = Duration::try_from_secs_f64(config.wait_secs).map_err(|_| {
        Error::InvalidNumber(format!("wait seconds: {}", config.wait_secs))
    })?;

    for pass in 1..=config.loops {
        info!("========== starting loop {} of {} ==========", pass, config.loops);

        for (index, raw_proxy) in config.proxies.iter().enumerate() {
            info!(
                "[loop {}] visiting with proxy #{}: {}",
                pass,
                index + 1,
                raw_proxy
            );
            visit_all(raw_proxy, config, recorder, check, &mut stats).await?;

            info!("waiting {}s before the next proxy", config.wait_secs);
            tokio::time::sleep(wait).await;
        }
    }

    Ok(stats)
}

/// One proxy against the full URL list. Fetch failures are contained here;
/// only a failure to persist a success record propagates.
async fn visit_all(
    raw_proxy: &str,
    config: &RunConfig,
    recorder: &Recorder,
    check: SuccessCheck,
    stats: &mut RunStats,
) -> Result<()> {
    let descriptor: ProxyDescriptor = match raw_proxy.parse() {
        Ok(d) => d,
        Err(e) => {
            warn!("{e}");
            stats.skipped_proxies += 1;
            return Ok(());
        }
    };

    let client = match build_client(&descriptor) {
        Ok(c) => c,
        Err(e) => {
            warn!("{e}");
            stats.skipped_proxies += 1;
            return Ok(());
        }
    };

    for url in &config.urls {
        info!("visiting {} using proxy {}", url, raw_proxy);
        stats.attempts += 1;

        match fetch_url(&client, url, check).await {
            FetchOutcome::Success { body_matched: true } => {
                info!("success: {} -> {}", raw_proxy, url);
                stats.successes += 1;
                recorder.append(&SuccessRecord::new(raw_proxy, url))?;
            }
            FetchOutcome::Success { body_matched: false } => {
                info!("no match found for {}", url);
            }
            FetchOutcome::TransportError(e) => {
                warn!("error visiting {} via {}: {}", url, raw_proxy, e);
            }
            FetchOutcome::HttpError(e) => {
                warn!("error visiting {} via {}: {}", url, raw_proxy, e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::LogFormat;
    use tempfile::tempdir;

    fn config(proxies: Vec<&str>, urls: Vec<&str>, loops: u32) -> RunConfig {
        RunConfig {
            proxies: proxies.into_iter().map(String::from).collect(),
            urls: urls.into_iter().map(String::from).collect(),
            loops,
            wait_secs: 0.0,
            log_format: LogFormat::Txt,
        }
    }

    #[tokio::test]
    async fn non_finite_wait_is_a_configuration_error() {
        let dir = tempdir().unwrap();
        let recorder = Recorder::with_path(LogFormat::Txt, dir.path().join("log.txt"));

        for wait in [f64::NAN, f64::INFINITY, -1.0] {
            let mut cfg = config(vec!["127.0.0.1:8080"], vec!["http://example.com"], 1);
            cfg.wait_secs = wait;
            let err = run(&cfg, &recorder, crate::fetch::url_in_body)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidNumber(_)), "wait {wait}: {err:?}");
        }
        assert!(!recorder.path().exists());
    }

    #[tokio::test]
    async fn malformed_proxies_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let recorder = Recorder::with_path(LogFormat::Txt, dir.path().join("log.txt"));
        let cfg = config(vec!["not-a-proxy", "also:bad:proxy"], vec!["http://example.com"], 1);

        let stats = run(&cfg, &recorder, crate::fetch::url_in_body).await.unwrap();
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.skipped_proxies, 2);
        assert!(!recorder.path().exists());
    }

    #[tokio::test]
    async fn failed_attempts_are_still_counted() {
        // Grab a port nobody is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let dir = tempdir().unwrap();
        let recorder = Recorder::with_path(LogFormat::Txt, dir.path().join("log.txt"));
        let proxy = format!("127.0.0.1:{port}");
        let cfg = config(
            vec![&proxy],
            vec!["http://example.com/a", "http://example.com/b"],
            2,
        );

        let stats = run(&cfg, &recorder, crate::fetch::url_in_body).await.unwrap();
        // loops * proxies * urls, failures skipped rather than retried
        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.successes, 0);
        assert!(!recorder.path().exists());
    }
}
