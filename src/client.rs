use std::time::Duration;

use reqwest::Client;

use crate::error::Error;
use crate::proxy::ProxyDescriptor;

/// Hard cap on a single fetch attempt, connection setup included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Builds a client whose outbound connections go through `descriptor`.
///
/// The proxy is scoped to this one client instance: HTTP proxies tunnel both
/// http and https targets through `http://host:port`, SOCKS proxies dial
/// through the SOCKS endpoint. Nothing process-wide is touched, so unrelated
/// clients elsewhere in the process are unaffected.
pub fn build_client(descriptor: &ProxyDescriptor) -> Result<Client, Error> {
    let proxy = reqwest::Proxy::all(descriptor.proxy_url()).map_err(|e| Error::TransportSetup {
        proxy: descriptor.to_string(),
        source: e,
    })?;

    Client::builder()
        .proxy(proxy)
        .timeout(REQUEST_TIMEOUT)
        .pool_max_idle_per_host(0) // one-off requests, no point keeping connections around
        .build()
        .map_err(|e| Error::TransportSetup {
            proxy: descriptor.to_string(),
            source: e,
        })
}
