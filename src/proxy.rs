use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    Http,
    Socks4,
    Socks5,
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyKind::Http => write!(f, "HTTP"),
            ProxyKind::Socks4 => write!(f, "SOCKS4"),
            ProxyKind::Socks5 => write!(f, "SOCKS5"),
        }
    }
}

/// A proxy endpoint parsed out of one line of the proxy list.
///
/// Accepted forms are `socks5://host:port`, `socks4://host:port`,
/// `http://host:port`, `https://host:port` and bare `host:port`, which
/// defaults to HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub kind: ProxyKind,
    pub host: String,
    pub port: u16,
}

impl ProxyDescriptor {
    /// The proxy URL reqwest understands for this transport kind.
    pub fn proxy_url(&self) -> String {
        let scheme = match self.kind {
            ProxyKind::Http => "http",
            ProxyKind::Socks4 => "socks4",
            ProxyKind::Socks5 => "socks5",
        };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

impl fmt::Display for ProxyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.kind, self.host, self.port)
    }
}

impl FromStr for ProxyDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        let (kind, rest) = if let Some(rest) = raw.strip_prefix("socks5://") {
            (ProxyKind::Socks5, rest)
        } else if let Some(rest) = raw.strip_prefix("socks4://") {
            (ProxyKind::Socks4, rest)
        } else if let Some(rest) = raw.strip_prefix("http://") {
            (ProxyKind::Http, rest)
        } else if let Some(rest) = raw.strip_prefix("https://") {
            (ProxyKind::Http, rest)
        } else {
            (ProxyKind::Http, raw)
        };

        // Exactly host:port, nothing more. Extra colons are rejected rather
        // than guessed at.
        let mut parts = rest.split(':');
        let host = parts.next().unwrap_or("");
        let port = parts.next().unwrap_or("");
        if host.is_empty() || port.is_empty() || parts.next().is_some() {
            return Err(Error::InvalidProxyFormat(raw.to_string()));
        }

        let port: u16 = port
            .parse()
            .map_err(|_| Error::InvalidProxyFormat(raw.to_string()))?;
        if port == 0 {
            return Err(Error::InvalidProxyFormat(raw.to_string()));
        }

        Ok(ProxyDescriptor {
            kind,
            host: host.to_string(),
            port,
        })
    }
}
