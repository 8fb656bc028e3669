use rand::seq::SliceRandom;

/// Client-identity headers attached to one fetch attempt.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_agent: &'static str,
    pub referer: &'static str,
}

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    "Mozilla/5.0 (X11; Linux x86_64)",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)",
    "Mozilla/5.0 (Windows NT 6.1; WOW64)",
    "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 5.1)",
];

const REFERERS: &[&str] = &[
    "http://google.com",
    "http://bing.com",
    "http://facebook.com",
    "http://twitter.com",
    "http://youtube.com",
    "http://instagram.com",
];

/// One user-agent and one referer, each drawn uniformly from the static pools.
pub fn random_identity() -> Identity {
    let mut rng = rand::thread_rng();
    Identity {
        user_agent: USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0]),
        referer: REFERERS.choose(&mut rng).copied().unwrap_or(REFERERS[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_comes_from_the_pools() {
        for _ in 0..50 {
            let id = random_identity();
            assert!(USER_AGENTS.contains(&id.user_agent));
            assert!(REFERERS.contains(&id.referer));
        }
    }
}
