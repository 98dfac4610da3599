use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_anon_key: String,
    pub backend_access_token: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            backend_url: required("BACKEND_URL")?
                .trim_end_matches('/')
                .to_string(),
            backend_anon_key: required("BACKEND_ANON_KEY")?,
            backend_access_token: env::var("BACKEND_ACCESS_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "15".into())
                .parse()?,
        })
    }

    /// Token sent as the bearer credential: the signed-in user's token when
    /// present, otherwise the anonymous key.
    pub fn bearer_token(&self) -> &str {
        self.backend_access_token
            .as_deref()
            .unwrap_or(&self.backend_anon_key)
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing required env var: {}", key))
}
