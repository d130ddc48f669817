pub mod advisor;
pub mod catalog;
pub mod domain;
pub mod llm;
pub mod prompt;
pub mod session;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
    pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;

    /// Process-wide settings, resolved once at startup and passed down explicitly.
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub gemini_api_key: Option<String>,
        pub gemini_base_url: String,
        pub gemini_model: String,
        pub gemini_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                gemini_api_key: None,
                gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
                gemini_timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let gemini_timeout_secs = match non_empty_var("GEMINI_TIMEOUT_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .with_context(|| format!("GEMINI_TIMEOUT_SECS is not a number: {raw}"))?,
                None => DEFAULT_GEMINI_TIMEOUT_SECS,
            };

            Ok(Self {
                gemini_api_key: non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY")),
                gemini_base_url: non_empty_var("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                gemini_model: non_empty_var("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                gemini_timeout_secs,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_gemini_api_key(&self) -> anyhow::Result<&str> {
            self.gemini_api_key
                .as_deref()
                .context("GEMINI_API_KEY is required")
        }

        pub fn gemini_timeout(&self) -> std::time::Duration {
            std::time::Duration::from_secs(self.gemini_timeout_secs)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

}
