use anyhow::{Context, Result};
use platform_db::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub default_page_size: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:5173".into()],
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let default_page_size = match std::env::var("DEFAULT_PAGE_SIZE") {
            Ok(raw) => parse_page_size(&raw)
                .with_context(|| format!("invalid DEFAULT_PAGE_SIZE {raw:?}"))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            cors_allowed_origins,
            default_page_size,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_page_size(raw: &str) -> Result<u64> {
    let size: u64 = raw.trim().parse()?;
    anyhow::ensure!(
        (1..=MAX_PAGE_SIZE).contains(&size),
        "must be between 1 and {MAX_PAGE_SIZE}"
    );
    Ok(size)
}
