use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | API_URL | http://localhost:443 | Backend base URL |
/// | REQUEST_TIMEOUT_SECS | 30 | HTTP timeout |
/// | WORK_DIR | ./.tienda | Pending-payment record and logs |
/// | SHIPPING_COST | 9.99 | Home delivery cost |
/// | TAX_RATE | 0.08 | Tax rate applied to the subtotal |
/// | CURRENCY_ID | PEN | Currency of payment provider items |
/// | STEP_DELAY_MS | 500 | Shipping → Payment loading delay |
/// | REDIRECT_DELAY_MS | 500 | Delay before leaving for the payment page |
/// | RETURN_CLEANUP_DELAY_MS | 500 | Delay before stripping the return query |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
///
/// # Example
///
/// ```ignore
/// API_URL=https://api.tienda.pe SHIPPING_COST=12 cargo run -- methods
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub work_dir: PathBuf,
    pub shipping_cost: Decimal,
    pub tax_rate: Decimal,
    pub currency_id: String,
    pub step_delay: Duration,
    pub redirect_delay: Duration,
    pub return_cleanup_delay: Duration,
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_millis(key: &str, default: u64) -> Duration {
    Duration::from_millis(env_parse(key, default))
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:443".into()),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./.tienda")),
            shipping_cost: env_parse("SHIPPING_COST", Decimal::new(999, 2)),
            tax_rate: env_parse("TAX_RATE", Decimal::new(8, 2)),
            currency_id: std::env::var("CURRENCY_ID").unwrap_or_else(|_| "PEN".into()),
            step_delay: env_millis("STEP_DELAY_MS", 500),
            redirect_delay: env_millis("REDIRECT_DELAY_MS", 500),
            return_cleanup_delay: env_millis("RETURN_CLEANUP_DELAY_MS", 500),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }

    /// Defaults with every delay set to zero
    ///
    /// Used by tests and scripted runs.
    pub fn without_delays() -> Self {
        Self {
            step_delay: Duration::ZERO,
            redirect_delay: Duration::ZERO,
            return_cleanup_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Location of the pending external payment record
    pub fn payment_session_path(&self) -> PathBuf {
        self.work_dir.join("pending_payment.json")
    }

    pub fn client_config(&self) -> tienda_client::ClientConfig {
        tienda_client::ClientConfig::new(&self.api_url).with_timeout(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:443".into(),
            request_timeout_secs: 30,
            work_dir: PathBuf::from("./.tienda"),
            shipping_cost: Decimal::new(999, 2),
            tax_rate: Decimal::new(8, 2),
            currency_id: "PEN".into(),
            step_delay: Duration::from_millis(500),
            redirect_delay: Duration::from_millis(500),
            return_cleanup_delay: Duration::from_millis(500),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}
