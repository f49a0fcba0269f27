use nurture_scheduler_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared secret expected in the `Authorization` header of the
    /// daily trigger and the admin routes
    pub api_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Maximum number of due trackers processed by a single batch run.
    /// Together with `send_delay_millis` this bounds the wall-clock time of
    /// a run, which must stay within the external trigger's budget.
    pub max_trackers_per_run: i64,
    /// Pause between two consecutive send attempts within a batch run, a
    /// cooperative rate limit towards the outbound mail provider
    pub send_delay_millis: u64,
    /// Outbound SMTP settings. When absent every dispatch fails with a
    /// configuration error before any network attempt.
    pub smtp: Option<SmtpSettings>,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub relay: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

fn env_number<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let api_secret = match std::env::var("API_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find API_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(30);
                info!(
                    "Secret code for the trigger and admin routes was generated and set to: {}",
                    code
                );
                code
            }
        };

        let smtp = match (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(SmtpSettings {
                relay: std::env::var("SMTP_RELAY").unwrap_or_else(|_| "smtp.gmail.com".into()),
                port: env_number("SMTP_PORT", 587),
                from: std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone()),
                username,
                password,
            }),
            _ => {
                info!("SMTP_USERNAME and SMTP_PASSWORD env vars were not provided. Outbound email is disabled.");
                None
            }
        };

        Self {
            api_secret,
            port: env_number("PORT", 5100),
            max_trackers_per_run: env_number("MAX_TRACKERS_PER_RUN", 30),
            send_delay_millis: env_number("SEND_DELAY_MILLIS", 2000),
            smtp,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
