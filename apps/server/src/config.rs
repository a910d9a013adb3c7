/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Directory holding the SQLite database file.
    pub db_dir: String,
    /// Directory holding the cached summary artifact.
    pub cache_dir: String,
    /// Country catalog endpoint.
    pub country_url: String,
    /// Exchange-rate endpoint.
    pub rate_url: String,
    /// Per-request timeout for both feeds, in seconds.
    pub feed_timeout_secs: u64,
}

const DEFAULT_COUNTRY_URL: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";
const DEFAULT_RATE_URL: &str = "https://open.er-api.com/v6/latest/USD";

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            listen_addr: env_or("GP_LISTEN_ADDR", "0.0.0.0:8080"),
            db_dir: env_or("GP_DB_DIR", "./data"),
            cache_dir: env_or("GP_CACHE_DIR", "./cache"),
            country_url: env_or("GP_COUNTRY_URL", DEFAULT_COUNTRY_URL),
            rate_url: env_or("GP_RATE_URL", DEFAULT_RATE_URL),
            feed_timeout_secs: std::env::var("GP_FEED_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
