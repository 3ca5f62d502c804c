use driftnet_dispatch::DispatchTarget;

/// Where configuration values come from.
///
/// The server reads every key through this trait so the value source
/// (process environment, file, remote parameter store) stays swappable; the
/// default is the process environment after `dotenvy` has run.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from the process environment.
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Catalog client settings.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub collection: String,
    pub token: Option<String>,
}

/// Server configuration constructed once at process start.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum area an AOI may cover, in km² (default: `100`).
    pub max_aoi_area_km2: f64,
    /// Hard cap on rows returned by listing endpoints (default: `1000`).
    pub max_row_limit: i64,
    /// Maximum job time range in days before splitting is required
    /// (default: `31`).
    pub max_job_days: i64,
    /// Workflow dispatcher target.
    pub dispatch: DispatchTarget,
    /// Imagery catalog settings.
    pub catalog: CatalogSettings,
}

impl ServerConfig {
    /// Load configuration from a [`ConfigSource`] with defaults.
    ///
    /// | Key                      | Default                       |
    /// |--------------------------|-------------------------------|
    /// | `HOST`                   | `0.0.0.0`                     |
    /// | `PORT`                   | `3000`                        |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                          |
    /// | `MAX_AOI_AREA_KM2`       | `100`                         |
    /// | `MAX_ROW_LIMIT`          | `1000`                        |
    /// | `MAX_JOB_TIME_RANGE_DAYS`| `31`                          |
    /// | `DISPATCH_API_BASE`      | `https://api.github.com`      |
    /// | `DISPATCH_OWNER`         | `driftnet`                    |
    /// | `DISPATCH_REPO`          | `prediction-service`          |
    /// | `DISPATCH_WORKFLOW_ID`   | `predict.yml`                 |
    /// | `DISPATCH_REF`           | `main`                        |
    /// | `DISPATCH_TOKEN`         | unset                         |
    /// | `CATALOG_BASE_URL`       | Sentinel Hub catalog          |
    /// | `CATALOG_COLLECTION`     | `sentinel-2-l2a`              |
    /// | `CATALOG_TOKEN`          | unset                         |
    pub fn load(source: &dyn ConfigSource) -> Self {
        let get = |key: &str, default: &str| source.get(key).unwrap_or_else(|| default.into());

        let host = get("HOST", "0.0.0.0");
        let port: u16 = get("PORT", "3000").parse().expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = get("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = get("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_aoi_area_km2: f64 = get("MAX_AOI_AREA_KM2", "100")
            .parse()
            .expect("MAX_AOI_AREA_KM2 must be a number");

        let max_row_limit: i64 = get("MAX_ROW_LIMIT", "1000")
            .parse()
            .expect("MAX_ROW_LIMIT must be an integer");

        let max_job_days: i64 = get("MAX_JOB_TIME_RANGE_DAYS", "31")
            .parse()
            .expect("MAX_JOB_TIME_RANGE_DAYS must be an integer");

        let dispatch = DispatchTarget {
            api_base: get("DISPATCH_API_BASE", "https://api.github.com"),
            owner: get("DISPATCH_OWNER", "driftnet"),
            repo: get("DISPATCH_REPO", "prediction-service"),
            workflow_id: get("DISPATCH_WORKFLOW_ID", "predict.yml"),
            ref_name: get("DISPATCH_REF", "main"),
            token: source.get("DISPATCH_TOKEN"),
        };

        let catalog = CatalogSettings {
            base_url: get(
                "CATALOG_BASE_URL",
                "https://services.sentinel-hub.com/api/v1/catalog/1.0.0",
            ),
            collection: get("CATALOG_COLLECTION", "sentinel-2-l2a"),
            token: source.get("CATALOG_TOKEN"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_aoi_area_km2,
            max_row_limit,
            max_job_days,
            dispatch,
            catalog,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::load(&EnvSource)
    }
}
