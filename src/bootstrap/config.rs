use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub database: DatabaseConfig,
    pub request_timeout_secs: u64,
    pub shutdown_grace_secs: u64,
    pub upload_max_bytes: usize,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub is_production: bool,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    /// Base64-encoded PEM bundle of the CA that signed the server certificate.
    pub ssl_ca_base64: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

// Keep the password out of `info!(?cfg, ...)`.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("ssl_ca", &self.ssl_ca_base64.is_some())
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct StorageConfig {
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_access_key: Option<String>,
    pub s3_secret_key: Option<String>,
    pub s3_use_path_style: bool,
    pub public_base_url: Option<String>,
    pub container_prefix: String,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("s3_region", &self.s3_region)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("static_credentials", &self.s3_access_key.is_some())
            .field("s3_use_path_style", &self.s3_use_path_style)
            .field("public_base_url", &self.public_base_url)
            .field("container_prefix", &self.container_prefix)
            .finish()
    }
}

#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub from: Option<String>,
    pub notify_to: Option<String>,
}

impl MailConfig {
    /// SMTP delivery needs both halves of the credential.
    pub fn is_enabled(&self) -> bool {
        self.smtp_user.is_some() && self.smtp_password.is_some()
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_user", &self.smtp_user)
            .field("from", &self.from)
            .field("notify_to", &self.notify_to)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_port = var("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000);
        let frontend_url = var("FRONTEND_URL");
        let is_production = matches!(
            var("RUST_ENV").as_deref(),
            Some("production") | Some("prod")
        );

        let db_host = var("DB_HOST");
        let db_user = var("DB_USER");
        let db_database = var("DB_DATABASE");
        if is_production {
            if db_host.is_none() || db_user.is_none() || db_database.is_none() {
                anyhow::bail!("DB_HOST, DB_USER and DB_DATABASE must be set in production");
            }
        }
        let database = DatabaseConfig {
            host: db_host.unwrap_or_else(|| "localhost".into()),
            port: var("DB_PORT").and_then(|s| s.parse().ok()).unwrap_or(3306),
            user: db_user.unwrap_or_else(|| "root".into()),
            password: var("DB_PASSWORD"),
            database: db_database.unwrap_or_else(|| "obras".into()),
            ssl_ca_base64: var("DB_SSL_CA_BASE64"),
            max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            connect_timeout_secs: var("DB_CONNECT_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        };

        let request_timeout_secs = var("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let shutdown_grace_secs = var("SHUTDOWN_GRACE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let upload_max_bytes = var("UPLOAD_MAX_BYTES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(25 * 1024 * 1024);

        let public_base_url = var("STORAGE_PUBLIC_BASE_URL").and_then(|v| {
            if v.starts_with("http://") || v.starts_with("https://") {
                Some(v.trim_end_matches('/').to_string())
            } else {
                None
            }
        });
        let storage = StorageConfig {
            s3_region: var("S3_REGION"),
            s3_endpoint: var("S3_ENDPOINT").map(|v| v.trim_end_matches('/').to_string()),
            s3_access_key: var("S3_ACCESS_KEY"),
            s3_secret_key: var("S3_SECRET_KEY"),
            s3_use_path_style: var("S3_USE_PATH_STYLE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            public_base_url,
            container_prefix: var("STORAGE_CONTAINER_PREFIX").unwrap_or_else(|| "obra".into()),
        };

        let mail = MailConfig {
            smtp_host: var("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".into()),
            smtp_user: var("SMTP_USER"),
            smtp_password: var("PASSWORD_MAIL_SERVICE"),
            from: var("MAIL_FROM"),
            notify_to: var("MAIL_NOTIFY_TO"),
        };

        Ok(Self {
            api_port,
            frontend_url,
            database,
            request_timeout_secs,
            shutdown_grace_secs,
            upload_max_bytes,
            storage,
            mail,
            is_production,
        })
    }
}
