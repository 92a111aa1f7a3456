//! Application settings loaded via OrthoConfig.
//!
//! Every value may come from the command line, a configuration file or a
//! `STANDUP_`-prefixed environment variable. Absent values fall back to the
//! defaults below.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid site url '{value}': {source}")]
    SiteUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("site url '{value}' must be an absolute http(s) url")]
    SiteUrlNotBase { value: String },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STANDUP")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the site runs on an empty
    /// in-memory store.
    pub database_url: Option<String>,
    /// Absolute site root used for links inside feeds.
    pub site_url: Option<String>,
    /// Statuses per listing page.
    #[ortho_config(default = 20)]
    pub per_page: u32,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// The configured site root, normalised to end in `/` so relative
    /// joins stay beneath it.
    pub fn site_url(&self) -> Result<Option<Url>, SettingsError> {
        let Some(value) = self.site_url.as_deref() else {
            return Ok(None);
        };
        let mut url = Url::parse(value).map_err(|source| SettingsError::SiteUrl {
            value: value.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::SiteUrlNotBase {
                value: value.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Some(url))
    }

    /// Page size, never below one.
    pub fn per_page(&self) -> u32 {
        self.per_page.max(1)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use pagination::DEFAULT_PER_PAGE;
    use rstest::rstest;

    const DEFAULT_POOL_MAX_SIZE: u32 = 10;

    const VARS: [&str; 5] = [
        "STANDUP_BIND_ADDR",
        "STANDUP_DATABASE_URL",
        "STANDUP_SITE_URL",
        "STANDUP_PER_PAGE",
        "STANDUP_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("standup")]).expect("config should load")
    }

    fn unset_all() -> [(&'static str, Option<String>); 5] {
        VARS.map(|name| (name, None))
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(unset_all());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid default")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.site_url().expect("no site url").is_none());
        assert_eq!(settings.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STANDUP_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "STANDUP_DATABASE_URL",
                Some("postgres://localhost/standup".to_owned()),
            ),
            ("STANDUP_SITE_URL", Some("https://standup.example/team".to_owned())),
            ("STANDUP_PER_PAGE", Some("5".to_owned())),
            ("STANDUP_POOL_MAX_SIZE", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address").port(),
            9000
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/standup")
        );
        assert_eq!(
            settings
                .site_url()
                .expect("site url parses")
                .map(String::from),
            Some("https://standup.example/team/".to_owned())
        );
        assert_eq!(settings.per_page(), 5);
        assert_eq!(settings.pool_max_size(), 3);
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:team@example.com")]
    fn unusable_site_urls_are_rejected(#[case] raw: &str) {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            site_url: Some(raw.to_owned()),
            per_page: DEFAULT_PER_PAGE,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        };
        assert!(settings.site_url().is_err());
    }

    #[rstest]
    fn zero_per_page_is_clamped() {
        let settings = AppSettings {
            bind_addr: Some("nonsense".to_owned()),
            database_url: None,
            site_url: None,
            per_page: 0,
            pool_max_size: 0,
        };
        assert_eq!(settings.per_page(), 1);
        assert_eq!(settings.pool_max_size(), 1);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
