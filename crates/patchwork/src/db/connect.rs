use patchwork_core::{async_trait, Connection, Driver, Error, Result};

use std::borrow::Cow;
use url::Url;

/// Picks a built-in driver from a connection URL's scheme.
#[derive(Debug)]
pub struct Connect {
    url: Url,
    driver: Box<dyn Driver>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url}"))
        })?;

        let driver = match parsed.scheme() {
            "sqlite" => connect_sqlite(url)?,
            scheme => {
                return Err(Error::invalid_connection_url(format!(
                    "unsupported database; scheme={scheme}; url={url}"
                )))
            }
        };

        Ok(Self {
            url: parsed,
            driver,
        })
    }
}

#[async_trait]
impl Driver for Connect {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url.as_str())
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }

    fn max_connections(&self) -> Option<usize> {
        self.driver.max_connections()
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(patchwork_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::invalid_connection_url(format!(
        "`sqlite` feature not enabled; url={url}"
    )))
}
