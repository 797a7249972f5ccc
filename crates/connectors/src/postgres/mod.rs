//! `tokio-postgres` implementation of the collection store.

use crate::{error::StoreError, postgres::params::PgParamStore, store::CollectionStore};
use async_trait::async_trait;
use model::{collection::CollectionRecord, search::SearchPage};
use native_tls::TlsConnector;
use planner::plan::SearchPlan;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, Config, NoTls, Row, config::SslMode};
use tracing::{debug, error, warn};

pub mod params;

const GET_COLLECTION_SQL: &str = "SELECT id, title, description, license, keywords, providers, \
     temporal_start, temporal_end, created, updated FROM collections WHERE id = $1";

pub struct PgCatalog {
    client: Client,
}

impl PgCatalog {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let config = url
            .parse::<Config>()
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        let client = match config.get_ssl_mode() {
            SslMode::Disable => connect_without_tls(config).await?,
            SslMode::Prefer => match connect_with_tls(config.clone()).await {
                Ok(client) => client,
                Err(error) => {
                    warn!(%error, "Postgres TLS handshake failed, retrying without TLS");
                    connect_without_tls(config).await?
                }
            },
            _ => connect_with_tls(config).await?,
        };

        Ok(PgCatalog { client })
    }
}

async fn connect_with_tls(config: Config) -> Result<Client, StoreError> {
    let connector = TlsConnector::builder().build()?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

async fn connect_without_tls(config: Config) -> Result<Client, StoreError> {
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

fn row_to_record(row: &Row) -> Result<CollectionRecord, tokio_postgres::Error> {
    Ok(CollectionRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        license: row.try_get("license")?,
        keywords: row
            .try_get::<_, Option<Vec<String>>>("keywords")?
            .unwrap_or_default(),
        providers: row.try_get("providers")?,
        temporal_start: row.try_get("temporal_start")?,
        temporal_end: row.try_get("temporal_end")?,
        created: row.try_get("created")?,
        updated: row.try_get("updated")?,
    })
}

#[async_trait]
impl CollectionStore for PgCatalog {
    /// Runs the count query and the page query from one plan; both bind the
    /// identical parameter list, so the page and `number_matched` agree.
    async fn search(&self, plan: &SearchPlan) -> Result<SearchPage, StoreError> {
        let bindings = PgParamStore::from_values(plan.params());
        let refs = bindings.as_refs();

        let count_row = self.client.query_one(&plan.count_sql(), &refs).await?;
        let number_matched: i64 = count_row.get(0);

        let rows = self.client.query(&plan.page_sql(), &refs).await?;
        let collections = rows
            .iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            matched = number_matched,
            returned = collections.len(),
            "executed collection search"
        );

        Ok(SearchPage {
            number_matched,
            number_returned: collections.len(),
            collections,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<CollectionRecord>, StoreError> {
        let row = self.client.query_opt(GET_COLLECTION_SQL, &[&id]).await?;
        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }
}
