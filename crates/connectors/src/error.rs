use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid connection url: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}
