//! PostgreSQL input: rows returned by a query.

use crate::decoder::RowDecoder;
use crate::PostgresOpts;
use anyhow::{Context, Result};
use postgresql_types::pg_row_to_internal;
use std::io::Write;
use tokio_postgres::{Client, NoTls};
use tracing::error;

/// Connect to PostgreSQL and spawn the connection task.
pub async fn connect(opts: &PostgresOpts) -> Result<Client> {
    let (client, connection) = tokio_postgres::connect(&opts.connection_string, NoTls)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {e}"))?;

    // Spawn connection handler
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("PostgreSQL connection error: {e}");
        }
    });

    Ok(client)
}

/// Run `sql` and write one JSON line per returned row to `writer`.
///
/// Returns the number of rows written.
pub async fn query_rows<W: Write>(
    client: &Client,
    sql: &str,
    writer: &mut W,
    decoder: &RowDecoder,
    prefix: &str,
) -> Result<usize> {
    tracing::debug!("Running query for {}: {}", decoder.name(), sql);
    let rows = client
        .query(sql, &[])
        .await
        .with_context(|| format!("Failed to run query: {sql}"))?;

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let internal = pg_row_to_internal(row)
            .with_context(|| format!("Failed to read row {row_number}"))?;
        let output = decoder
            .decode(&internal, prefix)
            .with_context(|| format!("Failed to decode {} at row {row_number}", decoder.name()))?;
        serde_json::to_writer(&mut *writer, &output)?;
        writeln!(writer)?;
    }

    tracing::info!("Decoded {} {} rows from PostgreSQL", rows.len(), decoder.name());
    Ok(rows.len())
}
