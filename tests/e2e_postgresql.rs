//! End-to-end test for querying PostgreSQL into entity DTOs.
//!
//! Needs a reachable server in `ORDERING_PG_URI`; skipped otherwise.

use ordering_rows::{postgresql, PostgresOpts, RowDecoder};
use ordering_entities::EntityKind;
use serde_json::Value;

fn pg_opts() -> Option<PostgresOpts> {
    std::env::var("ORDERING_PG_URI")
        .ok()
        .map(|connection_string| PostgresOpts { connection_string })
}

#[tokio::test]
async fn test_query_payments() -> anyhow::Result<()> {
    let Some(opts) = pg_opts() else {
        eprintln!("ORDERING_PG_URI not set, skipping");
        return Ok(());
    };
    let client = postgresql::connect(&opts).await?;

    client
        .batch_execute(
            "CREATE TEMP TABLE payment (
                id BIGINT PRIMARY KEY,
                order_id TEXT,
                amount NUMERIC(10, 2),
                method VARCHAR(16),
                paid BOOLEAN,
                paid_at TIMESTAMPTZ
            );
            INSERT INTO payment VALUES
                (1, 'ord-1', 12.50, 'CARD', true, '2024-05-01 10:00:00+00'),
                (2, 'ord-2', NULL, 'CASH', false, NULL);",
        )
        .await?;

    let sql = "SELECT id AS pay_id, order_id AS pay_order_id, amount AS pay_amount, \
               method AS pay_method, paid AS pay_paid, paid_at AS pay_paid_at \
               FROM payment ORDER BY id";
    let mut out = Vec::new();
    let count = postgresql::query_rows(
        &client,
        sql,
        &mut out,
        &RowDecoder::Entity(EntityKind::Payment),
        "pay",
    )
    .await?;
    assert_eq!(count, 2);

    let rows: Vec<Value> = String::from_utf8(out)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(rows[0]["amount"], "12.50");
    assert_eq!(rows[0]["paidAt"], "2024-05-01T10:00:00Z");
    assert_eq!(rows[1]["paid"], false);
    assert!(rows[1]["amount"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_query_unsupported_column_type() -> anyhow::Result<()> {
    let Some(opts) = pg_opts() else {
        return Ok(());
    };
    let client = postgresql::connect(&opts).await?;

    let mut out = Vec::new();
    let err = postgresql::query_rows(
        &client,
        "SELECT 1::BIGINT AS id, '{1,2}'::INT4[] AS name, NULL::TEXT AS description, true AS active",
        &mut out,
        &RowDecoder::Entity(EntityKind::Categories),
        "",
    )
    .await
    .unwrap_err();
    assert!(format!("{err:#}").starts_with("Failed to read row 1:"));
    assert!(out.is_empty());
    Ok(())
}
