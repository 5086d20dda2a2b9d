//! ordering-rows library
//!
//! Reads rows from JSONL files or PostgreSQL and maps them into the entities
//! of the restaurant-ordering service.
//!
//! # Crates
//!
//! - `column_core` - column values, the conversion routine, rows and schemas
//! - `json_types` - JSON objects as rows, typed values as JSON
//! - `postgresql_types` - `tokio-postgres` rows as column-core rows
//! - `ordering_entities` - entities, DTOs, mappers and the CRUD service
//!
//! # CLI Usage
//!
//! ```bash
//! # Decode a JSONL dump of joined rows into Products DTOs
//! ordering-rows decode --entity products --prefix p products.jsonl
//!
//! # Decode rows of an entity defined in a YAML schema
//! ordering-rows decode --entity discount --schema entities.yaml discounts.jsonl
//!
//! # Show the columns an entity reads
//! ordering-rows describe --entity new_order --prefix o
//!
//! # Query PostgreSQL and print Payment DTOs
//! ordering-rows query --connection-string postgresql://... --entity payment \
//!   --sql "SELECT * FROM payment"
//! ```

use clap::Parser;
use std::path::PathBuf;

pub mod decoder;
pub mod describe;
pub mod jsonl;
pub mod postgresql;

pub use decoder::RowDecoder;
pub use describe::{describe, EntityDescription};
pub use jsonl::{decode_jsonl, decode_jsonl_file};

#[derive(Parser, Clone, Debug)]
pub struct DecodeOpts {
    /// Entity to decode rows into, by name or table (case-insensitive)
    #[arg(long, env = "ORDERING_ENTITY")]
    pub entity: String,

    /// Column prefix; columns are read as `{prefix}_{field}`
    #[arg(long, default_value = "", env = "ORDERING_PREFIX")]
    pub prefix: String,

    /// YAML schema defining the entity instead of the built-in catalogue
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

impl DecodeOpts {
    /// Resolve the decoder these options select.
    pub fn decoder(&self) -> anyhow::Result<RowDecoder> {
        RowDecoder::resolve(&self.entity, self.schema.as_deref())
    }
}

#[derive(Parser, Clone, Debug)]
pub struct PostgresOpts {
    /// PostgreSQL connection string
    #[arg(long, env = "ORDERING_PG_URI")]
    pub connection_string: String,
}
