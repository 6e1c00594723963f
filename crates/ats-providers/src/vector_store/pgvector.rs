//! Postgres + pgvector candidate store
//!
//! Expects the candidate table to carry these columns:
//!
//! | Column | Type |
//! |--------|------|
//! | `id` | `text` primary key |
//! | `title` | `text` |
//! | `skills` | `text[]` |
//! | `body_text` | `text` |
//! | `embedding` | `vector(D)` |
//! | `embedding_model` | `text` |
//! | `embedding_generated_at` | `timestamptz` |
//!
//! Every value, vectors included, is bound as a parameter. The blocking
//! `postgres` client runs on the blocking thread pool under a deadline; the
//! r2d2 pool caps concurrent connections.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::{Client, Config, NoTls};
use tracing::debug;

use ats_domain::error::{Error, Result};
use ats_domain::ports::CandidateVectorStore;
use ats_domain::value_objects::{CandidateMatch, KeywordEvidence, StoredVector};

use crate::constants::PGVECTOR_DEFAULT_TABLE;
use crate::utils::{from_vector_literal, to_vector_literal};

type PgPool = Pool<PostgresConnectionManager<NoTls>>;

/// Connection settings of the pgvector store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgVectorConfig {
    /// `postgres://` connection URL
    pub url: String,
    /// Candidate table, optionally schema-qualified
    pub table: String,
    /// Pool size cap
    pub max_connections: u32,
    /// Dimension of the `embedding` column
    pub dimensions: Option<usize>,
    /// Deadline per storage call
    pub timeout: Duration,
}

impl PgVectorConfig {
    /// Settings with the default table and pool size
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            table: PGVECTOR_DEFAULT_TABLE.to_string(),
            max_connections: 10,
            dimensions: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Plain or schema-qualified SQL identifier
fn is_valid_table_name(table: &str) -> bool {
    !table.is_empty()
        && table.split('.').count() <= 2
        && table.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

struct Queries {
    search_similar: String,
    keyword_evidence: String,
    upsert_vector: String,
    get_vector: String,
}

impl Queries {
    fn for_table(table: &str) -> Self {
        Self {
            search_similar: format!(
                "SELECT id, 1 - (embedding <=> $1::text::vector) AS similarity \
                 FROM {table} \
                 WHERE embedding IS NOT NULL \
                   AND 1 - (embedding <=> $1::text::vector) >= $2 \
                 ORDER BY embedding <=> $1::text::vector ASC, id ASC \
                 LIMIT $3"
            ),
            keyword_evidence: format!(
                "SELECT c.title, c.skills, ARRAY( \
                     SELECT COALESCE( \
                         (length(lower(COALESCE(c.body_text, ''))) \
                          - length(replace(lower(COALESCE(c.body_text, '')), k, ''))) \
                         / NULLIF(length(k), 0), 0)::int4 \
                     FROM unnest($2::text[]) WITH ORDINALITY AS t(k, ord) \
                     ORDER BY ord) AS occurrences \
                 FROM {table} c WHERE c.id = $1"
            ),
            upsert_vector: format!(
                "UPDATE {table} \
                 SET embedding = $2::text::vector, \
                     embedding_model = $3, \
                     embedding_generated_at = to_timestamp($4::float8) \
                 WHERE id = $1"
            ),
            get_vector: format!(
                "SELECT embedding::text, embedding_model, \
                        EXTRACT(EPOCH FROM embedding_generated_at)::float8 \
                 FROM {table} WHERE id = $1"
            ),
        }
    }
}

/// pgvector-backed candidate store
pub struct PgVectorCandidateStore {
    pool: PgPool,
    queries: Arc<Queries>,
    dimensions: Option<usize>,
    timeout: Duration,
}

impl PgVectorCandidateStore {
    /// Build the store and its connection pool
    ///
    /// Connections are opened lazily on first use.
    pub fn new(config: &PgVectorConfig) -> Result<Self> {
        if !is_valid_table_name(&config.table) {
            return Err(Error::invalid_config(format!(
                "invalid pgvector table name '{}'",
                config.table
            )));
        }

        let pg_config: Config = config.url.parse().map_err(|e| {
            Error::configuration_with_source("invalid pgvector connection URL", e)
        })?;
        let manager = PostgresConnectionManager::new(pg_config, NoTls);
        let pool = Pool::builder()
            .max_size(config.max_connections.max(1))
            .connection_timeout(config.timeout)
            .build_unchecked(manager);

        Ok(Self {
            pool,
            queries: Arc::new(Queries::for_table(&config.table)),
            dimensions: config.dimensions,
            timeout: config.timeout,
        })
    }

    /// Run a blocking query on a pooled connection under the call deadline
    async fn blocking<T, F>(&self, operation: &'static str, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Client, &Queries) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let queries = Arc::clone(&self.queries);
        let timeout = self.timeout;

        let task = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|_| {
                Error::storage_timeout(format!("{operation}: connection checkout"), timeout)
            })?;
            query(&mut conn, &queries)
        });

        tokio::time::timeout(timeout, task)
            .await
            .map_err(|_| Error::storage_timeout(operation, timeout))?
            .map_err(|e| Error::internal(format!("{operation} task failed: {e}")))?
    }
}

#[async_trait]
impl CandidateVectorStore for PgVectorCandidateStore {
    async fn search_similar(
        &self,
        query_vector: &[f32],
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<CandidateMatch>> {
        let literal = to_vector_literal(query_vector);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let matches = self
            .blocking("search_similar", move |conn, queries| {
                let rows = conn
                    .query(queries.search_similar.as_str(), &[&literal, &threshold, &limit])
                    .map_err(|e| Error::vector_store_with_source("similarity query failed", e))?;
                Ok(rows
                    .iter()
                    .map(|row| CandidateMatch {
                        entity_id: row.get(0),
                        similarity: row.get(1),
                    })
                    .collect::<Vec<_>>())
            })
            .await?;

        debug!(pool = matches.len(), threshold, "pgvector similarity pool fetched");
        Ok(matches)
    }

    async fn keyword_evidence(
        &self,
        entity_id: &str,
        keywords: &[String],
    ) -> Result<KeywordEvidence> {
        let id = entity_id.to_string();
        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let keys = keywords.to_vec();

        self.blocking("keyword_evidence", move |conn, queries| {
            let row = conn
                .query_opt(queries.keyword_evidence.as_str(), &[&id, &lowered])
                .map_err(|e| Error::vector_store_with_source("keyword evidence query failed", e))?
                .ok_or_else(|| Error::not_found(format!("candidate {id}")))?;

            let title: Option<String> = row.get(0);
            let skills: Option<Vec<String>> = row.get(1);
            let counts: Vec<i32> = row.get(2);

            Ok(KeywordEvidence {
                title: title.unwrap_or_default(),
                skills: skills.unwrap_or_default(),
                body_occurrences: keys
                    .into_iter()
                    .zip(counts)
                    .map(|(keyword, count)| (keyword, usize::try_from(count).unwrap_or(0)))
                    .collect(),
            })
        })
        .await
    }

    async fn upsert_vector(&self, vector: StoredVector) -> Result<()> {
        if let Some(expected) = self.dimensions {
            if vector.dimensions() != expected {
                return Err(Error::dimension_mismatch(&vector.model, expected, vector.dimensions()));
            }
        }

        let literal = to_vector_literal(&vector.vector);
        let generated_at = vector.generated_at.timestamp_micros() as f64 / 1_000_000.0;
        let StoredVector {
            entity_id, model, ..
        } = vector;

        self.blocking("upsert_vector", move |conn, queries| {
            let updated = conn
                .execute(
                    queries.upsert_vector.as_str(),
                    &[&entity_id, &literal, &model, &generated_at],
                )
                .map_err(|e| Error::storage_write_with_source("vector update failed", e))?;
            if updated == 0 {
                return Err(Error::not_found(format!("candidate {entity_id}")));
            }
            Ok(())
        })
        .await
    }

    async fn get_vector(&self, entity_id: &str) -> Result<Option<StoredVector>> {
        let id = entity_id.to_string();

        self.blocking("get_vector", move |conn, queries| {
            let Some(row) = conn
                .query_opt(queries.get_vector.as_str(), &[&id])
                .map_err(|e| Error::vector_store_with_source("vector read failed", e))?
            else {
                return Ok(None);
            };

            let literal: Option<String> = row.get(0);
            let Some(literal) = literal else {
                return Ok(None);
            };
            let vector = from_vector_literal(&literal).ok_or_else(|| {
                Error::vector_store(format!("malformed vector for candidate {id}"))
            })?;
            let model: Option<String> = row.get(1);
            let epoch: Option<f64> = row.get(2);
            let generated_at = epoch
                .and_then(|secs| {
                    DateTime::<Utc>::from_timestamp_micros((secs * 1_000_000.0) as i64)
                })
                .unwrap_or_default();

            Ok(Some(StoredVector {
                entity_id: id,
                vector,
                model: model.unwrap_or_default(),
                generated_at,
            }))
        })
        .await
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "pgvector"
    }
}
