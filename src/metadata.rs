use crate::{Error, error::Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const VERSION_SQL: &str = "SELECT version()";
pub const SIZE_SQL: &str = "SELECT pg_database_size(current_database())";

/// Read-only scalar queries against a ready target
#[async_trait]
pub trait MetadataSource: Send {
    /// Server implementation and version string
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    async fn version(&mut self) -> anyhow::Result<String>;

    /// Size of the current database in bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    async fn size_bytes(&mut self) -> anyhow::Result<i64>;
}

/// Version and size of one database, queried fresh per run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetadataReport {
    pub version: String,
    pub size_bytes: i64,
}

impl MetadataReport {
    /// Query version then size; nothing is returned unless both succeed
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] tagged with the query that failed
    pub async fn collect<M>(source: &mut M, target: &str) -> Result<Self, Error>
    where
        M: MetadataSource + ?Sized,
    {
        let version = query_version(source, target).await?;
        let size_bytes = query_size(source, target).await?;

        Ok(Self {
            version,
            size_bytes,
        })
    }
}

/// # Errors
///
/// Returns [`Error::Query`] tagged [`Query::Version`]
pub async fn query_version<M>(source: &mut M, target: &str) -> Result<String, Error>
where
    M: MetadataSource + ?Sized,
{
    source.version().await.map_err(|err| Error::Query {
        target: target.to_string(),
        query: Query::Version,
        source: err.into(),
    })
}

/// # Errors
///
/// Returns [`Error::Query`] tagged [`Query::Size`]
pub async fn query_size<M>(source: &mut M, target: &str) -> Result<i64, Error>
where
    M: MetadataSource + ?Sized,
{
    source.size_bytes().await.map_err(|err| Error::Query {
        target: target.to_string(),
        query: Query::Size,
        source: err.into(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use anyhow::anyhow;

    struct Fixed {
        version: Option<&'static str>,
        size: Option<i64>,
        queries: Vec<&'static str>,
    }

    #[async_trait]
    impl MetadataSource for Fixed {
        async fn version(&mut self) -> anyhow::Result<String> {
            self.queries.push("version");
            self.version
                .map(str::to_string)
                .ok_or_else(|| anyhow!("relation does not exist"))
        }

        async fn size_bytes(&mut self) -> anyhow::Result<i64> {
            self.queries.push("size");
            self.size.ok_or_else(|| anyhow!("permission denied"))
        }
    }

    #[tokio::test]
    async fn test_collect_returns_values_unmodified() {
        let mut db = Fixed {
            version: Some("PostgreSQL 15.2"),
            size: Some(83_886_080),
            queries: Vec::new(),
        };

        let report = MetadataReport::collect(&mut db, "source").await.unwrap();
        assert_eq!(report.version, "PostgreSQL 15.2");
        assert_eq!(report.size_bytes, 83_886_080);
        assert_eq!(db.queries, vec!["version", "size"]);
    }

    #[tokio::test]
    async fn test_collect_size_failure_is_tagged() {
        let mut db = Fixed {
            version: Some("PostgreSQL 15.2"),
            size: None,
            queries: Vec::new(),
        };

        let err = MetadataReport::collect(&mut db, "source")
            .await
            .unwrap_err();
        match err {
            Error::Query { target, query, .. } => {
                assert_eq!(target, "source");
                assert_eq!(query, Query::Size);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_collect_version_failure_skips_size() {
        let mut db = Fixed {
            version: None,
            size: Some(1),
            queries: Vec::new(),
        };

        let err = MetadataReport::collect(&mut db, "destination")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Query {
                query: Query::Version,
                ..
            }
        ));
        assert_eq!(db.queries, vec!["version"]);
        assert_eq!(err.to_string(), "error querying destination database version");
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("relation does not exist"));
    }

    #[test]
    fn test_report_serialize() {
        let report = MetadataReport {
            version: "PostgreSQL 16.3".to_string(),
            size_bytes: 7_553_583,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"version":"PostgreSQL 16.3","size_bytes":7553583}"#
        );
    }
}
