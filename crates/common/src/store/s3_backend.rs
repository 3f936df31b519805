//! S3-compatible backend (AWS S3, MinIO, etc.).
//!
//! Keys are passed to the bucket verbatim: directory markers are real
//! zero-byte objects whose keys end in `/`, exactly as they appear in the
//! persisted layout.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;

use super::error::{KeyFailure, Result, StoreError};
use super::{ObjectEntry, ObjectStore};

/// Upper bound on concurrent per-key calls within one batch delete.
const MAX_CONCURRENT_DELETES: usize = 16;

pub struct S3Store {
    bucket: Bucket,
}

impl S3Store {
    pub fn connect(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
        use_path_style: bool,
    ) -> Result<Self> {
        let region = Region::Custom {
            region: region.to_string(),
            endpoint: endpoint.to_string(),
        };
        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

        let mut bucket = Bucket::new(bucket, region, credentials)?;
        if use_path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket: *bucket })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        self.bucket
            .put_object_with_content_type(key, &bytes, content_type)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        match self.bucket.get_object(key).await {
            Ok(response) => Ok(Some(response.bytes().clone())),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>> {
        // rust-s3 follows continuation tokens internally; one page per result
        let pages = self.bucket.list(prefix.to_string(), None).await?;

        let entries = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| ObjectEntry {
                last_modified: parse_last_modified(&object.last_modified),
                key: object.key,
                size: object.size,
            })
            .collect();
        Ok(entries)
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        let status = self.bucket.copy_object_internal(src, dst).await?;
        if !(200..300).contains(&status) {
            return Err(StoreError::CopyFailed {
                from: src.to_string(),
                to: dst.to_string(),
                status,
            });
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // S3 DELETE returns success for absent keys, so this is idempotent
        self.bucket.delete_object(key).await?;
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<Vec<KeyFailure>> {
        let failed: Vec<KeyFailure> = stream::iter(keys.to_vec())
            .map(|key| {
                async move {
                    match self.bucket.delete_object(&key).await {
                        Ok(_) => None,
                        Err(e) => Some(KeyFailure {
                            key: key.clone(),
                            reason: e.to_string(),
                        }),
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_DELETES)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;
        Ok(failed)
    }
}

fn parse_last_modified(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_s3_timestamps() {
        let t = parse_last_modified("2024-11-05T13:15:30.000Z");
        assert_eq!(t.timestamp(), 1730812530);
        // malformed input degrades to the epoch rather than failing the list
        assert_eq!(parse_last_modified("not-a-date").timestamp(), 0);
    }
}
