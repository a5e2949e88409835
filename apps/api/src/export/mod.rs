// Static résumé file offered for download, read from local disk or S3.

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use bytes::Bytes;
use tracing::info;

use crate::config::{Config, S3Source};
use crate::errors::AppError;

/// Where the pre-existing résumé PDF lives.
#[async_trait]
pub trait ResumeSource: Send + Sync {
    /// `None` when no file has been published yet.
    async fn fetch(&self) -> Result<Option<Bytes>, AppError>;
}

pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ResumeSource for LocalFile {
    async fn fetch(&self) -> Result<Option<Bytes>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Internal(anyhow::Error::new(e).context(format!(
                "Failed to read resume file {}",
                self.path.display()
            )))),
        }
    }
}

pub struct S3Object {
    client: aws_sdk_s3::Client,
    bucket: String,
    key: String,
}

#[async_trait]
impl ResumeSource for S3Object {
    async fn fetch(&self) -> Result<Option<Bytes>, AppError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    return Ok(None);
                }
                return Err(AppError::S3(service_error.to_string()));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::S3(e.to_string()))?;
        Ok(Some(body.into_bytes()))
    }
}

/// S3 when `S3_BUCKET` is set, otherwise the local file.
pub async fn build_resume_source(config: &Config) -> Arc<dyn ResumeSource> {
    match &config.resume_s3 {
        Some(s3) => {
            info!("Resume download served from s3://{}/{}", s3.bucket, s3.key);
            Arc::new(S3Object {
                client: build_s3_client(s3).await,
                bucket: s3.bucket.clone(),
                key: s3.key.clone(),
            })
        }
        None => {
            info!("Resume download served from {}", config.resume_file_path.display());
            Arc::new(LocalFile::new(config.resume_file_path.clone()))
        }
    }
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
/// Static credentials and a custom endpoint are used only when configured.
async fn build_s3_client(source: &S3Source) -> aws_sdk_s3::Client {
    let mut loader =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(Region::new("us-east-1"));

    if let (Some(key_id), Some(secret)) = (&source.access_key_id, &source.secret_access_key) {
        loader = loader.credentials_provider(Credentials::new(key_id, secret, None, None, "portfolio-static"));
    }
    if let Some(endpoint) = &source.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    aws_sdk_s3::Client::new(&loader.load().await)
}

/// `attachment` disposition with an ASCII fallback name plus the exact UTF-8
/// name, so non-Latin names survive.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_file_present_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");

        let source = LocalFile::new(path.clone());
        assert!(source.fetch().await.unwrap().is_none());

        std::fs::write(&path, b"%PDF-1.4 test").unwrap();
        let bytes = source.fetch().await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 test");
    }

    #[test]
    fn test_content_disposition_ascii_name() {
        assert_eq!(
            content_disposition("Jordan_Avery_Resume.pdf"),
            "attachment; filename=\"Jordan_Avery_Resume.pdf\"; filename*=UTF-8''Jordan_Avery_Resume.pdf"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii_name() {
        let header = content_disposition("ジョーダン_Resume.pdf");
        assert!(header.starts_with("attachment; filename=\"_____"));
        assert!(header.contains("filename*=UTF-8''%E3%82%B8"));
        assert!(header.is_ascii());
    }
}
