//! Upload of the JSON report to S3.

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use tracing::info;

use crate::report::DashboardReport;

/// Key used when none is given on the command line.
pub const DEFAULT_REPORT_KEY: &str = "dashboards/ev_population.json";

/// Serialized upload body with its object key and encoding.
#[derive(Debug)]
pub struct ReportObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_encoding: Option<&'static str>,
}

/// Serializes the report, gzip-compressing it and suffixing the key with
/// `.gz` when `gzip` is set.
pub fn prepare_report_object(report: &DashboardReport, key: &str, gzip: bool) -> Result<ReportObject> {
    let json = serde_json::to_vec(report)?;

    if !gzip {
        return Ok(ReportObject {
            key: key.to_string(),
            body: json,
            content_encoding: None,
        });
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(ReportObject {
        key: format!("{key}.gz"),
        body: encoder.finish()?,
        content_encoding: Some("gzip"),
    })
}

/// Uploads the report to `bucket` with `application/json` content type.
#[tracing::instrument(skip(client, report))]
pub async fn write_json_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    report: &DashboardReport,
    gzip: bool,
) -> Result<()> {
    let object = prepare_report_object(report, key, gzip)?;
    let size = object.body.len();

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(&object.key)
        .body(ByteStream::from(object.body))
        .content_type("application/json");
    if let Some(encoding) = object.content_encoding {
        request = request.content_encoding(encoding);
    }

    request
        .send()
        .await
        .with_context(|| format!("S3 PutObject failed for s3://{bucket}/{}", object.key))?;

    info!(key = %object.key, bytes = size, "Report uploaded to S3");
    Ok(())
}
