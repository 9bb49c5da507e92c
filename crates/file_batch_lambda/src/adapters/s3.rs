use aws_sdk_s3::error::DisplayErrorContext;

use crate::adapters::block_on_sdk;
use crate::adapters::object_store::{ListPage, ObjectStore};

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3ObjectStore {
    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let prefix = prefix.to_string();
        let continuation_token = continuation_token.map(str::to_string);

        block_on_sdk(async move {
            let output = client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token)
                .send()
                .await
                .map_err(|error| {
                    format!("failed to list objects: {}", DisplayErrorContext(&error))
                })?;

            let keys = output
                .contents()
                .iter()
                .filter_map(|object| object.key())
                .map(str::to_string)
                .collect();
            let next_continuation_token = if output.is_truncated().unwrap_or(false) {
                output.next_continuation_token().map(str::to_string)
            } else {
                None
            };

            Ok(ListPage {
                keys,
                next_continuation_token,
            })
        })
    }

    fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> Result<(), String> {
        let client = self.client.clone();
        let copy_source = format!("{bucket}/{}", encode_copy_source_key(source_key));
        let bucket = bucket.to_string();
        let destination_key = destination_key.to_string();

        block_on_sdk(async move {
            client
                .copy_object()
                .copy_source(copy_source)
                .bucket(bucket)
                .key(destination_key)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to copy object: {}", DisplayErrorContext(&error)))
        })
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();

        block_on_sdk(async move {
            client
                .delete_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    format!("failed to delete object: {}", DisplayErrorContext(&error))
                })
        })
    }

    fn content_length(&self, bucket: &str, key: &str) -> Result<u64, String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();

        block_on_sdk(async move {
            let output = client
                .head_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|error| {
                    format!("failed to head object: {}", DisplayErrorContext(&error))
                })?;

            let length = output
                .content_length()
                .ok_or_else(|| "head object response has no content length".to_string())?;
            u64::try_from(length).map_err(|_| format!("negative content length {length}"))
        })
    }
}

// CopySource must be URL-encoded; the separator stays literal.
fn encode_copy_source_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(char::from(byte))
            }
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
