/// One page of a prefix listing, in whatever order the store returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub keys: Vec<String>,
    pub next_continuation_token: Option<String>,
}

pub trait ObjectStore {
    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, String>;

    fn copy_object(&self, bucket: &str, source_key: &str, destination_key: &str)
        -> Result<(), String>;

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String>;

    /// Size from object metadata; never reads the body.
    fn content_length(&self, bucket: &str, key: &str) -> Result<u64, String>;
}
