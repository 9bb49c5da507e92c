use tracing::debug;

use crate::adapters::object_store::ObjectStore;
use crate::error::ListingError;
use crate::runtime::listing::{count_file_keys, ordered_file_list};

/// Every file under `prefix`, sorted ascending, directory markers excluded.
pub fn list_files(
    store: &impl ObjectStore,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, ListingError> {
    let mut keys = Vec::new();
    let pages = for_each_page(store, bucket, prefix, |page| keys.extend(page))?;
    let files = ordered_file_list(keys);
    debug!(bucket, prefix, pages, files = files.len(), "listed files");
    Ok(files)
}

pub fn count_files(
    store: &impl ObjectStore,
    bucket: &str,
    prefix: &str,
) -> Result<u64, ListingError> {
    let mut count = 0u64;
    let pages = for_each_page(store, bucket, prefix, |page| {
        count += count_file_keys(page.iter().map(String::as_str));
    })?;
    debug!(bucket, prefix, pages, count, "counted files");
    Ok(count)
}

// Follows continuation tokens until the store stops returning one.
fn for_each_page(
    store: &impl ObjectStore,
    bucket: &str,
    prefix: &str,
    mut on_page: impl FnMut(Vec<String>),
) -> Result<usize, ListingError> {
    let mut continuation_token: Option<String> = None;
    let mut pages = 0usize;
    loop {
        let page = store
            .list_page(bucket, prefix, continuation_token.as_deref())
            .map_err(|message| ListingError::new(bucket, prefix, message))?;
        pages += 1;
        on_page(page.keys);

        match page.next_continuation_token {
            Some(token) => continuation_token = Some(token),
            None => return Ok(pages),
        }
    }
}
