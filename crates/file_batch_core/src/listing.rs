pub const KEY_SEPARATOR: char = '/';

/// Keys ending in the separator are zero-byte "folder" placeholders, not files.
pub fn is_directory_marker(key: &str) -> bool {
    key.ends_with(KEY_SEPARATOR)
}

/// Drops directory markers and sorts ascending so batch membership is
/// reproducible for the same bucket state.
pub fn ordered_file_list(keys: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut files: Vec<String> = keys
        .into_iter()
        .filter(|key| !is_directory_marker(key))
        .collect();
    files.sort();
    files
}

pub fn count_file_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> u64 {
    keys.into_iter()
        .filter(|key| !is_directory_marker(key))
        .count() as u64
}

/// Substring after the last separator; the whole key when it has none.
pub fn leaf_name(key: &str) -> &str {
    match key.rfind(KEY_SEPARATOR) {
        Some(index) => &key[index + 1..],
        None => key,
    }
}
