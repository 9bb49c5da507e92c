/// Processing is triggered once the pending count reaches the threshold.
pub fn threshold_reached(file_count: u64, threshold: u64) -> bool {
    file_count >= threshold
}
