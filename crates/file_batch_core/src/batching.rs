use thiserror::Error;

use crate::listing::leaf_name;

pub const BATCH_DIR_PREFIX: &str = "batch-";
pub const MIN_SEQUENCE_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("batch size must be a positive integer")]
    ZeroBatchSize,
    #[error("batch boundaries do not cover the full file list")]
    IncompleteCoverage,
}

/// One numbered, contiguous slice of the ordered file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    /// 1-based.
    pub sequence: usize,
    pub label: String,
    pub prefix: String,
    pub keys: Vec<String>,
}

impl BatchPlan {
    pub fn destination_key(&self, source_key: &str) -> String {
        destination_key(&self.prefix, source_key)
    }
}

/// Zero-padded width used for every label in a plan of `batch_count` batches.
///
/// Three digits up to 999 batches; beyond that the width grows to the digit
/// count of `batch_count` so labels within one plan keep a single width.
pub fn sequence_width(batch_count: usize) -> usize {
    let digits = batch_count.max(1).ilog10() as usize + 1;
    digits.max(MIN_SEQUENCE_WIDTH)
}

pub fn sequence_label(sequence: usize, width: usize) -> String {
    format!("{sequence:0width$}")
}

pub fn batch_prefix(dest_prefix: &str, label: &str) -> String {
    format!("{dest_prefix}{BATCH_DIR_PREFIX}{label}/")
}

pub fn destination_key(batch_prefix: &str, source_key: &str) -> String {
    format!("{batch_prefix}{}", leaf_name(source_key))
}

pub fn batch_count(total_files: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    total_files.div_ceil(batch_size)
}

pub fn plan_batches(
    files: &[String],
    batch_size: usize,
    dest_prefix: &str,
) -> Result<Vec<BatchPlan>, PartitionError> {
    if batch_size == 0 {
        return Err(PartitionError::ZeroBatchSize);
    }

    let width = sequence_width(batch_count(files.len(), batch_size));
    let plans: Vec<BatchPlan> = files
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| {
            let sequence = index + 1;
            let label = sequence_label(sequence, width);
            BatchPlan {
                sequence,
                prefix: batch_prefix(dest_prefix, &label),
                label,
                keys: chunk.to_vec(),
            }
        })
        .collect();

    validate_plans(files.len(), &plans)?;
    Ok(plans)
}

fn validate_plans(total_files: usize, plans: &[BatchPlan]) -> Result<(), PartitionError> {
    let covered: usize = plans.iter().map(|plan| plan.keys.len()).sum();
    if covered != total_files {
        return Err(PartitionError::IncompleteCoverage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn numbered_files(count: usize) -> Vec<String> {
        (0..count)
            .map(|index| format!("pending/file-{index:04}.json"))
            .collect()
    }

    #[test]
    fn two_hundred_fifty_files_make_three_batches() {
        let plans = plan_batches(&numbered_files(250), 100, "processing/").expect("plan");

        let prefixes: Vec<&str> = plans.iter().map(|plan| plan.prefix.as_str()).collect();
        assert_eq!(
            prefixes,
            vec![
                "processing/batch-001/",
                "processing/batch-002/",
                "processing/batch-003/"
            ]
        );
        let sizes: Vec<usize> = plans.iter().map(|plan| plan.keys.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(plans[2].keys[0], "pending/file-0200.json");
    }

    #[test]
    fn empty_list_yields_no_batches() {
        let plans = plan_batches(&[], 10, "processing/").expect("plan");
        assert!(plans.is_empty());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let error = plan_batches(&numbered_files(3), 0, "processing/").expect_err("should fail");
        assert_eq!(error, PartitionError::ZeroBatchSize);
    }

    #[test]
    fn destination_key_keeps_leaf_name_only() {
        let plans =
            plan_batches(&["pending/a/b/report.csv".to_string()], 5, "out/").expect("plan");
        assert_eq!(
            plans[0].destination_key("pending/a/b/report.csv"),
            "out/batch-001/report.csv"
        );
    }

    #[test]
    fn label_width_grows_past_999_batches() {
        assert_eq!(sequence_width(1), 3);
        assert_eq!(sequence_width(999), 3);
        assert_eq!(sequence_width(1000), 4);
        assert_eq!(sequence_width(12_345), 5);

        let plans = plan_batches(&numbered_files(1001), 1, "p/").expect("plan");
        assert_eq!(plans[0].label, "0001");
        assert_eq!(plans[1000].label, "1001");
        assert!(plans
            .windows(2)
            .all(|pair| pair[0].prefix < pair[1].prefix));
    }

    proptest! {
        #[test]
        fn batches_partition_the_input_exactly(total in 0usize..600, batch_size in 1usize..120) {
            let files = numbered_files(total);
            let plans = plan_batches(&files, batch_size, "processing/").expect("plan");

            prop_assert_eq!(plans.len(), total.div_ceil(batch_size));
            for (index, plan) in plans.iter().enumerate() {
                prop_assert_eq!(plan.sequence, index + 1);
                if index + 1 < plans.len() {
                    prop_assert_eq!(plan.keys.len(), batch_size);
                }
            }
            if let Some(last) = plans.last() {
                let expected_last = match total % batch_size {
                    0 => batch_size,
                    remainder => remainder,
                };
                prop_assert_eq!(last.keys.len(), expected_last);
            }

            let flattened: Vec<String> = plans.into_iter().flat_map(|plan| plan.keys).collect();
            prop_assert_eq!(flattened, files);
        }

        #[test]
        fn labels_are_three_digits_and_increasing(total in 1usize..400, batch_size in 1usize..50) {
            let plans =
                plan_batches(&numbered_files(total), batch_size, "processing/").expect("plan");
            prop_assert!(plans.iter().all(|plan| plan.label.len() == 3));
            prop_assert!(plans.windows(2).all(|pair| pair[0].label < pair[1].label));
        }
    }
}
