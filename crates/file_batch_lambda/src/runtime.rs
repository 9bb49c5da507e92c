pub use file_batch_core::{batching, config, contract, listing, threshold, validation, workflow};
