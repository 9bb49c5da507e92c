use std::future::Future;

pub mod object_store;
pub mod s3;
pub mod step_functions;
pub mod workflow;

/// Runs an SDK future to completion from the synchronous adapter traits.
///
/// Requires the multi-threaded tokio runtime the Lambda binaries start.
pub(crate) fn block_on_sdk<T>(future: impl Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
