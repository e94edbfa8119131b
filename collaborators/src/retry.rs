use std::future::Future;

use linker_core::CollaboratorError;

/// One in-place retry on a broken connection; any other failure, or a
/// second consecutive failure, drops the request with a warning (§7).
pub async fn with_single_retry<F, Fut, T>(label: &str, mut op: F) -> Result<T, CollaboratorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CollaboratorError>>,
{
    match op().await {
        Ok(v) => Ok(v),
        Err(CollaboratorError::Network(_) | CollaboratorError::Timeout) => {
            tracing::warn!(%label, "retrying once after a broken connection");
            match op().await {
                Ok(v) => Ok(v),
                Err(e) => {
                    tracing::warn!(%label, error = %e, "dropping bucket after retry failure");
                    Err(CollaboratorError::BucketDropped(e.to_string()))
                }
            }
        }
        Err(e) => {
            tracing::warn!(%label, error = %e, "dropping bucket, non-retryable failure");
            Err(e)
        }
    }
}
