use crate::errors::AppError;

/// Runs a store call under the configured query timeout and hands back its
/// own result untouched, for callers that inspect the store error.
pub async fn with_timeout<T, F>(duration: std::time::Duration, fut: F) -> Result<T, AppError>
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(duration, fut).await.map_err(|elapsed| {
        tracing::warn!("Query timeout after {:?}", duration);
        AppError::Timeout(elapsed)
    })
}

/// Runs a store call under the configured query timeout.
pub async fn timeout_query<T, E, F>(duration: std::time::Duration, fut: F) -> Result<T, AppError>
where
    F: std::future::Future<Output = Result<T, E>>,
    AppError: From<E>,
{
    with_timeout(duration, fut).await?.map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn passes_results_through() {
        let result = timeout_query(Duration::from_secs(1), async { Ok::<_, sqlx::Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn converts_store_errors() {
        let result = timeout_query(Duration::from_secs(1), async {
            Err::<i64, _>(sqlx::Error::RowNotFound)
        })
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn slow_queries_time_out() {
        let result = timeout_query(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, sqlx::Error>(())
        })
        .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn with_timeout_keeps_the_inner_error() {
        let result = with_timeout(Duration::from_secs(1), async {
            Err::<(), _>(sqlx::Error::RowNotFound)
        })
        .await;
        assert!(matches!(result, Ok(Err(sqlx::Error::RowNotFound))));

        let result = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        })
        .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }
}
