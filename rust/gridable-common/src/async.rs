use futures_timer::Delay;
use futures_util::future::{Either, select};
use std::{future::Future, pin::pin, time::Duration};
use thiserror::Error;

/// Async module errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridableAsyncError {
    /// The awaited future did not settle within its deadline
    #[error("Future did not complete within {0:?}")]
    Elapsed(Duration),
}

/// Await `future`, giving up once `limit` has passed.
///
/// The deadline is driven by [`futures_timer::Delay`], so this works under
/// any executor (or none in particular) on native targets and on the browser
/// event loop on `wasm32-unknown-unknown`.
pub async fn bounded<F>(limit: Duration, future: F) -> Result<F::Output, GridableAsyncError>
where
    F: Future,
{
    let future = pin!(future);
    match select(future, Delay::new(limit)).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(GridableAsyncError::Elapsed(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[crate::test]
    async fn it_returns_output_of_fast_futures() {
        let value = bounded(Duration::from_secs(1), async { 3 }).await;
        assert_eq!(value, Ok(3));
    }

    #[crate::test]
    async fn it_gives_up_on_stalled_futures() {
        let limit = Duration::from_millis(10);
        let value = bounded(limit, std::future::pending::<()>()).await;
        assert_eq!(value, Err(GridableAsyncError::Elapsed(limit)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn it_keeps_time_outside_of_a_tokio_runtime() {
        let limit = Duration::from_millis(10);

        let value = futures::executor::block_on(bounded(limit, async { "ready" }));
        assert_eq!(value, Ok("ready"));

        let value = futures::executor::block_on(bounded(limit, std::future::pending::<()>()));
        assert_eq!(value, Err(GridableAsyncError::Elapsed(limit)));
    }
}
