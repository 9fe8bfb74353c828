use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::CalResult;

/// Trait for component schedulers that run periodic background work
pub trait Scheduler: Send + 'static {
    /// The type of handle used by this scheduler
    type Handle: Clone + Send + Sync + 'static;

    /// Start the scheduler with the necessary context
    fn start(
        config: Arc<RwLock<Config>>,
        handle: Self::Handle,
        token: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CalResult<()>> + Send>>;

    /// Stop the scheduler gracefully
    fn stop(&self) -> Pin<Box<dyn Future<Output = CalResult<()>> + Send>>;
}
