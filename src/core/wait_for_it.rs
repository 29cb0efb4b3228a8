use futures::stream::{self, Stream};
use std::time::Duration;

/// 只產出一次的延遲值：等待一段固定時間後送出單一值，然後結束。
///
/// `into_stream` 會取得所有權，所以產出的串流無法重播。
#[derive(Debug)]
pub struct WaitForIt<T> {
    it: T,
    delay: Duration,
}

impl<T: Send + 'static> WaitForIt<T> {
    pub fn new(it: T, delay: Duration) -> Self {
        Self { it, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn into_stream(self) -> impl Stream<Item = T> + Send + 'static {
        let Self { it, delay } = self;
        stream::once(async move {
            tracing::debug!("Holding response body for {:?}", delay);
            tokio::time::sleep(delay).await;
            it
        })
    }
}
