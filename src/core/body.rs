use crate::core::closable_sequence::ClosableSequence;
use crate::core::wait_for_it::WaitForIt;
use crate::domain::ports::{Closable, Enumerable};
use crate::utils::error::Result;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;

/// Rack 回應本文
pub enum RackBody {
    Empty,
    /// 一般的陣列本文，沒有 `close`
    Chunks(Vec<Bytes>),
    /// 走訪完畢後需要關閉的本文
    Sequence(Arc<ClosableSequence<Bytes>>),
    Stream(BoxStream<'static, Result<Bytes>>),
}

impl RackBody {
    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes>> {
        match self {
            RackBody::Empty => stream::empty().boxed(),
            RackBody::Chunks(chunks) => stream::iter(BodyIterator::plain(chunks).map(Ok)).boxed(),
            RackBody::Sequence(sequence) => {
                stream::iter(BodyIterator::closing(sequence).map(Ok)).boxed()
            }
            RackBody::Stream(stream) => stream,
        }
    }

    /// 讀完整個本文
    pub async fn collect(self) -> Result<Bytes> {
        let mut stream = self.into_stream();
        let mut buffer = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl std::fmt::Debug for RackBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RackBody::Empty => f.write_str("Empty"),
            RackBody::Chunks(chunks) => f.debug_tuple("Chunks").field(chunks).finish(),
            RackBody::Sequence(sequence) => f
                .debug_struct("Sequence")
                .field("open", &sequence.is_open())
                .finish(),
            RackBody::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<&'static str> for RackBody {
    fn from(value: &'static str) -> Self {
        if value.is_empty() {
            RackBody::Empty
        } else {
            RackBody::Chunks(vec![Bytes::from_static(value.as_bytes())])
        }
    }
}

impl From<String> for RackBody {
    fn from(value: String) -> Self {
        if value.is_empty() {
            RackBody::Empty
        } else {
            RackBody::Chunks(vec![Bytes::from(value)])
        }
    }
}

impl From<Arc<ClosableSequence<Bytes>>> for RackBody {
    fn from(sequence: Arc<ClosableSequence<Bytes>>) -> Self {
        RackBody::Sequence(sequence)
    }
}

impl<T> From<WaitForIt<T>> for RackBody
where
    T: Into<Bytes> + Send + 'static,
{
    fn from(producer: WaitForIt<T>) -> Self {
        RackBody::Stream(producer.into_stream().map(|it| Ok(it.into())).boxed())
    }
}

/// 把本文轉成逐塊的迭代器；底層若可關閉，走訪結束或被丟棄時關閉一次。
pub struct BodyIterator {
    chunks: std::vec::IntoIter<Bytes>,
    closer: Option<Arc<dyn Closable + Send + Sync>>,
}

impl BodyIterator {
    pub fn closing(sequence: Arc<ClosableSequence<Bytes>>) -> Self {
        let chunks: Vec<Bytes> = sequence.iterate().cloned().collect();
        Self {
            chunks: chunks.into_iter(),
            closer: Some(sequence),
        }
    }

    pub fn plain(chunks: Vec<Bytes>) -> Self {
        Self {
            chunks: chunks.into_iter(),
            closer: None,
        }
    }

    fn close_body(&mut self, reason: &str) {
        if let Some(closer) = self.closer.take() {
            closer.close();
            tracing::debug!("Closed response body {}", reason);
        }
    }
}

impl Iterator for BodyIterator {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        match self.chunks.next() {
            Some(chunk) => Some(chunk),
            None => {
                self.close_body("after iteration");
                None
            }
        }
    }
}

// HEAD 請求、用戶端斷線或回應建立失敗時本文不會被讀完
impl Drop for BodyIterator {
    fn drop(&mut self) {
        self.close_body("before it was drained");
    }
}
