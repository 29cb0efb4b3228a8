use bytes::Bytes;

const LINEFEED: u8 = b'\n';

/// `rack.input`：可倒帶的請求本文。
///
/// 本文在進入應用程式前已整個讀入記憶體，所以讀取不會阻塞，
/// `rewind` 只是把讀取位置歸零。以位元組而非字串回傳，因為
/// `rack.input` 必須是二進位編碼。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RackInput {
    bytes: Bytes,
    position: usize,
}

impl RackInput {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 讀下一行（含換行字元）；EOF 時回傳 None
    pub fn gets(&mut self) -> Option<Bytes> {
        let remaining = &self.bytes[self.position..];
        let length = match remaining.iter().position(|&b| b == LINEFEED) {
            Some(index) => index + 1,
            None => remaining.len(),
        };
        self.consume(length)
    }

    /// `None` 讀到 EOF（EOF 時為空值）；`Some(n)` 最多讀 n 個位元組，EOF 時回傳 None
    pub fn read(&mut self, length: Option<usize>) -> Option<Bytes> {
        match length {
            None => Some(self.consume(self.remaining()).unwrap_or_default()),
            Some(0) => Some(Bytes::new()),
            Some(length) => self.consume(length),
        }
    }

    /// 逐行走訪剩下的內容
    pub fn each(&mut self) -> impl Iterator<Item = Bytes> + '_ {
        std::iter::from_fn(move || self.gets())
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    fn consume(&mut self, length: usize) -> Option<Bytes> {
        let length = length.min(self.remaining());
        if length == 0 {
            return None;
        }
        let chunk = self.bytes.slice(self.position..self.position + length);
        self.position += length;
        Some(chunk)
    }
}

/// `rack.errors`：寫到 error 等級的日誌
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RackErrors {
    buffer: String,
}

impl RackErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 立即寫出
    pub fn puts(&self, message: &str) {
        tracing::error!("{}", message);
    }

    /// 先暫存，`flush` 時合併成一筆寫出
    pub fn write(&mut self, message: &str) {
        self.buffer.push_str(message);
    }

    pub fn flush(&mut self) {
        if !self.buffer.is_empty() {
            tracing::error!("{}", self.buffer);
            self.buffer.clear();
        }
    }
}

/// `rack.logger`：把應用程式的日誌轉給 tracing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RackLogger;

impl RackLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    /// tracing 沒有 fatal 等級，以 error 加上 `fatal` 欄位標記
    pub fn fatal(&self, message: &str) {
        tracing::error!(fatal = true, "{}", message);
    }
}
