use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 由宿主註冊的全域執行環境旗標。
///
/// 複製出來的實例共用同一個旗標；應用程式只讀取，何時設定由宿主決定。
#[derive(Debug, Clone, Default)]
pub struct GlobalContext {
    registered: Arc<AtomicBool>,
}

impl GlobalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered() -> Self {
        let context = Self::new();
        context.register();
        context
    }

    pub fn register(&self) {
        self.registered.store(true, Ordering::Release);
    }

    pub fn clear(&self) {
        self.registered.store(false, Ordering::Release);
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }
}
