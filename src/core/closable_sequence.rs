use crate::domain::ports::{Closable, Enumerable};
use std::sync::atomic::{AtomicBool, Ordering};

/// 包裝一個有序序列，並附帶只能從開啟轉為關閉的旗標。
///
/// 關閉不會影響走訪，也不會釋放或修改底層資料。
#[derive(Debug)]
pub struct ClosableSequence<T> {
    items: Vec<T>,
    open: AtomicBool,
}

impl<T> ClosableSequence<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            open: AtomicBool::new(true),
        }
    }
}

impl<T> FromIterator<T> for ClosableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Enumerable for ClosableSequence<T> {
    type Item = T;

    fn iterate(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Closable for ClosableSequence<T> {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}
