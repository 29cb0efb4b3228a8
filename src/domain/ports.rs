use crate::domain::model::{RackEnvironment, RackResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 可從頭到尾走訪的容器；每次呼叫 `iterate` 都是一次新的走訪
pub trait Enumerable {
    type Item;

    fn iterate(&self) -> impl Iterator<Item = &Self::Item>;
}

/// 帶有單向開關狀態的物件
pub trait Closable {
    fn is_open(&self) -> bool;
    fn close(&self);
}

#[async_trait]
pub trait RackApplication: Send + Sync {
    async fn call(&self, environment: RackEnvironment) -> Result<RackResponse>;
}
