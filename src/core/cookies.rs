use crate::domain::model::RackHeaders;

pub const SET_COOKIE: &str = "Set-Cookie";

/// 加上一個使用預設屬性的 cookie；已有 cookie 時以換行串接
pub fn set_cookie(headers: &mut RackHeaders, name: &str, value: &str) {
    let cookie = format!("{}={}", name, value);
    match headers.get_mut(SET_COOKIE) {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(&cookie);
        }
        None => {
            headers.insert(SET_COOKIE.to_string(), cookie);
        }
    }
}
