use crate::core::body::RackBody;
use crate::core::rack_io::{RackErrors, RackInput, RackLogger};
use std::collections::BTreeMap;

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const SCRIPT_NAME: &str = "SCRIPT_NAME";
pub const PATH_INFO: &str = "PATH_INFO";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const SERVER_NAME: &str = "SERVER_NAME";
pub const SERVER_PORT: &str = "SERVER_PORT";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const HTTP_HEADER_PREFIX: &str = "HTTP_";
pub const RACK_VERSION: &str = "rack.version";
pub const RACK_URL_SCHEME: &str = "rack.url_scheme";
pub const RACK_MULTITHREAD: &str = "rack.multithread";
pub const RACK_MULTIPROCESS: &str = "rack.multiprocess";
pub const RACK_RUN_ONCE: &str = "rack.run_once";
pub const RACK_HIJACK: &str = "rack.hijack?";

/// Rack 規格版本 1.2
pub const RACK_SPEC_VERSION: [u32; 2] = [1, 2];

/// 傳給 Rack 應用程式的請求環境
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackEnvironment {
    pub request_method: String,
    pub script_name: String,
    pub path_info: String,
    pub query_string: String,
    pub server_name: String,
    pub server_port: String,
    pub url_scheme: String,
    pub version: [u32; 2],
    pub multithread: bool,
    pub multiprocess: bool,
    pub run_once: bool,
    pub hijack: bool,
    /// `HTTP_*`、`CONTENT_TYPE`、`CONTENT_LENGTH`
    pub headers: BTreeMap<String, String>,
    /// `rack.input`
    pub input: RackInput,
    /// `rack.errors`
    pub errors: RackErrors,
    /// `rack.logger`
    pub logger: RackLogger,
}

impl RackEnvironment {
    /// 以 CGI 風格的鍵查詢環境值；布林與版本欄位以字串形式回傳，
    /// 版本為 `[1, 2]`。`rack.input` 等串流物件請直接使用欄位。
    pub fn get(&self, key: &str) -> Option<String> {
        let flag = |value: bool| Some(value.to_string());
        match key {
            REQUEST_METHOD => Some(self.request_method.clone()),
            SCRIPT_NAME => Some(self.script_name.clone()),
            PATH_INFO => Some(self.path_info.clone()),
            QUERY_STRING => Some(self.query_string.clone()),
            SERVER_NAME => Some(self.server_name.clone()),
            SERVER_PORT => Some(self.server_port.clone()),
            RACK_URL_SCHEME => Some(self.url_scheme.clone()),
            RACK_VERSION => Some(format!("{:?}", self.version)),
            RACK_MULTITHREAD => flag(self.multithread),
            RACK_MULTIPROCESS => flag(self.multiprocess),
            RACK_RUN_ONCE => flag(self.run_once),
            RACK_HIJACK => flag(self.hijack),
            other => self.headers.get(other).cloned(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&rack_header_key(name)).map(String::as_str)
    }
}

/// `Content-Type` -> `CONTENT_TYPE`，`X-Forwarded-For` -> `HTTP_X_FORWARDED_FOR`
pub fn rack_header_key(header_name: &str) -> String {
    let transformed = header_name.to_ascii_uppercase().replace('-', "_");
    if transformed == CONTENT_LENGTH || transformed == CONTENT_TYPE {
        transformed
    } else {
        format!("{}{}", HTTP_HEADER_PREFIX, transformed)
    }
}

/// Rack 風格的回應標頭：同名多值以 `\n` 串接在同一個值中
pub type RackHeaders = BTreeMap<String, String>;

#[derive(Debug)]
pub struct RackResponse {
    pub status: u16,
    pub headers: RackHeaders,
    pub body: RackBody,
}

impl RackResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: RackHeaders::new(),
            body: RackBody::Empty,
        }
    }

    pub fn with_body(mut self, body: impl Into<RackBody>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}
