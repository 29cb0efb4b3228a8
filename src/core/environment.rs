use crate::core::rack_io::{RackErrors, RackInput, RackLogger};
use crate::domain::model::{rack_header_key, RackEnvironment, RACK_SPEC_VERSION};
use crate::utils::error::Result;
use crate::utils::validation::validate_mount_pattern;
use axum::http::{header, request::Parts};
use std::collections::BTreeMap;

/// Servlet 風格的掛載點，例如 `/*` 或 `/app/*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    prefix: String,
}

impl MountPoint {
    pub fn parse(pattern: &str) -> Result<Self> {
        validate_mount_pattern("mount", pattern)?;
        Ok(Self {
            prefix: pattern[..pattern.len() - 2].to_string(),
        })
    }

    pub fn root() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 拆成 (SCRIPT_NAME, PATH_INFO)；不在掛載點下的路徑回傳 None
    pub fn split<'a>(&'a self, path: &'a str) -> Option<(&'a str, &'a str)> {
        if self.prefix.is_empty() {
            return Some(("", path));
        }
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some((self.prefix.as_str(), rest))
        } else {
            None
        }
    }
}

impl Default for MountPoint {
    fn default() -> Self {
        Self::root()
    }
}

/// 將 HTTP 請求標頭與已讀入的本文轉為 Rack 環境
#[derive(Debug, Clone, Default)]
pub struct RackEnvironmentBuilder;

impl RackEnvironmentBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        parts: &Parts,
        mount: &MountPoint,
        input: RackInput,
    ) -> Option<RackEnvironment> {
        let path = parts.uri.path();
        let (script_name, path_info) = mount.split(path)?;
        let (server_name, server_port) = server_name_and_port(parts);

        let url_scheme = parts
            .uri
            .scheme_str()
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "http".to_string());

        Some(RackEnvironment {
            request_method: parts.method.as_str().to_string(),
            script_name: script_name.to_string(),
            path_info: if path_info.is_empty() {
                "/".to_string()
            } else {
                path_info.to_string()
            },
            query_string: parts.uri.query().unwrap_or_default().to_string(),
            server_name,
            server_port,
            url_scheme,
            version: RACK_SPEC_VERSION,
            multithread: true,
            multiprocess: true,
            run_once: false,
            hijack: false,
            headers: rack_headers(parts),
            input,
            errors: RackErrors::new(),
            logger: RackLogger::new(),
        })
    }
}

fn rack_headers(parts: &Parts) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    for name in parts.headers.keys() {
        let mut values = Vec::new();
        for value in parts.headers.get_all(name) {
            match value.to_str() {
                Ok(value) => values.push(value),
                Err(_) => tracing::debug!("Dropped non UTF-8 value of header '{}'", name),
            }
        }
        if !values.is_empty() {
            headers.insert(rack_header_key(name.as_str()), values.join(","));
        }
    }
    headers
}

fn server_name_and_port(parts: &Parts) -> (String, String) {
    let authority = parts
        .uri
        .authority()
        .map(|authority| authority.as_str().to_string())
        .or_else(|| {
            parts
                .headers
                .get(header::HOST)
                .and_then(|host| host.to_str().ok())
                .map(str::to_string)
        });

    match authority {
        Some(authority) => match authority.rsplit_once(':') {
            Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => {
                (name.to_string(), port.to_string())
            }
            _ => (authority, "80".to_string()),
        },
        None => ("localhost".to_string(), "80".to_string()),
    }
}
