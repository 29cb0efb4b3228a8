use crate::app::AppKind;
use crate::config::ServerConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-rack")]
#[command(about = "Serves the Rack fixture applications over HTTP")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Servlet-style mount pattern, e.g. "/*" or "/app/*"
    #[arg(long)]
    pub mount: Option<String>,

    #[arg(long, value_enum)]
    pub app: Option<AppKind>,

    /// Do not register the global context at startup
    #[arg(long)]
    pub no_global_context: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有)，再套用命令列覆蓋
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(mount) = &self.mount {
            config.server.mount = mount.clone();
        }
        if let Some(kind) = self.app {
            config.application.kind = kind;
        }
        if self.no_global_context {
            config.application.register_global_context = false;
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        if self.verbose {
            config.logging.verbose = true;
        }

        Ok(config)
    }
}
