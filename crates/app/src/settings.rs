use config::{Config, ConfigError, Environment, File};
use shaobing_core::config::AppConfig;

/// 环境变量前缀，如 `SHAOBING__SERVER__PORT=9000`
const ENV_PREFIX: &str = "SHAOBING";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 结构体默认值兜底 (`#[serde(default)]`)。
/// 2. 可选文件 `{path}.toml` (缺失不报错)。
/// 3. `SHAOBING__SECTION__KEY` 环境变量覆盖。
///
/// # Arguments
/// * `path` - 不含扩展名的配置文件路径，通常为 `config/default`。
pub fn load(path: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()
}
