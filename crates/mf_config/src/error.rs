// crates/mf_config/src/error.rs

//! 配置层错误类型

use mf_foundation::MfError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 未知名称
    #[error("未知的{category}: '{name}'")]
    UnknownName {
        /// 名称类别
        category: &'static str,
        /// 给定名称
        name: String,
    },
}

impl ConfigError {
    /// 无效值
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for MfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => MfError::from(e),
            ConfigError::Parse(message) => MfError::config(message),
            ConfigError::InvalidValue { key, value, reason } => {
                MfError::invalid_config(key, value, reason)
            }
            ConfigError::Missing(key) => MfError::missing_config(key),
            ConfigError::UnknownName { category, name } => MfError::unknown_name(category, name),
        }
    }
}
