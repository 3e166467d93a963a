// crates/mf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `MfError` 枚举和 `MfResult` 类型别名，用于整个项目的错误处理。
//!
//! # 错误分类
//!
//! 1. **配置类**: 未知的算子/格式/求解器名称、缺少必需选项，运行开始前即中止
//! 2. **形状类**: 分量数、网格或未知量不一致，属于方程构造逻辑错误
//! 3. **其他**: 网格无效、IO、序列化
//!
//! 迭代求解未收敛**不是**错误，由求解报告中的残差体现。
//!
//! # 示例
//!
//! ```
//! use mf_foundation::error::{MfError, MfResult};
//!
//! fn read_config() -> MfResult<()> {
//!     Err(MfError::config("配置文件格式错误"))
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type MfResult<T> = Result<T, MfError>;

/// MariFoam 错误类型
#[derive(Error, Debug)]
pub enum MfError {
    // ========================================================================
    // 配置类错误
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 错误描述
        message: String,
    },

    /// 缺少配置项
    #[error("缺少配置项: {key}")]
    MissingConfig {
        /// 配置键
        key: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key} = {value} ({reason})")]
    InvalidConfig {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 无效原因
        reason: String,
    },

    /// 未知名称（算子、格式、求解器、边界类型）
    #[error("未知的{category}: '{name}'")]
    UnknownName {
        /// 名称类别
        category: &'static str,
        /// 给定名称
        name: String,
    },

    // ========================================================================
    // 形状类错误
    // ========================================================================
    /// 分量数不一致
    #[error("{operation}: 分量数不一致 ({left} vs {right})")]
    ComponentMismatch {
        /// 发生错误的操作
        operation: &'static str,
        /// 左操作数分量数
        left: usize,
        /// 右操作数分量数
        right: usize,
    },

    /// 网格不一致
    #[error("{operation}: 操作数不在同一网格上")]
    MeshMismatch {
        /// 发生错误的操作
        operation: &'static str,
    },

    /// 未知量不一致
    #[error("{operation}: 线性系统的未知场不同")]
    UnknownMismatch {
        /// 发生错误的操作
        operation: &'static str,
    },

    /// 不支持的分量数
    #[error("{operation}: 不支持 {count} 分量的结果（仅支持标量和矢量）")]
    UnsupportedComponents {
        /// 发生错误的操作
        operation: &'static str,
        /// 结果分量数
        count: usize,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望 {expected}, 实际 {actual}")]
    SizeMismatch {
        /// 数组名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("{index_type} 索引越界: {index} >= {len}")]
    IndexOutOfBounds {
        /// 索引类型
        index_type: &'static str,
        /// 索引值
        index: usize,
        /// 有效长度
        len: usize,
    },

    // ========================================================================
    // 其他错误
    // ========================================================================
    /// 无效网格
    #[error("无效网格: {message}")]
    InvalidMesh {
        /// 错误描述
        message: String,
    },

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 错误描述
        message: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl MfError {
    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 缺少配置
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 未知名称
    pub fn unknown_name(category: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            category,
            name: name.into(),
        }
    }

    /// 分量数不一致
    pub fn component_mismatch(operation: &'static str, left: usize, right: usize) -> Self {
        Self::ComponentMismatch {
            operation,
            left,
            right,
        }
    }

    /// 网格不一致
    pub fn mesh_mismatch(operation: &'static str) -> Self {
        Self::MeshMismatch { operation }
    }

    /// 未知量不一致
    pub fn unknown_mismatch(operation: &'static str) -> Self {
        Self::UnknownMismatch { operation }
    }

    /// 不支持的分量数
    pub fn unsupported_components(operation: &'static str, count: usize) -> Self {
        Self::UnsupportedComponents { operation, count }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为配置类错误
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::MissingConfig { .. }
                | Self::InvalidConfig { .. }
                | Self::UnknownName { .. }
        )
    }

    /// 是否为形状类错误
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ComponentMismatch { .. }
                | Self::MeshMismatch { .. }
                | Self::UnknownMismatch { .. }
                | Self::UnsupportedComponents { .. }
                | Self::SizeMismatch { .. }
                | Self::IndexOutOfBounds { .. }
        )
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl MfError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> MfResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> MfResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }

    /// 检查两个操作数的分量数一致
    #[inline]
    pub fn check_components(operation: &'static str, left: usize, right: usize) -> MfResult<()> {
        if left != right {
            Err(Self::component_mismatch(operation, left, right))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for MfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 宏
// ========================================================================

/// 条件不满足时返回错误
///
/// ```
/// use mf_foundation::{ensure, MfError, MfResult};
///
/// fn positive(x: f64) -> MfResult<f64> {
///     ensure!(x > 0.0, MfError::config("x 必须为正"));
///     Ok(x)
/// }
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// 从 `Option` 取值，为 `None` 时返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

// ========================================================================
// 测试
// ========================================================================
