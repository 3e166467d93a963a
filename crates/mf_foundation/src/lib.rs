// crates/mf_foundation/src/lib.rs

//! MariFoam Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型、标量类型与数值容差。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与 `ensure!`/`require!` 宏
//! - [`scalar`]: 标量类型与数值常量
//! - [`tolerance`]: 数值容差
//!
//! # 示例
//!
//! ```
//! use mf_foundation::prelude::*;
//!
//! fn checked(n: usize) -> MfResult<usize> {
//!     MfError::check_index("Cell", n, 10)?;
//!     Ok(n)
//! }
//! assert!(checked(3).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scalar;
pub mod tolerance;

// 重导出常用类型
pub use error::{MfError, MfResult};
pub use scalar::Scalar;
pub use tolerance::Tolerance;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{MfError, MfResult};
    pub use crate::scalar::{Scalar, SMALL, VSMALL};
    pub use crate::tolerance::Tolerance;
    pub use crate::{ensure, require};
}
