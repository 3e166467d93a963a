// crates/mf_foundation/src/scalar.rs

//! 标量类型与数值常量
//!
//! # 用法
//!
//! ```
//! use mf_foundation::scalar::{Scalar, VSMALL};
//!
//! let norm: Scalar = 0.0 + VSMALL;
//! assert!(norm > 0.0);
//! ```

/// 计算用标量类型
pub type Scalar = f64;

/// 极小值，用于防止残差归一化时除零
pub const VSMALL: Scalar = 1e-20;

/// 小值，用于几何距离判零
pub const SMALL: Scalar = 1e-10;

/// 大值
pub const GREAT: Scalar = 1e15;

/// 标量分量数
pub const SCALAR_COMPONENTS: usize = 1;

/// 矢量分量数
pub const VECTOR_COMPONENTS: usize = 3;

/// 分量后缀（用于日志中 `Ux`、`Uy`、`Uz` 形式的名称）
pub fn component_suffix(n_components: usize, cmpt: usize) -> &'static str {
    if n_components == VECTOR_COMPONENTS {
        match cmpt {
            0 => "x",
            1 => "y",
            _ => "z",
        }
    } else {
        ""
    }
}
