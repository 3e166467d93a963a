// crates/mf_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 集中管理离散与时间推进中使用的判零阈值，通过参数注入使用。
//!
//! ```
//! use mf_foundation::tolerance::Tolerance;
//!
//! let tol = Tolerance::default();
//! assert!(tol.is_distance_zero(1e-12));
//! assert!(tol.time_reached(0.5 - 1e-12, 0.5));
//! ```

use serde::{Deserialize, Serialize};

/// 数值容差
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// 几何距离判零阈值（固定梯度边界、梯度场边界外推）
    pub distance: f64,
    /// 结束时间判定阈值
    pub time: f64,
    /// 写出时刻判定阈值
    pub write_time: f64,
    /// 残差归一化因子下限
    pub norm_floor: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            distance: 1e-10,
            time: 1e-10,
            write_time: 1e-10,
            norm_floor: crate::scalar::VSMALL,
        }
    }
}

impl Tolerance {
    /// 距离是否视为零
    #[inline]
    pub fn is_distance_zero(&self, d: f64) -> bool {
        d.abs() < self.distance
    }

    /// 当前时间是否已到达结束时间
    #[inline]
    pub fn time_reached(&self, time: f64, end_time: f64) -> bool {
        end_time - time <= self.time
    }

    /// 当前时间是否到达（或越过）目标写出时刻
    #[inline]
    pub fn write_due(&self, time: f64, next_write: f64) -> bool {
        time + self.write_time >= next_write
    }
}
