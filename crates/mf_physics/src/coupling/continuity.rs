// crates/mf_physics/src/coupling/continuity.rs

//! 连续性误差统计（仅诊断，不参与控制流程）

use crate::fields::{SurfaceField, VolField};
use mf_foundation::MfResult;
use serde::Serialize;

/// 连续性误差
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContinuityErrors {
    /// `Δt·Σ|∇·φ|·V̄`
    pub sum_local: f64,
    /// `Δt·Σ(∇·φ)·V̄`
    pub global: f64,
    /// 全局误差的累计值
    pub cumulative: f64,
}

impl ContinuityErrors {
    /// 由修正后的通量更新统计并输出日志
    pub fn update(&mut self, phi: &SurfaceField, delta_t: f64) -> MfResult<ContinuityErrors> {
        let div = VolField::divergence(phi)?;
        let mean_volume = phi.mesh().mean_cell_volume();
        let values = div.cell_values(0);

        self.sum_local = delta_t * values.iter().map(|v| v.abs()).sum::<f64>() * mean_volume;
        self.global = delta_t * values.iter().sum::<f64>() * mean_volume;
        self.cumulative += self.global;

        log::info!(
            "time step continuity errors : sum local = {:e}, global = {:e}, cumulative = {:e}",
            self.sum_local,
            self.global,
            self.cumulative
        );
        Ok(*self)
    }
}
