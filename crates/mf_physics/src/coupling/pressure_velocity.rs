// crates/mf_physics/src/coupling/pressure_velocity.rs

//! 不可压缩压力-速度耦合（PISO / SIMPLE）
//!
//! # 算法概述
//!
//! 1. **动量预测**：`ddt(U) + div(φ, U) − laplacian(ν, U) == −grad(p)`，
//!    SIMPLE 时对动量矩阵做隐式松弛
//! 2. **压力修正**（PISO 每步 `n_correctors` 次，SIMPLE 每次外迭代一次）：
//!    - `rA = V/diag`，`HbyA = rA·H`，HbyA 的边界按 U 的边界定义约束
//!    - `laplacian(rA, p) == div(HbyA)`，无 fixedValue 压力边界时先设参考值
//!    - `φ = flux(HbyA) − flux(rA·∇p)`
//!    - SIMPLE 时压力显式松弛
//!    - `U = HbyA − rA·∇p`
//! 3. 每次修正后统计连续性误差
//!
//! 稳态与瞬态由 `solution.coupling` 选择；稳态算例应同时选用 steadyState 时间格式。

use super::continuity::ContinuityErrors;
use super::run_time::RunTime;
use super::{SegregatedSolver, StepReport};
use crate::fields::{FieldSnapshot, SurfaceField, VolField};
use crate::schemes::{fvc, fvm, Diffusivity};
use mf_config::{BoundaryDefinition, CaseConfig};
use mf_foundation::MfResult;
use mf_mesh::FvMesh;
use std::sync::Arc;

/// 将 HbyA 的边界值约束为速度的边界定义
///
/// `H` 的边界是零梯度近似，不代表真实的物理边界。
pub fn constrain_hbya(hbya: &mut VolField, u_boundary: &BoundaryDefinition) -> MfResult<()> {
    hbya.set_boundary_values(u_boundary)
}

/// 压力-速度耦合求解器
#[derive(Debug)]
pub struct PressureVelocitySolver {
    u: VolField,
    p: VolField,
    phi: SurfaceField,
    continuity: ContinuityErrors,
}

impl PressureVelocitySolver {
    /// 按配置初始化 `U`、`p` 与初始通量
    pub fn new(mesh: Arc<FvMesh>, case: &CaseConfig) -> MfResult<Self> {
        case.require(&["U", "p"])?;
        case.transport.nu()?;
        let u = VolField::from_config(Arc::clone(&mesh), "U", case.field("U")?)?;
        let p = VolField::from_config(mesh, "p", case.field("p")?)?;
        let mut phi = SurfaceField::flux(&u)?;
        phi.rename("phi");
        Ok(Self {
            u,
            p,
            phi,
            continuity: ContinuityErrors::default(),
        })
    }

    /// 速度
    pub fn velocity(&self) -> &VolField {
        &self.u
    }

    /// 压力
    pub fn pressure(&self) -> &VolField {
        &self.p
    }

    /// 面通量
    pub fn flux(&self) -> &SurfaceField {
        &self.phi
    }

    /// 连续性误差
    pub fn continuity_errors(&self) -> ContinuityErrors {
        self.continuity
    }
}

impl SegregatedSolver for PressureVelocitySolver {
    fn name(&self) -> &'static str {
        "PressureVelocitySolver"
    }

    fn step(&mut self, case: &CaseConfig, run_time: &RunTime) -> MfResult<StepReport> {
        let nu = case.transport.nu()?;
        let schemes = &case.schemes;
        let coupling = case.solution.coupling;
        let u_controls = case.solver_controls("U")?;
        let p_controls = case.solver_controls("p")?;
        let u_boundary = &case.field("U")?.boundary;
        let p_boundary = &case.field("p")?.boundary;
        let delta_t = run_time.delta_t();
        let mut performances = Vec::new();
        let mut continuity = None;

        // ===== 动量预测 =====
        let mut u_eqn = fvm::ddt(&self.u, schemes.ddt, delta_t)?
            .add(&fvm::div(&self.u, schemes.div_convection, &self.phi)?)?
            .subtract(&fvm::laplacian(
                &self.u,
                schemes.laplacian,
                Diffusivity::Uniform(nu),
            )?)?;
        if coupling.is_steady() {
            u_eqn.relax(&self.u, u_controls.implicit_factor())?;
        }
        let grad_p = fvc::grad(&self.u, schemes.grad_pressure, &self.p)?;
        performances.extend(
            u_eqn
                .clone()
                .equate(&grad_p.negate())?
                .solve(&mut self.u, u_controls)?,
        );
        self.u.set_boundary_values(u_boundary)?;

        // ===== 压力修正 =====
        for corrector in 0..coupling.n_correctors() {
            log::debug!("压力修正 {}/{}", corrector + 1, coupling.n_correctors());
            let r_au = u_eqn.r_a(&self.u)?;
            let h = u_eqn.h(&self.u)?;
            let mut hbya = r_au.multiply(&h)?;
            hbya.rename("HbyA");
            constrain_hbya(&mut hbya, u_boundary)?;

            let p_previous = self.p.copy();
            let p_eqn = fvm::laplacian(&self.p, schemes.laplacian, Diffusivity::Field(&r_au))?
                .equate(&fvc::div(&self.p, schemes.div_hbya, &hbya)?)?;
            self.p.set_reference_value(p_controls.ref_cell, p_controls.ref_value)?;
            performances.extend(p_eqn.solve(&mut self.p, p_controls)?);
            self.p.set_boundary_values(p_boundary)?;

            let r_a_grad_p = r_au.multiply(&self.p.grad()?)?;
            let phi = SurfaceField::flux(&hbya)?.subtract(&SurfaceField::flux(&r_a_grad_p)?)?;
            self.phi.assign(&phi)?;
            continuity = Some(self.continuity.update(&self.phi, delta_t)?);

            if coupling.is_steady() {
                self.p.relax(&p_previous, Some(p_controls.explicit_factor()))?;
            }

            self.u.assign(&hbya.subtract(&r_a_grad_p)?)?;
            self.u.set_boundary_values(u_boundary)?;
        }

        Ok(StepReport {
            time_index: run_time.time_index(),
            time: run_time.time(),
            delta_t,
            performances,
            continuity,
        })
    }

    fn snapshots(&self) -> MfResult<Vec<FieldSnapshot>> {
        Ok(vec![
            FieldSnapshot::from_vol(&self.u)?,
            FieldSnapshot::from_vol(&self.p)?,
            FieldSnapshot::from_surface(&self.phi),
        ])
    }
}
