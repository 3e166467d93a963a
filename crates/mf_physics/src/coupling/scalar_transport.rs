// crates/mf_physics/src/coupling/scalar_transport.rs

//! 标量扩散：`ddt(T) − laplacian(DT, T) == 0`

use super::run_time::RunTime;
use super::{SegregatedSolver, StepReport};
use crate::fields::{FieldSnapshot, VolField};
use crate::schemes::{fvm, Diffusivity};
use mf_config::CaseConfig;
use mf_foundation::MfResult;
use mf_mesh::FvMesh;
use std::sync::Arc;

/// 标量扩散求解器
///
/// 写出时附带 `grad(T)`。
#[derive(Debug)]
pub struct ScalarTransportSolver {
    t: VolField,
}

impl ScalarTransportSolver {
    /// 按配置初始化 `T`
    pub fn new(mesh: Arc<FvMesh>, case: &CaseConfig) -> MfResult<Self> {
        case.require(&["T"])?;
        case.transport.diffusivity()?;
        let t = VolField::from_config(mesh, "T", case.field("T")?)?;
        Ok(Self { t })
    }

    /// 标量场
    pub fn field(&self) -> &VolField {
        &self.t
    }
}

impl SegregatedSolver for ScalarTransportSolver {
    fn name(&self) -> &'static str {
        "ScalarTransportSolver"
    }

    fn step(&mut self, case: &CaseConfig, run_time: &RunTime) -> MfResult<StepReport> {
        let diffusivity = case.transport.diffusivity()?;
        let controls = case.solver_controls("T")?;

        let t_eqn = fvm::ddt(&self.t, case.schemes.ddt, run_time.delta_t())?.subtract(
            &fvm::laplacian(&self.t, case.schemes.laplacian, Diffusivity::Uniform(diffusivity))?,
        )?;
        let performances = t_eqn.solve(&mut self.t, controls)?;
        self.t.set_boundary_values(&case.field("T")?.boundary)?;

        Ok(StepReport {
            time_index: run_time.time_index(),
            time: run_time.time(),
            delta_t: run_time.delta_t(),
            performances,
            continuity: None,
        })
    }

    fn snapshots(&self) -> MfResult<Vec<FieldSnapshot>> {
        Ok(vec![
            FieldSnapshot::from_vol(&self.t)?,
            FieldSnapshot::from_vol(&self.t.grad()?)?,
        ])
    }
}
