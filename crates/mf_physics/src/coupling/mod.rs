// crates/mf_physics/src/coupling/mod.rs

//! 分离式求解控制循环
//!
//! [`run`] 驱动一个 [`SegregatedSolver`]：先写出起始时刻的场，然后每个时间步
//! 开始时从 [`CaseSource`] 取配置快照并更新时间控制，推进一步，按写出时刻把场快照
//! 交给 [`FieldWriter`]。
//!
//! - [`PressureVelocitySolver`]: 不可压缩 PISO（瞬态）/ SIMPLE（稳态）
//! - [`ScalarTransportSolver`]: 标量扩散
//!
//! # 使用示例
//!
//! ```ignore
//! use mf_physics::coupling::{run, PressureVelocitySolver};
//!
//! let mut watcher = CaseWatcher::open("cavity.json")?;
//! let mut solver = PressureVelocitySolver::new(mesh, &watcher.current())?;
//! let summary = run(&mut solver, &mut watcher, &mut JsonDirWriter::new("output"))?;
//! ```

pub mod continuity;
pub mod pressure_velocity;
pub mod run_time;
pub mod scalar_transport;

pub use continuity::ContinuityErrors;
pub use pressure_velocity::{constrain_hbya, PressureVelocitySolver};
pub use run_time::RunTime;
pub use scalar_transport::ScalarTransportSolver;

use crate::fields::{FieldSnapshot, FieldWriter};
use crate::solvers::SolverPerformance;
use mf_config::{CaseConfig, CaseSource};
use mf_foundation::MfResult;
use serde::Serialize;

/// 单步报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 步号（从 1 开始）
    pub time_index: usize,
    /// 步末时间
    pub time: f64,
    /// 实际步长
    pub delta_t: f64,
    /// 本步全部线性求解的报告
    pub performances: Vec<SolverPerformance>,
    /// 最后一次压力修正后的连续性误差
    pub continuity: Option<ContinuityErrors>,
}

impl StepReport {
    /// 某个场（含分量后缀）最后一次求解的报告
    pub fn last_solve(&self, field: &str) -> Option<&SolverPerformance> {
        self.performances.iter().rev().find(|p| p.field == field)
    }
}

/// 运行汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// 步数
    pub steps: usize,
    /// 写出次数（含起始时刻）
    pub writes: usize,
    /// 结束时间
    pub final_time: f64,
    /// 各步报告
    pub reports: Vec<StepReport>,
}

/// 分离式求解器
pub trait SegregatedSolver {
    /// 求解器名称
    fn name(&self) -> &'static str;

    /// 以给定配置快照推进一步，`run_time` 已推进到步末
    fn step(&mut self, case: &CaseConfig, run_time: &RunTime) -> MfResult<StepReport>;

    /// 写出用的场快照
    fn snapshots(&self) -> MfResult<Vec<FieldSnapshot>>;
}

/// 运行至结束时间
pub fn run(
    solver: &mut dyn SegregatedSolver,
    source: &mut dyn CaseSource,
    writer: &mut dyn FieldWriter,
) -> MfResult<RunSummary> {
    let case = source.snapshot()?;
    let mut run_time = RunTime::new(&case.time);
    let mut summary = RunSummary {
        final_time: run_time.time(),
        ..Default::default()
    };
    log::info!("{}: 开始运行，endTime = {}", solver.name(), run_time.end_time());

    writer.write(run_time.time(), &solver.snapshots()?)?;
    summary.writes += 1;

    while !run_time.finished() {
        let case = source.snapshot()?;
        run_time.update_controls(&case.time);
        if run_time.finished() {
            break;
        }
        run_time.advance();
        log::info!("Time = {}", run_time.time());

        let report = solver.step(&case, &run_time)?;
        if run_time.write_due() {
            writer.write(run_time.time(), &solver.snapshots()?)?;
            summary.writes += 1;
        }
        summary.steps += 1;
        summary.reports.push(report);
    }

    summary.final_time = run_time.time();
    log::info!(
        "{}: 结束，共 {} 步，写出 {} 次",
        solver.name(),
        summary.steps,
        summary.writes
    );
    Ok(summary)
}
