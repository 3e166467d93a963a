// crates/mf_physics/src/coupling/run_time.rs

//! 时间控制
//!
//! 推进到结束时间为止，最后一步截断到恰好落在结束时间上。
//! 写出时刻按 `start + k·interval` 递推，结束时总会写出一次。
//! 稳态算法沿用同一循环，时间步长即伪时间步。

use mf_config::TimeControls;
use mf_foundation::Tolerance;

/// 运行时间状态
#[derive(Debug, Clone)]
pub struct RunTime {
    time: f64,
    end_time: f64,
    delta_t: f64,
    /// 最近一步实际使用的步长
    last_delta_t: f64,
    write_interval: Option<f64>,
    next_write: f64,
    time_index: usize,
    tol: Tolerance,
}

impl RunTime {
    /// 从时间控制创建
    pub fn new(controls: &TimeControls) -> Self {
        let next_write = controls
            .write_interval
            .map_or(f64::INFINITY, |w| controls.start_time + w);
        Self {
            time: controls.start_time,
            end_time: controls.end_time,
            delta_t: controls.delta_t,
            last_delta_t: controls.delta_t,
            write_interval: controls.write_interval,
            next_write,
            time_index: 0,
            tol: Tolerance::default(),
        }
    }

    /// 当前时间
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// 结束时间
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// 最近一步的步长（截断后）
    #[inline]
    pub fn delta_t(&self) -> f64 {
        self.last_delta_t
    }

    /// 已完成的步数
    #[inline]
    pub fn time_index(&self) -> usize {
        self.time_index
    }

    /// 是否已到达结束时间
    #[inline]
    pub fn finished(&self) -> bool {
        self.tol.time_reached(self.time, self.end_time)
    }

    /// 推进一步，返回实际步长
    pub fn advance(&mut self) -> f64 {
        let dt = self.delta_t.min(self.end_time - self.time);
        self.time += dt;
        self.last_delta_t = dt;
        self.time_index += 1;
        dt
    }

    /// 当前时刻是否写出
    ///
    /// 每步调用一次；到达写出时刻后推进下一个写出时刻。
    pub fn write_due(&mut self) -> bool {
        let mut due = false;
        if let Some(interval) = self.write_interval {
            while self.tol.write_due(self.time, self.next_write) {
                self.next_write += interval;
                due = true;
            }
        }
        due || self.finished()
    }

    /// 采用新快照中的时间控制
    ///
    /// 开始时间不变；写出间隔变化时下一个写出时刻从当前时间重新计算。
    pub fn update_controls(&mut self, controls: &TimeControls) {
        if controls.delta_t != self.delta_t || controls.end_time != self.end_time {
            log::info!(
                "时间控制更新: deltaT {} -> {}, endTime {} -> {}",
                self.delta_t,
                controls.delta_t,
                self.end_time,
                controls.end_time
            );
        }
        self.delta_t = controls.delta_t;
        self.end_time = controls.end_time;
        if controls.write_interval != self.write_interval {
            self.write_interval = controls.write_interval;
            self.next_write = controls
                .write_interval
                .map_or(f64::INFINITY, |w| self.time + w);
        }
    }
}
