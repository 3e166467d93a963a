// crates/mf_config/src/solution.rs

//! 线性求解器与压力-速度耦合控制

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 线性求解器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinearSolverKind {
    /// Gauss-Seidel（原位更新）
    GaussSeidel,
    /// Point-Jacobi（基于上一轮值）
    PointJacobi,
}

impl LinearSolverKind {
    /// 求解器名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::GaussSeidel => "GaussSeidel",
            Self::PointJacobi => "PointJacobi",
        }
    }
}

impl fmt::Display for LinearSolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinearSolverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GaussSeidel" => Ok(Self::GaussSeidel),
            "PointJacobi" => Ok(Self::PointJacobi),
            other => Err(ConfigError::UnknownName {
                category: "线性求解器",
                name: other.to_string(),
            }),
        }
    }
}

/// 单个方程的求解控制
///
/// `solver` 没有默认值，缺失时加载失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverControls {
    /// 求解器
    pub solver: LinearSolverKind,
    /// 最大迭代次数（缺省为不限）
    #[serde(default)]
    pub max_iter: Option<usize>,
    /// 最小迭代次数
    #[serde(default)]
    pub min_iter: usize,
    /// 绝对残差容差
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// 相对残差容差（0 表示不使用）
    #[serde(default)]
    pub rel_tol: f64,
    /// 隐式（矩阵）松弛因子
    #[serde(default)]
    pub implicit_relaxation: Option<f64>,
    /// 显式（场）松弛因子
    #[serde(default)]
    pub explicit_relaxation: Option<f64>,
    /// 参考单元
    #[serde(default)]
    pub ref_cell: usize,
    /// 参考值
    #[serde(default)]
    pub ref_value: f64,
}

fn default_tolerance() -> f64 { 1e-6 }

impl SolverControls {
    /// 以缺省选项创建
    pub fn new(solver: LinearSolverKind) -> Self {
        Self {
            solver,
            max_iter: None,
            min_iter: 0,
            tolerance: default_tolerance(),
            rel_tol: 0.0,
            implicit_relaxation: None,
            explicit_relaxation: None,
            ref_cell: 0,
            ref_value: 0.0,
        }
    }

    /// 设置绝对容差
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 设置相对容差
    pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    /// 设置迭代次数范围
    pub fn with_iterations(mut self, min_iter: usize, max_iter: usize) -> Self {
        self.min_iter = min_iter;
        self.max_iter = Some(max_iter);
        self
    }

    /// 设置松弛因子
    pub fn with_relaxation(mut self, implicit: Option<f64>, explicit: Option<f64>) -> Self {
        self.implicit_relaxation = implicit;
        self.explicit_relaxation = explicit;
        self
    }

    /// 实际使用的最大迭代次数
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iter.unwrap_or(usize::MAX)
    }

    /// 隐式松弛因子（缺省 1）
    #[inline]
    pub fn implicit_factor(&self) -> f64 {
        self.implicit_relaxation.unwrap_or(1.0)
    }

    /// 显式松弛因子（缺省 1）
    #[inline]
    pub fn explicit_factor(&self) -> f64 {
        self.explicit_relaxation.unwrap_or(1.0)
    }

    /// 残差是否满足收敛判据
    #[inline]
    pub fn converged(&self, residual: f64, initial_residual: f64) -> bool {
        residual <= self.tolerance
            || (self.rel_tol > 0.0 && residual <= self.rel_tol * initial_residual)
    }

    /// 校验
    pub fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if self.tolerance < 0.0 {
            return Err(ConfigError::invalid(
                format!("{key}.tolerance"),
                self.tolerance,
                "容差不能为负",
            ));
        }
        if self.rel_tol < 0.0 {
            return Err(ConfigError::invalid(
                format!("{key}.rel_tol"),
                self.rel_tol,
                "相对容差不能为负",
            ));
        }
        if let Some(max_iter) = self.max_iter {
            if max_iter < self.min_iter {
                return Err(ConfigError::invalid(
                    format!("{key}.max_iter"),
                    max_iter,
                    "最大迭代次数小于最小迭代次数",
                ));
            }
        }
        for (name, factor) in [
            ("implicit_relaxation", self.implicit_relaxation),
            ("explicit_relaxation", self.explicit_relaxation),
        ] {
            if let Some(f) = factor {
                if f <= 0.0 || f > 1.0 {
                    return Err(ConfigError::invalid(
                        format!("{key}.{name}"),
                        f,
                        "松弛因子必须在 (0, 1] 范围内",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// 压力-速度耦合算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouplingAlgorithm {
    /// 瞬态 PISO，每个时间步固定次数的压力修正
    #[serde(rename = "PISO")]
    Piso {
        /// 压力修正次数
        #[serde(default = "default_n_correctors")]
        n_correctors: usize,
    },
    /// 稳态 SIMPLE，每次外迭代一次压力修正
    #[serde(rename = "SIMPLE")]
    Simple,
}

fn default_n_correctors() -> usize { 2 }

impl Default for CouplingAlgorithm {
    fn default() -> Self {
        Self::Piso {
            n_correctors: default_n_correctors(),
        }
    }
}

impl CouplingAlgorithm {
    /// 每步压力修正次数
    pub fn n_correctors(&self) -> usize {
        match self {
            Self::Piso { n_correctors } => *n_correctors,
            Self::Simple => 1,
        }
    }

    /// 是否为稳态算法
    pub fn is_steady(&self) -> bool {
        matches!(self, Self::Simple)
    }
}

/// 求解控制集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FvSolution {
    /// 按场名索引的求解控制
    #[serde(default)]
    pub solvers: BTreeMap<String, SolverControls>,
    /// 耦合算法
    #[serde(default)]
    pub coupling: CouplingAlgorithm,
}

impl FvSolution {
    /// 获取场的求解控制
    pub fn controls(&self, field: &str) -> Result<&SolverControls, ConfigError> {
        self.solvers
            .get(field)
            .ok_or_else(|| ConfigError::Missing(format!("solution.solvers.{field}")))
    }

    /// 校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, controls) in &self.solvers {
            controls.validate(&format!("solution.solvers.{name}"))?;
        }
        if self.coupling.n_correctors() == 0 {
            return Err(ConfigError::invalid(
                "solution.coupling.n_correctors",
                0,
                "压力修正次数至少为 1",
            ));
        }
        Ok(())
    }
}
