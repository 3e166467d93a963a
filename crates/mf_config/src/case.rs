// crates/mf_config/src/case.rs

//! 算例配置快照
//!
//! `CaseConfig` 是一次运行（或一个时间步）所使用的完整配置：场的初值与边界定义、
//! 输运系数、时间控制、格式选择和求解控制。快照创建后不再修改，
//! 热加载产生新的快照。
//!
//! # 文件格式（JSON）
//!
//! ```json
//! {
//!     "fields": {
//!         "U": { "internal": [0, 0, 0], "boundary": { "movingWall": { "type": "fixedValue", "value": [1, 0, 0] } } },
//!         "p": { "internal": [0], "boundary": { "movingWall": { "type": "fixedGradient", "gradient": [0] } } }
//!     },
//!     "transport": { "nu": 0.01 },
//!     "time": { "start_time": 0, "end_time": 0.5, "delta_t": 0.005, "write_interval": 0.1 },
//!     "schemes": { "ddt": "Euler", "div_convection": "upwind" },
//!     "solution": {
//!         "solvers": { "U": { "solver": "GaussSeidel" }, "p": { "solver": "GaussSeidel", "tolerance": 1e-5 } },
//!         "coupling": { "PISO": { "n_correctors": 3 } }
//!     },
//!     "run_time_modifiable": true
//! }
//! ```

use crate::boundary::BoundaryDefinition;
use crate::error::ConfigError;
use crate::schemes::FvSchemes;
use crate::solution::{FvSolution, SolverControls};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 单个场的初始化配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// 均匀初值（1 或 3 个分量）
    pub internal: Vec<f64>,
    /// 边界定义
    pub boundary: BoundaryDefinition,
}

impl FieldConfig {
    /// 分量数
    pub fn n_components(&self) -> usize {
        self.internal.len()
    }
}

/// 输运系数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportProperties {
    /// 运动粘度
    #[serde(default)]
    pub nu: Option<f64>,
    /// 标量扩散系数
    #[serde(default)]
    pub diffusivity: Option<f64>,
}

impl TransportProperties {
    /// 运动粘度
    pub fn nu(&self) -> Result<f64, ConfigError> {
        self.nu.ok_or_else(|| ConfigError::Missing("transport.nu".into()))
    }

    /// 标量扩散系数
    pub fn diffusivity(&self) -> Result<f64, ConfigError> {
        self.diffusivity
            .ok_or_else(|| ConfigError::Missing("transport.diffusivity".into()))
    }
}

/// 时间控制
///
/// 稳态算法以 `delta_t` 为伪时间步，`(end_time - start_time) / delta_t` 即外迭代次数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeControls {
    /// 开始时间
    #[serde(default)]
    pub start_time: f64,
    /// 结束时间
    pub end_time: f64,
    /// 时间步长
    pub delta_t: f64,
    /// 写出间隔（缺省仅在结束时写出）
    #[serde(default)]
    pub write_interval: Option<f64>,
}

impl TimeControls {
    /// 校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.delta_t > 0.0) {
            return Err(ConfigError::invalid("time.delta_t", self.delta_t, "时间步长必须为正"));
        }
        if self.end_time < self.start_time {
            return Err(ConfigError::invalid(
                "time.end_time",
                self.end_time,
                "结束时间早于开始时间",
            ));
        }
        if let Some(w) = self.write_interval {
            if !(w > 0.0) {
                return Err(ConfigError::invalid("time.write_interval", w, "写出间隔必须为正"));
            }
        }
        Ok(())
    }
}

/// 算例配置快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 场配置
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
    /// 输运系数
    #[serde(default)]
    pub transport: TransportProperties,
    /// 时间控制
    pub time: TimeControls,
    /// 格式选择
    #[serde(default)]
    pub schemes: FvSchemes,
    /// 求解控制
    #[serde(default)]
    pub solution: FvSolution,
    /// 是否在时间步之间检查配置文件更新
    #[serde(default)]
    pub run_time_modifiable: bool,
}

impl CaseConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// 从 JSON 字符串加载配置
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: CaseConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time.validate()?;
        self.schemes.validate()?;
        self.solution.validate()?;

        for (name, field) in &self.fields {
            let n = field.n_components();
            if n != 1 && n != 3 {
                return Err(ConfigError::invalid(
                    format!("fields.{name}.internal"),
                    n,
                    "仅支持标量（1）和矢量（3）场",
                ));
            }
            field
                .boundary
                .validate_components(&format!("fields.{name}.boundary"), n)?;
        }

        for (key, value) in [("transport.nu", self.transport.nu), ("transport.diffusivity", self.transport.diffusivity)] {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(ConfigError::invalid(key, v, "输运系数不能为负"));
                }
            }
        }
        Ok(())
    }

    /// 场配置
    pub fn field(&self, name: &str) -> Result<&FieldConfig, ConfigError> {
        self.fields
            .get(name)
            .ok_or_else(|| ConfigError::Missing(format!("fields.{name}")))
    }

    /// 场的求解控制
    pub fn solver_controls(&self, field: &str) -> Result<&SolverControls, ConfigError> {
        self.solution.controls(field)
    }

    /// 检查驱动器所需的场与求解控制均已配置
    pub fn require(&self, fields: &[&str]) -> Result<(), ConfigError> {
        for name in fields {
            self.field(name)?;
            self.solver_controls(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryRule;
    use crate::schemes::SchemeKind;
    use crate::solution::{CouplingAlgorithm, LinearSolverKind};

    const CAVITY: &str = r#"{
        "fields": {
            "U": {
                "internal": [0, 0, 0],
                "boundary": {
                    "movingWall": {"type": "fixedValue", "value": [1, 0, 0]},
                    "fixedWalls": {"type": "fixedValue", "value": [0, 0, 0]},
                    "frontAndBack": {"type": "empty"}
                }
            },
            "p": {
                "internal": [0],
                "boundary": {
                    "movingWall": {"type": "fixedGradient", "gradient": [0]},
                    "fixedWalls": {"type": "fixedGradient", "gradient": [0]},
                    "frontAndBack": {"type": "empty"}
                }
            }
        },
        "transport": {"nu": 0.01},
        "time": {"end_time": 0.5, "delta_t": 0.005, "write_interval": 0.1},
        "schemes": {"ddt": "Euler", "div_convection": "upwind", "laplacian": "linearOrthogonal"},
        "solution": {
            "solvers": {
                "U": {"solver": "GaussSeidel", "tolerance": 1e-6},
                "p": {"solver": "GaussSeidel", "tolerance": 1e-5, "ref_cell": 0, "ref_value": 0}
            },
            "coupling": {"PISO": {"n_correctors": 3}}
        }
    }"#;

    #[test]
    fn test_parse_cavity() {
        let case = CaseConfig::from_json_str(CAVITY).unwrap();
        assert_eq!(case.fields.len(), 2);
        assert_eq!(case.transport.nu().unwrap(), 0.01);
        assert_eq!(case.schemes.ddt, SchemeKind::Euler);
        assert_eq!(case.solution.coupling, CouplingAlgorithm::Piso { n_correctors: 3 });
        assert_eq!(
            case.solver_controls("p").unwrap().solver,
            LinearSolverKind::GaussSeidel
        );
        assert_eq!(
            case.field("U").unwrap().boundary.get("frontAndBack"),
            Some(&BoundaryRule::Empty)
        );
        assert!(case.require(&["U", "p"]).is_ok());
        assert!(case.require(&["T"]).is_err());
        assert!(!case.run_time_modifiable);
    }

    #[test]
    fn test_unknown_scheme_fails_at_load() {
        let bad = CAVITY.replace("\"upwind\"", "\"limitedLinear\"");
        assert!(matches!(CaseConfig::from_json_str(&bad), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_solver_fails_at_load() {
        let bad = CAVITY.replacen("\"GaussSeidel\"", "\"DIC\"", 1);
        assert!(CaseConfig::from_json_str(&bad).is_err());
    }

    #[test]
    fn test_bad_component_count() {
        let bad = CAVITY.replace("\"value\": [1, 0, 0]", "\"value\": [1, 0]");
        assert!(matches!(
            CaseConfig::from_json_str(&bad),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_bad_time_step() {
        let bad = CAVITY.replace("\"delta_t\": 0.005", "\"delta_t\": 0");
        assert!(CaseConfig::from_json_str(&bad).is_err());
    }

    #[test]
    fn test_missing_transport() {
        let case = CaseConfig::from_json_str(CAVITY).unwrap();
        assert!(matches!(
            case.transport.diffusivity(),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        let case = CaseConfig::from_json_str(CAVITY).unwrap();
        case.save_to_file(&path).unwrap();
        let loaded = CaseConfig::from_file(&path).unwrap();
        assert_eq!(loaded, case);
    }
}
