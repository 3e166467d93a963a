// crates/mf_config/src/schemes.rs

//! 离散算子与格式选择
//!
//! 算子名称与格式名称在加载时解析为枚举标签，未知名称或不兼容的
//! 算子/格式组合在加载阶段即报错，而不是在使用时静默跳过。
//!
//! | 算子 | 隐式 (fvm) | 显式 (fvc) |
//! |------|-----------|-----------|
//! | ddt | Euler, steadyState | - |
//! | div | upwind | linear |
//! | laplacian | linearOrthogonal | - |
//! | grad | - | linear |

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 离散算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorKind {
    /// 时间导数
    Ddt,
    /// 散度
    Div,
    /// 拉普拉斯
    Laplacian,
    /// 梯度
    Grad,
}

impl OperatorKind {
    /// 算子名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ddt => "ddt",
            Self::Div => "div",
            Self::Laplacian => "laplacian",
            Self::Grad => "grad",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ddt" => Ok(Self::Ddt),
            "div" => Ok(Self::Div),
            "laplacian" => Ok(Self::Laplacian),
            "grad" => Ok(Self::Grad),
            other => Err(ConfigError::UnknownName {
                category: "离散算子",
                name: other.to_string(),
            }),
        }
    }
}

/// 离散格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeKind {
    /// 一阶隐式 Euler 时间格式
    #[serde(rename = "Euler")]
    Euler,
    /// 稳态（时间项为零）
    #[serde(rename = "steadyState")]
    SteadyState,
    /// 迎风
    #[serde(rename = "upwind")]
    Upwind,
    /// 线性插值
    #[serde(rename = "linear")]
    Linear,
    /// 正交网格线性拉普拉斯
    #[serde(rename = "linearOrthogonal")]
    LinearOrthogonal,
}

impl SchemeKind {
    /// 格式名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euler => "Euler",
            Self::SteadyState => "steadyState",
            Self::Upwind => "upwind",
            Self::Linear => "linear",
            Self::LinearOrthogonal => "linearOrthogonal",
        }
    }

    /// 该格式能否用于给定算子的隐式（`implicit = true`）或显式离散
    pub fn supports(&self, operator: OperatorKind, implicit: bool) -> bool {
        use OperatorKind::*;
        use SchemeKind::*;
        matches!(
            (operator, *self, implicit),
            (Ddt, Euler | SteadyState, true)
                | (Div, Upwind, true)
                | (Div, Linear, false)
                | (Laplacian, LinearOrthogonal, true)
                | (Grad, Linear, false)
        )
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Euler" => Ok(Self::Euler),
            "steadyState" => Ok(Self::SteadyState),
            "upwind" => Ok(Self::Upwind),
            "linear" => Ok(Self::Linear),
            "linearOrthogonal" => Ok(Self::LinearOrthogonal),
            other => Err(ConfigError::UnknownName {
                category: "离散格式",
                name: other.to_string(),
            }),
        }
    }
}

/// 各项的格式选择
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FvSchemes {
    /// 时间项
    #[serde(default = "default_ddt")]
    pub ddt: SchemeKind,
    /// 对流项（隐式）
    #[serde(default = "default_div_convection")]
    pub div_convection: SchemeKind,
    /// 扩散项
    #[serde(default = "default_laplacian")]
    pub laplacian: SchemeKind,
    /// 压力梯度（显式）
    #[serde(default = "default_grad")]
    pub grad_pressure: SchemeKind,
    /// HbyA 散度（显式）
    #[serde(default = "default_div_hbya")]
    pub div_hbya: SchemeKind,
}

fn default_ddt() -> SchemeKind { SchemeKind::Euler }
fn default_div_convection() -> SchemeKind { SchemeKind::Upwind }
fn default_laplacian() -> SchemeKind { SchemeKind::LinearOrthogonal }
fn default_grad() -> SchemeKind { SchemeKind::Linear }
fn default_div_hbya() -> SchemeKind { SchemeKind::Linear }

impl Default for FvSchemes {
    fn default() -> Self {
        Self {
            ddt: default_ddt(),
            div_convection: default_div_convection(),
            laplacian: default_laplacian(),
            grad_pressure: default_grad(),
            div_hbya: default_div_hbya(),
        }
    }
}

impl FvSchemes {
    /// 稳态格式组合
    pub fn steady() -> Self {
        Self {
            ddt: SchemeKind::SteadyState,
            ..Default::default()
        }
    }

    /// 校验每一项的算子/格式组合
    pub fn validate(&self) -> Result<(), ConfigError> {
        let terms = [
            ("schemes.ddt", OperatorKind::Ddt, self.ddt, true),
            ("schemes.div_convection", OperatorKind::Div, self.div_convection, true),
            ("schemes.laplacian", OperatorKind::Laplacian, self.laplacian, true),
            ("schemes.grad_pressure", OperatorKind::Grad, self.grad_pressure, false),
            ("schemes.div_hbya", OperatorKind::Div, self.div_hbya, false),
        ];
        for (key, operator, scheme, implicit) in terms {
            if !scheme.supports(operator, implicit) {
                return Err(ConfigError::invalid(
                    key,
                    scheme,
                    format!(
                        "格式不适用于{}算子 {}",
                        if implicit { "隐式" } else { "显式" },
                        operator
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("Euler".parse::<SchemeKind>().unwrap(), SchemeKind::Euler);
        assert_eq!(
            "linearOrthogonal".parse::<SchemeKind>().unwrap(),
            SchemeKind::LinearOrthogonal
        );
        assert_eq!("grad".parse::<OperatorKind>().unwrap(), OperatorKind::Grad);
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert!(matches!(
            "QUICK".parse::<SchemeKind>(),
            Err(ConfigError::UnknownName { .. })
        ));
        assert!("curl".parse::<OperatorKind>().is_err());
    }

    #[test]
    fn test_support_table() {
        assert!(SchemeKind::Upwind.supports(OperatorKind::Div, true));
        assert!(!SchemeKind::Upwind.supports(OperatorKind::Div, false));
        assert!(SchemeKind::Linear.supports(OperatorKind::Grad, false));
        assert!(!SchemeKind::Euler.supports(OperatorKind::Laplacian, true));
    }

    #[test]
    fn test_validate_rejects_incompatible() {
        let mut schemes = FvSchemes::default();
        assert!(schemes.validate().is_ok());
        schemes.ddt = SchemeKind::Upwind;
        assert!(schemes.validate().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SchemeKind::SteadyState).unwrap();
        assert_eq!(json, "\"steadyState\"");
        let s: FvSchemes = serde_json::from_str(r#"{"ddt": "steadyState"}"#).unwrap();
        assert_eq!(s, FvSchemes::steady());
        assert!(serde_json::from_str::<FvSchemes>(r#"{"ddt": "CrankNicolson"}"#).is_err());
    }
}
