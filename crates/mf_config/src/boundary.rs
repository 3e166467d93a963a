// crates/mf_config/src/boundary.rs

//! 边界条件定义
//!
//! 每个 patch 一条规则，以 `"type"` 字段区分：
//!
//! ```json
//! {
//!     "movingWall":   { "type": "fixedValue", "value": [1, 0, 0] },
//!     "fixedWalls":   { "type": "fixedGradient", "gradient": [0, 0, 0] },
//!     "frontAndBack": { "type": "empty" }
//! }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个 patch 的边界规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoundaryRule {
    /// 固定值
    FixedValue {
        /// 每分量的值
        value: Vec<f64>,
    },
    /// 固定法向梯度
    FixedGradient {
        /// 每分量的梯度
        gradient: Vec<f64>,
    },
    /// 由计算结果给定，边界值不做物理约束
    Calculated,
    /// 空边界，边界值镜像 owner 单元值
    Empty,
}

impl BoundaryRule {
    /// 规则名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::FixedValue { .. } => "fixedValue",
            Self::FixedGradient { .. } => "fixedGradient",
            Self::Calculated => "calculated",
            Self::Empty => "empty",
        }
    }

    /// 零梯度
    pub fn zero_gradient(n_components: usize) -> Self {
        Self::FixedGradient {
            gradient: vec![0.0; n_components],
        }
    }

    /// 是否为固定值
    #[inline]
    pub fn is_fixed_value(&self) -> bool {
        matches!(self, Self::FixedValue { .. })
    }

    /// 是否为空边界
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 规则携带的分量数（calculated/empty 不携带）
    pub fn n_components(&self) -> Option<usize> {
        match self {
            Self::FixedValue { value } => Some(value.len()),
            Self::FixedGradient { gradient } => Some(gradient.len()),
            Self::Calculated | Self::Empty => None,
        }
    }
}

/// 场的边界定义：patch 名称到规则的映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryDefinition {
    rules: BTreeMap<String, BoundaryRule>,
}

impl BoundaryDefinition {
    /// 空定义
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加规则（构建器形式）
    pub fn with(mut self, patch: impl Into<String>, rule: BoundaryRule) -> Self {
        self.rules.insert(patch.into(), rule);
        self
    }

    /// 设置规则
    pub fn insert(&mut self, patch: impl Into<String>, rule: BoundaryRule) {
        self.rules.insert(patch.into(), rule);
    }

    /// 查找规则
    pub fn get(&self, patch: &str) -> Option<&BoundaryRule> {
        self.rules.get(patch)
    }

    /// 遍历
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BoundaryRule)> {
        self.rules.iter()
    }

    /// patch 数
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 是否有 fixedValue patch
    pub fn has_fixed_value(&self) -> bool {
        self.rules.values().any(BoundaryRule::is_fixed_value)
    }

    /// 派生结果的边界定义：empty 保留，其余为 calculated
    pub fn derived_calculated(&self) -> Self {
        self.map_non_empty(|| BoundaryRule::Calculated)
    }

    /// 零梯度边界定义：empty 保留，其余为零梯度
    pub fn zero_gradient(&self, n_components: usize) -> Self {
        self.map_non_empty(|| BoundaryRule::zero_gradient(n_components))
    }

    fn map_non_empty(&self, rule: impl Fn() -> BoundaryRule) -> Self {
        let rules = self
            .rules
            .iter()
            .map(|(name, r)| {
                let r = if r.is_empty() { BoundaryRule::Empty } else { rule() };
                (name.clone(), r)
            })
            .collect();
        Self { rules }
    }

    /// 校验规则携带的分量数
    pub fn validate_components(&self, key: &str, n_components: usize) -> Result<(), ConfigError> {
        for (patch, rule) in &self.rules {
            if let Some(n) = rule.n_components() {
                if n != n_components {
                    return Err(ConfigError::invalid(
                        format!("{key}.{patch}"),
                        n,
                        format!("{} 的分量数应为 {}", rule.type_name(), n_components),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cavity_u() -> BoundaryDefinition {
        BoundaryDefinition::new()
            .with("movingWall", BoundaryRule::FixedValue { value: vec![1.0, 0.0, 0.0] })
            .with("fixedWalls", BoundaryRule::FixedValue { value: vec![0.0; 3] })
            .with("frontAndBack", BoundaryRule::Empty)
    }

    #[test]
    fn test_parse_rules() {
        let json = r#"{
            "movingWall": {"type": "fixedValue", "value": [1, 0, 0]},
            "fixedWalls": {"type": "fixedValue", "value": [0, 0, 0]},
            "frontAndBack": {"type": "empty"}
        }"#;
        let def: BoundaryDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def, cavity_u());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"inlet": {"type": "totalPressure", "p0": 1}}"#;
        assert!(serde_json::from_str::<BoundaryDefinition>(json).is_err());
    }

    #[test]
    fn test_derived_definitions() {
        let def = cavity_u();
        let calc = def.derived_calculated();
        assert_eq!(calc.get("movingWall"), Some(&BoundaryRule::Calculated));
        assert_eq!(calc.get("frontAndBack"), Some(&BoundaryRule::Empty));

        let zg = def.zero_gradient(1);
        assert_eq!(zg.get("fixedWalls"), Some(&BoundaryRule::zero_gradient(1)));
        assert_eq!(zg.get("frontAndBack"), Some(&BoundaryRule::Empty));
        assert!(!zg.has_fixed_value());
        assert!(def.has_fixed_value());
    }

    #[test]
    fn test_component_validation() {
        let def = cavity_u();
        assert!(def.validate_components("fields.U.boundary", 3).is_ok());
        assert!(def.validate_components("fields.U.boundary", 1).is_err());
    }
}
