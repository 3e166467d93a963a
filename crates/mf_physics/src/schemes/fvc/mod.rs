// crates/mf_physics/src/schemes/fvc/mod.rs

//! 显式离散算子
//!
//! 结果只有源项，值为 `算子 × V`，系数全零。结果系统的未知量是调用方给定的 `psi`，
//! 分量数由算子决定，必须与 `psi` 一致才能与 `psi` 的隐式系统组合。

pub(crate) mod div;
pub(crate) mod grad;

pub use div::div;
pub use grad::grad;
