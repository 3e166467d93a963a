// crates/mf_physics/src/fields/surface_field.rs

//! 面场
//!
//! 每个面（内部面与边界面）一个值，主要用于体积通量 `φ = U_f · Sf`。
//! 边界定义只用于派生场（如 `div(φ)`）的边界规则，面值本身直接存储。

use super::vol_field::VolField;
use super::{check_same_mesh, FieldId};
use mf_config::BoundaryDefinition;
use mf_foundation::scalar::VECTOR_COMPONENTS;
use mf_foundation::{MfError, MfResult};
use mf_mesh::FvMesh;
use std::sync::Arc;

/// 面场
#[derive(Debug)]
pub struct SurfaceField {
    id: FieldId,
    mesh: Arc<FvMesh>,
    name: String,
    /// `[分量][面]`
    values: Vec<Vec<f64>>,
    definition: BoundaryDefinition,
}

impl SurfaceField {
    /// 全零面场
    pub fn zeros(
        mesh: Arc<FvMesh>,
        name: impl Into<String>,
        n_components: usize,
        definition: BoundaryDefinition,
    ) -> Self {
        let values = vec![vec![0.0; mesh.n_faces()]; n_components];
        Self::from_values(mesh, name, values, definition)
    }

    pub(crate) fn from_values(
        mesh: Arc<FvMesh>,
        name: impl Into<String>,
        values: Vec<Vec<f64>>,
        definition: BoundaryDefinition,
    ) -> Self {
        Self {
            id: FieldId::next(),
            mesh,
            name: name.into(),
            values,
            definition,
        }
    }

    /// 由速度场计算体积通量
    ///
    /// 内部面取反距离插值的面速度与 `Sf` 的点积，边界面取边界速度与 `Sf` 的点积。
    pub fn flux(u: &VolField) -> MfResult<SurfaceField> {
        MfError::check_components("flux", VECTOR_COMPONENTS, u.n_components())?;
        let mesh = u.mesh();
        let n_internal = mesh.n_internal_faces();
        let mut phi = vec![0.0; mesh.n_faces()];

        for (face, value) in phi.iter_mut().enumerate().take(n_internal) {
            let w = mesh.interpolation_weight(face);
            let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
            let sf = mesh.face_area(face);
            *value = (0..3)
                .map(|c| {
                    let uc = u.cell_values(c);
                    (w * uc[own] + (1.0 - w) * uc[nei]) * sf[c]
                })
                .sum();
        }
        for (face, value) in phi.iter_mut().enumerate().skip(n_internal) {
            let sf = mesh.face_area(face);
            let b = face - n_internal;
            *value = (0..3).map(|c| u.boundary_values(c)[b] * sf[c]).sum();
        }

        Ok(Self::from_values(
            Arc::clone(mesh),
            format!("phi({})", u.name()),
            vec![phi],
            u.definition().derived_calculated(),
        ))
    }

    /// 场标识
    #[inline]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// 名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 重命名
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 网格
    #[inline]
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 分量数
    #[inline]
    pub fn n_components(&self) -> usize {
        self.values.len()
    }

    /// 面值
    #[inline]
    pub fn values(&self, cmpt: usize) -> &[f64] {
        &self.values[cmpt]
    }

    /// 可变面值
    #[inline]
    pub fn values_mut(&mut self, cmpt: usize) -> &mut [f64] {
        &mut self.values[cmpt]
    }

    /// 边界定义
    #[inline]
    pub fn definition(&self) -> &BoundaryDefinition {
        &self.definition
    }

    fn zip_with(
        &self,
        operation: &'static str,
        other: &SurfaceField,
        name: String,
        op: impl Fn(f64, f64) -> f64,
    ) -> MfResult<SurfaceField> {
        check_same_mesh(operation, &self.mesh, &other.mesh)?;
        MfError::check_components(operation, self.n_components(), other.n_components())?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a.iter().zip(b).map(|(&x, &y)| op(x, y)).collect())
            .collect();
        Ok(Self::from_values(
            Arc::clone(&self.mesh),
            name,
            values,
            self.definition.derived_calculated(),
        ))
    }

    /// 逐面相加
    pub fn add(&self, other: &SurfaceField) -> MfResult<SurfaceField> {
        self.zip_with("add", other, format!("({}+{})", self.name, other.name), |a, b| a + b)
    }

    /// 逐面相减
    pub fn subtract(&self, other: &SurfaceField) -> MfResult<SurfaceField> {
        self.zip_with("subtract", other, format!("({}-{})", self.name, other.name), |a, b| a - b)
    }

    /// 取反
    pub fn negate(&self) -> SurfaceField {
        let values = self
            .values
            .iter()
            .map(|v| v.iter().map(|x| -x).collect())
            .collect();
        Self::from_values(
            Arc::clone(&self.mesh),
            format!("-{}", self.name),
            values,
            self.definition.derived_calculated(),
        )
    }

    /// 用另一个面场的值替换本场的值，保留标识与名称
    pub fn assign(&mut self, other: &SurfaceField) -> MfResult<()> {
        check_same_mesh("assign", &self.mesh, &other.mesh)?;
        MfError::check_components("assign", self.n_components(), other.n_components())?;
        for (dst, src) in self.values.iter_mut().zip(&other.values) {
            dst.copy_from_slice(src);
        }
        Ok(())
    }

    /// 通量散度，见 [`VolField::divergence`]
    pub fn divergence(&self) -> MfResult<VolField> {
        VolField::divergence(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_config::BoundaryRule;
    use mf_mesh::{BoxMeshGenerator, BoxSide, PatchType};

    fn mesh() -> Arc<FvMesh> {
        Arc::new(
            BoxMeshGenerator::new(4, 2, 1, 4.0, 2.0, 1.0)
                .patch("inlet", PatchType::Patch, &[BoxSide::XMin])
                .patch("outlet", PatchType::Patch, &[BoxSide::XMax])
                .patch("walls", PatchType::Wall, &[BoxSide::YMin, BoxSide::YMax])
                .patch("frontAndBack", PatchType::Empty, &[BoxSide::ZMin, BoxSide::ZMax])
                .build()
                .unwrap(),
        )
    }

    fn plug_flow(mesh: &Arc<FvMesh>) -> VolField {
        let def = BoundaryDefinition::new()
            .with("inlet", BoundaryRule::FixedValue { value: vec![1.0, 0.0, 0.0] })
            .with("outlet", BoundaryRule::zero_gradient(3))
            .with("walls", BoundaryRule::FixedValue { value: vec![1.0, 0.0, 0.0] })
            .with("frontAndBack", BoundaryRule::Empty);
        VolField::initialize(mesh.clone(), "U", def, &[1.0, 0.0, 0.0]).unwrap()
    }

    #[test]
    fn test_uniform_flux_is_divergence_free() {
        let mesh = mesh();
        let u = plug_flow(&mesh);
        let phi = SurfaceField::flux(&u).unwrap();

        // 单位速度穿过单位面积
        let inlet = mesh.patch_by_name("inlet").unwrap();
        for face in inlet.faces() {
            assert!((phi.values(0)[face] + 1.0).abs() < 1e-14);
        }
        let div = phi.divergence().unwrap();
        assert!(div.cell_values(0).iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_flux_requires_vector() {
        let mesh = mesh();
        let def = BoundaryDefinition::new()
            .with("inlet", BoundaryRule::Calculated)
            .with("outlet", BoundaryRule::Calculated)
            .with("walls", BoundaryRule::Calculated)
            .with("frontAndBack", BoundaryRule::Empty);
        let p = VolField::initialize(mesh, "p", def, &[1.0]).unwrap();
        assert!(matches!(
            SurfaceField::flux(&p),
            Err(MfError::ComponentMismatch { .. })
        ));
    }

    #[test]
    fn test_subtract_and_negate() {
        let mesh = mesh();
        let u = plug_flow(&mesh);
        let phi = SurfaceField::flux(&u).unwrap();
        let zero = phi.add(&phi.negate()).unwrap();
        assert!(zero.values(0).iter().all(|&v| v == 0.0));
        let same = phi.subtract(&zero).unwrap();
        assert_eq!(same.values(0), phi.values(0));
    }

    #[test]
    fn test_divergence_of_source_flux() {
        let mesh = mesh();
        let mut phi = SurfaceField::zeros(mesh.clone(), "phi", 1, BoundaryDefinition::new()
            .with("inlet", BoundaryRule::Calculated)
            .with("outlet", BoundaryRule::Calculated)
            .with("walls", BoundaryRule::Calculated)
            .with("frontAndBack", BoundaryRule::Empty));
        // 第一个内部面：owner 流出 1，neighbour 流入 1
        let own = mesh.owner(0);
        let nei = mesh.neighbour(0);
        phi.values_mut(0)[0] = 1.0;
        let div = VolField::divergence(&phi).unwrap();
        assert!((div.cell_values(0)[own] - 1.0 / mesh.cell_volume(own)).abs() < 1e-14);
        assert!((div.cell_values(0)[nei] + 1.0 / mesh.cell_volume(nei)).abs() < 1e-14);
    }
}
