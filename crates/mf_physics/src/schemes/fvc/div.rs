// crates/mf_physics/src/schemes/fvc/div.rs

//! 显式散度（线性插值）

use crate::fields::VolField;
use crate::matrix::FvMatrix;
use crate::schemes::{check_scheme, OperatorKind, SchemeKind};
use mf_foundation::scalar::{SCALAR_COMPONENTS, VECTOR_COMPONENTS};
use mf_foundation::{MfError, MfResult};
use std::sync::Arc;

/// 显式散度 `∇·field × V`，结果以 `psi`（标量）为未知量
///
/// 内部面将矢量场反距离插值后与 `Sf` 点积，owner 加、neighbour 减；
/// 所有边界面（含 empty）将边界值与 `Sf` 点积加到 owner。
pub fn div(psi: &VolField, scheme: SchemeKind, field: &VolField) -> MfResult<FvMatrix> {
    check_scheme(OperatorKind::Div, scheme, false)?;
    if !Arc::ptr_eq(psi.mesh(), field.mesh()) {
        return Err(MfError::mesh_mismatch("div"));
    }
    MfError::check_components("div", VECTOR_COMPONENTS, field.n_components())?;
    MfError::check_components("div", SCALAR_COMPONENTS, psi.n_components())?;

    let mesh = Arc::clone(psi.mesh());
    let mut m = FvMatrix::zeros(psi);
    let source = m.source_mut(0);

    for face in 0..mesh.n_internal_faces() {
        let w = mesh.interpolation_weight(face);
        let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
        let sf = mesh.face_area(face);
        let flux: f64 = (0..3)
            .map(|c| {
                let x = field.cell_values(c);
                (w * x[own] + (1.0 - w) * x[nei]) * sf[c]
            })
            .sum();
        source[own] += flux;
        source[nei] -= flux;
    }
    for face in mesh.n_internal_faces()..mesh.n_faces() {
        let sf = mesh.face_area(face);
        let flux: f64 = (0..3).map(|c| field.boundary_face_value(c, face) * sf[c]).sum();
        source[mesh.owner(face)] += flux;
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_config::{BoundaryDefinition, BoundaryRule};
    use mf_mesh::{BoxMeshGenerator, BoxSide, FvMesh, PatchType};

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

    #[test]
    fn test_divergence_of_linear_velocity() {
        let mesh = mesh();
        let def = BoundaryDefinition::new()
            .with("inlet", BoundaryRule::Calculated)
            .with("outlet", BoundaryRule::Calculated)
            .with("walls", BoundaryRule::Calculated)
            .with("frontAndBack", BoundaryRule::Empty);
        let p = VolField::initialize(
            mesh.clone(),
            "p",
            BoundaryDefinition::new()
                .with("inlet", BoundaryRule::zero_gradient(1))
                .with("outlet", BoundaryRule::zero_gradient(1))
                .with("walls", BoundaryRule::zero_gradient(1))
                .with("frontAndBack", BoundaryRule::Empty),
            &[0.0],
        )
        .unwrap();

        // u = (x, 0, 0)，边界值取面上的精确值
        let n_internal = mesh.n_internal_faces();
        let cells = vec![
            (0..mesh.n_cells()).map(|i| mesh.cell_centre(i).x).collect(),
            vec![0.0; mesh.n_cells()],
            vec![0.0; mesh.n_cells()],
        ];
        let boundary = vec![
            (n_internal..mesh.n_faces())
                .map(|f| {
                    if mesh.face_area(f).z != 0.0 {
                        mesh.cell_centre(mesh.owner(f)).x
                    } else {
                        mesh.face_centre(f).x
                    }
                })
                .collect(),
            vec![0.0; mesh.n_boundary_faces()],
            vec![0.0; mesh.n_boundary_faces()],
        ];
        let u = VolField::from_parts(mesh.clone(), "U", cells, boundary, def);

        let m = div(&p, SchemeKind::Linear, &u).unwrap();
        for i in 0..mesh.n_cells() {
            assert!((m.source(0)[i] - mesh.cell_volume(i)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_requires_vector_field() {
        let mesh = mesh();
        let def = BoundaryDefinition::new()
            .with("inlet", BoundaryRule::zero_gradient(1))
            .with("outlet", BoundaryRule::zero_gradient(1))
            .with("walls", BoundaryRule::zero_gradient(1))
            .with("frontAndBack", BoundaryRule::Empty);
        let p = VolField::initialize(mesh, "p", def, &[1.0]).unwrap();
        assert!(matches!(
            div(&p, SchemeKind::Linear, &p),
            Err(MfError::ComponentMismatch { .. })
        ));
        assert!(div(&p, SchemeKind::Upwind, &p).is_err());
    }
}
