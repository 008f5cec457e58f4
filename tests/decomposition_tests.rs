mod support;

use dissectrs::dissection::{
    bounds::AssemblyBounds,
    decomposition::{PieceId, decompose},
    scale::ScaleFactor,
    schedule::{Step, offset_for},
};
use dissectrs::errors::DissectionError;
use dissectrs::float_types::Real;
use nalgebra::{Point3, Vector3};
use support::{approx_eq, cell_centers, coverage, placed_boxes};

fn offsets(step: Step, k: Real) -> Vec<Vector3<Real>> {
    let scale = ScaleFactor::new(k).unwrap();
    PieceId::ALL.iter().map(|&id| offset_for(step, id, scale)).collect()
}

#[test]
fn cube_is_tiled_exactly_once() {
    let d = decompose(4.0).unwrap();
    let boxes = placed_boxes(&d, &offsets(Step::Cube, 4.0));
    let samples = cell_centers(Point3::origin(), Point3::new(12.0, 12.0, 12.0), 1.0);
    assert_eq!(samples.len(), 1728);
    for p in &samples {
        assert_eq!(coverage(&boxes, p), 1, "cube point {p:?}");
    }
    assert_eq!(d.volume(), 1728.0);
}

#[test]
fn prism_is_tiled_exactly_once() {
    let d = decompose(4.0).unwrap();
    let step_offsets = offsets(Step::Assembled, 4.0);
    let boxes = placed_boxes(&d, &step_offsets);

    let bounds = AssemblyBounds::compute(&d.pieces, &step_offsets);
    assert_eq!(bounds.min(), Point3::origin());
    assert_eq!(bounds.max(), Point3::new(27.0, 8.0, 8.0));

    for p in &cell_centers(Point3::origin(), Point3::new(27.0, 8.0, 8.0), 1.0) {
        assert_eq!(coverage(&boxes, p), 1, "prism point {p:?}");
    }
}

#[test]
fn first_slide_block_is_solid() {
    let d = decompose(4.0).unwrap();
    let boxes = placed_boxes(&d, &offsets(Step::FirstSlide, 4.0));
    for p in &cell_centers(Point3::origin(), Point3::new(18.0, 8.0, 12.0), 1.0) {
        assert_eq!(coverage(&boxes, p), 1, "block point {p:?}");
    }
}

#[test]
fn doubled_scale_scenario() {
    let scale = ScaleFactor::new(8.0).unwrap();
    let dims = scale.dimensions();
    assert_eq!(dims.cube_side, 24.0);
    assert_eq!(dims.prism_base, 16.0);
    assert_eq!(dims.prism_length, 54.0);
    assert_eq!(dims.cube_volume(), 13824.0);
    assert_eq!(dims.prism_volume(), 13824.0);

    let d = decompose(8.0).unwrap();
    assert!(approx_eq(d.volume(), 13824.0, 1e-9));
    let bounds = AssemblyBounds::compute(&d.pieces, &offsets(Step::Assembled, 8.0));
    assert_eq!(bounds.max(), Point3::new(54.0, 16.0, 16.0));
}

#[test]
fn piece_volumes_are_fixed_fractions() {
    let d = decompose(6.0).unwrap();
    let cube = 18.0 * 18.0 * 18.0;
    let fractions = [528.0, 336.0, 336.0, 528.0].map(|v: Real| v / 1728.0);
    for (piece, fraction) in d.pieces.iter().zip(fractions) {
        assert!(approx_eq(piece.volume(), cube * fraction, 1e-9));
    }
}

#[test]
fn boxes_of_a_piece_abut() {
    for k in [4.0, 3.3, 0.3, 7.1] {
        let d = decompose(k).unwrap();
        for piece in &d.pieces {
            for pair in piece.boxes.windows(2) {
                // consecutive boxes share an X face, bit for bit
                assert_eq!(pair[0].maxs.x, pair[1].mins.x, "{} at k={k}", piece.id);
            }
        }
    }
}

#[test]
fn invalid_inputs() {
    for k in [0.0, -0.5, Real::NAN, Real::INFINITY] {
        assert!(matches!(decompose(k), Err(DissectionError::InvalidParameter { .. })));
    }
    assert!(PieceId::new(7).is_err());
    assert!(Step::from_index(9).is_err());
}
