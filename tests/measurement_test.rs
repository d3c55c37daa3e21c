//! Angle geometry and measurement strategy tests


use shoulder_goniometer::{
    frame_loop::{measure, MeasurementSettings},
    geometry::{calculate_angle, Point2D},
    landmarks::Side,
    measurement::{MeasurementKind, NoDetection},
};
use test_helpers::arm_landmarks;

const TOLERANCE: f64 = 1e-6;

fn closed_form(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    ((c.1 - b.1).atan2(c.0 - b.0) - (a.1 - b.1).atan2(a.0 - b.0)).to_degrees()
}

#[test]
fn test_mirror_negates_concrete_triples() {
    // Both rays on the same side of the horizontal through b
    let triples = [
        ((0.0, 0.0), (1.0, 0.0), (1.0, 1.0)),
        ((0.6, 0.5), (0.5, 0.5), (0.5, 0.8)),
        ((0.7, 0.6), (0.5, 0.5), (0.52, 0.85)),
        ((0.2, 0.3), (0.4, 0.2), (0.35, 0.9)),
    ];

    for (a, b, c) in triples {
        let (a, b, c) = (Point2D::from(a), Point2D::from(b), Point2D::from(c));
        let plain = calculate_angle(a, b, c, false);
        let mirrored = calculate_angle(a, b, c, true);
        assert!(
            (plain + mirrored).abs() < TOLERANCE,
            "mirroring {a:?} {b:?} {c:?} gave {mirrored}, expected {}",
            -plain
        );
    }
}

#[test]
fn test_mirror_across_horizontal_differs_by_full_turn() {
    // Rays on opposite sides of the horizontal: negation holds modulo 360
    let a = Point2D::new(0.7, 0.35);
    let b = Point2D::new(0.5, 0.5);
    let c = Point2D::new(0.52, 0.85);

    let plain = calculate_angle(a, b, c, false);
    let mirrored = calculate_angle(a, b, c, true);
    assert!(((plain + mirrored).abs() - 360.0).abs() < TOLERANCE);
}

#[test]
fn test_degenerate_points_use_zero_term() {
    let b = Point2D::new(0.5, 0.5);
    let a = Point2D::new(0.3, 0.5); // atan2(0, -0.2) = 180°
    let c = Point2D::new(0.5, 0.2); // atan2(-0.3, 0) = -90°

    // c == b: only the a term remains
    assert!((calculate_angle(a, b, b, false) - (-180.0)).abs() < TOLERANCE);
    // a == b: only the c term remains
    assert!((calculate_angle(b, b, c, false) - (-90.0)).abs() < TOLERANCE);
}

#[test]
fn test_strategy_mirror_flags() {
    assert!(MeasurementKind::AbdAdd.mirror_for(Side::Right));
    assert!(!MeasurementKind::AbdAdd.mirror_for(Side::Left));
    assert!(MeasurementKind::FlexExt.mirror_for(Side::Left));
    assert!(!MeasurementKind::FlexExt.mirror_for(Side::Right));
}

#[test]
fn test_abd_add_and_flex_ext_differ_only_in_mirroring() {
    let landmarks = arm_landmarks(Side::Right, (0.8, 0.7), (0.7, 0.6), (0.5, 0.5), (0.52, 0.85));

    let abd = MeasurementKind::AbdAdd.measure(&landmarks, Side::Right, 0.5).unwrap();
    let flex = MeasurementKind::FlexExt.measure(&landmarks, Side::Right, 0.5).unwrap();

    assert_eq!(abd.anchor, flex.anchor);
    assert!((abd.angle_degrees + flex.angle_degrees).abs() < TOLERANCE);
}

#[test]
fn test_rotation_subtracts_exactly_90_on_both_sides() {
    let wrist = (0.62, 0.3);
    let elbow = (0.6, 0.55);
    let hip = (0.5, 0.8);

    for side in [Side::Left, Side::Right] {
        let landmarks = arm_landmarks(side, wrist, elbow, (0.5, 0.4), hip);
        let result = MeasurementKind::Rotation.measure(&landmarks, side, 0.5).unwrap();

        let raw = calculate_angle(
            wrist.into(),
            elbow.into(),
            hip.into(),
            MeasurementKind::Rotation.mirror_for(side),
        );
        assert_eq!(result.angle_degrees, raw - 90.0);
        assert_eq!(result.anchor, Point2D::from(elbow));
    }
}

#[test]
fn test_right_abd_add_end_to_end() {
    let landmarks = arm_landmarks(Side::Right, (0.7, 0.5), (0.6, 0.5), (0.5, 0.5), (0.5, 0.8));

    let result = MeasurementKind::AbdAdd.measure(&landmarks, Side::Right, 0.5).unwrap();

    let expected = closed_form((-0.6, 0.5), (-0.5, 0.5), (-0.5, 0.8));
    assert!((result.angle_degrees - expected).abs() < TOLERANCE);
    assert!((result.angle_degrees - (-90.0)).abs() < TOLERANCE);
    assert_eq!(result.anchor, Point2D::new(0.5, 0.5));
}

#[test]
fn test_measure_without_landmarks_is_no_detection() {
    let settings = MeasurementSettings {
        side: Side::Left,
        kind: MeasurementKind::FlexExt,
        min_visibility: 0.5,
    };
    assert_eq!(measure(None, settings), Err(NoDetection::NoPose));
}

#[test]
fn test_other_side_landmarks_are_ignored() {
    // Only the right arm is present; measuring the left arm must fail
    let landmarks = arm_landmarks(Side::Right, (0.7, 0.5), (0.6, 0.5), (0.5, 0.5), (0.5, 0.8));
    assert!(MeasurementKind::AbdAdd.measure(&landmarks, Side::Left, 0.5).is_err());
}
