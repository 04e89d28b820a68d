use super::*;

const CURVES: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
];

#[test]
fn endpoints_are_exact() {
    for ease in CURVES {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn out_of_range_time_is_clamped() {
    for ease in CURVES {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in CURVES {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn symmetric_curves_pass_through_half() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutSine] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
