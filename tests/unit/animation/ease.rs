use super::*;

#[test]
fn every_curve_pins_the_endpoints() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutCubic,
        Ease::Step,
    ] {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease:?}");
    }
}

#[test]
fn in_out_cubic_is_symmetric_around_half() {
    let e = Ease::InOutCubic;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
}

#[test]
fn interpolate_scales_the_range() {
    assert_eq!(Ease::Linear.interpolate(2.0, 4.0, 0.5), 3.0);
    assert_eq!(Ease::Step.interpolate(2.0, 4.0, 0.99), 2.0);
    assert_eq!(Ease::default(), Ease::InOutCubic);
}
