// Host-side tests for the scaling calculator.

use flow_core::*;
use glam::Vec2;

const REF: Vec2 = Vec2::new(1000.0, 800.0);

#[test]
fn equal_ratios_agree_across_policies() {
    let vp = Viewport::new(2000.0, 1600.0);
    assert_eq!(compute_scaling_factor(vp, REF, ScalingPolicy::Cover), 2.0);
    assert_eq!(compute_scaling_factor(vp, REF, ScalingPolicy::Fit), 2.0);
}

#[test]
fn policies_diverge_on_unequal_ratios() {
    let vp = Viewport::new(2000.0, 800.0);
    assert_eq!(compute_scaling_factor(vp, REF, ScalingPolicy::Cover), 2.0);
    assert_eq!(compute_scaling_factor(vp, REF, ScalingPolicy::Fit), 1.0);
}

#[test]
fn default_policy_is_fit() {
    assert_eq!(ScalingPolicy::default(), ScalingPolicy::Fit);
    let layout = GeometryConfig::default();
    let spec = PathSpec::compute(Viewport::new(3840.0, 1080.0), 6, &layout);
    assert_eq!(spec.scaling_factor, 1.0);
}

#[test]
fn reference_viewport_scales_to_one() {
    let vp = Viewport::new(REFERENCE_WIDTH, REFERENCE_HEIGHT);
    let reference = Vec2::new(REFERENCE_WIDTH, REFERENCE_HEIGHT);
    for policy in [ScalingPolicy::Fit, ScalingPolicy::Cover] {
        assert_eq!(compute_scaling_factor(vp, reference, policy), 1.0);
    }
}

#[test]
fn viewport_layout_check() {
    assert!(Viewport::new(1.0, 1.0).is_laid_out());
    assert!(!Viewport::new(0.0, 600.0).is_laid_out());
    assert!(!Viewport::new(800.0, -1.0).is_laid_out());
    assert_eq!(Viewport::new(800.0, 600.0).center(), Vec2::new(400.0, 300.0));
}
