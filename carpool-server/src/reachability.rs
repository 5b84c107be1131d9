//! Ellipse reachability test.
//!
//! A driver's zone is an ellipse laid along the line from the driver's home
//! (the target) to the shared anchor point. Its axes are percentages of the
//! target–anchor distance and its centre slides along that line with the
//! zone offset. Coordinates are raw degrees treated as a plane, with
//! longitude as x and latitude as y.

use crate::domain::{GeoPoint, ReachabilityZone};

/// Slack on the unit bound for float and coordinate approximation error.
const BOUNDARY_TOLERANCE: f64 = 1.01;

/// Whether `subject` lies inside the zone between `anchor` and `target`.
///
/// Degenerate zones (anchor and target coincide, or a zero axis) contain
/// nothing.
pub fn is_reachable(
    subject: &GeoPoint,
    anchor: &GeoPoint,
    target: &GeoPoint,
    zone: &ReachabilityZone,
) -> bool {
    let dx = anchor.longitude - target.longitude;
    let dy = anchor.latitude - target.latitude;

    let rel = 1.0 - f64::from(zone.offset_pct()) / 100.0;
    let center_x = anchor.longitude - dx * rel;
    let center_y = anchor.latitude - dy * rel;

    // Single-quadrant arctangent; the rotation below is insensitive to the
    // missing half-turn for a symmetric ellipse.
    let angle_deg = (dy / dx).atan().to_degrees();

    let distance = dx.hypot(dy);
    let length = f64::from(zone.length_pct()) / 100.0 * distance;
    let width = f64::from(zone.width_pct()) / 100.0 * distance;

    if !(length > 0.0 && width > 0.0) {
        return false;
    }

    let rotation = (180.0 - angle_deg).to_radians();
    let (sin, cos) = rotation.sin_cos();

    let xc = subject.longitude - center_x;
    let yc = subject.latitude - center_y;
    let xct = xc * cos - yc * sin;
    let yct = xc * sin + yc * cos;

    let semi_length = length / 2.0;
    let semi_width = width / 2.0;
    let radius = xct.powi(2) / semi_length.powi(2) + yct.powi(2) / semi_width.powi(2);

    radius <= BOUNDARY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (longitude, latitude) shorthand.
    fn pt(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    fn zone(width: u8, length: u8, offset: u8) -> ReachabilityZone {
        ReachabilityZone::new(width, length, offset).unwrap()
    }

    fn anchor() -> GeoPoint {
        pt(10.39783, 53.80880)
    }

    fn east_target() -> GeoPoint {
        pt(10.40783, 53.80880)
    }

    #[test]
    fn coincident_anchor_and_target_reach_nothing() {
        let a = pt(10.0, 53.0);
        for offset in [0, 1, 50, 100] {
            assert!(!is_reachable(&a, &a, &a, &zone(50, 100, offset)));
            assert!(!is_reachable(&pt(10.001, 53.0), &a, &a, &zone(50, 100, offset)));
        }
    }

    #[test]
    fn zero_axis_reaches_nothing() {
        let mid = anchor().midpoint(&east_target());
        assert!(!is_reachable(&mid, &anchor(), &east_target(), &zone(0, 100, 50)));
        assert!(!is_reachable(&mid, &anchor(), &east_target(), &zone(50, 0, 50)));
    }

    #[test]
    fn centre_is_reachable() {
        let mid = anchor().midpoint(&east_target());
        assert!(is_reachable(&mid, &anchor(), &east_target(), &zone(50, 100, 50)));
    }

    #[test]
    fn far_point_is_not_reachable() {
        let far = pt(11.40783, 53.80880);
        assert!(!is_reachable(&far, &anchor(), &east_target(), &zone(50, 100, 50)));
    }

    #[test]
    fn ends_of_long_axis_sit_on_the_boundary() {
        // Full-length ellipse centred halfway: anchor and target are its tips
        let z = zone(50, 100, 50);
        assert!(is_reachable(&anchor(), &anchor(), &east_target(), &z));
        assert!(is_reachable(&east_target(), &anchor(), &east_target(), &z));

        // Just past the tip, beyond the 1% tolerance
        let beyond = pt(10.40783 + 0.0001, 53.80880);
        assert!(!is_reachable(&beyond, &anchor(), &east_target(), &z));
    }

    #[test]
    fn short_axis_is_the_width() {
        // distance 0.01, width 50% → semi-width 0.0025
        let z = zone(50, 100, 50);
        let mid = anchor().midpoint(&east_target());

        let inside = pt(mid.longitude, mid.latitude + 0.0024);
        let outside = pt(mid.longitude, mid.latitude + 0.003);
        assert!(is_reachable(&inside, &anchor(), &east_target(), &z));
        assert!(!is_reachable(&outside, &anchor(), &east_target(), &z));
    }

    #[test]
    fn offset_slides_the_centre() {
        let z = zone(20, 20, 0);
        // offset 0 centres on the target
        assert!(is_reachable(&east_target(), &anchor(), &east_target(), &z));
        assert!(!is_reachable(&anchor(), &anchor(), &east_target(), &z));

        // offset 100 centres on the anchor
        let z = zone(20, 20, 100);
        assert!(is_reachable(&anchor(), &anchor(), &east_target(), &z));
        assert!(!is_reachable(&east_target(), &anchor(), &east_target(), &z));
    }

    #[test]
    fn diagonal_alignment_follows_the_axis() {
        let a = pt(10.0, 53.0);
        let t = pt(10.01, 53.01);
        let z = zone(20, 100, 50);
        let mid = a.midpoint(&t);

        // Along the axis, three quarters of the way to the target
        let along = pt(10.0075, 53.0075);
        assert!(is_reachable(&mid, &a, &t, &z));
        assert!(is_reachable(&along, &a, &t, &z));

        // Same distance from the centre but across the axis
        let across = pt(mid.longitude + 0.0025, mid.latitude - 0.0025);
        assert!(!is_reachable(&across, &a, &t, &z));
    }

    #[test]
    fn vertical_alignment_is_finite() {
        // dx = 0 gives an infinite slope; atan still yields ±90°
        let a = pt(10.0, 53.0);
        let t = pt(10.0, 53.01);
        let z = zone(50, 100, 50);
        assert!(is_reachable(&a.midpoint(&t), &a, &t, &z));
        assert!(!is_reachable(&pt(10.01, 53.005), &a, &t, &z));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = GeoPoint> {
        (53.7f64..53.9, 10.3f64..10.5).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    fn zone() -> impl Strategy<Value = ReachabilityZone> {
        (1u8..=100, 1u8..=100, 0u8..=100)
            .prop_map(|(w, l, o)| ReachabilityZone::new(w, l, o).unwrap())
    }

    proptest! {
        #[test]
        fn centre_always_reachable(anchor in point(), target in point(), zone in zone()) {
            prop_assume!((anchor.latitude - target.latitude).abs() > 1e-6
                || (anchor.longitude - target.longitude).abs() > 1e-6);

            let rel = 1.0 - f64::from(zone.offset_pct()) / 100.0;
            let centre = GeoPoint::new(
                anchor.latitude - (anchor.latitude - target.latitude) * rel,
                anchor.longitude - (anchor.longitude - target.longitude) * rel,
            );
            prop_assert!(is_reachable(&centre, &anchor, &target, &zone));
        }

        #[test]
        fn wider_zone_never_loses_points(
            subject in point(),
            anchor in point(),
            target in point(),
            zone in zone(),
        ) {
            let wider = ReachabilityZone::new(100, zone.length_pct(), zone.offset_pct()).unwrap();
            if is_reachable(&subject, &anchor, &target, &zone) {
                prop_assert!(is_reachable(&subject, &anchor, &target, &wider));
            }
        }
    }
}
