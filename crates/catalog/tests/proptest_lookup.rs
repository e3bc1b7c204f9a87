//! Property-based tests for region lookup
//!
//! Validates catalog invariants:
//! - Points strictly inside a lone box resolve to that box
//! - Points on any face, edge or corner resolve to that box
//! - Points outside every box resolve to nothing
//! - Overlaps resolve to the earliest declared region

use glam::Vec3;
use liftmap_catalog::RegionCatalog;
use liftmap_core::{Aabb, Region};
use proptest::prelude::*;

fn arb_box() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-2.0f32..2.0),
        prop::array::uniform3(0.01f32..1.0),
    )
        .prop_map(|(min, size)| {
            let min = Vec3::from_array(min);
            Aabb::new(min, min + Vec3::from_array(size))
        })
}

fn catalog_of(boxes: &[Aabb]) -> RegionCatalog {
    RegionCatalog::new(
        boxes
            .iter()
            .enumerate()
            .map(|(i, bounds)| Region::new(format!("region-{i}"), "", *bounds))
            .collect(),
    )
}

proptest! {
    /// Property: interior points of a single box resolve to it
    #[test]
    fn interior_point_matches(bounds in arb_box(), t in prop::array::uniform3(0.01f32..0.99)) {
        let catalog = catalog_of(&[bounds]);
        let point = bounds.min + bounds.size() * Vec3::from_array(t);

        let found = catalog.lookup(point);
        prop_assert_eq!(found.map(|r| r.name.as_str()), Some("region-0"));
    }

    /// Property: bounds are inclusive on all six faces
    ///
    /// Each axis is independently pinned to min, max, or left free, which
    /// covers faces, edges and corners.
    #[test]
    fn boundary_point_matches(
        bounds in arb_box(),
        pins in prop::array::uniform3(0u8..3),
        t in prop::array::uniform3(0.0f32..=1.0),
    ) {
        let catalog = catalog_of(&[bounds]);
        let mut point = bounds.min + bounds.size() * Vec3::from_array(t);
        for axis in 0..3 {
            match pins[axis] {
                0 => point[axis] = bounds.min[axis],
                1 => point[axis] = bounds.max[axis],
                _ => point[axis] = point[axis].clamp(bounds.min[axis], bounds.max[axis]),
            }
        }

        prop_assert!(catalog.lookup(point).is_some(), "{:?} on {:?}", point, bounds);
    }

    /// Property: points outside every box resolve to nothing
    #[test]
    fn outside_point_matches_nothing(
        boxes in prop::collection::vec(arb_box(), 1..6),
        offset in 0.01f32..5.0,
        axis in 0usize..3,
    ) {
        let catalog = catalog_of(&boxes);
        // Every box spans at most [-2, 3] per axis
        let mut point = Vec3::ZERO;
        point[axis] = 3.0 + offset;

        prop_assert!(catalog.lookup(point).is_none());
    }

    /// Property: overlaps resolve to the earliest declared region
    #[test]
    fn earliest_region_wins(
        boxes in prop::collection::vec(arb_box(), 1..8),
        t in prop::array::uniform3(0.0f32..=1.0),
        pick in any::<prop::sample::Index>(),
    ) {
        let catalog = catalog_of(&boxes);
        let target = boxes[pick.index(boxes.len())];
        let point = (target.min + target.size() * Vec3::from_array(t)).clamp(target.min, target.max);

        let expected = boxes.iter().position(|b| b.contains(point));
        prop_assert!(expected.is_some());

        let found = catalog.lookup(point).map(|r| r.name.clone());
        prop_assert_eq!(found, expected.map(|i| format!("region-{i}")));

        let all = catalog.lookup_all(point);
        prop_assert_eq!(all.first().map(|r| r.name.clone()), catalog.lookup(point).map(|r| r.name.clone()));
    }
}
