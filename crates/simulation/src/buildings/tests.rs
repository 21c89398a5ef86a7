use bevy::prelude::*;

use crate::buildings::types::{building_save_id, Building};

#[test]
fn test_default_building_values() {
    let b = Building::default();
    assert_eq!(b.resource_name, "Железо");
    assert_eq!(b.stored_amount(), 0);
    assert_eq!(b.storage_capacity, 100);
    assert!((b.approach_distance - 1.5).abs() < f32::EPSILON);
}

#[test]
fn test_produce_clamps_at_capacity() {
    let mut b = Building::new("mine", "Железо")
        .with_capacity(12)
        .with_production(5, 2.0);
    b.produce();
    b.produce();
    assert_eq!(b.stored_amount(), 10);
    b.produce();
    assert_eq!(b.stored_amount(), 12, "third tick should clamp to capacity");
    b.produce();
    assert_eq!(b.stored_amount(), 12);
}

#[test]
fn test_collect_all_returns_everything_and_empties() {
    let mut b = Building::default().with_stored(37);
    assert_eq!(b.collect_all(), 37);
    assert_eq!(b.stored_amount(), 0);
    assert_eq!(b.collect_all(), 0, "second collect from empty building yields 0");
}

#[test]
fn test_set_stored_amount_clamps_to_capacity() {
    let mut b = Building::default().with_capacity(50);
    b.set_stored_amount(80);
    assert_eq!(b.stored_amount(), 50);
    b.set_stored_amount(0);
    assert_eq!(b.stored_amount(), 0);
}

#[test]
fn test_with_capacity_shrinks_stored() {
    let b = Building::default().with_stored(90).with_capacity(40);
    assert_eq!(b.stored_amount(), 40);
}

#[test]
fn test_approach_point_faces_click_side() {
    let b = Building::default().with_half_extents(Vec3::new(1.0, 1.0, 1.0));
    let transform = Transform::from_xyz(0.0, 1.0, 0.0);
    let point = b.approach_point(&transform, Vec3::new(10.0, 0.0, 0.0), 1.2);

    let expected_offset = 1.2 + Vec3::ONE.length();
    assert!((point.x - expected_offset).abs() < 1e-4, "got {point:?}");
    assert!(point.z.abs() < 1e-4, "got {point:?}");
    assert!((point.y - 1.0).abs() < 1e-4, "y should match building center");
}

#[test]
fn test_approach_point_ignores_vertical_click_offset() {
    let b = Building::default().with_half_extents(Vec3::new(0.5, 0.5, 0.5));
    let transform = Transform::from_xyz(2.0, 0.5, 2.0);
    let point = b.approach_point(&transform, Vec3::new(2.0, 5.0, 6.0), 1.0);
    assert!((point.x - 2.0).abs() < 1e-4);
    assert!(point.z > 2.0, "should be on the +Z side, got {point:?}");
}

#[test]
fn test_approach_point_falls_back_to_forward() {
    let b = Building::default().with_half_extents(Vec3::ZERO);
    let transform = Transform::from_xyz(3.0, 0.0, 3.0);
    // Click exactly at the center: use the building's forward (-Z by default).
    let point = b.approach_point(&transform, Vec3::new(3.0, 0.0, 3.0), 2.0);
    assert!((point - Vec3::new(3.0, 0.0, 1.0)).length() < 1e-4, "got {point:?}");
}

#[test]
fn test_label_text_shows_resource_and_amount() {
    let b = Building::new("", "Дерево").with_stored(7);
    assert_eq!(b.label_text(), "Дерево\n7");
}

#[test]
fn test_save_id_prefers_explicit_id() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let b = Building::new("iron_mine", "Железо");
    let name = Name::new("Mine");
    assert_eq!(building_save_id(entity, &b, Some(&name)), "iron_mine");
}

#[test]
fn test_save_id_falls_back_to_name_then_index() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let b = Building::default();
    let name = Name::new("Sawmill");
    assert_eq!(building_save_id(entity, &b, Some(&name)), "Sawmill");
    assert_eq!(
        building_save_id(entity, &b, None),
        format!("building_{}", entity.index())
    );
}

#[test]
fn test_save_id_index_fallback_is_repeatable() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let b = Building::default();
    let empty_name = Name::new("");
    let expected = format!("building_{}", entity.index());
    // The warning fires once; every call still returns the same id.
    assert_eq!(building_save_id(entity, &b, Some(&empty_name)), expected);
    assert_eq!(building_save_id(entity, &b, None), expected);
    assert_eq!(building_save_id(entity, &b, None), expected);
}
