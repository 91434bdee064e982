use bevy::math::Vec3;

use grid::config::HEIGHT_STEP;
use grid::coords::GridPos;
use grid::tile::TileRecord;
use grid::tile_map::TileMap;

use super::cursor::ray_to_ground;
use super::tool_handler::apply_tool_at;
use super::types::ActiveTool;

fn map_with_grass(positions: &[(i32, i32)]) -> TileMap {
    let mut map = TileMap::default();
    for &(x, y) in positions {
        map.insert(GridPos::new(x, y), TileRecord::new("grass", 1.0));
    }
    map
}

#[test]
fn test_ray_hits_ground_plane() {
    let hit = ray_to_ground(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
    assert_eq!(hit, Vec3::ZERO);

    let slanted = ray_to_ground(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, -1.0, 0.0)).unwrap();
    assert_eq!(slanted, Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_ray_parallel_or_away_misses() {
    // Parallel to the plane.
    assert!(ray_to_ground(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).is_none());
    // Pointing up, away from the plane.
    assert!(ray_to_ground(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).is_none());
}

#[test]
fn test_place_tool_inserts_and_replaces() {
    let mut map = map_with_grass(&[(0, 0)]);
    let pos = GridPos::new(0, 0);

    let (msg, err) = apply_tool_at(&mut map, ActiveTool::Place, pos, "rock");
    assert!(!err);
    assert!(msg.contains("Replaced grass"));
    assert_eq!(map.get(pos).unwrap().kind, "rock");
    assert!(map.get(pos).unwrap().is_passable("walk"));

    let fresh = GridPos::new(5, 5);
    let (_, err) = apply_tool_at(&mut map, ActiveTool::Place, fresh, "sand");
    assert!(!err);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_remove_tool_reports_empty_cell() {
    let mut map = map_with_grass(&[(0, 0)]);
    let (_, err) = apply_tool_at(&mut map, ActiveTool::Remove, GridPos::new(0, 0), "grass");
    assert!(!err);
    assert!(map.is_empty());

    let (_, err) = apply_tool_at(&mut map, ActiveTool::Remove, GridPos::new(0, 0), "grass");
    assert!(err);
}

#[test]
fn test_raise_lower_clamped_at_zero() {
    let mut map = map_with_grass(&[(1, 1)]);
    let pos = GridPos::new(1, 1);

    apply_tool_at(&mut map, ActiveTool::Raise, pos, "grass");
    assert_eq!(map.get(pos).unwrap().height, 1.0 + HEIGHT_STEP);

    for _ in 0..20 {
        apply_tool_at(&mut map, ActiveTool::Lower, pos, "grass");
    }
    assert_eq!(map.get(pos).unwrap().height, 0.0);
}

#[test]
fn test_inspect_tool_toggles_selection() {
    let mut map = map_with_grass(&[(0, 0), (1, 0)]);
    let a = GridPos::new(0, 0);
    let b = GridPos::new(1, 0);

    apply_tool_at(&mut map, ActiveTool::Inspect, a, "grass");
    assert_eq!(map.selected_pos(), Some(a));

    apply_tool_at(&mut map, ActiveTool::Inspect, b, "grass");
    assert_eq!(map.selected_pos(), Some(b));

    // Clicking the selected tile deselects it.
    let (msg, _) = apply_tool_at(&mut map, ActiveTool::Inspect, b, "grass");
    assert_eq!(map.selected_pos(), None);
    assert!(msg.contains("cleared"));
}
