//! Tile factory: keeps one scene-graph entity per live tile record.
//!
//! The index in [`TileVisualIndex`] mirrors the logical store one-to-one.
//! Whenever [`TileMap`] changes, `sync_tile_visuals` diffs the index against
//! the store: missing visuals are spawned, orphans despawned, and surviving
//! ones get their transform and material refreshed in place. Transforms are
//! always derived through [`IsoProjection`]; no visual owns its position.

use bevy::prelude::*;
use std::collections::HashMap;

use grid::config::MIN_TILE_THICKNESS;
use grid::coords::{GridPos, IsoProjection};
use grid::tile::TileRecord;
use grid::tile_map::TileMap;

/// Marker on a spawned tile entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct TileVisual {
    pub pos: GridPos,
}

/// GridPos -> visual entity mirror of the tile store.
#[derive(Resource, Default)]
pub struct TileVisualIndex {
    pub entities: HashMap<GridPos, Entity>,
}

/// Cached mesh and material handles for tile rendering.
#[derive(Resource)]
pub struct TileAssets {
    pub unit_cube: Handle<Mesh>,
    by_kind: HashMap<String, Handle<StandardMaterial>>,
    pub fallback: Handle<StandardMaterial>,
    pub hover: Handle<StandardMaterial>,
    pub selected: Handle<StandardMaterial>,
}

fn kind_color(kind: &str) -> Option<Color> {
    match kind {
        "grass" => Some(Color::srgb(0.30, 0.55, 0.25)),
        "sand" => Some(Color::srgb(0.80, 0.72, 0.50)),
        "water" => Some(Color::srgb(0.15, 0.35, 0.65)),
        "rock" => Some(Color::srgb(0.45, 0.44, 0.42)),
        _ => None,
    }
}

impl TileAssets {
    /// Material for a tile kind, created on first sight. Unknown kinds get
    /// the fallback material so bad map data is visible rather than fatal.
    pub fn kind_material(
        &mut self,
        kind: &str,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        if let Some(handle) = self.by_kind.get(kind) {
            return handle.clone();
        }
        let Some(color) = kind_color(kind) else {
            return self.fallback.clone();
        };
        let handle = materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            ..default()
        });
        self.by_kind.insert(kind.to_string(), handle.clone());
        handle
    }

    fn material_for(
        &mut self,
        tile: &TileRecord,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        if tile.selected {
            self.selected.clone()
        } else if tile.highlighted {
            self.hover.clone()
        } else {
            self.kind_material(&tile.kind, materials)
        }
    }
}

pub fn setup_tile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let overlay = |color| StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.6,
        ..default()
    };
    commands.insert_resource(TileAssets {
        unit_cube: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        by_kind: HashMap::new(),
        fallback: materials.add(overlay(Color::srgb(0.85, 0.20, 0.75))),
        hover: materials.add(overlay(Color::srgb(0.95, 0.85, 0.30))),
        selected: materials.add(overlay(Color::srgb(0.25, 0.75, 0.95))),
    });
}

/// Transform for a tile: footprint scaled to the tile extents, top face at
/// the projected height, slab extending downward.
fn tile_transform(pos: GridPos, tile: &TileRecord, proj: &IsoProjection) -> Transform {
    let top = proj.grid_to_world(pos, tile.height);
    let thickness = (tile.height * proj.height_scale).max(MIN_TILE_THICKNESS);
    Transform {
        translation: Vec3::new(top.x, top.y - thickness * 0.5, top.z),
        scale: Vec3::new(proj.tile_width, thickness, proj.tile_height),
        ..default()
    }
}

#[allow(clippy::too_many_arguments)]
pub fn sync_tile_visuals(
    mut commands: Commands,
    map: Res<TileMap>,
    proj: Res<IsoProjection>,
    mut index: ResMut<TileVisualIndex>,
    mut assets: ResMut<TileAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut visuals: Query<(&mut Transform, &mut MeshMaterial3d<StandardMaterial>), With<TileVisual>>,
) {
    if !map.is_changed() {
        return;
    }

    // Despawn orphans: visuals whose record is gone.
    index.entities.retain(|pos, entity| {
        if map.contains(*pos) {
            true
        } else {
            commands.entity(*entity).despawn();
            false
        }
    });

    for (pos, tile) in map.iter() {
        let material = assets.material_for(tile, &mut materials);
        let transform = tile_transform(pos, tile, &proj);

        match index.entities.get(&pos) {
            Some(&entity) => {
                if let Ok((mut tf, mut mat)) = visuals.get_mut(entity) {
                    if *tf != transform {
                        *tf = transform;
                    }
                    if mat.0 != material {
                        mat.0 = material;
                    }
                }
            }
            None => {
                let entity = commands
                    .spawn((
                        Mesh3d(assets.unit_cube.clone()),
                        MeshMaterial3d(material),
                        transform,
                        TileVisual { pos },
                    ))
                    .id();
                index.entities.insert(pos, entity);
            }
        }
    }
}
