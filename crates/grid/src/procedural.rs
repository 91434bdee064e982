//! Procedural default map.
//!
//! Used when the app starts without a map file: fBm noise assigns an
//! elevation to every cell, thresholds classify the tile kind, and a seeded
//! RNG scatters resource tags. Generation is fully deterministic — the same
//! seed and dimensions always produce the same tile map.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_SEED};
use crate::coords::GridPos;
use crate::tile::TileRecord;
use crate::tile_map::TileMap;

const NOISE_FREQUENCY: f32 = 0.08;
const NOISE_OCTAVES: i32 = 4;
const NOISE_GAIN: f32 = 0.5;
const NOISE_LACUNARITY: f32 = 2.0;

/// Elevation thresholds for kind classification, in [0, 1].
const WATER_THRESHOLD: f32 = 0.35;
const SAND_THRESHOLD: f32 = 0.42;
const ROCK_THRESHOLD: f32 = 0.75;

/// Logical height units spanned by the full elevation range.
const MAX_TILE_HEIGHT: f32 = 4.0;
/// Heights snap to this step so neighboring tiles form clean terraces.
const HEIGHT_QUANTUM: f32 = 0.25;

const TREE_CHANCE: f64 = 0.15;
const ORE_CHANCE: f64 = 0.25;

#[derive(Resource, Debug, Clone, Copy)]
pub struct ProcGenConfig {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
}

impl Default for ProcGenConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
        }
    }
}

fn elevation_noise(seed: u64) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed as i32);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(NOISE_FREQUENCY));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(NOISE_OCTAVES));
    noise.set_fractal_gain(Some(NOISE_GAIN));
    noise.set_fractal_lacunarity(Some(NOISE_LACUNARITY));
    noise
}

fn classify(elevation: f32) -> &'static str {
    if elevation < WATER_THRESHOLD {
        "water"
    } else if elevation < SAND_THRESHOLD {
        "sand"
    } else if elevation < ROCK_THRESHOLD {
        "grass"
    } else {
        "rock"
    }
}

/// Generate a full map from the config.
pub fn generate_map(config: &ProcGenConfig) -> TileMap {
    let noise = elevation_noise(config.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut map = TileMap::new((config.width, config.height));

    for y in 0..config.height as i32 {
        for x in 0..config.width as i32 {
            // fBm over OpenSimplex2 outputs in [-1, 1]; normalize to [0, 1].
            let raw = noise.get_noise_2d(x as f32, y as f32);
            let elevation = ((raw + 1.0) * 0.5).clamp(0.0, 1.0);
            let kind = classify(elevation);

            // Water sits flat at zero; land rises in quantized terraces.
            let height = if kind == "water" {
                0.0
            } else {
                let above = (elevation - WATER_THRESHOLD) / (1.0 - WATER_THRESHOLD);
                (above * MAX_TILE_HEIGHT / HEIGHT_QUANTUM).round() * HEIGHT_QUANTUM
            };

            let mut tile = TileRecord::new(kind, height);
            tile.navigation.insert("walk".to_string(), kind != "water");
            tile.navigation
                .insert("ride".to_string(), kind == "grass" || kind == "sand");

            match kind {
                "grass" if rng.gen_bool(TREE_CHANCE) => {
                    tile.resources.insert("tree".to_string());
                }
                "rock" if rng.gen_bool(ORE_CHANCE) => {
                    tile.resources.insert("ore".to_string());
                }
                _ => {}
            }

            map.insert(GridPos::new(x, y), tile);
        }
    }
    map
}
