//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance applied when comparing accumulated simulation time against due times.
pub const TIME_EPSILON: f64 = 1e-9;

// --- Enemies ---

/// Planar distance beyond which an enemy's AI is suspended.
pub const ENEMY_AGGRO_RADIUS: f64 = 40.0;

/// Planar distance inside which an enemy stops advancing.
pub const ENEMY_MELEE_RADIUS: f64 = 2.0;

/// Pursuit speed (units/second).
pub const ENEMY_MOVE_SPEED: f64 = 5.0;

/// Maximum range of the enemy's line-of-sight ray.
pub const ENEMY_SIGHT_RANGE: f64 = 30.0;

/// Height of the enemy's eyes above its feet; origin of the sight ray.
pub const ENEMY_HEAD_HEIGHT: f64 = 1.0;

/// Maximum (and starting) enemy health.
pub const ENEMY_MAX_HEALTH: i32 = 100;

/// Enemy collision box half-extents.
pub const ENEMY_HALF_EXTENTS: [f64; 3] = [0.4, 0.9, 0.4];

/// Health bar width at full health (world units).
pub const HEALTH_BAR_FULL_WIDTH: f64 = 1.5;

/// Visibility lost per second by a health bar that is not being refreshed by hits.
pub const HEALTH_BAR_FADE_RATE: f64 = 1.0;

// --- Spawner ---

/// Number of enemies placed at scenario start.
pub const SPAWN_COUNT: u32 = 5;

/// Distance between consecutive enemies along the x axis.
pub const SPAWN_SPACING: f64 = 8.0;

/// Default RNG seed. Same seed = same scenario.
pub const DEFAULT_SEED: u64 = 0;

// --- Player ---

/// Player start position.
pub const PLAYER_START: [f64; 3] = [0.0, 0.0, -10.0];

/// Height of the view (camera) above the player's feet.
pub const PLAYER_EYE_HEIGHT: f64 = 2.0;

/// Player collision box half-extents (1 x 2 x 1 box).
pub const PLAYER_HALF_EXTENTS: [f64; 3] = [0.5, 1.0, 0.5];

// --- Weapon ---

/// Damage dealt by one shot.
pub const WEAPON_DAMAGE: i32 = 30;

/// Maximum range of the shot ray.
pub const WEAPON_RANGE: f64 = 100.0;

/// Time before the weapon can fire again.
pub const WEAPON_COOLDOWN_SECS: f64 = 0.4;

/// Time the muzzle flash stays visible after a shot.
pub const MUZZLE_FLASH_SECS: f64 = 2.5;

/// Lifetime of a decorative mark.
pub const MARK_LIFETIME_SECS: f64 = 10.0;

/// Offset of a decorative mark off the struck surface.
pub const MARK_SURFACE_OFFSET: f64 = 0.01;

// --- Gunshot sound ---

/// Amplitude envelope of the gunshot: (time, amplitude) pairs.
pub const GUNSHOT_ENVELOPE: [(f64, f64); 5] = [
    (0.0, 0.0),
    (0.1, 0.9),
    (0.15, 0.75),
    (0.3, 0.14),
    (0.6, 0.0),
];

pub const GUNSHOT_VOLUME: f64 = 0.5;

/// Gunshot pitch is drawn uniformly from this range (semitones).
pub const GUNSHOT_PITCH_MIN: f64 = -13.0;
pub const GUNSHOT_PITCH_MAX: f64 = -12.0;

pub const GUNSHOT_PITCH_CHANGE: f64 = -12.0;

pub const GUNSHOT_SPEED: f64 = 3.0;

// --- World ---

/// Half the side length of the square ground slab.
pub const GROUND_HALF_SIZE: f64 = 32.0;

/// Half thickness of the ground slab. Its top face sits at y = 0.
pub const GROUND_HALF_THICKNESS: f64 = 0.5;
