//! Simulation constants and tuning parameters.

/// Default tick rate (Hz) used by fixed-step drivers.
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Upper bound of the speed multiplier.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Gauges ---

pub const GAUGE_MAX: f64 = 100.0;
pub const STRENGTH_MIN: f64 = 10.0;
pub const MIN_TROOPS: u32 = 1;

// --- Supply ---

/// Food lost per second by every regiment.
pub const FOOD_DEPLETION_RATE: f64 = 0.5;
/// Radius around a friendly camp inside which regiments resupply.
pub const CAMP_RESUPPLY_RADIUS: f64 = 50.0;
pub const CAMP_FOOD_RATE: f64 = 5.0;
pub const CAMP_AMMO_RATE: f64 = 3.0;
/// Strength lost per second while starving.
pub const STARVATION_STRENGTH_RATE: f64 = 2.0;
/// Morale lost per second while starving.
pub const STARVATION_MORALE_RATE: f64 = 3.0;
/// Supply-line allowance per soldier.
pub const SUPPLY_LENGTH_PER_TROOP: f64 = 2.0;
pub const DEFAULT_DEPOT_RATE: f64 = 10.0;

// --- Movement ---

/// Distance at which a regiment is considered arrived at its target.
pub const ARRIVAL_RADIUS: f64 = 5.0;
/// Horizontal offset of the finite-difference gradient sample.
pub const GRADIENT_SAMPLE_OFFSET: f64 = 5.0;
pub const GRADIENT_SLOWDOWN: f64 = 0.1;
pub const MIN_TERRAIN_MODIFIER: f64 = 0.3;

// --- Combat ---

pub const CAVALRY_MELEE_RANGE: f64 = 20.0;
pub const OUT_OF_AMMO_RANGE: f64 = 10.0;
pub const DUG_IN_ATTACK_BONUS: f64 = 1.5;
pub const DUG_IN_DEFENSE_FACTOR: f64 = 0.5;
pub const PROXIMITY_FALLOFF: f64 = 0.5;
pub const DAMAGE_SCALE: f64 = 0.1;
pub const DAMAGE_MORALE_FACTOR: f64 = 0.5;
pub const DAMAGE_STRENGTH_FACTOR: f64 = 0.1;

// --- Morale ---

pub const MORALE_RECOVERY_RATE: f64 = 2.0;
pub const SCATTERED_RECOVERY_RATE: f64 = 1.0;
/// Ceiling of passive recovery while scattered.
pub const SCATTERED_RECOVERY_CAP: f64 = 30.0;
pub const FLANKED_MORALE_RATE: f64 = 5.0;
/// Minimum bearing spread between two attackers that counts as flanking (135 degrees).
pub const FLANK_ANGLE: f64 = std::f64::consts::PI * 0.75;
pub const ROUT_CONTAGION_RADIUS: f64 = 100.0;
pub const ROUT_CONTAGION_RATE: f64 = 2.0;

// --- Retreat / scatter ---

pub const SCATTER_THRESHOLD: f64 = 10.0;
pub const RETREAT_THRESHOLD: f64 = 30.0;
pub const RETREAT_DISTANCE: f64 = 200.0;
pub const WANDER_DISTANCE: f64 = 50.0;
/// Full width of the wander jitter (±25 per axis).
pub const WANDER_JITTER: f64 = 50.0;
pub const WANDER_RETARGET_CHANCE: f64 = 0.02;

// --- Player commands ---

/// Offset east of the friendly depot used by the manual retreat command.
pub const MANUAL_RETREAT_DEPOT_OFFSET: f64 = 50.0;

// --- Hit testing ---

pub const REGIMENT_PICK_RADIUS: f64 = 30.0;
pub const STRUCTURE_PICK_RADIUS: f64 = 20.0;

// --- Opposing force ---

/// Seconds between controller think cycles.
pub const THINK_INTERVAL_SECS: f64 = 1.0;
pub const ATTACK_RATIO: f64 = 1.3;
pub const DEFEND_RATIO: f64 = 0.7;
pub const ARTILLERY_FORCE_WEIGHT: f64 = 2.0;
pub const CAVALRY_FORCE_WEIGHT: f64 = 1.5;
pub const RESUPPLY_FOOD_THRESHOLD: f64 = 30.0;
pub const RESUPPLY_AMMO_THRESHOLD: f64 = 20.0;
pub const RETREAT_JITTER: f64 = 50.0;

pub const ARTILLERY_MIN_RANGE: f64 = 100.0;
pub const ARTILLERY_MAX_RANGE: f64 = 230.0;
pub const ARTILLERY_FALLBACK_STEP: f64 = 100.0;
pub const ARTILLERY_ADVANCE_STEP: f64 = 50.0;
pub const ARTILLERY_SCREEN_RADIUS: f64 = 80.0;

pub const CAVALRY_FLANK_DISTANCE: f64 = 100.0;
pub const CAVALRY_CHARGE_AMMO: f64 = 20.0;
pub const CAVALRY_CHARGE_MIN_DISTANCE: f64 = 30.0;
pub const CAVALRY_HARASS_MIN: f64 = 80.0;
pub const CAVALRY_HARASS_MAX: f64 = 150.0;
pub const CAVALRY_HARASS_STEP: f64 = 30.0;

pub const INFANTRY_SHAKEN_MORALE: f64 = 40.0;
pub const INFANTRY_FALLBACK_STEP: f64 = 50.0;
pub const INFANTRY_ADVANCE_STEP: f64 = 60.0;
pub const INFANTRY_PROBE_STEP: f64 = 40.0;
pub const ENGAGE_FAR: f64 = 200.0;
pub const ENGAGE_NEAR: f64 = 100.0;
pub const ASSAULT_FAR: f64 = 150.0;
pub const ASSAULT_NEAR: f64 = 80.0;

pub const HIGH_GROUND_RADIUS: f64 = 100.0;
pub const HIGH_GROUND_SAMPLES: u32 = 8;
