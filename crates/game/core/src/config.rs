/// Engine constants and tunable parameters.
///
/// Everything gameplay-facing that is not part of a [`crate::def::GameDefinition`]
/// lives here, so a single file answers "what are the magic numbers".
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig;

impl GameConfig {
    // ===== world geometry =====
    /// Width/height of one map cell in world units.
    pub const CELL_SIZE: f64 = 64.0;
    /// Vertical squash applied to cells in the isometric projection.
    pub const ISO_Y_SCALE: f64 = 0.75;
    /// Maximum edge-of-bounding-box distance at which an element instance is
    /// interactable.
    pub const INTERACTION_RADIUS: f64 = 96.0;
    /// Extra cells kept live around the visible stage when culling animals.
    pub const VIEWPORT_BUFFER_CELLS: f64 = 10.0;

    // ===== clock =====
    pub const MINUTES_PER_DAY: i64 = 1440;
    /// Hours slept when the bed (or game) does not say otherwise.
    pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;

    // ===== character rules =====
    /// Energy a character may gain from food between two sleeps.
    pub const EAT_ENERGY_CAP: i64 = 15;
    /// Stat names with engine-level meaning. Games that do not declare them
    /// simply opt out of the attached rules.
    pub const ENERGY_STAT: &'static str = "Energy";
    pub const HEALTH_STAT: &'static str = "Health";

    // ===== combat =====
    /// Damage range of bare fists when no weapon is used.
    pub const FIST_DAMAGE: (i64, i64) = (1, 3);
    /// In-game minutes an animal must wait between attacks.
    pub const ATTACK_COOLDOWN_MINUTES: i64 = 2;

    // ===== animal movement =====
    /// Ticks spent walking before an animal pauses.
    pub const ANIMAL_MOVE_TICKS: i32 = 60;
    /// Ticks spent idle before an animal walks again.
    pub const ANIMAL_PAUSE_TICKS: i32 = 120;
    /// World units covered per walking tick.
    pub const ANIMAL_SPEED: f64 = 1.5;
    /// Heading noise added when bouncing off a patrol edge (degrees, +/-).
    pub const BOUNCE_JITTER_DEGREES: f64 = 15.0;
    /// Per-tick chance of a spontaneous heading change.
    pub const RANDOM_TURN_CHANCE: f64 = 0.01;
    /// Size of a spontaneous heading change (degrees, +/-).
    pub const RANDOM_TURN_DEGREES: f64 = 30.0;
    /// Walk-cycle frames per animal sprite.
    pub const ANIMATION_FRAMES: u32 = 4;
}
