// Tuning constants shared by the core and the native driver.
//
// Every runtime knob in `config.rs` defaults to one of these; nothing below is
// an invariant, the validator only checks signs and ranges.

// Scene layout (world units)
pub const CHAOS_RADIUS: f32 = 18.0; // radius of the scattered sphere
pub const CONE_HEIGHT: f32 = 13.0; // formed tree height
pub const CONE_RADIUS: f32 = 5.2; // formed tree radius at the base
pub const CONE_BASE_Y: f32 = -6.5; // y of the cone base, puts the tree centre near the origin
pub const TAPER_EXPONENT: f32 = 0.8; // < 1 bulges the silhouette outward
pub const SPIRAL_TURNS: f32 = 6.0; // full turns of twist from base to apex

// Populations
pub const FOLIAGE_COUNT: usize = 24_000;
pub const FRAME_COUNT: usize = 12;
pub const MAX_POPULATION: usize = 1_000_000; // hard ceiling per population

// Mode blending
pub const PROGRESS_RATE: f32 = 1.6; // 1/s, low-pass rate of the foliage progress scalar
pub const ENTER_CHAOS_THRESHOLD: f32 = 0.25; // hand openness above this scatters the tree
pub const ENTER_FORMED_THRESHOLD: f32 = 0.15; // hand openness below this re-forms it

// Pointer repulsion
pub const REPULSION_RADIUS: f32 = 3.5; // world units
pub const REPULSION_STRENGTH: f32 = 0.35; // velocity per tick at zero distance
pub const MIN_REPULSION_DISTANCE: f32 = 1e-4; // below this the push direction is a fixed axis
pub const POINTER_PLANE_Z: f32 = 0.0; // depth of the plane the 2D pointer is projected onto
pub const POINTER_SMOOTHING_RATE: f32 = 10.0; // 1/s, smoothing of the foliage pointer

// Foliage shader path
pub const FOLIAGE_REPULSION_WEIGHT: f32 = 4.0; // repulsion is a displacement here, not a velocity
pub const FOLIAGE_BREATH_AMPLITUDE: f32 = 0.06;
pub const FOLIAGE_BREATH_SPEED: f32 = 1.3;
pub const FOLIAGE_SCALE_RANGE: [f32; 2] = [0.6, 1.4];

// Ornament colour animation
pub const TWINKLE_SPEED: f32 = 3.0; // rad/s
pub const TWINKLE_BASE: f32 = 1.0;
pub const TWINKLE_AMPLITUDE: f32 = 0.6;

// Photo frames
pub const FRAME_SCALE: f32 = 1.0;
pub const FRAME_SHELL_INNER: f32 = 1.0; // frames sit on the cone surface
pub const FRAME_ANGULAR_JITTER: f32 = 0.08; // small, keeps the spiral readable
pub const FRAME_SWAY_AMPLITUDE: f32 = 0.12; // world units of vertical bob when formed
pub const FRAME_SWAY_SPEED: f32 = 0.9;
pub const FRAME_TILT_AMPLITUDE: f32 = 0.08; // radians of rocking when formed
pub const CHAOS_PAN_ANGLE: f32 = 1.2; // radians of yaw at the far left/right of the screen
pub const AMBIENT_SMOOTHING_RATE: f32 = 3.0; // 1/s
pub const ZOOM_SMOOTHING_RATE: f32 = 8.0; // 1/s, faster than ambient
pub const ZOOM_DISTANCE: f32 = 6.0; // distance in front of the eye
pub const ZOOM_SCALE: f32 = 2.6;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 0.0, 26.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
pub const CAMERA_ASPECT: f32 = 16.0 / 9.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Default palette per ornament category
pub const BALL_COLORS: [[f32; 3]; 3] = [
    [0.85, 0.1, 0.12], // red
    [0.95, 0.75, 0.2], // gold
    [0.2, 0.35, 0.85], // blue
];
pub const GIFT_COLORS: [[f32; 3]; 2] = [[0.8, 0.15, 0.2], [0.15, 0.55, 0.3]];
pub const LIGHT_COLORS: [[f32; 3]; 2] = [[1.0, 0.85, 0.5], [1.0, 0.95, 0.8]];
pub const BELL_COLORS: [[f32; 3]; 1] = [[0.9, 0.7, 0.25]];
pub const CANE_COLORS: [[f32; 3]; 1] = [[0.95, 0.95, 0.95]];
pub const STAR_COLORS: [[f32; 3]; 1] = [[1.0, 0.9, 0.4]];
pub const FOLIAGE_COLOR: [f32; 3] = [0.1, 0.45, 0.2];
pub const FRAME_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
