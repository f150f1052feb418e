//! Tunables for the showcase scene.
//!
//! Every constant the scene uses lives in [`ShowcaseConfig`]. The defaults
//! reproduce the look of the landing page; flows and the GPU context are
//! built from a config value so tests and embedders can change them without
//! touching the render code.

/// Perspective camera parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Starting eye position. The camera always looks at the origin.
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_deg: 75.0,
            znear: 1.0,
            zfar: 1000.0,
            position: [0.0, 0.0, 50.0],
        }
    }
}

/// Linear distance fog.
#[derive(Clone, Debug, PartialEq)]
pub struct FogConfig {
    pub color: u32,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: 0x0a0a0a,
            near: 100.0,
            far: 1000.0,
        }
    }
}

/// Ambient + directional + point light rig.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingConfig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
    pub point_color: u32,
    pub point_intensity: f32,
    /// Distance at which the point light's contribution reaches zero.
    pub point_distance: f32,
    pub point_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x404040,
            ambient_intensity: 0.6,
            directional_color: 0x00d4ff,
            directional_intensity: 1.0,
            directional_position: [50.0, 50.0, 50.0],
            point_color: 0x0099cc,
            point_intensity: 0.8,
            point_distance: 100.0,
            point_position: [-30.0, 20.0, 30.0],
        }
    }
}

/// Shadow map for the directional light.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowConfig {
    pub map_size: u32,
    /// Half-extent of the orthographic light frustum.
    pub extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 2048,
            extent: 25.0,
            near: 0.5,
            far: 500.0,
        }
    }
}

/// Particle spawn and respawn rules.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    /// Initial positions are drawn from `(-spawn_extent, spawn_extent)` per axis.
    pub spawn_extent: f32,
    /// Velocities are drawn from `(-velocity_extent, velocity_extent)` per axis.
    pub velocity_extent: f32,
    /// A particle farther than this from the origin is respawned.
    pub respawn_distance: f32,
    /// Respawned particles land in `(-respawn_extent, respawn_extent)` per axis.
    pub respawn_extent: f32,
    pub radius: f32,
    pub color: u32,
    pub opacity: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            spawn_extent: 50.0,
            velocity_extent: 0.05,
            respawn_distance: 50.0,
            respawn_extent: 10.0,
            radius: 0.1,
            color: 0x00d4ff,
            opacity: 0.6,
        }
    }
}

/// Per-frame motion of the model and the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Radians added to the model's y rotation every frame.
    pub spin_y: f32,
    /// Radians added to the model's x rotation every frame.
    pub spin_x: f32,
    /// Pointer pixels to cursor offset units.
    pub cursor_sensitivity: f32,
    /// Cursor offset to camera target units.
    pub parallax_strength: f32,
    /// Exponential smoothing factor for the camera.
    pub easing: f32,
    pub pulse_amplitude: f32,
    /// Radians of pulse phase per second.
    pub pulse_frequency: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_y: 0.01,
            spin_x: 0.005,
            cursor_sensitivity: 0.0005,
            parallax_strength: 10.0,
            easing: 0.05,
            pulse_amplitude: 0.05,
            pulse_frequency: 1.0,
        }
    }
}

/// Element ids and selectors the web build binds to.
#[derive(Clone, Debug, PartialEq)]
pub struct DomConfig {
    pub container_id: &'static str,
    pub canvas_id: &'static str,
    pub stats_selector: &'static str,
    pub counter_selector: &'static str,
    pub menu_toggle_selector: &'static str,
    pub nav_links_selector: &'static str,
    pub anchor_selector: &'static str,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            container_id: "canvas-container",
            canvas_id: "three-canvas",
            stats_selector: ".stats",
            counter_selector: ".stat-number",
            menu_toggle_selector: ".menu-toggle",
            nav_links_selector: ".nav-links",
            anchor_selector: "a[href^=\"#\"]",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShowcaseConfig {
    pub camera: CameraConfig,
    pub fog: FogConfig,
    pub lighting: LightingConfig,
    pub shadow: ShadowConfig,
    pub particles: ParticleConfig,
    pub motion: MotionConfig,
    pub dom: DomConfig,
    /// Window size used natively before the first resize arrives.
    pub initial_size: [u32; 2],
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            fog: FogConfig::default(),
            lighting: LightingConfig::default(),
            shadow: ShadowConfig::default(),
            particles: ParticleConfig::default(),
            motion: MotionConfig::default(),
            dom: DomConfig::default(),
            initial_size: [1280, 720],
        }
    }
}
