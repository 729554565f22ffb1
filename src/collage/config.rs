use eframe::egui::{Vec2, vec2};

#[derive(Clone, Copy, Debug)]
pub struct CanvasConfig {
    pub size: Vec2,
    /// Cluster targets sit on a circle of `min(width, height) * cluster_ring`.
    pub cluster_ring: f32,
    /// Preferred distance from center for the radial bias, same scale as `cluster_ring`.
    pub radial_ring: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct RadiusPolicy {
    pub base_album: f32,
    pub min_album: f32,
    pub base_artist: f32,
    pub min_artist: f32,
    pub max_delta: f32,
    pub title: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ForceConfig {
    pub center_strength: f32,
    pub cluster_x_strength: f32,
    pub cluster_y_strength: f32,
    pub collision_strength: f32,
    pub collision_iterations: usize,
    pub collision_padding: f32,
    pub radial_strength: f32,
    pub charge_strength: f32,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub alpha_target: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct HoverConfig {
    pub radius: f32,
    pub duration_secs: f32,
    /// Alpha below which a radius change restarts the stepper.
    pub restart_threshold: f32,
    pub restart_alpha: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct EntranceConfig {
    pub per_node_delay_secs: f32,
    pub fade_secs: f32,
    pub grow_secs: f32,
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    pub subtitle_offset_secs: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub clip_padding: f32,
    pub hole_radius: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct CollageConfig {
    pub canvas: CanvasConfig,
    pub radii: RadiusPolicy,
    pub forces: ForceConfig,
    pub hover: HoverConfig,
    pub entrance: EntranceConfig,
    pub render: RenderConfig,
}

impl Default for CollageConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            canvas: CanvasConfig {
                size: vec2(1200.0, 800.0),
                cluster_ring: 0.35,
                radial_ring: 0.3,
            },
            radii: RadiusPolicy {
                base_album: 40.0,
                min_album: 28.0,
                base_artist: 52.0,
                min_artist: 36.0,
                max_delta: 14.0,
                title: 140.0,
            },
            forces: ForceConfig {
                center_strength: 0.05,
                cluster_x_strength: 0.02,
                cluster_y_strength: 0.06,
                collision_strength: 0.7,
                collision_iterations: 3,
                collision_padding: 4.0,
                radial_strength: 0.01,
                charge_strength: 0.0,
                velocity_decay: 0.6,
                alpha_min,
                alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
                alpha_target: 0.02,
            },
            hover: HoverConfig {
                radius: 90.0,
                duration_secs: 0.35,
                restart_threshold: 0.1,
                restart_alpha: 0.3,
            },
            entrance: EntranceConfig {
                per_node_delay_secs: 0.04,
                fade_secs: 0.4,
                grow_secs: 0.7,
                title_font_size: 56.0,
                subtitle_font_size: 22.0,
                subtitle_offset_secs: 0.25,
            },
            render: RenderConfig {
                clip_padding: 3.0,
                hole_radius: 5.0,
            },
        }
    }
}
