//! Headless robot demo
//!
//! Builds the articulated robot from literal nodes and imports the wuggy rover
//! from a scene document, then runs a scripted input loop: a control-update
//! step per scene followed by one render pass per scene into a recording
//! backend. Draw statistics are logged as the frames go by.
//!
//! Usage: `robot_app [config.toml|config.ron] [frames]`

mod assets;
mod primitives;
mod robot;
mod script;
mod wuggy;

use std::env;

use scene_engine::assets::{AssetError, AssetStore};
use scene_engine::config::{Config, ConfigError};
use scene_engine::control::ControlStep;
use scene_engine::core::config::SceneEngineConfig;
use scene_engine::foundation::logging;
use scene_engine::foundation::math::{Mat4, Mat4Ext, Vec3};
use scene_engine::render::{RecordingBackend, RenderError};
use scene_engine::scene::SceneError;
use scene_engine::traversal::{FrameStats, SceneRenderer, SetupError};
use thiserror::Error;

const DEFAULT_FRAMES: u32 = 180;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Renderer could not be created
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// Asset could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Scene lookup or construction failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Render pass failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Bad command line
    #[error("Invalid argument: {0}")]
    Argument(String),
}

/// Camera orbiting a point above the origin
struct OrbitCamera {
    distance: f32,
    height: f32,
    yaw: f32,
    pitch: f32,
}

impl OrbitCamera {
    fn view(&self) -> Mat4 {
        Mat4::translation_matrix(Vec3::new(0.0, 0.0, self.distance))
            * Mat4::rotation_y(self.yaw)
            * Mat4::rotation_x(self.pitch)
            * Mat4::translation_matrix(Vec3::new(0.0, -self.height, 0.0))
    }
}

#[derive(Default)]
struct Totals {
    frames: u32,
    draws: usize,
    binds: usize,
    uploads: usize,
}

impl Totals {
    fn add(&mut self, stats: FrameStats) {
        self.draws += stats.draw_calls;
        self.binds += stats.material_binds;
        self.uploads += stats.meshes_uploaded;
    }
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("robot_app: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => SceneEngineConfig::load_from_file(path)?,
        None => SceneEngineConfig::default(),
    };
    let frames = match args.get(1) {
        Some(n) => n.parse().map_err(|_| AppError::Argument(format!("frame count '{}'", n)))?,
        None => DEFAULT_FRAMES,
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting robot demo for {} frames", frames);

    let mut store = assets::embedded_store()?;

    let mut robot = robot::build(&mut store)?;
    let robot_index = robot.build_index();
    let mut robot_controls = robot::controller();
    let mut robot_renderer = SceneRenderer::from_assets(RecordingBackend::new(), &mut store, &config)?;
    let mut robot_camera = OrbitCamera {
        distance: 8.0,
        height: 2.0,
        yaw: 0.0,
        pitch: 0.0,
    };

    let mut wuggy = store.load_scene(wuggy::ASSET)?;
    let wuggy_index = wuggy.build_index();
    let mut wuggy_steps: Vec<Box<dyn ControlStep>> = vec![Box::new(wuggy::controller()), Box::new(wuggy::Drive::new("Wuggy"))];
    let mut wuggy_renderer = SceneRenderer::from_assets(RecordingBackend::new(), &mut store, &config)?;
    let wuggy_camera = OrbitCamera {
        distance: 5.0,
        height: 0.5,
        yaw: 0.0,
        pitch: 0.2,
    };
    wuggy_renderer.set_view(wuggy_camera.view());

    log::info!(
        "Robot: {} nodes, wuggy: {} nodes",
        robot.node_count(),
        wuggy.node_count()
    );

    let mut shininess_gain = 1.0_f32;
    let mut robot_totals = Totals::default();
    let mut wuggy_totals = Totals::default();

    for frame in 0..frames {
        let axes = script::axes_at(frame);

        // Control phase
        robot_controls.apply(&mut robot, &robot_index, &axes)?;
        for step in &mut wuggy_steps {
            step.apply(&mut wuggy, &wuggy_index, &axes)?;
        }
        shininess_gain = (shininess_gain + 0.1 * axes.get(script::AXIS_SHINE)).max(0.0);
        robot_camera.yaw += 0.01;

        // Traversal phase
        robot_renderer.set_view(robot_camera.view());
        let robot_stats = robot_renderer.render_container(&robot)?;
        robot_totals.add(robot_stats);

        wuggy_renderer.set_shininess_gain(shininess_gain);
        let wuggy_stats = wuggy_renderer.render_container(&wuggy)?;
        wuggy_totals.add(wuggy_stats);

        robot_totals.frames += 1;
        wuggy_totals.frames += 1;

        if frame % 30 == 0 {
            log::info!(
                "Frame {}: robot {} draws, wuggy {} draws, shininess gain {:.1}",
                frame,
                robot_stats.draw_calls,
                wuggy_stats.draw_calls,
                shininess_gain
            );
        }

        // Keep the recorded command logs to one frame
        robot_renderer.backend_mut().clear_commands();
        wuggy_renderer.backend_mut().clear_commands();
    }

    for (name, totals, cached) in [
        ("robot", &robot_totals, robot_renderer.mesh_cache().len()),
        ("wuggy", &wuggy_totals, wuggy_renderer.mesh_cache().len()),
    ] {
        log::info!(
            "{}: {} frames, {} draws, {} material binds, {} uploads ({} meshes cached)",
            name,
            totals.frames,
            totals.draws,
            totals.binds,
            totals.uploads,
            cached
        );
    }

    Ok(())
}
