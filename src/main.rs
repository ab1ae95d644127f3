use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use dreamfield::cli::Cli;
use dreamfield::core::{Clock, SurfacePresenter, Throttled};
use dreamfield::gesture::{Dispatcher, GestureScript, HandSummary, SimulatedHands, TrackingState};
use dreamfield::loaders::{load_pending, DirectoryAssets};
use dreamfield::render::PointRasterizer;
use dreamfield::scene::{SceneGraph, Simulator};
use dreamfield::scenes::{create_scene, SCENE_NAMES};
use dreamfield::SimulatorConfig;

const HEADLESS_FRAME_DELTA: f32 = 1.0 / 60.0;
const FPS_UPDATE_INTERVAL: f32 = 1.0;

fn load_config(cli: &Cli) -> Result<SimulatorConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulatorConfig::load(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => SimulatorConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn load_scene(name: &str) -> Result<SceneGraph> {
    if let Some(graph) = create_scene(name) {
        return Ok(graph);
    }
    SceneGraph::load(Path::new(name)).with_context(|| {
        format!("'{}' is neither a built-in scene ({}) nor a readable scene file", name, SCENE_NAMES.join(", "))
    })
}

/// Build the simulator and block until the scene's assets are in
fn build_simulator(cli: &Cli) -> Result<Simulator> {
    let mut simulator = Simulator::new(load_config(cli)?);
    simulator.set_viewport(cli.width, cli.height);

    let graph = load_scene(&cli.scene)?;
    let pending = simulator.load_scene_graph(&graph);

    if !pending.is_empty() {
        let assets = DirectoryAssets::new(&cli.assets);
        log::info!("Loading {} assets from {:?}", pending.len(), cli.assets);
        let loaded = pollster::block_on(load_pending(pending, &assets));
        let added = simulator.commit_loads(loaded);
        log::info!("{} asset objects ready", added);
    }

    Ok(simulator)
}

fn load_script(cli: &Cli) -> Result<Option<GestureScript>> {
    cli.gestures
        .as_ref()
        .map(|path| GestureScript::load(path).with_context(|| format!("Failed to load gesture script: {:?}", path)))
        .transpose()
}

fn run_headless(cli: &Cli) -> Result<()> {
    let mut simulator = build_simulator(cli)?;
    let script = load_script(cli)?.unwrap_or_default();
    let dispatcher = Dispatcher::with_default_actions();
    let mut tracking = TrackingState::default();
    let mut rasterizer = PointRasterizer::new(cli.width, cli.height);

    for frame in 0..cli.frames as usize {
        let hands = script.sample(frame);
        let report = dispatcher.process(&mut tracking, &hands, &mut simulator);
        if !report.executed.is_empty() {
            log::debug!("frame {}: {:?}", frame, report.executed);
        }
        simulator
            .frame(HEADLESS_FRAME_DELTA, &mut rasterizer)
            .context("Failed to render frame")?;
    }

    let stats = simulator.stats();
    log::info!(
        "Simulated {} frames ({:.1}s): {} objects alive, {} created, {} expired, {} discarded, {} loads dropped, {} environments disposed",
        stats.frames,
        simulator.elapsed(),
        simulator.objects().len(),
        stats.objects_created,
        stats.objects_expired,
        stats.objects_discarded,
        stats.loads_dropped,
        simulator.environments_disposed()
    );
    log::info!("Last frame drew {} points", rasterizer.points_drawn());

    Ok(())
}

struct App {
    simulator: Simulator,
    dispatcher: Dispatcher,
    tracking: TrackingState,
    hands: SimulatedHands,
    script: Option<GestureScript>,
    script_frame: usize,
    rasterizer: PointRasterizer,
    window: Option<Arc<Window>>,
    presenter: Option<SurfacePresenter>,
    clock: Clock,
    fps: Throttled,
    frames_since_report: u32,
    environment_index: usize,
    initial_size: (u32, u32),
}

impl App {
    fn new(cli: &Cli) -> Result<Self> {
        Ok(Self {
            simulator: build_simulator(cli)?,
            dispatcher: Dispatcher::with_default_actions(),
            tracking: TrackingState::default(),
            hands: SimulatedHands::new(),
            script: load_script(cli)?,
            script_frame: 0,
            rasterizer: PointRasterizer::new(cli.width, cli.height),
            window: None,
            presenter: None,
            clock: Clock::new(),
            fps: Throttled::new(FPS_UPDATE_INTERVAL),
            frames_since_report: 0,
            environment_index: 0,
            initial_size: (cli.width, cli.height),
        })
    }

    fn current_hands(&mut self) -> Vec<HandSummary> {
        match &self.script {
            Some(script) => {
                let hands = script.sample(self.script_frame);
                self.script_frame += 1;
                hands
            }
            None => self.hands.hands(),
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::KeyR => {
                if let Some(id) = self.simulator.selected().cloned() {
                    log::info!("Restarting '{}'", id);
                    self.simulator.restart_materialize(&id);
                }
            }
            KeyCode::KeyN => {
                self.environment_index = (self.environment_index + 1) % SCENE_NAMES.len();
                let environment = create_scene(SCENE_NAMES[self.environment_index]).and_then(|g| g.environment);
                if let Some(environment) = environment {
                    self.simulator.apply_environment_spec(&environment);
                }
            }
            _ => {}
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(width, height);
        }
        self.rasterizer.resize(width, height);
        self.simulator.set_viewport(width, height);
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();

        let hands = self.current_hands();
        self.dispatcher.process(&mut self.tracking, &hands, &mut self.simulator);

        if let Err(e) = self.simulator.frame(delta, &mut self.rasterizer) {
            log::error!("Render error: {}", e);
            return;
        }

        if let Some(presenter) = &mut self.presenter {
            let (width, height) = self.rasterizer.dimensions();
            if let Err(e) = presenter.present(self.rasterizer.as_bytes(), width, height) {
                log::error!("Present error: {}", e);
            }
        }

        self.frames_since_report += 1;
        if let Some(elapsed) = self.fps.try_tick(delta) {
            log::info!(
                "FPS: {:.1} | objects: {} | selected: {:?}",
                self.frames_since_report as f32 / elapsed,
                self.simulator.objects().len(),
                self.simulator.selected().map(|id| id.as_str())
            );
            self.frames_since_report = 0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Dreamfield")
                .with_inner_size(winit::dpi::PhysicalSize::new(width, height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let presenter = match pollster::block_on(SurfacePresenter::new(window.clone())) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to initialize presenter: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = presenter.dimensions();
        self.presenter = Some(presenter);
        self.window = Some(window);
        self.resize(width, height);
        self.clock.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code @ (KeyCode::KeyR | KeyCode::KeyN)),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(code),
            other => {
                if let Some(window) = &self.window {
                    self.hands.process_event(&other, window.inner_size());
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.headless {
        return run_headless(&cli);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&cli)?;

    log::info!("Dreamfield - mouse moves the hand; Tab switch hand, 1/2/3 gesture, 0 hide, B both hands, Q/E rotate, R restart selected, N next sky, Escape quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
