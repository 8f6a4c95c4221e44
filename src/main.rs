use std::error::Error;
use std::time::Instant;

use glam::Vec3;
use tracing::{debug, info};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::Window,
};

// Import from the library crate
use quizmallow::{
    logging,
    config::FrameConfig,
    controller::{FrameClock, InputEvent, LocomotionController, WorldBounds},
    model::{ActorPose, flap_eyes, wing_flap_angle, KeyframeTrack},
};

/// Native debug host: no rendering, the pose is shown in the window title
struct App {
    window: Window,
    controller: LocomotionController,
    pose: ActorPose,
    bounds: WorldBounds,
    clock: FrameClock,
    started: Instant,
    eyes: KeyframeTrack,
    title_timer: f32,
}

impl App {
    fn new(window: Window) -> Self {
        Self {
            window,
            controller: LocomotionController::default(),
            pose: ActorPose::default(),
            bounds: WorldBounds::new(Vec3::new(-50.0, 0.0, -50.0), Vec3::new(50.0, 100.0, 50.0)),
            clock: FrameClock::new(FrameConfig::default()),
            started: Instant::now(),
            eyes: flap_eyes(),
            title_timer: 0.0,
        }
    }

    fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event: KeyEvent { state, physical_key, .. }, .. } => {
                if let PhysicalKey::Code(code) = physical_key {
                    // winit key codes are named after `KeyboardEvent.code`
                    let name = format!("{code:?}");
                    let is_down = *state == ElementState::Pressed;
                    self.controller.handle_event(&InputEvent::key(name, is_down), &self.pose);
                }
            }
            WindowEvent::Focused(false) => {
                self.controller.handle_event(&InputEvent::FocusLost, &self.pose);
            }
            WindowEvent::Occluded(occluded) => {
                self.controller
                    .handle_event(&InputEvent::VisibilityChanged { visible: !occluded }, &self.pose);
                self.clock.reset();
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        let now_ms = self.elapsed_ms();
        let dt = self.clock.step(now_ms);
        self.controller.tick(&mut self.pose, &mut self.bounds, dt);

        self.title_timer += dt;
        if self.title_timer >= 0.25 {
            self.title_timer = 0.0;
            let p = self.pose.position;
            let eyes = self.eyes.sample((now_ms / 1000.0) as f32, 1.0);
            let wing = if self.controller.is_airborne() { wing_flap_angle(now_ms) } else { 0.0 };
            self.window.set_title(&format!(
                "quizmallow  pos ({:.2}, {:.2}, {:.2})  yaw {:.2}  eyes {:.2}  wing {:+.2}",
                p.x, p.y, p.z, self.pose.yaw, eyes, wing
            ));
            debug!(x = p.x, y = p.y, z = p.z, yaw = self.pose.yaw, "pose");
        }
    }
}

// EventLoop::create_window and the closure-style run are deprecated in winit 0.30
#[allow(deprecated)]
fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("quizmallow")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360));
    let window = event_loop.create_window(window_attributes)?;
    let mut app = App::new(window);
    info!("arrow keys / WASD to move, space to jump");

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                app.input(event);
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::RedrawRequested => app.update(),
                    _ => {}
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;
    Ok(())
}
