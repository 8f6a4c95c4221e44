// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod logging;

// MVC Architecture (the view lives in the host engine)
pub mod model;
pub mod controller;

pub use config::{FrameConfig, LocomotionConfig};
pub use controller::{Collider, FrameClock, InputEvent, KeyBindings, LocomotionController};
pub use model::ActorPose;

#[cfg(target_arch = "wasm32")]
pub use web::Quizmallow;

/// Browser surface: the JS scene owns meshes and the render loop, and calls
/// into a `Quizmallow` handle once per frame.
#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;
    use js_sys::{Array, Function, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue, prelude::wasm_bindgen};
    use web_sys::{Event, KeyboardEvent};

    use crate::controller::{input, Collider, FrameClock, FreeSpace, InputEvent, LocomotionController};
    use crate::model::{self, ActorPose, KeyframeTrack};
    use crate::logging;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();
        tracing::info!("quizmallow wasm module loaded");
        Ok(())
    }

    struct PlayerState {
        controller: LocomotionController,
        pose: ActorPose,
        clock: FrameClock,
        collider: Option<Function>,
    }

    impl PlayerState {
        fn handle_event(&mut self, event: &InputEvent) {
            self.controller.handle_event(event, &self.pose);
        }

        fn tick(&mut self, dt: f32) {
            match &self.collider {
                Some(f) => self.controller.tick(&mut self.pose, &mut JsCollider(f), dt),
                None => self.controller.tick(&mut self.pose, &mut FreeSpace, dt),
            }
        }
    }

    /// Resolves movement through a JS `(x, y, z, dx, dy, dz) => [x, y, z]` callback.
    /// The callback must not call back into the same handle.
    struct JsCollider<'a>(&'a Function);

    impl Collider for JsCollider<'_> {
        fn move_with_collisions(&mut self, from: Vec3, displacement: Vec3) -> Vec3 {
            let args = Array::new();
            for v in [from.x, from.y, from.z, displacement.x, displacement.y, displacement.z] {
                args.push(&JsValue::from_f64(v as f64));
            }
            let fallback = from + displacement;

            let result = match self.0.apply(&JsValue::NULL, &args) {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!(?err, "collider callback threw; moving freely");
                    return fallback;
                }
            };

            let component = |i: u32| Reflect::get_u32(&result, i).ok().and_then(|v| v.as_f64());
            match (component(0), component(1), component(2)) {
                (Some(x), Some(y), Some(z)) => Vec3::new(x as f32, y as f32, z as f32),
                _ => {
                    tracing::warn!("collider callback did not return [x, y, z]; moving freely");
                    fallback
                }
            }
        }
    }

    /// Player locomotion handle exported to the JS scene
    #[wasm_bindgen]
    pub struct Quizmallow {
        inner: Rc<RefCell<PlayerState>>,
    }

    #[wasm_bindgen]
    impl Quizmallow {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Quizmallow {
            Quizmallow {
                inner: Rc::new(RefCell::new(PlayerState {
                    controller: LocomotionController::default(),
                    pose: ActorPose::default(),
                    clock: FrameClock::default(),
                    collider: None,
                })),
            }
        }

        /// Feed a key event by `KeyboardEvent.code`
        pub fn handle_key(&self, code: &str, down: bool) {
            self.inner.borrow_mut().handle_event(&InputEvent::key(code, down));
        }

        pub fn clear_keys(&self) {
            self.inner.borrow_mut().controller.clear_keys();
        }

        /// Advance one frame by `dt` seconds, taken as-is
        pub fn tick(&self, dt: f32) {
            self.inner.borrow_mut().tick(dt);
        }

        /// Advance one frame from a `performance.now()` timestamp; returns the
        /// clamped step that was used
        pub fn tick_at(&self, now_ms: f64) -> f32 {
            let mut state = self.inner.borrow_mut();
            let dt = state.clock.step(now_ms);
            state.tick(dt);
            dt
        }

        /// Install (or clear with `undefined`) the host's collision resolver
        pub fn set_collider(&self, collider: Option<Function>) {
            self.inner.borrow_mut().collider = collider;
        }

        pub fn set_position(&self, x: f32, y: f32, z: f32) {
            self.inner.borrow_mut().pose.position = Vec3::new(x, y, z);
        }

        #[wasm_bindgen(getter)]
        pub fn x(&self) -> f32 {
            self.inner.borrow().pose.position.x
        }

        #[wasm_bindgen(getter)]
        pub fn y(&self) -> f32 {
            self.inner.borrow().pose.position.y
        }

        #[wasm_bindgen(getter)]
        pub fn z(&self) -> f32 {
            self.inner.borrow().pose.position.z
        }

        #[wasm_bindgen(getter)]
        pub fn yaw(&self) -> f32 {
            self.inner.borrow().pose.yaw
        }

        #[wasm_bindgen(getter)]
        pub fn airborne(&self) -> bool {
            self.inner.borrow().controller.is_airborne()
        }

        /// Listen for keyboard, blur and visibility events on the page
        pub fn attach_keyboard(&self) -> Result<(), JsValue> {
            let window = web_sys::window().ok_or(js_error("no global `window`"))?;
            let document = window.document().ok_or(js_error("no document on window"))?;

            // Keyboard down / up
            for (kind, is_down) in [("keydown", true), ("keyup", false)] {
                let state = self.inner.clone();
                let listener = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let event = input::wasm::keyboard_event_to_input(&e, is_down);
                    let mut state = state.borrow_mut();
                    // Keep arrows and space from scrolling the page
                    if state.controller.bindings.is_bound(&e.code()) {
                        e.prevent_default();
                    }
                    state.handle_event(&event);
                }) as Box<dyn FnMut(KeyboardEvent)>);
                document.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
                listener.forget();
            }

            // Focus loss - clear all keys
            {
                let state = self.inner.clone();
                let blur = Closure::wrap(Box::new(move |_e: Event| {
                    state.borrow_mut().handle_event(&InputEvent::FocusLost);
                }) as Box<dyn FnMut(Event)>);
                window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
                blur.forget();
            }

            // Visibility change - clear all keys and restart frame timing
            {
                let state = self.inner.clone();
                let doc = document.clone();
                let visibility = Closure::wrap(Box::new(move |_e: Event| {
                    let visible = !doc.hidden();
                    let mut state = state.borrow_mut();
                    state.handle_event(&InputEvent::VisibilityChanged { visible });
                    state.clock.reset();
                }) as Box<dyn FnMut(Event)>);
                document.add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
                visibility.forget();
            }

            tracing::debug!("keyboard listeners attached");
            Ok(())
        }
    }

    impl Default for Quizmallow {
        fn default() -> Self {
            Self::new()
        }
    }

    thread_local! {
        static FLAP_EYES: KeyframeTrack = model::flap_eyes();
        static FLAP_MOUTH: KeyframeTrack = model::flap_mouth();
    }

    /// Eye `scaling.y` at `seconds` into the blink loop
    #[wasm_bindgen]
    pub fn flap_eyes_at(seconds: f32) -> f32 {
        FLAP_EYES.with(|track| track.sample(seconds, 1.0))
    }

    /// Mouth `scaling.y` at `seconds` into the flap loop
    #[wasm_bindgen]
    pub fn flap_mouth_at(seconds: f32) -> f32 {
        FLAP_MOUTH.with(|track| track.sample(seconds, 0.0))
    }

    /// Wing `rotation.x` for a `performance.now()` timestamp
    #[wasm_bindgen]
    pub fn wing_flap_at(elapsed_ms: f64) -> f32 {
        model::wing_flap_angle(elapsed_ms)
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }
}
