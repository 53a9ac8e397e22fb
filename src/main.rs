//! Beeline entry point
//!
//! Platform wiring only: device events feed the intent latch, an animation
//! frame loop drives the simulation, and a DOM sink receives positions. The
//! native build runs a short headless demo of the same loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use beeline::consts::*;
    use beeline::sim::{
        Key, PositionSink, SpriteAnimator, SpriteId, TrackSet, World,
    };
    use beeline::tuning::Tuning;
    use glam::Vec2;

    /// Render boundary: positions land on an absolutely-positioned DOM
    /// element; frame swaps become a data attribute for CSS to pick up.
    struct DomSink {
        character: HtmlElement,
        /// Canvas center, added so track coords map to page coords
        origin: Vec2,
    }

    impl PositionSink for DomSink {
        fn on_position_updated(&mut self, sprite: SpriteId, position: Vec2) {
            if sprite != SpriteId::Character {
                return;
            }
            let style = self.character.style();
            let _ = style.set_property("left", &format!("{:.0}px", self.origin.x + position.x));
            let _ = style.set_property("top", &format!("{:.0}px", self.origin.y + position.y));
        }

        fn on_sprite_tick(&mut self, frame_index: usize) {
            let _ = self.character.set_attribute("data-frame", &frame_index.to_string());
        }
    }

    /// App instance: the session plus scheduler bookkeeping
    struct App {
        world: World,
        animator: SpriteAnimator,
        sink: DomSink,
        canvas_center: Vec2,
        stop: bool,
        sprite_timer: Option<i32>,
    }

    impl App {
        /// One animation frame, one simulation tick. Returns false once
        /// stopped.
        fn frame(&mut self) -> bool {
            if self.stop {
                return false;
            }
            self.world.tick(&mut self.sink);
            true
        }

        fn request_stop(&mut self) {
            self.stop = true;
            if let Some(handle) = self.sprite_timer.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
            self.animator.reset(&mut self.sink);
            log::info!("Stopped");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beeline starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let character: HtmlElement = document
            .get_element_by_id("character")
            .expect("no character element")
            .dyn_into()
            .expect("not an element");

        let tuning = Tuning::load();
        let tracks = TrackSet::default();
        let world = match World::new(&tuning, &tracks) {
            Ok(world) => world,
            Err(err) => {
                log::error!("Config rejected: {err}");
                return;
            }
        };

        let canvas_center = Vec2::new(
            canvas.client_width() as f32 / 2.0,
            canvas.client_height() as f32 / 2.0,
        );

        let app = Rc::new(RefCell::new(App {
            world,
            animator: SpriteAnimator::new(SPRITE_FRAMES),
            sink: DomSink { character, origin: canvas_center },
            canvas_center,
            stop: false,
            sprite_timer: None,
        }));

        setup_input_handlers(app.clone());
        setup_sprite_timer(app.clone());
        request_animation_frame(app);

        log::info!("Beeline running");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Pointer move: bucketed into a slide intent below canvas center
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let center = a.canvas_center;
                a.world.control.pointer_moved(pointer, center);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: reserved jump hook
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().world.control.pointer_clicked();
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_event_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let mut a = app.borrow_mut();
                match key {
                    Key::Escape => a.request_stop(),
                    other => a.world.control.key_down(other),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: KeyboardEvent| {
                app.borrow_mut().world.control.key_up();
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wing-flap task: a repeating interval independent of the physics tick.
    fn setup_sprite_timer(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let app_for_timer = app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut a = app_for_timer.borrow_mut();
            // Split borrows: the animator owns only its frame index
            let App { animator, sink, .. } = &mut *a;
            animator.advance(sink);
        });
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                SPRITE_SWAP_INTERVAL_MS as i32,
            )
            .expect("interval");
        closure.forget();
        app.borrow_mut().sprite_timer = Some(handle);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            let keep_going = app.borrow_mut().frame();
            if keep_going {
                request_animation_frame(app);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use beeline::sim::{PositionSink, SpriteId, TrackSet, World};
    use beeline::tuning::Tuning;
    use glam::Vec2;

    struct LogSink;

    impl PositionSink for LogSink {
        fn on_position_updated(&mut self, sprite: SpriteId, position: Vec2) {
            log::debug!("{sprite:?} -> ({:.1}, {:.1})", position.x, position.y);
        }

        fn on_sprite_tick(&mut self, frame_index: usize) {
            log::trace!("sprite frame {frame_index}");
        }
    }

    env_logger::init();
    log::info!("Beeline (native) starting headless demo...");

    let tuning = Tuning::load();
    let tracks = TrackSet::default();
    let mut world = match World::new(&tuning, &tracks) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Config rejected: {err}");
            std::process::exit(1);
        }
    };
    let mut sink = LogSink;

    // Drop toward the floor with the pointer held below center, then let go
    // and run until everything settles or the frame budget runs out.
    world.control.pointer_moved(Vec2::new(400.0, 500.0), Vec2::new(400.0, 300.0));
    for _ in 0..120 {
        world.tick(&mut sink);
    }
    world.control.key_up();

    let mut frames = 0u32;
    while frames < 2000 {
        let outcome = world.tick(&mut sink);
        frames += 1;
        if outcome.settled {
            break;
        }
    }

    let pos = world.engine.state.position;
    log::info!("Settled after {frames} frame(s) at ({:.1}, {:.1})", pos.x, pos.y);
}
