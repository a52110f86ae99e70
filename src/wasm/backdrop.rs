//! Browser glue: owns the engine, wires DOM events to it and drives the
//! `requestAnimationFrame` loop.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::config::SimConfig;
use crate::engine::entity::parallax_offset;
use crate::engine::frame::{FrameLoop, FrameScheduler};
use crate::engine::Engine;

use super::render::Canvas2dSurface;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` behind [`FrameScheduler`]. `tick` holds the frame
/// closure; it is filled in once the shared state exists.
struct RafScheduler {
    window: Window,
    tick: TickSlot,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request(&mut self) -> Option<i32> {
        let tick = self.tick.borrow();
        let callback = tick.as_ref()?;
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {err:?}");
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        self.window.cancel_animation_frame(handle).ok();
    }
}

pub struct Backdrop {
    engine: Engine,
    frames: FrameLoop<i32>,
    scheduler: RafScheduler,
    surface: Canvas2dSurface,
    canvas: HtmlCanvasElement,
    parallax: Option<HtmlElement>,
}

impl Backdrop {
    /// Size the canvas to the window, seed the engine, attach listeners and
    /// start the loop. A malformed `config_json` falls back to the defaults.
    pub fn start(canvas: HtmlCanvasElement, config_json: &str) -> Result<Rc<RefCell<Backdrop>>, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = SimConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("{err}; using default backdrop");
            SimConfig::default()
        });
        let seed = config.seed.unwrap_or_else(clock_seed);
        let parallax = config
            .parallax_selector
            .as_deref()
            .and_then(|sel| document.query_selector(sel).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let size = fit_to_window(&window, &canvas);
        let surface = Canvas2dSurface::new(&canvas)?;
        log::info!("backdrop {:?} at {}x{}", config.variant, size.x, size.y);

        let tick: TickSlot = Rc::new(RefCell::new(None));
        let state = Rc::new(RefCell::new(Backdrop {
            engine: Engine::initialized(config, size, seed),
            frames: FrameLoop::new(),
            scheduler: RafScheduler { window: window.clone(), tick: tick.clone() },
            surface,
            canvas,
            parallax,
        }));

        // Animation loop: the closure re-arms itself through the scheduler.
        {
            let state = state.clone();
            *tick.borrow_mut() = Some(Closure::wrap(
                Box::new(move || state.borrow_mut().tick()) as Box<dyn FnMut()>
            ));
        }

        {
            let state = state.clone();
            let window_for_resize = window.clone();
            on(&window, "resize", move || {
                state.borrow_mut().on_resize(&window_for_resize);
            })?;
        }
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                let pos = DVec2::new(e.client_x() as f64, e.client_y() as f64);
                state.borrow_mut().on_pointer_move(pos);
            }) as Box<dyn FnMut(MouseEvent)>);
            document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let state = state.clone();
            on(&document, "mouseleave", move || state.borrow_mut().engine.on_pointer_leave())?;
        }
        {
            let state = state.clone();
            let doc = document.clone();
            on(&document, "visibilitychange", move || {
                let mut backdrop = state.borrow_mut();
                if doc.hidden() {
                    backdrop.suspend();
                } else {
                    backdrop.resume();
                }
            })?;
        }

        state.borrow_mut().resume();
        Ok(state)
    }

    fn tick(&mut self) {
        if !self.frames.begin_tick() {
            return;
        }
        self.engine.step(&mut self.surface);
        self.frames.rearm(&mut self.scheduler);
    }

    /// Start (or restart) the loop with exactly one fresh frame request.
    pub fn resume(&mut self) {
        let size = canvas_size(&self.canvas);
        self.engine.ensure_initialized(size);
        self.frames.resume(&mut self.scheduler);
    }

    pub fn suspend(&mut self) {
        self.frames.suspend(&mut self.scheduler);
    }

    fn on_resize(&mut self, window: &Window) {
        let size = fit_to_window(window, &self.canvas);
        self.engine.on_resize(size);
    }

    fn on_pointer_move(&mut self, pos: DVec2) {
        self.engine.on_pointer_move(pos);
        if let Some(el) = &self.parallax {
            let offset = parallax_offset(pos, self.engine.viewport().size);
            el.style()
                .set_property("transform", &format!("translate({}px, {}px)", offset.x, offset.y))
                .ok();
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }
}

/// Attach a listener that ignores its event argument. Listeners live as long
/// as the page, so the closure is leaked.
fn on(target: &EventTarget, event: &str, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn window_size(window: &Window) -> DVec2 {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    DVec2::new(w, h)
}

fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> DVec2 {
    let size = window_size(window);
    canvas.set_width(size.x as u32);
    canvas.set_height(size.y as u32);
    canvas_size(canvas)
}

fn canvas_size(canvas: &HtmlCanvasElement) -> DVec2 {
    DVec2::new(canvas.width() as f64, canvas.height() as f64)
}

fn clock_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 20)
}
