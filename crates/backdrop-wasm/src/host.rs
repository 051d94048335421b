use std::cell::RefCell;
use std::rc::{Rc, Weak};

use backdrop_core::host::{FrameHandle, Host, HostEvent, ListenerId};
use backdrop_core::{Backdrop, Extent};
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;

pub type WebBackdrop = Backdrop<CanvasSurface, WebHost>;

/// Weak link from callbacks back to the backdrop that owns them. Filled in
/// right after the backdrop is placed behind an `Rc`.
pub type BackdropSlot = Rc<RefCell<Weak<RefCell<WebBackdrop>>>>;

/// Region the canvas is sized to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    Viewport,
    Container,
}

struct Listener {
    id: ListenerId,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// `Host` backed by the browser window: `requestAnimationFrame` plus
/// per-instance `resize` and `pointermove` listeners.
pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    fill: Fill,
    slot: BackdropSlot,
    frame_callback: Closure<dyn FnMut()>,
    listeners: Vec<Listener>,
    next_listener: u32,
}

impl WebHost {
    pub fn new(window: Window, canvas: HtmlCanvasElement, fill: Fill, slot: BackdropSlot) -> Self {
        let frame_slot = slot.clone();
        let frame_callback = Closure::<dyn FnMut()>::new(move || {
            with_backdrop(&frame_slot, |backdrop| backdrop.tick());
        });
        Self {
            window,
            canvas,
            fill,
            slot,
            frame_callback,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    fn viewport(&self) -> Extent {
        let side = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32;
        Extent::new(side(self.window.inner_width()), side(self.window.inner_height()))
    }

    fn pointer_callback(&self) -> Closure<dyn FnMut(Event)> {
        let slot = self.slot.clone();
        let canvas = self.canvas.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let x = mouse.client_x() as f64 - rect.left();
            let y = mouse.client_y() as f64 - rect.top();
            if !(0.0..=rect.width()).contains(&x) || !(0.0..=rect.height()).contains(&y) {
                return;
            }
            with_backdrop(&slot, |backdrop| backdrop.handle_pointer_move(x as f32, y as f32));
        })
    }

    fn resize_callback(&self) -> Closure<dyn FnMut(Event)> {
        let slot = self.slot.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            with_backdrop(&slot, |backdrop| backdrop.handle_resize());
        })
    }
}

/// Run `f` on the backdrop if it is still alive and not already borrowed.
fn with_backdrop(slot: &BackdropSlot, f: impl FnOnce(&mut WebBackdrop)) {
    let target = slot.borrow().clone();
    if let Some(backdrop) = target.upgrade() {
        if let Ok(mut backdrop) = backdrop.try_borrow_mut() {
            f(&mut *backdrop);
        }
    }
}

impl Host for WebHost {
    fn measure(&self) -> Extent {
        match self.fill {
            Fill::Viewport => self.viewport(),
            Fill::Container => match self.canvas.parent_element() {
                Some(parent) => Extent::new(parent.client_width() as f32, parent.client_height() as f32),
                None => self.viewport(),
            },
        }
    }

    fn listen(&mut self, event: HostEvent) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        let (name, callback) = match event {
            HostEvent::Resize => ("resize", self.resize_callback()),
            HostEvent::PointerMove => ("pointermove", self.pointer_callback()),
        };
        if let Err(err) = self
            .window
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
        {
            warn!("failed to listen for {name}: {err:?}");
        }
        self.listeners.push(Listener {
            id,
            event: name,
            callback,
        });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(pos) = self.listeners.iter().position(|l| l.id == id) else {
            return;
        };
        let listener = self.listeners.swap_remove(pos);
        let _ = self
            .window
            .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref());
    }

    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.frame_callback.as_ref().unchecked_ref())
        {
            Ok(handle) => FrameHandle(handle),
            Err(err) => {
                warn!("requestAnimationFrame failed: {err:?}");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    /// Containers resize with layout, which fires no window event.
    fn remeasure_each_frame(&self) -> bool {
        self.fill == Fill::Container
    }
}
