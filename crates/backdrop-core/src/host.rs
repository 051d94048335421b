use log::{debug, warn};
use rand::rngs::StdRng;

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::surface::{Extent, Surface};

/// Platform events a mounted backdrop listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    PointerMove,
}

/// Handle to a registered listener, issued by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Handle to a pending frame callback, issued by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// The platform side of a mount: measurement, event listeners and frame scheduling.
///
/// A host routes fired events back to the backdrop that registered them by
/// calling `Backdrop::tick`, `Backdrop::handle_resize` and
/// `Backdrop::handle_pointer_move`.
pub trait Host {
    /// Current size of the region the surface should fill.
    fn measure(&self) -> Extent;

    fn listen(&mut self, event: HostEvent) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);

    /// Schedule one call to `Backdrop::tick` on the next display frame.
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Whether the region can change size without a resize event, so every
    /// tick has to re-measure it.
    fn remeasure_each_frame(&self) -> bool {
        false
    }
}

/// A particle field mounted on a surface, driven by a host.
///
/// Owns its listeners and pending frame for its whole life; `unmount` (or
/// dropping the backdrop) releases both.
pub struct Backdrop<S: Surface, H: Host> {
    field: ParticleField,
    surface: S,
    host: H,
    listeners: Vec<ListenerId>,
    pending_frame: Option<FrameHandle>,
    mounted: bool,
}

impl<S: Surface, H: Host> Backdrop<S, H> {
    /// Size the surface to the host region, seed the field, register the resize
    /// and pointer listeners and request the first frame.
    pub fn mount(config: FieldConfig, mut surface: S, mut host: H, rng: StdRng) -> Result<Self, ConfigError> {
        let extent = host.measure();
        surface.resize(extent);
        if !surface.has_context() {
            warn!("particle backdrop mounted without a drawing context; frames will be skipped");
        }

        let field = ParticleField::new(config, extent, rng)?;

        let listeners = vec![
            host.listen(HostEvent::Resize),
            host.listen(HostEvent::PointerMove),
        ];
        let pending_frame = Some(host.request_frame());

        debug!(
            "mounted backdrop: {} particles on {}x{}",
            field.particles().len(),
            extent.width,
            extent.height
        );

        Ok(Self {
            field,
            surface,
            host,
            listeners,
            pending_frame,
            mounted: true,
        })
    }

    /// Frame callback. Draws one frame and schedules the next.
    ///
    /// A tick that arrives after `unmount` (the callback was already in flight
    /// when the frame was cancelled) does nothing.
    pub fn tick(&mut self) {
        self.pending_frame = None;
        if !self.mounted {
            return;
        }
        if self.host.remeasure_each_frame() && self.host.measure() != self.field.extent() {
            self.handle_resize();
        }
        self.field.frame(&mut self.surface);
        self.pending_frame = Some(self.host.request_frame());
    }

    /// Re-measure the host region and resize surface and field to match.
    pub fn handle_resize(&mut self) {
        if !self.mounted {
            return;
        }
        let extent = self.host.measure();
        self.surface.resize(extent);
        self.field.resize(extent);
    }

    /// Pointer moved to `(x, y)` in surface pixels.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) {
        if !self.mounted {
            return;
        }
        self.field.inject_pointer(x, y);
    }

    /// Cancel the pending frame and remove both listeners. Safe to call twice.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        for id in self.listeners.drain(..) {
            self.host.unlisten(id);
        }
        debug!("unmounted backdrop after {} frames", self.field.stats().frames_drawn);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<S: Surface, H: Host> Drop for Backdrop<S, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
