#![allow(dead_code)]

use std::collections::{BTreeSet, VecDeque};

use backdrop_core::host::{FrameHandle, Host, HostEvent, ListenerId};
use backdrop_core::{Extent, Rgb, Surface};
use glam::Vec2;

/// Surface double that records every draw call.
#[derive(Default)]
pub struct RecordingSurface {
    pub extent: Option<Extent>,
    pub context_lost: bool,
    pub clears: usize,
    pub overlays: usize,
    pub circles: Vec<(Vec2, f32, Rgb, f32)>,
    pub lines: Vec<(Vec2, Vec2, f32)>,
}

impl RecordingSurface {
    pub fn without_context() -> Self {
        Self {
            context_lost: true,
            ..Self::default()
        }
    }

    /// Every call that would have produced pixels.
    pub fn draw_calls(&self) -> usize {
        self.clears + self.overlays + self.circles.len() + self.lines.len()
    }

    pub fn reset(&mut self) {
        self.clears = 0;
        self.overlays = 0;
        self.circles.clear();
        self.lines.clear();
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, extent: Extent) {
        self.extent = Some(extent);
    }

    fn has_context(&self) -> bool {
        !self.context_lost
    }

    fn clear(&mut self, _extent: Extent) {
        self.clears += 1;
    }

    fn fill_overlay(&mut self, _extent: Extent, _color: Rgb, _alpha: f32) {
        self.overlays += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        self.circles.push((center, radius, color, alpha));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, _color: Rgb, alpha: f32) {
        self.lines.push((from, to, alpha));
    }
}

/// Host double with a manual frame queue and listener registry.
pub struct ManualHost {
    pub extent: Extent,
    pub listeners: BTreeSet<(u32, HostEventKey)>,
    pub frames: VecDeque<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub remeasure: bool,
    next_id: u32,
    next_frame: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HostEventKey {
    Resize,
    PointerMove,
}

impl ManualHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            extent: Extent::new(width, height),
            listeners: BTreeSet::new(),
            frames: VecDeque::new(),
            cancelled: Vec::new(),
            remeasure: false,
            next_id: 0,
            next_frame: 0,
        }
    }

    pub fn listening_for(&self, key: HostEventKey) -> bool {
        self.listeners.iter().any(|(_, k)| *k == key)
    }
}

impl Host for ManualHost {
    fn measure(&self) -> Extent {
        self.extent
    }

    fn listen(&mut self, event: HostEvent) -> ListenerId {
        self.next_id += 1;
        let key = match event {
            HostEvent::Resize => HostEventKey::Resize,
            HostEvent::PointerMove => HostEventKey::PointerMove,
        };
        self.listeners.insert((self.next_id, key));
        ListenerId(self.next_id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(n, _)| *n != id.0);
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame += 1;
        let handle = FrameHandle(self.next_frame);
        self.frames.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }

    fn remeasure_each_frame(&self) -> bool {
        self.remeasure
    }
}
