mod canvas;
mod host;
mod logging;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use backdrop_core::config::{ClearMode, ConnectionStrategy, PointerConfig, PulseConfig};
use backdrop_core::{Backdrop, FieldConfig, FieldPreset, ParticleVertex, Rgb};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::canvas::CanvasSurface;
use crate::host::{BackdropSlot, Fill, WebBackdrop, WebHost};

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

/// Mount options built up from JavaScript before calling `ParticleBackground.with_options`.
#[wasm_bindgen]
pub struct BackdropOptions {
    config: FieldConfig,
    fill: Fill,
    seed: Option<u64>,
}

#[wasm_bindgen]
impl BackdropOptions {
    /// Start from a named preset (`ambient`, `pulse`, `interactive`, `trail`).
    #[wasm_bindgen(constructor)]
    pub fn new(preset: Option<String>) -> BackdropOptions {
        logging::init();
        BackdropOptions {
            config: preset_or_default(preset.as_deref().unwrap_or("")),
            fill: Fill::Viewport,
            seed: None,
        }
    }

    #[wasm_bindgen]
    pub fn set_particle_count(&mut self, count: u32) {
        self.config.particle_count = count as usize;
    }

    /// Comma separated hex colors. An unparsable list keeps the current palette.
    #[wasm_bindgen]
    pub fn set_palette(&mut self, colors: &str) {
        match Rgb::parse_palette(colors) {
            Ok(palette) if !palette.is_empty() => self.config.palette = palette,
            Ok(_) => warn!("ignoring empty palette"),
            Err(err) => warn!("ignoring palette: {err}"),
        }
    }

    #[wasm_bindgen]
    pub fn set_link_color(&mut self, color: &str) {
        match Rgb::from_hex(color) {
            Ok(c) => self.config.link_color = c,
            Err(err) => warn!("ignoring link color: {err}"),
        }
    }

    #[wasm_bindgen]
    pub fn set_connection(&mut self, distance: f32, dampening: f32) {
        self.config.connection_distance = distance;
        self.config.connection_dampening = dampening;
    }

    #[wasm_bindgen]
    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = speed;
    }

    #[wasm_bindgen]
    pub fn set_pulse(&mut self, enabled: bool) {
        self.config.pulse = enabled.then(PulseConfig::default);
    }

    #[wasm_bindgen]
    pub fn set_pointer(&mut self, enabled: bool, slack: u32) {
        self.config.pointer = enabled.then(|| PointerConfig {
            slack: slack as usize,
            ..PointerConfig::default()
        });
    }

    /// Fade frames through an overlay of `color` at `alpha`; `alpha <= 0` restores a full clear.
    #[wasm_bindgen]
    pub fn set_trail(&mut self, color: &str, alpha: f32) {
        self.config.clear_mode = if alpha > 0.0 {
            ClearMode::Trail {
                color: Rgb::from_hex(color).unwrap_or(Rgb::BLACK),
                alpha,
            }
        } else {
            ClearMode::Full
        };
    }

    #[wasm_bindgen]
    pub fn set_grid(&mut self, enabled: bool) {
        self.config.connection_strategy = if enabled {
            ConnectionStrategy::Grid
        } else {
            ConnectionStrategy::AllPairs
        };
    }

    /// Size the canvas to its parent element instead of the viewport. The
    /// parent is re-measured every frame, so layout changes are followed too.
    #[wasm_bindgen]
    pub fn set_fill_container(&mut self, enabled: bool) {
        self.fill = if enabled { Fill::Container } else { Fill::Viewport };
    }

    #[wasm_bindgen]
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = Some(seed as u64);
    }
}

fn preset_or_default(name: &str) -> FieldConfig {
    FieldPreset::by_name(name).unwrap_or_else(|err| {
        warn!("{err}; falling back to the ambient preset");
        FieldPreset::ambient()
    })
}

/// A particle field mounted on a canvas. Runs until `unmount` or until the
/// object is freed.
#[wasm_bindgen]
pub struct ParticleBackground {
    inner: Rc<RefCell<WebBackdrop>>,
    vertices: Vec<ParticleVertex>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mount a viewport-sized backdrop using a named preset.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        preset: Option<String>,
        seed: Option<u32>,
    ) -> Result<ParticleBackground, JsValue> {
        let mut options = BackdropOptions::new(preset);
        if let Some(seed) = seed {
            options.set_seed(seed);
        }
        Self::with_options(canvas, &options)
    }

    #[wasm_bindgen]
    pub fn with_options(
        canvas: HtmlCanvasElement,
        options: &BackdropOptions,
    ) -> Result<ParticleBackground, JsValue> {
        logging::init();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

        let config = match options.config.validate() {
            Ok(()) => options.config.clone(),
            Err(err) => {
                warn!("invalid backdrop options: {err}; using defaults");
                FieldConfig::default()
            }
        };
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let slot: BackdropSlot = Rc::new(RefCell::new(Weak::new()));
        let surface = CanvasSurface::new(canvas.clone());
        let host = WebHost::new(window, canvas, options.fill, slot.clone());
        let backdrop = Backdrop::mount(config, surface, host, rng)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        info!(
            "ParticleBackground mounted: {} particles",
            backdrop.field().particles().len()
        );

        let inner = Rc::new(RefCell::new(backdrop));
        *slot.borrow_mut() = Rc::downgrade(&inner);

        Ok(ParticleBackground {
            inner,
            vertices: Vec::new(),
        })
    }

    /// Cancel the pending frame and remove the listeners. Safe to call more than once.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.inner.borrow_mut().unmount();
    }

    #[wasm_bindgen]
    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().is_mounted()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.inner.borrow().field().particles().len()
    }

    #[wasm_bindgen]
    pub fn frames_drawn(&self) -> f64 {
        self.inner.borrow().field().stats().frames_drawn as f64
    }

    #[wasm_bindgen]
    pub fn frames_skipped(&self) -> f64 {
        self.inner.borrow().field().stats().frames_skipped as f64
    }

    #[wasm_bindgen]
    pub fn connection_count(&self) -> u32 {
        self.inner.borrow().field().stats().connections
    }

    /// Pack the live particles and return a pointer into wasm memory. Eight
    /// f32 per particle: x, y, radius, opacity, r, g, b, a. Valid until the
    /// next call.
    #[wasm_bindgen]
    pub fn particle_buffer_ptr(&mut self) -> *const f32 {
        self.inner.borrow().field().write_vertices(&mut self.vertices);
        bytemuck::cast_slice::<ParticleVertex, f32>(&self.vertices).as_ptr()
    }

    #[wasm_bindgen]
    pub fn particle_buffer_byte_length(&self) -> usize {
        self.vertices.len() * std::mem::size_of::<ParticleVertex>()
    }
}
