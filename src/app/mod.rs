//! `CloudApp`: the egui viewer around a `CloudEngine`.
//!
//! - `toolbar` : variant switch, phase readout, last activated route
//! - `canvas`  : paints the frame's render state and turns pointer input into
//!   focus / activate calls

pub mod canvas;
pub mod toolbar;

use std::time::{Duration, Instant};

use eframe::egui;
use url::Url;

use orbit_cloud::config::CloudConfig;
use orbit_cloud::engine::CloudEngine;
use orbit_cloud::model::LabelSet;
use orbit_cloud::render::{CloudVariant, RenderState};

pub struct CloudApp {
    pub engine: CloudEngine,
    /// Kept so the variant switch can rebuild the engine
    pub labels: LabelSet,
    pub site: Option<Url>,
    pub seed: Option<u64>,
    pub started: Instant,
    /// Label currently under the pointer
    pub hovered: Option<String>,
    /// Last activated route (or error) for the status line
    pub status: String,
    pub dark_mode: bool,
}

impl CloudApp {
    pub fn new(
        config: CloudConfig,
        labels: LabelSet,
        site: Option<Url>,
        seed: Option<u64>,
    ) -> orbit_cloud::Result<Self> {
        let engine = Self::make_engine(config, labels.clone(), seed)?;
        Ok(Self {
            engine,
            labels,
            site,
            seed,
            started: Instant::now(),
            hovered: None,
            status: String::new(),
            dark_mode: false,
        })
    }

    fn make_engine(
        config: CloudConfig,
        labels: LabelSet,
        seed: Option<u64>,
    ) -> orbit_cloud::Result<CloudEngine> {
        let engine = CloudEngine::with_labels(config, labels)?;
        Ok(match seed {
            Some(seed) => engine.with_seed(seed),
            None => engine,
        })
    }

    /// Monotonic frame timestamp.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Swap to the other arrangement, keeping category and labels.
    pub fn switch_variant(&mut self, variant: CloudVariant) {
        if variant == self.engine.variant() {
            return;
        }
        let mut config = CloudConfig::for_variant(variant);
        config.category = self.engine.config().category.clone();
        match Self::make_engine(config, self.labels.clone(), self.seed) {
            Ok(engine) => {
                self.engine = engine;
                self.hovered = None;
                log::info!("switched to {:?}", variant);
            }
            Err(err) => {
                log::warn!("variant switch failed: {}", err);
                self.status = err.to_string();
            }
        }
    }

    /// Resolve and report the route for `label`.
    pub fn activate(&mut self, label: &str) {
        let Some(route) = self.engine.activate(label) else {
            return;
        };
        self.status = match &self.site {
            Some(site) => match route.absolute(site) {
                Ok(url) => url.to_string(),
                Err(err) => err.to_string(),
            },
            None => route.path(),
        };
        log::info!("navigate → {}", self.status);
    }
}

impl eframe::App for CloudApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Engine first, then UI, so every panel reads the same frame
        let state: RenderState = self.engine.frame(self.now());

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui, &state);
        });

        ctx.request_repaint();
    }
}
