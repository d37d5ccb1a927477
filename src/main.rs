mod app;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eframe::egui;
use url::Url;

use orbit_cloud::config::CloudConfig;
use orbit_cloud::model::loader::{load_label_file, parse_label_json};
use orbit_cloud::model::LabelSet;
use orbit_cloud::render::CloudVariant;

use app::CloudApp;

const BUNDLED_KEYWORDS: &str = include_str!("../demos/keywords.json");
const BUNDLED_TAGS: &str = include_str!("../demos/tags.json");

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Sphere,
    Galaxy,
}

impl From<VariantArg> for CloudVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Sphere => CloudVariant::Sphere,
            VariantArg::Galaxy => CloudVariant::Galaxy,
        }
    }
}

/// Interactive viewer for weighted label clouds.
#[derive(Debug, Parser)]
#[command(name = "orbit-cloud", version)]
struct Args {
    /// Label file: `{"label": weight, ...}` or `[{"label": .., "weight": ..}]`
    #[arg(long)]
    input: Option<PathBuf>,

    /// Cloud arrangement (defaults to the config's, or sphere)
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// JSON config overriding the preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Route category, e.g. `tags` → /tags/<slug>
    #[arg(long)]
    category: Option<String>,

    /// Site URL that activated routes are joined onto
    #[arg(long)]
    site_url: Option<String>,

    /// Seed for the showcase picker
    #[arg(long)]
    seed: Option<u64>,
}

fn build_config(args: &Args) -> orbit_cloud::Result<CloudConfig> {
    let mut config = match (&args.config, args.variant) {
        (Some(path), variant) => {
            let mut cfg = CloudConfig::load(path)?;
            if let Some(v) = variant {
                cfg.variant = v.into();
            }
            cfg
        }
        (None, Some(v)) => CloudConfig::for_variant(v.into()),
        (None, None) => CloudConfig::default(),
    };
    if let Some(category) = &args.category {
        config.category = category.clone();
    }
    config.validate()?;
    Ok(config)
}

fn load_labels(args: &Args, variant: CloudVariant) -> orbit_cloud::Result<LabelSet> {
    match &args.input {
        Some(path) => load_label_file(path),
        None => match variant {
            CloudVariant::Sphere => parse_label_json(BUNDLED_KEYWORDS),
            CloudVariant::Galaxy => parse_label_json(BUNDLED_TAGS),
        },
    }
}

fn build_app(args: &Args) -> orbit_cloud::Result<CloudApp> {
    let config = build_config(args)?;
    let labels = load_labels(args, config.variant)?;
    let site = args.site_url.as_deref().map(Url::parse).transpose()?;
    log::info!(
        "{} labels, {:?} variant, category {:?}",
        labels.len(),
        config.variant,
        config.category
    );
    CloudApp::new(config, labels, site, args.seed)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let app = match build_app(&args) {
        Ok(app) => app,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("orbit-cloud: {}", err);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Orbit Cloud",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .expect("Failed to start Orbit Cloud");
}
