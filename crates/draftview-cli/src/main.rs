//! draftview CLI - batch section and elevation generation
//!
//! Runs view generation against a JSON scene file and prints the report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use draftview::{
    inspect, run_batch, select, BatchOptions, BatchReport, CategoryFilter, MemoryDocument,
};
use draftview_drafting::{layout, SectionKind};
use draftview_ir::{ElementId, SceneDocument};

#[derive(Parser)]
#[command(name = "draftview")]
#[command(about = "Generate section and elevation views for model elements", long_about = None)]
struct Cli {
    /// Log every processed element
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Cross section looking along the element
    Section,
    /// Elevation looking at the element's face
    Elevation,
}

impl From<KindArg> for SectionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Section => SectionKind::Cross,
            KindArg::Elevation => SectionKind::Elevation,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate views and write the updated scene
    ///
    /// The batch always runs to completion: this command does not watch for
    /// interrupts, so it cannot be cancelled part way and keep the views
    /// generated so far.
    Run {
        /// Scene file (.json)
        scene: PathBuf,
        /// Options file (.json); defaults apply to missing fields
        #[arg(short, long)]
        options: Option<PathBuf>,
        /// Kind of view, overriding the options file
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Elements to process (default: every selectable element)
        #[arg(short, long = "element")]
        elements: Vec<ElementId>,
        /// Category groups to pick from when no elements are given
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Do not create sheets
        #[arg(long)]
        no_sheets: bool,
        /// Where to write the updated scene (default: overwrite the input)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the classified profile of elements
    Inspect {
        /// Scene file (.json)
        scene: PathBuf,
        /// Elements to inspect (default: all)
        #[arg(short, long = "element")]
        elements: Vec<ElementId>,
    },
    /// Print preset sheet positions for a number of views
    Layout {
        /// Number of views
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scene,
            options,
            kind,
            elements,
            categories,
            no_sheets,
            out,
            json,
        } => {
            let mut options = match options {
                Some(path) => load_options(&path)?,
                None => BatchOptions::default(),
            };
            if let Some(kind) = kind {
                options.kind = kind.into();
            }
            if no_sheets {
                options.place_on_sheets = false;
            }
            let out = out.unwrap_or_else(|| scene.clone());
            let report = run_scene(&scene, &out, &options, &elements, &categories)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Commands::Inspect { scene, elements } => {
            print!("{}", inspect_scene(&scene, &elements)?);
        }
        Commands::Layout { count } => {
            for (n, p) in layout(count).iter().enumerate() {
                println!("{}: ({:+.2}, {:+.2})", n + 1, p.x, p.y);
            }
        }
    }

    Ok(())
}

fn load_scene(path: &Path) -> Result<SceneDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading scene {}", path.display()))?;
    SceneDocument::from_json(&json).with_context(|| format!("parsing scene {}", path.display()))
}

fn load_options(path: &Path) -> Result<BatchOptions> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading options {}", path.display()))?;
    BatchOptions::from_json(&json).with_context(|| format!("loading options {}", path.display()))
}

fn run_scene(
    scene_path: &Path,
    out: &Path,
    options: &BatchOptions,
    elements: &[ElementId],
    categories: &[String],
) -> Result<BatchReport> {
    let mut doc = MemoryDocument::new(load_scene(scene_path)?);
    let elements = if elements.is_empty() {
        let filter = if categories.is_empty() {
            CategoryFilter::all()
        } else {
            CategoryFilter::from_groups(categories)
        };
        select(&doc, &filter, doc.scene().active_view)
    } else {
        elements.to_vec()
    };
    tracing::info!(elements = elements.len(), "running batch");

    // No interrupt handling: the batch is never cancelled.
    let report = run_batch(&mut doc, &elements, options, &AtomicBool::new(false))?;
    std::fs::write(out, doc.into_scene().to_json()?)
        .with_context(|| format!("writing scene {}", out.display()))?;
    tracing::info!(path = %out.display(), "scene written");
    Ok(report)
}

fn inspect_scene(scene_path: &Path, elements: &[ElementId]) -> Result<String> {
    use std::fmt::Write;

    let doc = MemoryDocument::new(load_scene(scene_path)?);
    let ids: Vec<ElementId> = if elements.is_empty() {
        doc.scene().elements.keys().copied().collect()
    } else {
        elements.to_vec()
    };

    let mut out = String::new();
    for id in ids {
        let inspection = inspect(&doc, id, doc.scene().active_view)?;
        let p = inspection.classification.profile;
        writeln!(out, "Element {} ({})", id, inspection.info.category)?;
        writeln!(out, "  topology:  {:?}", inspection.info.topology)?;
        writeln!(
            out,
            "  origin:    ({:.3}, {:.3}, {:.3})",
            p.origin.x, p.origin.y, p.origin.z
        )?;
        writeln!(
            out,
            "  direction: ({:.3}, {:.3}, {:.3})",
            p.direction.x, p.direction.y, p.direction.z
        )?;
        writeln!(
            out,
            "  extents:   width {:.3}, height {:.3}, depth {:.3}",
            p.width, p.height, p.depth
        )?;
        if let Some(fallback) = inspection.classification.fallback {
            writeln!(out, "  fallback:  {fallback:?}")?;
        }
        if inspection.geometry.own_box.is_none() {
            writeln!(out, "  no geometry: views cannot be generated")?;
        }
    }
    Ok(out)
}
