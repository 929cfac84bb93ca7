use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use econ_diagram::{
    config::RenderConfig,
    export::ExportFormat,
    library,
    preview,
    renderer::Renderer,
    scene::Concept,
};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` overrides the default `info` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

const LIST_USAGE: &str = "econ-diagram list";
const RENDER_USAGE: &str =
    "econ-diagram render [<concept>|all] [--config <path>] [--out <dir>] [--format svg|json] [--dpi N]";
const RENDER_FILE_USAGE: &str = "econ-diagram render-file <concept.json> [options]";
const PREVIEW_USAGE: &str = "econ-diagram preview <concept> [frame]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("list") => {
            list();
            Ok(())
        }
        Some("render") => {
            let mut rest: Vec<String> = args.collect();
            let selection = if rest.first().is_some_and(|a| !a.starts_with("--")) {
                rest.remove(0)
            } else {
                "all".to_string()
            };
            let config = parse_options(&rest)?;
            let concepts = if selection == "all" {
                library::builtin()
            } else {
                vec![library::find(&selection)?]
            };
            render(&concepts, &config)
        }
        Some("render-file") => {
            let path = args.next().context(RENDER_FILE_USAGE)?;
            let rest: Vec<String> = args.collect();
            let config = parse_options(&rest)?;
            let concept = library::load_concept(Path::new(&path))?;
            render(&[concept], &config)
        }
        Some("preview") => {
            let name = args.next().context(PREVIEW_USAGE)?;
            let index = match args.next() {
                Some(n) => n.parse().with_context(|| format!("invalid frame index {n:?}"))?,
                None => 0,
            };
            let concept = library::find(&name)?;
            let canvas = Renderer::default().render_frame(&concept, index)?;
            preview::show(&canvas)?;
            Ok(())
        }
        _ => bail!(
            "econ-diagram: overhead diagrams of economic concepts\n\nUsage:\n  {LIST_USAGE}\n  {RENDER_USAGE}\n  {RENDER_FILE_USAGE}\n  {PREVIEW_USAGE}"
        ),
    }
}

fn list() {
    for concept in library::builtin() {
        println!(
            "{:<24} {} frame(s)  {}",
            concept.file_stem(),
            concept.frames.len(),
            concept.description,
        );
    }
}

/// Apply `--config`, then the individual overrides on top of it.
fn parse_options(args: &[String]) -> Result<RenderConfig> {
    let mut config_path: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut format: Option<ExportFormat> = None;
    let mut dpi: Option<u32> = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("missing value for {flag}\n\n{RENDER_USAGE}"))?;
        match flag.as_str() {
            "--config" => config_path = Some(PathBuf::from(value)),
            "--out" => out = Some(PathBuf::from(value)),
            "--format" => {
                format = Some(
                    ExportFormat::parse(value)
                        .with_context(|| format!("unsupported format {value:?}"))?,
                )
            }
            "--dpi" => {
                dpi = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid dpi {value:?}"))?,
                )
            }
            other => bail!("unknown option {other}\n\n{RENDER_USAGE}"),
        }
    }

    let mut config = match config_path {
        Some(path) => RenderConfig::load_from(&path)?,
        None => RenderConfig::load(),
    };
    if let Some(out) = out {
        config.output_dir = out;
    }
    if let Some(format) = format {
        config.format = format;
    }
    if let Some(dpi) = dpi {
        config.dpi = dpi;
    }
    Ok(config)
}

fn render(concepts: &[Concept], config: &RenderConfig) -> Result<()> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let renderer = Renderer::new(config.figure).with_sink(config.format.sink());
    let mut written = 0;
    for concept in concepts {
        let stem = concept.file_stem();
        for (index, frame) in concept.frames.iter().enumerate() {
            let canvas = renderer.render_frame(concept, index)?;
            let path = config.output_path(&stem, frame.t);
            renderer
                .export(canvas, &path, config.dpi)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written += 1;
        }
    }

    eprintln!(
        "Rendered {written} frame(s) from {} concept(s) -> {}",
        concepts.len(),
        config.output_dir.display(),
    );
    Ok(())
}
