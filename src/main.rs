//! Renders the light paths of a dispersed beam through a fixed scene of prisms
//! into an image file.

use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use prism_trace::canvas::Canvas;
use prism_trace::picture::RGBA8;
use prism_trace::{MaterialRegistry, SceneConfig, Termination, Tracer};

use crate::cli::Args;

mod cli;

const BACKGROUND_COLOR: RGBA8 = RGBA8::BLACK;
const OUTLINE_COLOR: RGBA8 = RGBA8::WHITE;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(args.log_level.clone().into())
        .parse_default_env()
        .init();

    let tracer = Tracer::new(MaterialRegistry::default());
    let registry = tracer.registry();

    if args.list_materials {
        for (name, index) in registry.iter() {
            println!("{name:<12} {index}");
        }
        return Ok(());
    }

    for name in [&args.material, &args.environment] {
        if !registry.contains(name) {
            bail!("unknown material '{}', try --list-materials", name);
        }
    }

    let scene = SceneConfig::showcase(args.prism_angle)?
        .with_materials(args.material.as_str(), args.environment.as_str())
        .with_angle(args.angle)
        .with_samples(args.samples);
    info!(target: "app", "{} in {}, angle {}°, {} wavelengths", scene.body_material, scene.environment_material, scene.angle_degrees, scene.samples);

    let mut canvas = Canvas::new((args.width, args.height), BACKGROUND_COLOR);
    for polygon in &scene.polygons {
        canvas.draw_polygon(polygon, OUTLINE_COLOR);
    }

    info!(target: "app", "Starting trace...");
    let start = Instant::now();
    let summaries = if args.sequential {
        tracer.trace_scene(&scene, &mut canvas)?
    } else {
        tracer.trace_scene_par(&scene, &mut canvas)?
    };
    let elapsed = start.elapsed();

    let segments: u32 = summaries.iter().map(|s| s.segments).sum();
    let escaped = summaries
        .iter()
        .filter(|s| s.termination == Termination::Escaped)
        .count();
    info!(target: "app", "Finished tracing. {} segments, {}/{} rays escaped. Took {:?}", segments, escaped, summaries.len(), elapsed);

    canvas
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(target: "app", "Saved {}", args.output.display());

    Ok(())
}
