use log::{debug, trace};
use rayon::prelude::*;

use crate::error::TraceError;
use crate::material::MaterialRegistry;
use crate::optics::{reflect, refract, Refraction};
use crate::picture::wavelength_to_color;
use crate::polygon::nearest_hit;
use crate::ray::Ray;
use crate::render::{LineStyle, Renderer, SegmentLog};
use crate::scene::{Media, SceneConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct TracerConfig {
    /// Exterior steps stop once a ray has bounced this many times.
    pub max_reflections: u32,
    /// Iterations allowed inside one body per entry, counted separately from depth.
    pub max_inside_bounces: u32,
    /// Length of the segment cast to look for hits, and drawn when a ray escapes.
    pub ray_length: f64,
}

impl Default for TracerConfig {
    fn default() -> Self {
        TracerConfig {
            max_reflections: 20,
            max_inside_bounces: 20,
            ray_length: 2000.0,
        }
    }
}

/// Where a ray is travelling.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// In the environment medium.
    Exterior(Ray),
    /// Inside `scene.polygons[polygon]`.
    Inside { polygon: usize, ray: Ray },
}

/// Why a ray stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// Left the scene without hitting anything.
    #[default]
    Escaped,
    /// Reached the exterior depth limit.
    DepthExhausted,
    /// Used up its bounces inside one body.
    BounceExhausted,
    /// Inside a body but found none of its edges ahead.
    Degenerate,
}

/// What happened to one ray.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub termination: Termination,
    /// Refractions into a body.
    pub entries: u32,
    /// Refractions out of a body.
    pub exits: u32,
    /// Total internal reflections off the outside of a body.
    pub exterior_reflections: u32,
    /// Total internal reflections off the inside of a body.
    pub inside_reflections: u32,
    pub exterior_steps: u32,
    /// Most bounce iterations spent inside a body during a single entry.
    pub longest_inside_run: u32,
    pub segments: u32,
}

enum Step {
    Continue(Phase),
    Stop(Termination),
}

pub struct Tracer {
    config: TracerConfig,
    registry: MaterialRegistry,
}

impl Tracer {
    pub fn new(registry: MaterialRegistry) -> Self {
        Tracer {
            config: TracerConfig::default(),
            registry,
        }
    }

    pub fn with_config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Traces one ray from the environment until it escapes or runs out of bounces.
    ///
    /// The ray's wavelength is expected within `picture::SPECTRUM`, as [`Ray::new`] asserts.
    pub fn trace_ray(
        &self,
        ray: Ray,
        scene: &SceneConfig,
        renderer: &mut impl Renderer,
    ) -> Result<TraceSummary, TraceError> {
        self.trace_from(Phase::Exterior(ray), scene, renderer)
    }

    /// Resumes tracing from an arbitrary phase.
    pub fn trace_from(
        &self,
        phase: Phase,
        scene: &SceneConfig,
        renderer: &mut impl Renderer,
    ) -> Result<TraceSummary, TraceError> {
        let media = scene.media(&self.registry)?;
        Ok(self.run(phase, scene, media, renderer))
    }

    /// Emits one ray per sampled wavelength from the scene's source, in wavelength order.
    pub fn trace_scene(
        &self,
        scene: &SceneConfig,
        renderer: &mut impl Renderer,
    ) -> Result<Vec<TraceSummary>, TraceError> {
        let media = scene.media(&self.registry)?;
        let angle = scene.angle_degrees.to_radians();

        Ok(scene
            .wavelengths()
            .map(|wavelength| {
                let ray = Ray::from_angle(scene.source, angle, wavelength);
                self.run(Phase::Exterior(ray), scene, media, &mut *renderer)
            })
            .collect())
    }

    /// Same output as [`Tracer::trace_scene`], with the rays traced on the rayon pool.
    pub fn trace_scene_par(
        &self,
        scene: &SceneConfig,
        renderer: &mut impl Renderer,
    ) -> Result<Vec<TraceSummary>, TraceError> {
        let media = scene.media(&self.registry)?;
        let angle = scene.angle_degrees.to_radians();
        let wavelengths: Vec<f64> = scene.wavelengths().collect();

        let traced: Vec<(SegmentLog, TraceSummary)> = wavelengths
            .into_par_iter()
            .map(|wavelength| {
                let mut log = SegmentLog::new();
                let ray = Ray::from_angle(scene.source, angle, wavelength);
                let summary = self.run(Phase::Exterior(ray), scene, media, &mut log);
                (log, summary)
            })
            .collect();

        Ok(traced
            .into_iter()
            .map(|(log, summary)| {
                log.replay(&mut *renderer);
                summary
            })
            .collect())
    }

    fn run(
        &self,
        phase: Phase,
        scene: &SceneConfig,
        media: Media,
        renderer: &mut impl Renderer,
    ) -> TraceSummary {
        let wavelength = match &phase {
            Phase::Exterior(ray) | Phase::Inside { ray, .. } => ray.wavelength,
        };
        let mut summary = TraceSummary::default();
        let mut phase = phase;

        let termination = loop {
            let step = match phase {
                Phase::Exterior(ray) => {
                    self.exterior(ray, scene, media, &mut *renderer, &mut summary)
                }
                Phase::Inside { polygon, ray } => {
                    self.inside(polygon, ray, scene, media, &mut *renderer, &mut summary)
                }
            };
            match step {
                Step::Continue(next) => phase = next,
                Step::Stop(termination) => break termination,
            }
        };
        summary.termination = termination;

        debug!(target: "tracer", "{:.0}nm: {:?} after {} segments", wavelength, summary.termination, summary.segments);
        summary
    }

    fn exterior(
        &self,
        ray: Ray,
        scene: &SceneConfig,
        media: Media,
        renderer: &mut impl Renderer,
        summary: &mut TraceSummary,
    ) -> Step {
        if ray.depth >= self.config.max_reflections {
            return Step::Stop(Termination::DepthExhausted);
        }
        summary.exterior_steps += 1;

        let color = wavelength_to_color(ray.wavelength, scene.is_source(&ray.origin));

        let Some((polygon, hit)) = nearest_hit(&scene.polygons, &ray, self.config.ray_length) else {
            renderer.draw_segment(ray.origin, ray.at(self.config.ray_length), color, LineStyle::Solid);
            summary.segments += 1;
            return Step::Stop(Termination::Escaped);
        };

        renderer.draw_segment(ray.origin, hit.point, color, LineStyle::Solid);
        summary.segments += 1;

        match refract(&ray.direction, &hit.normal, media.environment, media.body, ray.wavelength) {
            Refraction::Refracted(direction) => {
                trace!(target: "tracer", "entering polygon {} at {}", polygon, hit.point);
                summary.entries += 1;
                Step::Continue(Phase::Inside {
                    polygon,
                    ray: ray.bounce(hit.point, direction),
                })
            }
            Refraction::TotalInternalReflection => {
                trace!(target: "tracer", "reflected off polygon {} at {}", polygon, hit.point);
                summary.exterior_reflections += 1;
                let direction = reflect(&ray.direction, &hit.normal);
                Step::Continue(Phase::Exterior(ray.bounce(hit.point, direction)))
            }
        }
    }

    fn inside(
        &self,
        polygon: usize,
        ray: Ray,
        scene: &SceneConfig,
        media: Media,
        renderer: &mut impl Renderer,
        summary: &mut TraceSummary,
    ) -> Step {
        let Some(body) = scene.polygons.get(polygon) else {
            return Step::Stop(Termination::Degenerate);
        };
        let mut ray = ray;

        for bounce in 1..=self.config.max_inside_bounces {
            summary.longest_inside_run = summary.longest_inside_run.max(bounce);

            let Some(hit) = body.hit(&ray, self.config.ray_length) else {
                return Step::Stop(Termination::Degenerate);
            };

            let color = wavelength_to_color(ray.wavelength, scene.is_source(&ray.origin));
            renderer.draw_segment(ray.origin, hit.point, color, LineStyle::Dashed);
            summary.segments += 1;

            let outward = -hit.normal.into_inner();
            match refract(&ray.direction, &outward, media.body, media.environment, ray.wavelength) {
                Refraction::Refracted(direction) => {
                    trace!(target: "tracer", "leaving polygon {} at {}", polygon, hit.point);
                    summary.exits += 1;
                    return Step::Continue(Phase::Exterior(ray.bounce(hit.point, direction)));
                }
                Refraction::TotalInternalReflection => {
                    summary.inside_reflections += 1;
                    let direction = reflect(&ray.direction, &hit.normal);
                    ray = ray.bounce(hit.point, direction);
                }
            }
        }

        Step::Stop(Termination::BounceExhausted)
    }
}
