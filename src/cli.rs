use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "prism-trace")]
#[command(about = "Traces dispersed light through a scene of prisms")]
pub struct Args {
    /// Material filling every body
    #[arg(short, long, default_value = "diamond")]
    pub material: String,

    /// Material surrounding the bodies
    #[arg(short, long, default_value = "air")]
    pub environment: String,

    /// Emission angle in degrees, measured from the +x axis
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Apex angle of the prism in degrees (clamped to 30..=150)
    #[arg(long, default_value_t = 60.0)]
    pub prism_angle: f64,

    /// Number of wavelengths sampled between 100 and 2000
    #[arg(short, long, default_value_t = 7)]
    pub samples: usize,

    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Output image (PNG)
    #[arg(short, long, default_value = "prism.png")]
    pub output: PathBuf,

    /// Trace wavelengths one after another instead of on the thread pool
    #[arg(long)]
    pub sequential: bool,

    /// Print the known materials and exit
    #[arg(long)]
    pub list_materials: bool,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
