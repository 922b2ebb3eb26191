use clap::{Parser, Subcommand};
use navmotion::config;
use navmotion::scene::{Frame, Scene};
use navmotion::trace::{self, Tap, TraceOptions};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "navmotion", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Sample frames of the bar animation without a display
    Trace {
        /// Bar width in pixels
        #[arg(long, default_value_t = 500.0)]
        width: f64,

        /// Bar height in pixels (defaults to the configured bar height)
        #[arg(long)]
        height: Option<f64>,

        /// A tap, as TAB@MS or x:PIXELS@MS. Repeatable.
        #[arg(short = 't', long = "tap")]
        taps: Vec<Tap>,

        /// Last sampled time in milliseconds
        #[arg(long, default_value_t = 2000)]
        until: u64,

        /// Sampling step in milliseconds
        #[arg(long, default_value_t = 100)]
        step: u64,

        /// Read this config file instead of the user config
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Print frames as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Write the default configuration file if none exists
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            width,
            height,
            taps,
            until,
            step,
            config: path,
            json,
        } => {
            let config = match path {
                Some(path) => config::load_config_from(&path)?,
                None => config::load_or_default(),
            };
            let mut scene = Scene::from_config(&config)?;
            let options = TraceOptions {
                width,
                height: height.unwrap_or(config.bar.height),
                until: Duration::from_millis(until),
                step: Duration::from_millis(step),
            };

            for frame in trace::run(&mut scene, &taps, &options)? {
                if json {
                    println!("{}", serde_json::to_string(&frame)?);
                } else {
                    println!("{}", format_frame(&frame));
                }
            }
            Ok(())
        }
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn format_frame(frame: &Frame) -> String {
    let orbit = frame
        .points
        .first()
        .map(|p| (p.center - frame.indicator.center).length())
        .unwrap_or_default();
    format!(
        "{:>6.0}ms  pos {:>6.3}  x {:>7.2}  y {:>6.2}  orbit {:>5.2}  tab {}  {}",
        frame.elapsed_ms,
        frame.position,
        frame.indicator.center.x,
        frame.indicator.center.y,
        orbit,
        frame.selected,
        frame.color,
    )
}
