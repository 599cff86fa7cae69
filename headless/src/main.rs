use std::path::PathBuf;

use clap::Parser;
use water_strip::{load_config, Splash, TICKS_PER_SECOND};

mod init;
mod report;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a water strip without a renderer", long_about = None)]
struct Args {
    /// RON config file. Missing files fall back to defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured number of columns
    #[arg(short, long)]
    width: Option<usize>,

    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    #[arg(long, default_value_t = TICKS_PER_SECOND)]
    tick_rate: u64,

    /// Splash as `x,radius,speed`. May be repeated.
    #[arg(short, long, value_parser = parse_splash)]
    splash: Vec<Splash>,

    /// Log a surface summary every N ticks (0 disables)
    #[arg(short, long, default_value_t = 30)]
    report_every: u64,

    /// Stop early once every column is within this distance of rest
    #[arg(long)]
    until_calm: Option<f32>,
}

fn parse_splash(value: &str) -> Result<Splash, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[x, radius, speed] = parts.as_slice() else {
        return Err(format!("expected x,radius,speed but got '{value}'"));
    };

    let parse = |name: &str, raw: &str| {
        raw.parse::<f32>()
            .map_err(|err| format!("invalid {name} '{raw}': {err}"))
    };

    Ok(Splash::new(
        parse("x", x)?,
        parse("radius", radius)?,
        parse("speed", speed)?,
    ))
}

fn main() {
    let args = Args::parse();

    if args.tick_rate < 1 || args.tick_rate > 1000 {
        eprintln!("Error: tick_rate must be between 1 and 1000 (inclusive).");
        eprintln!("Got: {}", args.tick_rate);
        std::process::exit(1);
    }

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        },
        None => Default::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }

    let run = report::RunBudget {
        ticks: args.ticks,
        report_every: args.report_every,
        until_calm: args.until_calm,
    };

    if let Err(err) = init::init(config, args.splash, run, args.tick_rate) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splash() {
        let splash = parse_splash("5, 1.5, -4").unwrap();
        assert_eq!(splash, Splash::new(5.0, 1.5, -4.0));
    }

    #[test]
    fn test_parse_splash_rejects_garbage() {
        assert!(parse_splash("5,1.5").is_err());
        assert!(parse_splash("5,1.5,-4,2").is_err());
        assert!(parse_splash("five,1.5,-4").is_err());
    }

    #[test]
    fn test_args_collect_repeated_splashes() {
        let args = Args::try_parse_from([
            "headless", "--splash", "1,1,-2", "--splash", "8,2,3", "--width", "16",
        ])
        .unwrap();
        assert_eq!(args.splash.len(), 2);
        assert_eq!(args.width, Some(16));
        assert_eq!(args.ticks, 600);
    }

    #[test]
    fn test_bundled_config_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("pond.ron");
        let config = load_config(&path).unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.column_spacing, 4.0);
        assert!(config.display.interpolated);
    }
}
