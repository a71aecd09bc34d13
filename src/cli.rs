//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub model: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity_kw: Option<f64>,
    pub tilt_deg: Option<f64>,
    pub azimuth_deg: Option<f64>,
    pub seed: Option<u64>,
    pub csv_out: Option<PathBuf>,
    pub json: bool,
    pub ai: bool,
    pub insight: bool,
    pub serve: bool,
    pub bind: Option<String>,
}

/// What the caller should do after parsing.
#[derive(Debug)]
pub enum Command {
    Run(Box<CliOptions>),
    Help,
}

pub fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<Command, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--model" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --model (expected physics, ml or deep)")?;
                opts.model = Some(name.to_string());
            }
            "--latitude" => {
                i += 1;
                opts.latitude = Some(parse_number(args, i, "--latitude")?);
            }
            "--longitude" => {
                i += 1;
                opts.longitude = Some(parse_number(args, i, "--longitude")?);
            }
            "--capacity" => {
                i += 1;
                opts.capacity_kw = Some(parse_number(args, i, "--capacity")?);
            }
            "--tilt" => {
                i += 1;
                opts.tilt_deg = Some(parse_number(args, i, "--tilt")?);
            }
            "--azimuth" => {
                i += 1;
                opts.azimuth_deg = Some(parse_number(args, i, "--azimuth")?);
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(parse_number(args, i, "--seed")?);
            }
            "--csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                opts.csv_out = Some(PathBuf::from(path));
            }
            "--bind" => {
                i += 1;
                let addr = args.next_or_err(i, "missing value for --bind (expected host:port)")?;
                opts.bind = Some(addr.to_string());
            }
            "--json" => opts.json = true,
            "--ai" => opts.ai = true,
            "--insight" => opts.insight = true,
            "--serve" => opts.serve = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(Command::Run(Box::new(opts)))
}

impl CliOptions {
    /// Overlays command-line values onto `cfg`.
    pub fn apply(&self, cfg: &mut AppConfig) {
        let panel = &mut cfg.panel;
        if let Some(m) = &self.model {
            panel.model = m.clone();
        }
        if let Some(v) = self.latitude {
            panel.latitude = v;
        }
        if let Some(v) = self.longitude {
            panel.longitude = v;
        }
        if let Some(v) = self.capacity_kw {
            panel.capacity_kw = v;
        }
        if let Some(v) = self.tilt_deg {
            panel.tilt_deg = v;
        }
        if let Some(v) = self.azimuth_deg {
            panel.azimuth_deg = v;
        }
        if self.seed.is_some() {
            cfg.simulation.seed = self.seed;
        }
        if let Some(b) = &self.bind {
            cfg.server.bind = b.clone();
        }
        if self.ai || self.insight {
            cfg.ai.enabled = true;
        }
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], index: usize, flag: &str) -> Result<T, String> {
    let raw = args.next_or_err(index, &format!("missing value for {flag}"))?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid value for {flag}: \"{raw}\""))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("pv-forecast: synthetic hourly solar PV forecasts");
    eprintln!();
    eprintln!("Usage: pv-forecast [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>        Load settings from a TOML file");
    eprintln!("  --preset <name>        Use a built-in preset ({})", AppConfig::PRESETS.join(", "));
    eprintln!("  --model <name>         physics, ml or deep");
    eprintln!("  --latitude <deg>       Site latitude");
    eprintln!("  --longitude <deg>      Site longitude");
    eprintln!("  --capacity <kW>        Nameplate capacity");
    eprintln!("  --tilt <deg>           Panel tilt from horizontal");
    eprintln!("  --azimuth <deg>        Panel azimuth from north");
    eprintln!("  --seed <u64>           Fixed random seed");
    eprintln!("  --csv-out <path>       Export the forecast to CSV");
    eprintln!("  --json                 Print the forecast as JSON");
    eprintln!("  --ai                   Ask the AI model for the forecast");
    eprintln!("  --insight              Ask the AI model to narrate the forecast");
    eprintln!("  --serve                Start the HTTP API");
    eprintln!("  --bind <host:port>     API bind address");
    eprintln!("  --help                 Show this help message");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str]) -> CliOptions {
        match parse_args_from(&args(list)).expect("parse should succeed") {
            Command::Run(opts) => *opts,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn parses_panel_overrides() {
        let opts = run(&["--model", "deep", "--latitude", "52.5", "--capacity", "9.8", "--seed", "4"]);
        assert_eq!(opts.model.as_deref(), Some("deep"));
        assert_eq!(opts.latitude, Some(52.5));
        assert_eq!(opts.capacity_kw, Some(9.8));
        assert_eq!(opts.seed, Some(4));
    }

    #[test]
    fn help_flag_short_circuits() {
        assert!(matches!(
            parse_args_from(&args(&["--seed", "1", "-h"])),
            Ok(Command::Help)
        ));
    }

    #[test]
    fn rejects_config_and_preset_together() {
        assert!(parse_args_from(&args(&["--config", "a.toml", "--preset", "sydney"])).is_err());
    }

    #[test]
    fn rejects_bad_number_and_unknown_flag() {
        assert!(parse_args_from(&args(&["--capacity", "lots"])).is_err());
        assert!(parse_args_from(&args(&["--latitude"])).is_err());
        assert!(parse_args_from(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn apply_overrides_config() {
        let opts = run(&["--model", "ml", "--azimuth", "90", "--seed", "8", "--insight"]);
        let mut cfg = AppConfig::default();
        opts.apply(&mut cfg);
        assert_eq!(cfg.panel.model, "ml");
        assert_eq!(cfg.panel.azimuth_deg, 90.0);
        assert_eq!(cfg.simulation.seed, Some(8));
        assert!(cfg.ai.enabled);
        assert_eq!(cfg.panel.capacity_kw, 5.0);
    }
}
