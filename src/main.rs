//! pv-forecast entry point: CLI wiring and config-driven simulation.

use std::process;

use pv_forecast::cli::{self, CliOptions, Command};
use pv_forecast::config::AppConfig;
use pv_forecast::io::export::export_csv;
use pv_forecast::sim::{CurveSimulator, Forecast, ForecastSummary, PanelConfig};
use pv_forecast::telemetry;

fn load_config(opts: &CliOptions) -> AppConfig {
    let loaded = if let Some(path) = &opts.config {
        AppConfig::from_toml_file(path)
    } else {
        AppConfig::from_preset(opts.preset.as_deref().unwrap_or("new_york"))
    };

    let mut cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    opts.apply(&mut cfg);

    let errors = cfg.validate();
    if !errors.is_empty() {
        eprintln!("error: invalid configuration:");
        for e in &errors {
            eprintln!("  - {e}");
        }
        process::exit(1);
    }
    tracing::info!(config = %cfg, "configuration loaded");
    cfg
}

fn simulate_local(cfg: &AppConfig, panel: &PanelConfig) -> Forecast {
    let simulator = CurveSimulator;
    let result = match cfg.simulation.seed {
        Some(seed) => simulator.simulate_seeded(panel, seed),
        None => simulator.simulate_unseeded(panel),
    };
    match result {
        Ok(forecast) => forecast,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn report(forecast: &Forecast, panel: &PanelConfig, json: bool) {
    if json {
        match serde_json::to_string_pretty(forecast) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to encode forecast: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!(
        "{} forecast for ({:.4}, {:.4}), {:.2} kW",
        panel.model.label(),
        panel.latitude,
        panel.longitude,
        panel.capacity_kw
    );
    print!("{forecast}");
    println!();
    println!("{}", ForecastSummary::from_forecast(forecast, panel.capacity_kw));
}

fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let opts = match cli::parse_args() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            cli::print_usage();
            process::exit(1);
        }
    };

    let cfg = load_config(&opts);
    let panel = match cfg.panel.to_panel() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    #[cfg(feature = "api")]
    {
        if opts.serve {
            serve(cfg);
            return;
        }
        let session = (opts.ai || opts.insight).then(|| remote::Session::connect(&cfg));
        let forecast = match (&session, opts.ai) {
            (Some(session), true) => session.predict(&panel),
            _ => simulate_local(&cfg, &panel),
        };
        finish(&opts, &forecast, &panel);
        if let (Some(session), true) = (&session, opts.insight) {
            session.insight(&forecast);
        }
    }

    #[cfg(not(feature = "api"))]
    {
        if opts.serve || opts.ai || opts.insight {
            eprintln!("error: --serve, --ai and --insight need the `api` feature");
            process::exit(1);
        }
        let forecast = simulate_local(&cfg, &panel);
        finish(&opts, &forecast, &panel);
    }
}

fn finish(opts: &CliOptions, forecast: &Forecast, panel: &PanelConfig) {
    report(forecast, panel, opts.json);

    if let Some(path) = &opts.csv_out {
        if let Err(e) = export_csv(forecast, path) {
            eprintln!("error: failed to write CSV to {}: {e}", path.display());
            process::exit(1);
        }
        eprintln!("Forecast exported to {}", path.display());
    }
}

#[cfg(feature = "api")]
fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            process::exit(1);
        }
    }
}

#[cfg(feature = "api")]
mod remote {
    use std::process;

    use pv_forecast::ai::AiClient;
    use pv_forecast::config::AppConfig;
    use pv_forecast::sim::{Forecast, PanelConfig};
    use tokio::runtime::Runtime;

    /// One AI client and the runtime that drives it, shared by every CLI call.
    pub struct Session {
        client: AiClient,
        rt: Runtime,
    }

    impl Session {
        pub fn connect(cfg: &AppConfig) -> Self {
            let client = match AiClient::from_env(&cfg.ai) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            };
            Self {
                client,
                rt: super::runtime(),
            }
        }

        pub fn predict(&self, panel: &PanelConfig) -> Forecast {
            match self.rt.block_on(self.client.predict(panel)) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("error: AI prediction failed: {e}");
                    process::exit(1);
                }
            }
        }

        pub fn insight(&self, forecast: &Forecast) {
            match self.rt.block_on(self.client.insight(forecast)) {
                Ok(insight) => {
                    println!();
                    println!("--- {} ---", insight.title);
                    println!("{}", insight.explanation);
                    for tip in &insight.suggestions {
                        println!("  * {tip}");
                    }
                }
                Err(e) => {
                    eprintln!("error: AI insight failed: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

#[cfg(feature = "api")]
fn serve(cfg: AppConfig) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use pv_forecast::ai::AiClient;
    use pv_forecast::api::{self, AppState};

    let addr: SocketAddr = match cfg.server.bind.parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: invalid bind address {:?}: {e}", cfg.server.bind);
            process::exit(1);
        }
    };

    let ai = if cfg.ai.enabled {
        match AiClient::from_env(&cfg.ai) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "AI disabled; serving local simulations only");
                None
            }
        }
    } else {
        None
    };

    let state = Arc::new(AppState {
        simulator: CurveSimulator,
        ai,
        seed: cfg.simulation.seed,
    });

    if let Err(e) = runtime().block_on(api::serve(state, &cfg.server, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}
