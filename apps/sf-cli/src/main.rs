use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use sf_app::{
    AppResult, DEFAULT_TRUST_THRESHOLD, RunOptions, RunProgressEvent, RunRequest, RunStage, metrics,
    query, run_service, scenario_service,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "strainflow")]
#[command(about = "StrainFlow CLI - coupled subsystem stress contagion simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file, including every engine check
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Run a scenario, reusing a cached result when one exists
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Override the scenario's step count
        #[arg(long)]
        steps: Option<usize>,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Show details and summary metrics of a cached run
    ShowRun {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Trust level that counts as a breach
        #[arg(long, default_value_t = DEFAULT_TRUST_THRESHOLD)]
        trust_threshold: f64,
        /// Print metrics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export one subsystem variable of a run as CSV
    ExportSeries {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Subsystem ID
        subsystem_id: String,
        /// Variable name (flow, capacity, pressure, drift, trust)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            no_cache,
            steps,
        } => cmd_run(&scenario_path, !no_cache, steps),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
            trust_threshold,
            json,
        } => cmd_show_run(&scenario_path, &run_id, trust_threshold, json),
        Commands::ExportSeries {
            scenario_path,
            run_id,
            subsystem_id,
            variable,
            output,
        } => cmd_export_series(
            &scenario_path,
            &run_id,
            &subsystem_id,
            &variable,
            output.as_deref(),
        ),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    scenario_service::validate_scenario(&scenario)?;
    let summary = scenario_service::summarize_scenario(&scenario)?;

    println!("✓ Scenario is valid");
    println!("  Name: {}", summary.name);
    println!("  Subsystems: {}", summary.subsystem_count);
    println!(
        "  Coupling: {} ({} links, {})",
        summary.coupling_form,
        summary.link_count,
        if summary.symmetric {
            "symmetric"
        } else {
            "asymmetric"
        }
    );
    println!("  Shocks: {}", summary.shock_count);
    println!("  Steps: {}", summary.steps);
    Ok(())
}

fn cmd_run(scenario_path: &Path, use_cache: bool, steps: Option<usize>) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let request = RunRequest {
        scenario_path,
        options: RunOptions {
            use_cache,
            steps_override: steps,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            let fraction = event
                .simulation
                .map(|p| p.fraction_complete())
                .unwrap_or(-1.0);
            let emit_now = event.simulation.is_none()
                || (fraction - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    let (_manifest, records) = run_service::load_run(scenario_path, &response.run_id)?;
    let summary = query::get_run_summary(&records)?;
    println!("  Steps recorded: {}", summary.record_count);
    println!("  Subsystems: {}", summary.subsystem_count);
    if summary.non_finite_records > 0 {
        println!("  Steps with non-finite values: {}", summary.non_finite_records);
    }

    let run_metrics = metrics::compute_run_metrics(&records, DEFAULT_TRUST_THRESHOLD);
    print_metrics(&run_metrics);

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, event.simulation) {
        (RunStage::Simulating, Some(p)) => {
            let width = 28usize;
            let fraction = p.fraction_complete();
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  step={}/{}  elapsed={:.1}s",
                bar,
                fraction * 100.0,
                p.step,
                p.steps,
                event.elapsed_wall_s
            );
            let _ = io::stdout().flush();
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &sf_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);

    println!("\nTiming summary:");
    println!(
        "  Compile:  {:.3}s ({:.1}%)",
        timing.compile_time_s,
        100.0 * timing.compile_time_s / total
    );
    println!(
        "  Simulate: {:.3}s ({:.1}%)",
        timing.simulate_time_s,
        100.0 * timing.simulate_time_s / total
    );
    println!(
        "  Save:     {:.3}s ({:.1}%)",
        timing.save_time_s,
        100.0 * timing.save_time_s / total
    );
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

fn print_metrics(m: &metrics::RunMetrics) {
    println!("\nSubsystem metrics:");
    println!(
        "  {:<16} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "id", "peak P", "peak D", "final D", "min T", "T loss"
    );
    for s in &m.subsystems {
        println!(
            "  {:<16} {:>10} {:>10} {:>10} {:>10} {:>10}",
            s.id,
            fmt_opt(s.peak_pressure),
            fmt_opt(s.peak_drift),
            fmt_opt(s.final_drift),
            fmt_opt(s.min_trust),
            fmt_opt(s.trust_loss)
        );
    }

    if let (Some(spread), Some(step)) = (m.max_pressure_spread, m.max_spread_step) {
        println!("  Max pressure spread: {:.4} at step {}", spread, step);
    }
    match &m.trust_breach {
        Some(b) => println!(
            "  Trust below {:.2}: {} at step {} (T = {:.4})",
            m.trust_threshold, b.subsystem_id, b.step, b.trust
        ),
        None => println!("  Trust stayed at or above {:.2}", m.trust_threshold),
    }
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let runs = run_service::list_runs(scenario_path, &scenario.name)?;

    if runs.is_empty() {
        println!("No cached runs found for scenario: {}", scenario.name);
    } else {
        println!("Cached runs for scenario '{}':", scenario.name);
        for manifest in runs {
            println!(
                "  {} ({}, {} steps)",
                manifest.run_id, manifest.timestamp, manifest.steps
            );
        }
    }
    Ok(())
}

fn cmd_show_run(
    scenario_path: &Path,
    run_id: &str,
    trust_threshold: f64,
    json: bool,
) -> AppResult<()> {
    let (manifest, records) = run_service::load_run(scenario_path, run_id)?;
    let run_metrics = metrics::compute_run_metrics(&records, trust_threshold);

    if json {
        let out = serde_json::to_string_pretty(&run_metrics)
            .map_err(|e| sf_app::AppError::Results(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    let summary = query::get_run_summary(&records)?;
    debug!(run_id, records = summary.record_count, "loaded run");

    println!("Run {}", manifest.run_id);
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Engine: {}", manifest.engine_version);
    println!(
        "  Steps: {} - {} ({} records)",
        summary.step_range.0, summary.step_range.1, summary.record_count
    );

    println!("\nSubsystems:");
    for id in query::list_subsystem_ids(&records) {
        println!("  {}", id);
    }

    print_metrics(&run_metrics);
    Ok(())
}

fn cmd_export_series(
    scenario_path: &Path,
    run_id: &str,
    subsystem_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(scenario_path, run_id)?;
    let series = query::extract_series(&records, subsystem_id, variable)?;

    let mut csv = format!("step,{}\n", variable);
    for (step, val) in &series {
        csv.push_str(&format!("{},{}\n", step, val));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
