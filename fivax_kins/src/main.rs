//! # fivax
//!
//! Command-line front end for the table-mill kinematics engine.
//!
//! One-shot transforms (`forward`, `inverse`, `home`, `reproject`,
//! `direction`) print their result as JSON; `signals` lists the host signal
//! table. `simulate` loads the service configuration, performs RT setup and
//! drives the cycle runner with fixed joint feedback, opening the change gate
//! at a chosen cycle. Its log level comes from `[shared] log_level` unless
//! `--verbose` is given.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use fivax_common::config::LogLevel;
use fivax_common::consts::DEFAULT_CONFIG_PATH;
use fivax_common::kinematics::config::{KinsConfig, POCKETNCKINS};
use fivax_common::kinematics::signals::{SignalBank, SignalDirection, names};
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, KinematicsMode, Pose};
use fivax_kins::config::load_config;
use fivax_kins::cycle::{CycleInput, CycleRunner, rt_setup};
use fivax_kins::kinematics::{self, direction::DirectionModel};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// fivax: table-mill kinematics
#[derive(Parser, Debug)]
#[command(name = "fivax")]
#[command(version)]
#[command(about = "Five-axis table kinematics transforms and cycle simulation")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (DEBUG level, overrides the configured level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Joints (X Y Z A B) → pose.
    Forward {
        #[command(flatten)]
        mapping: MappingArgs,
        #[arg(num_args = 5, allow_negative_numbers = true, value_names = ["X", "Y", "Z", "A", "B"])]
        joints: Vec<f64>,
    },
    /// Pose (x y z a b) → joints.
    Inverse {
        #[command(flatten)]
        mapping: MappingArgs,
        #[arg(num_args = 5, allow_negative_numbers = true, value_names = ["X", "Y", "Z", "A", "B"])]
        pose: Vec<f64>,
    },
    /// Pose with all joints at zero.
    Home {
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// Re-express a pose when switching into `--mode` from the other mode.
    Reproject {
        #[command(flatten)]
        mapping: MappingArgs,
        #[arg(num_args = 5, allow_negative_numbers = true, value_names = ["X", "Y", "Z", "A", "B"])]
        pose: Vec<f64>,
    },
    /// Rotate a direction vector between workpiece and machine frames.
    Direction {
        /// Kinematics module string, e.g. "pocketnckins" or "xyzbc-trt-kins".
        #[arg(long, default_value = "pocketnckins")]
        model: String,
        /// Tilt axis position [deg].
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        tilt: f64,
        /// Rotary axis position [deg].
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotary: f64,
        /// Convert machine → workpiece instead of workpiece → machine.
        #[arg(long)]
        to_local: bool,
        #[arg(num_args = 3, allow_negative_numbers = true, value_names = ["DX", "DY", "DZ"])]
        dir: Vec<f64>,
    },
    /// List the signals a module exports to the host.
    Signals {
        /// Module name used as the signal prefix.
        #[arg(long, default_value = POCKETNCKINS)]
        module: String,
    },
    /// Run the cycle loop against fixed joint feedback.
    Simulate {
        /// Path to the service configuration TOML.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Number of cycles to run (0 = until interrupted).
        #[arg(long, default_value_t = 1000)]
        cycles: u64,
        /// Cycle at which change-allowed is asserted for one cycle.
        #[arg(long)]
        allow_at: Option<u64>,
        /// Joint feedback held for the whole run.
        #[arg(long, num_args = 5, allow_negative_numbers = true, default_values_t = [0.0, 0.0, 0.0, 0.0, 0.0])]
        joints: Vec<f64>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Trivial,
    FiveAxis,
}

impl From<ModeArg> for KinematicsMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Trivial => KinematicsMode::Trivial,
            ModeArg::FiveAxis => KinematicsMode::FiveAxis,
        }
    }
}

#[derive(ClapArgs, Debug, Clone, Copy)]
struct MappingArgs {
    /// Kinematics mode.
    #[arg(long, value_enum, default_value_t = ModeArg::FiveAxis)]
    mode: ModeArg,
    /// Pivot-to-tip tool Z offset.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,
}

impl MappingArgs {
    fn config(&self) -> KinematicsConfig {
        KinematicsConfig::new(self.mode.into(), self.offset)
    }

    /// The mapping being switched away from.
    fn other(&self) -> KinematicsConfig {
        match self.mode {
            ModeArg::Trivial => KinematicsConfig::five_axis(self.offset),
            ModeArg::FiveAxis => KinematicsConfig::trivial(),
        }
    }
}

fn main() {
    let args = Args::parse();

    // Simulate reads its log level from the configuration, so load it first.
    let config = match &args.command {
        Command::Simulate { config, .. } => match load_config(config) {
            Ok(config) => Some(config),
            Err(e) => {
                setup_tracing(&args, None);
                error!("FATAL: {e}");
                process::exit(1);
            }
        },
        _ => None,
    };
    setup_tracing(&args, config.as_ref().map(|c| c.shared.log_level));

    if let Err(e) = run(args.command, config) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(command: Command, config: Option<KinsConfig>) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Forward { mapping, joints } => {
            let joints = JointVector(five(&joints)?);
            print_json(&kinematics::forward(&mapping.config(), &joints))
        }
        Command::Inverse { mapping, pose } => {
            let pose = pose_from(&pose)?;
            print_json(&kinematics::inverse(&mapping.config(), &pose))
        }
        Command::Home { mapping } => {
            let (pose, _) = kinematics::home(&mapping.config());
            print_json(&pose)
        }
        Command::Reproject { mapping, pose } => {
            let pose = pose_from(&pose)?;
            print_json(&kinematics::reproject(&mapping.other(), &mapping.config(), &pose))
        }
        Command::Direction {
            model,
            tilt,
            rotary,
            to_local,
            dir,
        } => {
            let dir: [f64; 3] = dir
                .as_slice()
                .try_into()
                .map_err(|_| "expected 3 direction components")?;
            let model = DirectionModel::from_kinematics(&model);
            let out = if to_local {
                model.global_to_local(tilt, rotary, dir)
            } else {
                model.local_to_global(tilt, rotary, dir)
            };
            print_json(&out)
        }
        Command::Signals { module } => {
            #[derive(Serialize)]
            struct Signal {
                name: String,
                direction: Option<SignalDirection>,
            }

            let table: Vec<Signal> = names::ALL
                .iter()
                .map(|name| Signal {
                    name: format!("{module}.{name}"),
                    direction: SignalBank::direction(name),
                })
                .collect();
            print_json(&table)
        }
        Command::Simulate {
            config: config_path,
            cycles,
            allow_at,
            joints,
        } => {
            let config = config
                .ok_or_else(|| format!("configuration not loaded: {}", config_path.display()))?;
            simulate(config, cycles, allow_at, JointVector(five(&joints)?))
        }
    }
}

fn simulate(
    config: KinsConfig,
    cycles: u64,
    allow_at: Option<u64>,
    feedback: JointVector,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "{} v{} starting (module={})",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION"),
        config.kinematics.module
    );

    rt_setup(config.cycle.cpu_core, config.cycle.rt_priority)?;
    info!(
        "RT setup complete (cpu_core={}, priority={})",
        config.cycle.cpu_core, config.cycle.rt_priority
    );

    let mut runner = CycleRunner::new(&config)?;
    let home = runner.home()?;
    info!(?home, "home pose established");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let command = Pose::default();
    let mut source = |cycle: u64, signals: &mut SignalBank| {
        signals.change_allowed = allow_at == Some(cycle);
        CycleInput { feedback, command }
    };

    let max_cycles = (cycles > 0).then_some(cycles);
    runner.run(&mut source, &running, max_cycles)?;

    info!(
        cycles = runner.stats.cycle_count,
        avg_ns = runner.stats.avg_cycle_ns(),
        max_ns = runner.stats.max_cycle_ns,
        overruns = runner.stats.overruns,
        "cycle loop finished"
    );

    #[derive(Serialize)]
    struct Summary {
        active: KinematicsConfig,
        change_pending: bool,
        echoed_position: [f64; 3],
        commits: Vec<u64>,
    }

    print_json(&Summary {
        active: runner.module().active_config(),
        change_pending: runner.signals.change_pending,
        echoed_position: runner.signals.echoed_position(),
        commits: runner.history().map(|c| c.cycle).collect(),
    })
}

fn five(values: &[f64]) -> Result<[f64; 5], Box<dyn std::error::Error>> {
    values
        .try_into()
        .map_err(|_| format!("expected 5 values, got {}", values.len()).into())
}

fn pose_from(values: &[f64]) -> Result<Pose, Box<dyn std::error::Error>> {
    let [x, y, z, a, b] = five(values)?;
    Ok(Pose::new(x, y, z, a, b))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `--verbose` wins, then the configured level, then INFO.
fn log_level(verbose: bool, configured: Option<LogLevel>) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        configured.map_or(Level::INFO, Level::from)
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args, configured: Option<LogLevel>) {
    let level = log_level(args.verbose, configured);

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
