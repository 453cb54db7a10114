//! Sequential multi-agent reasoner.
//!
//! Runs the problem through the fixed roster of reasoning agents and prints
//! the final answer followed by every agent's compiled steps.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use reasoner::agents::roster::standard_roster;
use reasoner::agents::reasoning::AgentSettings;
use reasoner::exit_codes;
use reasoner::io::command::CommandGenerator;
use reasoner::io::config::{Backend, DEFAULT_CONFIG_PATH, ReasonerConfig, load_config};
use reasoner::io::credentials::api_key_from_env;
use reasoner::io::gemini::GeminiGenerator;
use reasoner::io::generator::Generator;
use reasoner::io::input::{ProblemSource, read_problem};
use reasoner::io::run_log::{RunLog, new_run_id};
use reasoner::logging;
use reasoner::pipeline::AgentPipeline;
use reasoner::report::render_output;

#[derive(Parser)]
#[command(
    name = "reasoner",
    version,
    about = "Sequential multi-agent step-by-step reasoner"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a problem with the full agent pipeline.
    Run {
        /// Problem statement. Read from stdin when neither this nor
        /// `--problem-file` is given.
        #[arg(short, long, conflicts_with = "problem_file")]
        problem: Option<String>,
        /// Read the problem statement from a file.
        #[arg(long)]
        problem_file: Option<PathBuf>,
        /// Config file. Defaults to `.reasoner/config.toml` when present.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop each agent after this many steps.
        #[arg(long)]
        max_steps: Option<u32>,
        /// Write a JSONL run log into this directory.
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// List the agents in pipeline order.
    Agents,
}

fn main() {
    match run() {
        Ok(()) => std::process::exit(exit_codes::OK),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            problem,
            problem_file,
            config,
            max_steps,
            log_dir,
        } => {
            logging::init();
            let mut cfg = resolve_config(config.as_deref())?;
            if max_steps.is_some() {
                cfg.max_steps = max_steps;
            }
            if log_dir.is_some() {
                cfg.log_dir = log_dir;
            }
            cfg.validate()?;
            let source = match (problem, problem_file) {
                (Some(text), _) => ProblemSource::Inline(text),
                (None, Some(path)) => ProblemSource::File(path),
                (None, None) => ProblemSource::Stdin,
            };
            cmd_run(&cfg, &source)
        }
        Command::Agents => {
            cmd_agents();
            Ok(())
        }
    }
}

/// An explicit `--config` must exist; the default path is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<ReasonerConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            load_config(path)
        }
        None => load_config(Path::new(DEFAULT_CONFIG_PATH)),
    }
}

fn build_generator(cfg: &ReasonerConfig) -> Result<Box<dyn Generator>> {
    match cfg.backend {
        Backend::Gemini => {
            let api_key = api_key_from_env(&cfg.api_key_env)?;
            Ok(Box::new(GeminiGenerator::new(api_key, &cfg.gemini)?))
        }
        Backend::Command => Ok(Box::new(CommandGenerator::new(
            cfg.command.argv.clone(),
            cfg.command.limits(),
        ))),
    }
}

fn cmd_run(cfg: &ReasonerConfig, source: &ProblemSource) -> Result<()> {
    // Credentials are checked before the user is asked for a problem.
    let generator = build_generator(cfg)?;
    let problem = read_problem(source)?;

    let pipeline = AgentPipeline::standard(AgentSettings {
        max_steps: cfg.max_steps,
    })?;
    let names: Vec<&str> = pipeline.agent_names().collect();

    let mut run_log = match cfg.log_dir.as_deref() {
        Some(dir) => match RunLog::create(dir, &new_run_id(), &problem, &names) {
            Ok(log) => {
                info!(path = %log.path().display(), "writing run log");
                Some(log)
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "run log disabled");
                None
            }
        },
        None => None,
    };

    let outcome = pipeline.run(generator.as_ref(), &problem, |event| {
        let failed = match run_log.as_mut() {
            Some(log) => log.record(event).err(),
            None => None,
        };
        if let Some(err) = failed {
            warn!(error = %format!("{err:#}"), "run log disabled");
            run_log = None;
        }
    })?;

    if let Some(log) = run_log
        && let Err(err) = log.finish(&outcome)
    {
        warn!(error = %format!("{err:#}"), "failed to finish run log");
    }

    print!("{}", render_output(&outcome.records, &outcome.final_answer));
    Ok(())
}

fn cmd_agents() {
    for spec in standard_roster() {
        let summary = spec.role_prompt.lines().next().unwrap_or_default();
        println!("{}\t{}", spec.name, summary);
    }
}
