// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, builds the configuration and the lazy model registry,
// and hands off to Layer 2. Results are rendered here and only
// here.
//
// Failure handling in the one-shot commands:
//   - validation problems print "Warning: …" and exit cleanly
//   - extraction and model errors end the process with an error
// In `session` every failure is printed and the loop continues.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod render;
pub mod repl;

use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::answer_use_case::AnswerUseCase;
use crate::application::generate_use_case::GenerateUseCase;
use crate::application::session::Session;
use crate::data::extractor::DocumentExtractor;
use crate::domain::error::PipelineError;
use crate::domain::traits::ModelSource;
use crate::infra::config::AppConfig;
use crate::ml::registry::ModelRegistry;
use commands::{AnswerArgs, AskArgs, Commands, ConfigCommand, GenerateArgs, SessionArgs};
use repl::Repl;

#[derive(Parser, Debug)]
#[command(
    name = "passage-qa",
    version,
    about = "Answer questions about, or generate questions from, a passage or document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the hosted inference endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API token for the inference endpoint
    #[arg(long, global = true, env = "HF_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli { command, config, endpoint, api_token } = self;

        let mut cfg = AppConfig::load_or_default(config.as_deref())?;
        if let Some(base_url) = endpoint {
            cfg.endpoint.base_url = base_url;
        }
        cfg.endpoint.api_token = api_token;

        match command {
            Commands::Answer(args)   => run_answer(cfg, args),
            Commands::Ask(args)      => run_ask(cfg, args),
            Commands::Generate(args) => run_generate(cfg, args),
            Commands::Session(args)  => run_session(cfg, args),
            Commands::Config(cmd)    => run_config(&cfg, cmd),
        }
    }
}

/// Print validation problems as warnings; anything else fails.
fn warn_or_fail(err: PipelineError) -> Result<()> {
    if err.is_validation() {
        render::write_failure(&mut io::stderr(), &err)?;
        return Ok(());
    }
    Err(err.into())
}

fn run_answer(cfg: AppConfig, args: AnswerArgs) -> Result<()> {
    let context = args.context.read()?;
    let model   = args.model.unwrap_or_else(|| cfg.models.service_answer_model.clone());

    let models: Arc<dyn ModelSource> = Arc::new(ModelRegistry::new(cfg).with_answer_model(model));
    match AnswerUseCase::new(models).answer(&args.question, &context) {
        Ok(answer) => Ok(render::write_answer(&mut io::stdout(), &answer, args.verbose)?),
        Err(e)     => warn_or_fail(e),
    }
}

fn run_ask(cfg: AppConfig, args: AskArgs) -> Result<()> {
    let context = args.source.resolve(&DocumentExtractor::new())?;

    let models: Arc<dyn ModelSource> = Arc::new(ModelRegistry::new(cfg));
    match AnswerUseCase::new(models).answer(&args.question, &context) {
        Ok(answer) => Ok(render::write_answer(&mut io::stdout(), &answer, args.verbose)?),
        Err(e)     => warn_or_fail(e),
    }
}

fn run_generate(mut cfg: AppConfig, args: GenerateArgs) -> Result<()> {
    args.generation.apply(&mut cfg);
    let context = args.source.resolve(&DocumentExtractor::new())?;

    let params     = cfg.generation.clone();
    let truncation = cfg.truncation.clone();
    let models: Arc<dyn ModelSource> = Arc::new(ModelRegistry::new(cfg));

    match GenerateUseCase::new(models, params, truncation).generate(&context) {
        Ok(set) => Ok(render::write_questions(&mut io::stdout(), &set)?),
        Err(e)  => warn_or_fail(e),
    }
}

fn run_session(mut cfg: AppConfig, args: SessionArgs) -> Result<()> {
    args.generation.apply(&mut cfg);

    let params        = cfg.generation.clone();
    let truncation    = cfg.truncation.clone();
    let preview_chars = cfg.preview_chars;
    let models: Arc<dyn ModelSource> = Arc::new(ModelRegistry::new(cfg));

    let session = Session::new(
        DocumentExtractor::new(),
        AnswerUseCase::new(models.clone()),
        GenerateUseCase::new(models, params, truncation),
        preview_chars,
    );

    let stdin  = io::stdin();
    let stdout = io::stdout();
    Repl::new(session, stdin.lock(), stdout.lock(), args.verbose).run()
}

fn run_config(cfg: &AppConfig, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Init { path, force } => {
            if path.exists() && !force {
                bail!("'{}' already exists (use --force to overwrite)", path.display());
            }
            cfg.save(&path)?;
            println!("Wrote configuration to '{}'", path.display());
        }
        ConfigCommand::Show => {
            let mut out = io::stdout();
            writeln!(out, "{}", serde_json::to_string_pretty(cfg)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_requires_exactly_one_context_source() {
        assert!(Cli::try_parse_from(["passage-qa", "ask", "--question", "q"]).is_err());
        assert!(Cli::try_parse_from([
            "passage-qa", "ask", "--question", "q", "--passage", "p", "--document", "d.pdf",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["passage-qa", "ask", "--question", "q", "--passage", "p"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "passage-qa", "generate", "--passage", "p", "--endpoint", "http://localhost:8080", "--num-beams", "3",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:8080"));
        match cli.command {
            Commands::Generate(args) => assert_eq!(args.generation.num_beams, Some(3)),
            other                    => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_validation_warning_exits_cleanly() {
        // Empty passage: warned about, no model is ever built
        let cli = Cli::try_parse_from(["passage-qa", "generate", "--passage", "   "]).unwrap();
        assert!(cli.run().is_ok());
    }

    #[test]
    fn test_config_init_refuses_to_overwrite() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, "{}").unwrap();

        let cmd = ConfigCommand::Init { path: path.clone(), force: false };
        assert!(run_config(&AppConfig::default(), cmd).is_err());

        let cmd = ConfigCommand::Init { path: path.clone(), force: true };
        run_config(&AppConfig::default(), cmd).unwrap();
        assert!(AppConfig::load(&path).is_ok());
    }
}
