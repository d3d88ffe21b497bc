use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use intent_router::IntentRouter;
use language_service::{create_backend, BackendKind, LanguageConfig};
use motion_executor::mock::{MockExecutor, MockScript};
use motion_executor::{MotionExecutor, SessionConfig};
use nav_dispatch::{new_pipeline, MonitorConfig};

#[derive(Parser, Debug)]
#[command(
    name = "navspeak",
    version,
    about = "Natural-language navigation console"
)]
struct Args {
    /// Language-understanding backend
    #[arg(long, value_enum, default_value = "mock")]
    backend: Backend,

    /// Model name for the OpenAI backend
    #[arg(long, default_value = "gpt-4")]
    model: String,

    /// Seconds to wait for the motion executor to report readiness
    #[arg(long, default_value_t = 30)]
    ready_timeout_s: u64,

    /// Milliseconds between task completion polls
    #[arg(long, default_value_t = 100)]
    poll_interval_ms: u64,

    /// Completion polls the mock executor takes per task
    #[arg(long, default_value_t = 5)]
    mock_task_polls: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Backend {
    Mock,
    Openai,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let language_config = LanguageConfig {
        api_key: std::env::var("API_KEY").ok(),
        model: args.model.clone(),
        ..LanguageConfig::default()
    };
    let kind = match args.backend {
        Backend::Mock => BackendKind::Mock,
        Backend::Openai => BackendKind::OpenAi,
    };
    let language = create_backend(kind, language_config)
        .context("failed to start language backend (is API_KEY set?)")?;

    // The only executor backend wired up here is the in-process mock; a real
    // navigation stack plugs in through the MotionExecutor trait.
    let executor: Arc<dyn MotionExecutor> =
        Arc::new(MockExecutor::new(MockScript::succeeding(args.mock_task_polls)));
    let (dispatcher, monitor) = new_pipeline(
        executor,
        SessionConfig {
            ready_timeout: Duration::from_secs(args.ready_timeout_s),
        },
        MonitorConfig {
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            deadline: None,
        },
    );
    let router = IntentRouter::new(dispatcher, monitor);

    info!(backend = ?args.backend, "navspeak console starting");
    println!("Welcome to the navigation console! Type 'exit' to quit.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("Enter your command: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
            println!("Goodbye!");
            break;
        }

        let reply = match language.interpret(line).await {
            Ok(reply) => reply,
            Err(e) => {
                println!("Error: {e}");
                continue;
            }
        };
        let response = router.handle(reply).await;
        println!("{response}");
    }

    Ok(())
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
