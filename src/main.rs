use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizforge::app::{App, RunOptions};
use quizforge::clients::{GeminiClient, GeminiConfig};
use quizforge::config::KeyFromEnv;
use quizforge::generator::GeneratorConfig;
use quizforge::{Difficulty, QuizGenerator};

#[derive(Parser)]
#[command(author, version, about = "Generate, run, and score multiple-choice quizzes from PDF documents", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    GOOGLE_API_KEY  API key for the Gemini completion API (also read from .env)
    RUST_LOG        Log filter, e.g. quizforge=debug

EXAMPLES:
    quizforge book.pdf                        # 5 medium questions
    quizforge book.pdf -n 10 -d hard          # 10 hard questions
    quizforge book.pdf --out-dir reports      # export reports there")]
struct Args {
    /// PDF document to quiz on (prompted for interactively when omitted)
    pdf: Option<PathBuf>,

    /// Number of questions to request
    #[arg(short = 'n', long, default_value_t = 5)]
    questions: usize,

    /// Difficulty level
    #[arg(short, long, value_enum, default_value = "medium")]
    difficulty: Difficulty,

    /// Directory the exported reports are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Gemini model id
    #[arg(long, default_value = "gemini-1.5-flash")]
    model: String,

    /// Completion request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Credential gate: no quiz functionality without a key, surfaced before
    // anything else runs.
    let api_key = match GeminiClient::require_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let client = GeminiClient::new(GeminiConfig {
        api_key,
        model: args.model,
        ..GeminiConfig::default()
    });
    let generator = QuizGenerator::new(client).with_config(GeneratorConfig {
        request_timeout: Duration::from_secs(args.timeout),
    });

    let mut app = App::new(generator, args.out_dir);
    app.run(RunOptions {
        pdf: args.pdf,
        count: args.questions,
        difficulty: args.difficulty,
    })
    .await?;

    Ok(())
}
