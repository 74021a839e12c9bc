//! MISAI command-line client

use clap::{Parser, Subcommand};
use misai_core::adapters::TextInput;
use misai_core::model::MediaUpload;
use misai_core::render::{render_state, Panel, Render};
use misai_core::{
    AiModel, ChatSession, ClientConfig, HttpBackend, ImageAdapter, ModalityAdapter,
    SubmissionMachine, TextAdapter, VideoAdapter,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "misai")]
#[command(about = "Check AI output, images and videos for misinformation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verification service URL
    #[arg(long, env = "MISAI_HOST_URL", default_value = misai_core::backend::DEFAULT_HOST_URL, global = true)]
    host: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a model for hallucinations on a statement
    Text {
        /// Model under test (see `misai models`)
        #[arg(short, long)]
        model: AiModel,

        /// Statement to test
        text: String,
    },

    /// Check an image for manipulation
    Image {
        /// Path to the image
        file: PathBuf,
    },

    /// Check a video for manipulation
    Video {
        /// Path to the video
        file: PathBuf,
    },

    /// Talk to MisBot
    Chat,

    /// List the models that can be tested
    Models,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let backend = HttpBackend::new(ClientConfig::new(cli.host));

    match cli.command {
        Commands::Text { model, text } => {
            let input = TextInput {
                model: Some(model),
                text,
            };
            check(TextAdapter, input, &backend).await;
        }
        Commands::Image { file } => {
            let upload = load_upload(&file);
            check(ImageAdapter, Some(upload), &backend).await;
        }
        Commands::Video { file } => {
            let upload = load_upload(&file);
            check(VideoAdapter, Some(upload), &backend).await;
        }
        Commands::Chat => cmd_chat(&backend).await,
        Commands::Models => cmd_models(),
    }
}

/// Run one submission and print its report
async fn check<A>(adapter: A, input: A::Input, backend: &HttpBackend)
where
    A: ModalityAdapter,
    A::Output: Render,
    <A::Output as Render>::Report: std::fmt::Display,
{
    let mut machine = SubmissionMachine::new(adapter);
    if let Err(e) = machine.set_input(input) {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("Submitting to {}", backend.config().base_url);
    if let Err(e) = machine.run(backend).await {
        error!("{}", e);
        std::process::exit(1);
    }

    match render_state(machine.state()) {
        Panel::Result(report) => println!("{}", report),
        Panel::Failure(banner) => {
            error!("{}", banner);
            std::process::exit(1);
        }
        Panel::Hidden | Panel::Pending => {}
    }
}

async fn cmd_chat(backend: &HttpBackend) {
    let mut session = ChatSession::new();
    if let Some(greeting) = session.log().last() {
        println!("MisBot: {}", greeting.text);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read input: {}", e);
                std::process::exit(1);
            }
        }

        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Err(e) = session.set_draft(line) {
            error!("{}", e);
            continue;
        }
        if let Err(e) = session.run(backend).await {
            error!("{}", e);
            continue;
        }

        if let Some(reply) = session.log().last() {
            println!("[{}] MisBot: {}", reply.local_time(), reply.text);
            if let Some(card) = reply.fact_check.as_ref().map(|fc| fc.render()) {
                println!("{}", card);
            }
        }
    }
}

fn cmd_models() {
    println!("Models:");
    for model in AiModel::ALL {
        println!("  - {}", model);
    }
}

fn load_upload(path: &Path) -> MediaUpload {
    if !path.exists() {
        error!("File not found: {}", path.display());
        std::process::exit(1);
    }

    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    MediaUpload::new(file_name, guess_content_type(path), data)
}

fn guess_content_type(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => return None,
    };
    Some(mime.to_string())
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
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("cat.PNG")).as_deref(), Some("image/png"));
        assert_eq!(guess_content_type(Path::new("clip.mov")).as_deref(), Some("video/quicktime"));
        assert_eq!(guess_content_type(Path::new("notes")), None);
    }

    #[test]
    fn test_parses_text_command() {
        let cli = Cli::try_parse_from(["misai", "text", "--model", "gpt-4", "The moon is cheese"]).unwrap();
        match cli.command {
            Commands::Text { model, text } => {
                assert_eq!(model, AiModel::Gpt4);
                assert_eq!(text, "The moon is cheese");
            }
            _ => panic!("expected text command"),
        }
    }
}
