use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use uuid::Uuid;

use canvas::camera::Point;
use canvas::item::CanvasItem;
use canvas::project::Project;
use client::ClientError;
use client::api::{ApiClient, StaticToken, TokenProvider};
use client::ocr::{OcrClient, OcrError};
use client::session::CanvasSession;
use client::storage::{RemoteMemoStore, Storage};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing id token; pass --id-token or set NEATMEMO_ID_TOKEN")]
    MissingIdToken,
    #[error("project {0} not found")]
    ProjectNotFound(Uuid),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Ocr(#[from] OcrError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "neatmemo", about = "NeatMemo project and canvas CLI")]
struct Cli {
    #[arg(long, env = "NEATMEMO_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Base URL of the OCR endpoint; defaults to the API base URL.
    #[arg(long, env = "NEATMEMO_OCR_URL")]
    ocr_url: Option<String>,

    #[arg(long, env = "NEATMEMO_ID_TOKEN")]
    id_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    ocr_url: Option<String>,
    id_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Project(ProjectCommand),
    Canvas(CanvasCommand),
    /// Extract text from an image, optionally placing it on a canvas.
    Ocr(OcrArgs),
}

#[derive(Args, Debug)]
struct ProjectCommand {
    #[command(subcommand)]
    command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectSubcommand {
    List,
    Create {
        #[arg(long, default_value = "")]
        name: String,
    },
    Rename {
        project_id: Uuid,
        name: String,
    },
    Delete {
        project_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct CanvasCommand {
    #[command(subcommand)]
    command: CanvasSubcommand,
}

#[derive(Subcommand, Debug)]
enum CanvasSubcommand {
    Show {
        project_id: Uuid,
    },
    AddText {
        project_id: Uuid,
        text: String,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
    },
}

#[derive(Args, Debug)]
struct OcrArgs {
    file: PathBuf,

    /// Place the extracted text on this project's canvas.
    #[arg(long)]
    project_id: Option<Uuid>,

    #[arg(long, default_value_t = 0.0)]
    x: f64,

    #[arg(long, default_value_t = 0.0)]
    y: f64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let ctx = CliContext {
        base_url: cli.base_url,
        ocr_url: cli.ocr_url,
        id_token: cli.id_token,
    };

    match cli.command {
        Command::Project(project) => run_project(&ctx, project.command).await,
        Command::Canvas(canvas) => run_canvas(&ctx, canvas.command).await,
        Command::Ocr(args) => run_ocr(&ctx, args).await,
    }
}

fn storage_for(cli: &CliContext) -> Result<Storage<RemoteMemoStore>, CliError> {
    let token = cli.id_token.clone().ok_or(CliError::MissingIdToken)?;
    let tokens: Arc<dyn TokenProvider> = Arc::new(StaticToken(token));
    let api = ApiClient::new(cli.base_url.clone(), tokens);
    Ok(Storage::new(RemoteMemoStore::new(api)))
}

async fn run_project(cli: &CliContext, command: ProjectSubcommand) -> Result<(), CliError> {
    let storage = storage_for(cli)?;
    match command {
        ProjectSubcommand::List => {
            let mut projects = storage.load_projects().await;
            Project::by_recent_update(&mut projects);
            print_json(&serde_json::to_value(&projects)?)?;
            Ok(())
        }
        ProjectSubcommand::Create { name } => {
            let project = Project::new(&name);
            storage.save_full_data(project.id, &project, &[]).await?;
            print_json(&serde_json::to_value(&project)?)?;
            Ok(())
        }
        ProjectSubcommand::Rename { project_id, name } => {
            let data = storage
                .load_full_data(project_id)
                .await
                .ok_or(CliError::ProjectNotFound(project_id))?;
            let mut project = data
                .project
                .unwrap_or_else(|| Project::placeholder(project_id, &name));
            project.name = name;
            project.touch();
            storage.update_project_meta(&project).await?;
            print_json(&serde_json::to_value(&project)?)?;
            Ok(())
        }
        ProjectSubcommand::Delete { project_id } => {
            storage.delete_project(project_id).await?;
            println!("deleted {project_id}");
            Ok(())
        }
    }
}

async fn run_canvas(cli: &CliContext, command: CanvasSubcommand) -> Result<(), CliError> {
    let storage = Arc::new(storage_for(cli)?);
    match command {
        CanvasSubcommand::Show { project_id } => {
            let data = storage
                .load_full_data(project_id)
                .await
                .ok_or(CliError::ProjectNotFound(project_id))?;
            print_json(&json!({
                "project": data.project,
                "items": data.items,
            }))?;
            Ok(())
        }
        CanvasSubcommand::AddText { project_id, text, x, y } => {
            let session = CanvasSession::new(storage);
            session.load_project(project_id).await;
            let id = session.add_item(CanvasItem::text(x, y, text)).await;
            session.flush().await?;
            println!("created item {id}");
            Ok(())
        }
    }
}

async fn run_ocr(cli: &CliContext, args: OcrArgs) -> Result<(), CliError> {
    let bytes = tokio::fs::read(&args.file).await?;
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_owned());
    let mime_type = mime_for(&args.file);

    let ocr_base = cli.ocr_url.as_deref().unwrap_or(&cli.base_url);
    let ocr = OcrClient::new(ocr_base);

    let text = match ocr.process_image(&file_name, mime_type, bytes).await {
        Ok(text) => text,
        Err(error) => {
            if let Some(diagnostics) = error.diagnostics() {
                eprintln!("{}", serde_json::to_string_pretty(diagnostics)?);
            }
            return Err(error.into());
        }
    };

    if let Some(project_id) = args.project_id {
        let storage = Arc::new(storage_for(cli)?);
        let session = CanvasSession::new(storage);
        session.load_project(project_id).await;
        let id = session
            .add_ocr_text_item(&text, Point::new(args.x, args.y))
            .await;
        session.flush().await?;
        eprintln!("created item {id}");
    }

    println!("{text}");
    Ok(())
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        // Left for the upload validation to reject with a clear message.
        _ => "application/octet-stream",
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
