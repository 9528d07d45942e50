//! aula CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "aula", version, about = "A2 English course programme toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a course page
    Page {
        /// Page id (overview, syllabus, assessment, about, lesson).
        /// Unknown or missing values fall back to the overview page.
        name: Option<String>,

        /// Unit number, for the syllabus and lesson pages
        #[arg(long)]
        unit: Option<u32>,

        /// Class number within the unit, for the lesson page
        #[arg(long, default_value = "1")]
        class: u32,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Save a student's free-text answer
    Answer {
        /// Unit number label
        #[arg(long)]
        unit: String,

        /// Session label (e.g. "S1")
        #[arg(long)]
        session: String,

        /// Hour label (e.g. "H1")
        #[arg(long)]
        hour: String,

        /// Exercise identifier (e.g. "grammar")
        #[arg(long)]
        exercise: String,

        /// Student email
        #[arg(long)]
        email: String,

        /// Student name
        #[arg(long)]
        name: String,

        /// The answer text; empty saves nothing
        #[arg(long, default_value = "")]
        text: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Review submitted answers (admin)
    Review {
        /// Filter by unit label
        #[arg(long)]
        unit: Option<String>,

        /// Filter by session label
        #[arg(long)]
        session: Option<String>,

        /// Filter by hour label
        #[arg(long)]
        hour: Option<String>,

        /// Filter by exercise identifier
        #[arg(long)]
        exercise: Option<String>,

        /// Filter by student email
        #[arg(long)]
        student: Option<String>,

        /// Output format: text, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Output path for the html format
        #[arg(long)]
        output: Option<PathBuf>,

        /// Admin shared secret
        #[arg(long)]
        secret: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Manage lesson content blocks
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Synthesize a listening clip and save it under the data directory
    Speak {
        /// Text to read out
        #[arg(long)]
        text: String,

        /// Voice id override
        #[arg(long)]
        voice: Option<String>,

        /// Speech provider override (e.g. "elevenlabs", "mock")
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a course programme file
    Validate {
        /// Course file; defaults to the configured one
        #[arg(long)]
        course: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config, course file, and data directories
    Init,
}

#[derive(Subcommand)]
enum ContentAction {
    /// Save (overwrite) a content block (admin)
    Set {
        /// Unit number
        #[arg(long)]
        unit: u32,

        /// Class number
        #[arg(long)]
        class: u32,

        /// Content key; sanitized to [A-Za-z0-9_-]
        #[arg(long)]
        key: String,

        /// Block text
        #[arg(long)]
        text: Option<String>,

        /// Read the block text from a file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Admin shared secret
        #[arg(long)]
        secret: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a content block
    Get {
        /// Unit number
        #[arg(long)]
        unit: u32,

        /// Class number
        #[arg(long)]
        class: u32,

        /// Content key
        #[arg(long)]
        key: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aula=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Page {
            name,
            unit,
            class,
            config,
        } => commands::page::execute(name, unit, class, config).await,
        Commands::Answer {
            unit,
            session,
            hour,
            exercise,
            email,
            name,
            text,
            config,
        } => commands::answer::execute(unit, session, hour, exercise, email, name, text, config),
        Commands::Review {
            unit,
            session,
            hour,
            exercise,
            student,
            format,
            output,
            secret,
            config,
        } => commands::review::execute(
            unit, session, hour, exercise, student, format, output, secret, config,
        ),
        Commands::Content { action } => match action {
            ContentAction::Set {
                unit,
                class,
                key,
                text,
                file,
                secret,
                config,
            } => commands::content::set(unit, class, key, text, file, secret, config),
            ContentAction::Get {
                unit,
                class,
                key,
                config,
            } => commands::content::get(unit, class, key, config),
        },
        Commands::Speak {
            text,
            voice,
            provider,
            config,
        } => commands::speak::execute(text, voice, provider, config).await,
        Commands::Validate { course, config } => commands::validate::execute(course, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
