use crate::apply::{run_apply, ApplyArgs};
use crate::catalog::{run_categories, run_course_list, run_course_show, CourseListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use course_enroll::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "course-enroll-api",
    about = "Browse courses, submit applications, and run the reference course API",
    version
)]
struct Cli {
    /// Override ENROLL_API_URL for commands that talk to the course API
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the reference course API (default command)
    Serve(ServeArgs),
    /// Inspect the course catalog
    Courses {
        #[command(subcommand)]
        command: CoursesCommand,
    },
    /// List course categories
    Categories,
    /// Submit an application for a course and save the confirmation document
    Apply(ApplyArgs),
}

#[derive(Subcommand, Debug)]
enum CoursesCommand {
    /// List courses, optionally narrowed by category or title
    List(CourseListArgs),
    /// Show one course
    Show {
        /// Course identifier
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve courses from a CSV export instead of the built-in demo catalog
    #[arg(long)]
    pub(crate) courses_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let api_url = cli.api_url;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Courses {
            command: CoursesCommand::List(args),
        } => run_course_list(api_url, args).await,
        Command::Courses {
            command: CoursesCommand::Show { id },
        } => run_course_show(api_url, &id).await,
        Command::Categories => run_categories(api_url).await,
        Command::Apply(args) => run_apply(api_url, args).await,
    }
}
