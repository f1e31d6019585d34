use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use marketplace::contract::client::MarketplaceApi;
use marketplace::contract::model::{
    BudgetRange, NewProject, Project, ProjectFilter, ProjectId, Registration, Role, RoleProfile,
    User, UserId,
};
use marketplace::infra::storage::{FileStore, KeyValueStore, MemoryStore};
use marketplace::{Marketplace, MarketplaceConfig};
use runtime::{AppConfig, CliArgs, StoreBackend};

/// Freelance marketplace - post projects, find work, track earnings
#[derive(Parser)]
#[command(name = "marketplace-cli")]
#[command(about = "Freelance marketplace - post projects, find work, track earnings")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep everything in memory for this invocation
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Api(ApiCommand),
    /// Check configuration
    Check,
}

/// Commands that run against the marketplace store.
#[derive(Subcommand)]
enum ApiCommand {
    /// Create an account and log it in
    Register(RegisterArgs),
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse and manage projects
    #[command(subcommand)]
    Projects(ProjectCommands),
    /// Statistics and projects of the logged-in user
    Dashboard,
    /// Edit the skill list of the logged-in freelancer
    #[command(subcommand)]
    Skills(SkillCommands),
    /// Edit name and avatar of the logged-in user
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// client or freelancer
    #[arg(long)]
    role: Role,
    #[arg(long)]
    password: String,
    /// Defaults to --password
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects, optionally filtered
    List {
        /// Matches title or description, case-insensitive
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Range such as 500-1000 or 5000+
        #[arg(long)]
        budget: Option<String>,
    },
    /// Show one project
    Show { id: u64 },
    /// Post a project as the logged-in user
    Post(PostArgs),
    /// Hand an open project to a freelancer
    Assign { id: u64, freelancer_id: String },
    /// Mark an active project as done
    Complete { id: u64 },
}

#[derive(Args)]
struct PostArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: String,
    #[arg(long)]
    category: Option<String>,
    /// Amount in whole currency units
    #[arg(long)]
    budget: Option<String>,
    #[arg(long)]
    timeline: Option<String>,
    /// Repeat for several skills
    #[arg(long = "skill")]
    skills: Vec<String>,
}

#[derive(Subcommand)]
enum SkillCommands {
    Add { skill: String },
    Remove { skill: String },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Change the display name
    Rename { name: String },
    /// Upload an image file as avatar
    Avatar {
        path: PathBuf,
        /// Overrides the type guessed from the file extension
        #[arg(long)]
        mime: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let args = CliArgs {
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.app.home_dir));
    tracing::info!("marketplace-cli starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config),
        Commands::Api(command) => {
            let api = connect(&config).await?;
            dispatch(api.as_ref(), command).await
        }
    }
}

/// Open the configured store and bring the marketplace module up over it.
async fn connect(config: &AppConfig) -> Result<Arc<dyn MarketplaceApi>> {
    let store: Arc<dyn KeyValueStore> = match config.store.backend {
        StoreBackend::File => {
            let dir = config.store_dir();
            tracing::debug!("Using file store at {}", dir.display());
            Arc::new(FileStore::new(dir))
        }
        StoreBackend::Memory => {
            tracing::debug!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let module_cfg: MarketplaceConfig = config.module_config("marketplace")?;
    let module = Marketplace::default();
    module.init(module_cfg, store).await?;
    module.client()
}

async fn dispatch(api: &dyn MarketplaceApi, command: ApiCommand) -> Result<()> {
    match command {
        ApiCommand::Register(reg) => {
            let confirm_password = reg.confirm_password.unwrap_or_else(|| reg.password.clone());
            let user = api
                .register(Registration {
                    name: reg.name,
                    email: reg.email,
                    role: reg.role,
                    password: reg.password,
                    confirm_password,
                })
                .await?;
            println!("Registered and logged in as {} ({})", user.name, user.id);
        }
        ApiCommand::Login { email, password } => {
            let user = api.login(email, password).await?;
            println!("Logged in as {} ({})", user.name, user.id);
        }
        ApiCommand::Logout => {
            api.logout().await?;
            println!("Logged out");
        }
        ApiCommand::Whoami => match api.current_user().await? {
            Some(user) => print_user(&user),
            None => println!("Not logged in"),
        },
        ApiCommand::Projects(cmd) => projects(api, cmd).await?,
        ApiCommand::Dashboard => {
            let dashboard = api.dashboard().await?;
            println!("Dashboard for {}", dashboard.user.name);
            println!("  total:     {}", dashboard.stats.total);
            println!("  active:    {}", dashboard.stats.active);
            println!("  completed: {}", dashboard.stats.completed);
            println!("  earnings:  ${}", dashboard.stats.earnings);
            for project in &dashboard.projects {
                println!("{}", project_line(project));
            }
        }
        ApiCommand::Skills(SkillCommands::Add { skill }) => {
            let user = api.add_skill(skill).await?;
            println!("Skills: {}", user.skills().join(", "));
        }
        ApiCommand::Skills(SkillCommands::Remove { skill }) => {
            let user = api.remove_skill(skill).await?;
            println!("Skills: {}", user.skills().join(", "));
        }
        ApiCommand::Profile(ProfileCommands::Rename { name }) => {
            let user = api.rename(name).await?;
            println!("Name: {}", user.name);
        }
        ApiCommand::Profile(ProfileCommands::Avatar { path, mime }) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mime = mime.unwrap_or_else(|| guess_mime(&path).to_string());
            api.set_avatar(bytes, mime).await?;
            println!("Avatar updated");
        }
    }
    Ok(())
}

async fn projects(api: &dyn MarketplaceApi, cmd: ProjectCommands) -> Result<()> {
    match cmd {
        ProjectCommands::List {
            search,
            category,
            budget,
        } => {
            let filter = ProjectFilter {
                search_term: search,
                category,
                budget_range: budget.as_deref().map(BudgetRange::parse),
            };
            let found = api.list_projects(filter).await?;
            if found.is_empty() {
                println!("No projects found");
            }
            for project in &found {
                println!("{}", project_line(project));
            }
        }
        ProjectCommands::Show { id } => {
            let project = api.get_project(ProjectId(id)).await?;
            print_project(&project);
        }
        ProjectCommands::Post(post) => {
            let project = api
                .post_project(NewProject {
                    title: post.title,
                    description: post.description,
                    category: post.category,
                    budget: post.budget,
                    timeline: post.timeline,
                    skills: post.skills,
                })
                .await?;
            println!("Posted project {}", project.id);
        }
        ProjectCommands::Assign { id, freelancer_id } => {
            let project = api
                .assign_project(ProjectId(id), UserId::new(freelancer_id))
                .await?;
            println!("Project {} is now {}", project.id, project.status);
        }
        ProjectCommands::Complete { id } => {
            let project = api.complete_project(ProjectId(id)).await?;
            println!("Project {} is now {}", project.id, project.status);
        }
    }
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.module_config::<MarketplaceConfig>("marketplace")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:     {}", user.id);
    println!("  role:   {}", user.role());
    println!("  joined: {}", user.created_at.format("%Y-%m-%d"));
    match &user.profile {
        RoleProfile::Client { company } => println!("  company: {company}"),
        RoleProfile::Freelancer { skills, .. } => println!("  skills: {}", skills.join(", ")),
    }
    if user.avatar.is_some() {
        println!("  avatar: set");
    }
}

fn budget_label(project: &Project) -> String {
    match project.budget {
        Some(budget) => format!("${budget}"),
        None => "TBD".to_string(),
    }
}

fn project_line(project: &Project) -> String {
    format!(
        "#{:<4} {:<10} {:>8}  {}",
        project.id.0,
        project.status.as_str(),
        budget_label(project),
        project.title
    )
}

fn print_project(project: &Project) {
    println!("#{} {}", project.id, project.title);
    println!("  status:    {}", project.status);
    println!("  budget:    {}", budget_label(project));
    if let Some(category) = &project.category {
        println!("  category:  {category}");
    }
    if let Some(timeline) = &project.timeline {
        println!("  timeline:  {timeline}");
    }
    println!("  client:    {}", project.client_id);
    if let Some(freelancer) = &project.freelancer_id {
        println!("  freelancer: {freelancer}");
    }
    if !project.skills.is_empty() {
        println!("  skills:    {}", project.skills.join(", "));
    }
    println!("  posted:    {}", project.created_at.format("%Y-%m-%d"));
    println!();
    println!("{}", project.description);
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
