// GlenNOW CLI - browse and administer the project archive

mod config;
mod fields;
mod view;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use glennow_core::{
    apply_banner, create, delete, lifecycle, AuthProvider, Banner, BannerRepository,
    ChangeRequest, FileStore, Project, ProjectDraft, ProjectRepository, RequestLog,
    StaticCredentials,
};

/// GlenNOW - local development project archive
#[derive(Parser)]
#[command(name = "glennow")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the archive data (defaults to ~/.glennow)
    #[arg(long, global = true, env = config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    List {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a project's details
    Show {
        /// Project id
        id: String,
    },
    /// Export a project as plain text
    Export {
        /// Project id
        id: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the mailto link for a project's developer
    Contact {
        /// Project id
        id: String,
    },
    /// Submit a change request to the archive administrator
    Request {
        /// Request title, used as the mail subject
        title: String,

        /// Text field (can be specified multiple times)
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        field: Vec<String>,

        /// URL field, must start with http (can be specified multiple times)
        #[arg(short, long = "url-field", value_name = "NAME=VALUE")]
        url_field: Vec<String>,
    },
    /// Administrative actions (requires login)
    Admin {
        /// Admin username
        #[arg(long, env = "GLENNOW_ADMIN_USER")]
        user: String,

        /// Admin password (prompted when omitted)
        #[arg(long, env = "GLENNOW_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new project
    Create {
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Edit an existing project
    Edit {
        /// Project id
        id: String,

        #[command(flatten)]
        fields: ProjectFields,

        /// Remove the source at this position (as listed by `show`)
        #[arg(long, value_name = "INDEX")]
        remove_source: Vec<usize>,

        /// Remove the image at this position (as listed by `show`)
        #[arg(long, value_name = "INDEX")]
        remove_image: Vec<usize>,
    },
    /// Delete a project
    Delete {
        /// Project id
        id: String,
    },
    /// Mark a project inactive, or reactivate it
    ToggleInactive {
        /// Project id
        id: String,
    },
    /// Update the banner shown above the project list
    Banner {
        /// Banner text (empty hides the banner)
        #[arg(long)]
        text: Option<String>,

        /// Banner color, e.g. #cccccc
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Args)]
struct ProjectFields {
    /// Project title
    #[arg(long)]
    title: Option<String>,

    /// Project description
    #[arg(long)]
    description: Option<String>,

    /// Developer contact email
    #[arg(long)]
    contact: Option<String>,

    /// Source link (can be specified multiple times, newest last)
    #[arg(long = "source", value_name = "URL")]
    sources: Vec<String>,

    /// Image URI (can be specified multiple times, newest last)
    #[arg(long = "image", value_name = "URI")]
    images: Vec<String>,
}

impl ProjectFields {
    /// Applies the flags on top of a draft.
    fn apply(self, draft: &mut ProjectDraft) -> anyhow::Result<()> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(contact) = self.contact {
            draft.contact_email = contact;
        }
        for source in &self.sources {
            draft.add_source(source)?;
        }
        for image in &self.images {
            draft.add_image(image);
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glennow=warn,glennow_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "Using data directory");
    let store = FileStore::new(data_dir);

    match cli.command {
        Commands::List { json } => handle_list(&store, json),
        Commands::Show { id } => handle_show(&store, &id),
        Commands::Export { id, output } => handle_export(&store, &id, output.as_deref()),
        Commands::Contact { id } => handle_contact(&store, &id),
        Commands::Request {
            title,
            field,
            url_field,
        } => handle_request(&store, title, field, url_field),
        Commands::Admin {
            user,
            password,
            action,
        } => {
            login(&StaticCredentials::default(), &user, password)?;
            handle_admin(&store, action)
        }
    }
}

fn find_project(store: &FileStore, id: &str) -> anyhow::Result<Project> {
    ProjectRepository::new(store)
        .find(id)
        .ok_or_else(|| anyhow!("No project with id '{}'", id))
}

fn handle_list(store: &FileStore, json: bool) -> anyhow::Result<()> {
    let projects = ProjectRepository::new(store).load_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    let banner = BannerRepository::new(store).load_banner();
    print!("{}", view::render_list(&banner, &projects));
    Ok(())
}

fn handle_show(store: &FileStore, id: &str) -> anyhow::Result<()> {
    let project = find_project(store, id)?;
    print!("{}", view::render_detail(&project));
    Ok(())
}

fn handle_export(store: &FileStore, id: &str, output: Option<&str>) -> anyhow::Result<()> {
    use colored::Colorize;

    let project = find_project(store, id)?;
    let text = glennow_core::export_text(&project);

    match output {
        None => print!("{}", text),
        Some(path) => {
            std::fs::write(path, &text).context("Could not export project.")?;
            println!("{} Exported to {}", "✓".green().bold(), path);
            println!("  Suggested name: {}", glennow_core::export_title(&project));
        }
    }
    Ok(())
}

fn handle_contact(store: &FileStore, id: &str) -> anyhow::Result<()> {
    let project = find_project(store, id)?;
    let mailto = glennow_core::contact_mailto(&project)
        .ok_or_else(|| anyhow!("No developer email provided."))?;
    println!("{}", mailto);
    Ok(())
}

fn handle_request(
    store: &FileStore,
    title: String,
    text_fields: Vec<String>,
    url_fields: Vec<String>,
) -> anyhow::Result<()> {
    let mut request = ChangeRequest::new(title, Utc::now());
    request.fields = fields::parse_fields(text_fields, url_fields)?;
    request.validate()?;

    RequestLog::new(store)
        .append(request.clone())
        .context("Could not submit request.")?;

    println!("{}", request.mailto());
    Ok(())
}

fn login(auth: &impl AuthProvider, user: &str, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")
            .context("Failed to read password")?,
    };

    if !auth.authenticate(user, &password) {
        tracing::warn!(user, "Rejected admin login");
        return Err(anyhow!("Unauthorized: Incorrect username or password."));
    }
    Ok(())
}

fn handle_admin(store: &FileStore, action: AdminAction) -> anyhow::Result<()> {
    use colored::Colorize;

    let projects = ProjectRepository::new(store);
    let now = Utc::now();

    match action {
        AdminAction::Create { fields } => {
            let mut draft = ProjectDraft::default();
            fields.apply(&mut draft)?;
            let project = create(draft, now)?;
            let id = project.id.clone();

            let list = lifecycle::submit(&projects.load_all(), project, now);
            projects
                .replace_all(&list)
                .context("Could not save projects.")?;
            println!("{} Created project {}", "✓".green().bold(), id);
        }
        AdminAction::Edit {
            id,
            fields,
            remove_source,
            remove_image,
        } => {
            let existing = find_project(store, &id)?;
            let mut draft = ProjectDraft::from_project(&existing);

            // Remove from the highest index down so earlier removals do not
            // shift later ones.
            let mut remove_source = remove_source;
            remove_source.sort_unstable_by(|a, b| b.cmp(a));
            for index in remove_source {
                draft.remove_source(index);
            }
            let mut remove_image = remove_image;
            remove_image.sort_unstable_by(|a, b| b.cmp(a));
            for index in remove_image {
                draft.remove_image(index);
            }

            fields.apply(&mut draft)?;
            let edited = draft.into_project(Some(&existing), now)?;

            let list = lifecycle::submit(&projects.load_all(), edited, now);
            projects
                .replace_all(&list)
                .context("Could not save projects.")?;
            println!("{} Updated project {}", "✓".green().bold(), id);
        }
        AdminAction::Delete { id } => {
            let current = projects.load_all();
            let list = delete(&current, &id);
            if list.len() == current.len() {
                println!("No project with id '{}'; nothing changed", id);
                return Ok(());
            }

            projects
                .replace_all(&list)
                .context("Could not save projects.")?;
            println!("{} Deleted project {}", "✓".green().bold(), id);
        }
        AdminAction::ToggleInactive { id } => {
            let list = lifecycle::toggle_in_list(&projects.load_all(), &id);
            projects
                .replace_all(&list)
                .context("Could not save projects.")?;

            match list.iter().find(|p| p.id == id) {
                Some(p) if p.inactive => println!("Marked {} inactive", p.title),
                Some(p) => println!("Reactivated {}", p.title),
                None => println!("No project with id '{}'; nothing changed", id),
            }
        }
        AdminAction::Banner { text, color } => {
            let banners = BannerRepository::new(store);
            let current = banners.load_banner();
            let patch = Banner::new(
                text.unwrap_or_else(|| current.text.clone()),
                color.unwrap_or_else(|| current.color.clone()),
            );
            let banner = apply_banner(&current, patch);

            banners
                .save_banner(&banner)
                .context("Could not save banner.")?;
            println!("{} Banner updated.", "✓".green().bold());
        }
    }

    Ok(())
}
