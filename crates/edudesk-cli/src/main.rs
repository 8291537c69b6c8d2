use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;
use edudesk::{ApiClient, AuthService, Resource, ResourceKind, with_resource};
use edudesk_auth::{RouteDecision, SessionStore};
use edudesk_cli::args::{Selection, parse_key_value, parse_selection};
use edudesk_cli::commands::{self, Context, Edits, ListArgs};
use edudesk_config::{ApiConfig, ListConfig, SessionConfig};
use edudesk_observability::{LoggingConfig, init_logging};

#[derive(Parser)]
#[command(name = "edudesk")]
#[command(about = "Edudesk CLI - Back-office tools for leads, students, courses and staff", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the identity for later commands
    Login {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Forget the stored identity
    Logout,
    /// Show the logged-in user and their permissions
    Whoami,
    /// Check a permission token, e.g. `edudesk can "edit course"`
    Can {
        token: String,
    },
    /// Show every resource and whether you can open it
    Resources,
    /// List one page of records
    List {
        /// leads, students, admissions, batches, courses, staff, payroll,
        /// certificates or feedback
        resource: ResourceKind,

        #[command(flatten)]
        query: ListOpts,

        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one record as JSON
    Show {
        resource: ResourceKind,
        id: i64,
    },
    /// Create a record
    Create {
        resource: ResourceKind,

        #[command(flatten)]
        edits: EditOpts,
    },
    /// Edit a record
    Edit {
        resource: ResourceKind,
        id: i64,

        #[command(flatten)]
        edits: EditOpts,
    },
    /// Delete a record
    Delete {
        resource: ResourceKind,
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List the dropdown options a resource provides to other forms
    Options {
        resource: ResourceKind,
    },
}

#[derive(Args)]
struct ListOpts {
    /// Page number
    #[arg(long)]
    page: Option<u32>,

    /// Rows per page
    #[arg(long)]
    size: Option<u32>,

    /// Free-text search
    #[arg(short = 's', long)]
    search: Option<String>,

    /// Structured filter, repeatable: --filter status=Open
    #[arg(short = 'f', long = "filter", value_parser = parse_key_value)]
    filters: Vec<(String, String)>,

    /// Sort field (default: the resource's own)
    #[arg(long)]
    sort: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,
}

impl From<ListOpts> for ListArgs {
    fn from(opts: ListOpts) -> Self {
        ListArgs {
            page: opts.page,
            size: opts.size,
            search: opts.search,
            filters: opts.filters,
            sort: opts.sort,
            ascending: opts.asc,
        }
    }
}

#[derive(Args)]
struct EditOpts {
    /// Set a field, repeatable: --set name=Rust --set fee=2500
    #[arg(long = "set", value_parser = parse_key_value)]
    set: Vec<(String, String)>,

    /// Toggle a label in a multi-valued field: --toggle tags=Hot
    #[arg(long = "toggle", value_parser = parse_key_value)]
    toggle: Vec<(String, String)>,

    /// Choose a reference: --select course=3:"Rust Basics"
    #[arg(long = "select", value_parser = parse_selection)]
    select: Vec<Selection>,

    /// Pick labels for a multi-valued field interactively
    #[arg(long = "pick")]
    pick: Vec<String>,
}

impl EditOpts {
    fn split(self) -> (Edits, Vec<String>) {
        let edits = Edits {
            set: self.set,
            toggle: self.toggle,
            select: self.select,
        };
        (edits, self.pick)
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_string();
    } else if std::env::var("LOG_LEVEL").is_err() {
        logging.level = "warn".to_string();
    }
    if let Err(e) = init_logging(&logging) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let ctx = Context {
        transport: Arc::new(ApiClient::new(ApiConfig::from_env())?),
        session: SessionStore::from_config(&SessionConfig::from_env()),
        list_config: ListConfig::from_env(),
    };

    match command {
        Commands::Login { email, password } => handle_login(&ctx, email, password).await,
        Commands::Logout => {
            AuthService::logout(&ctx.session)?;
            println!("✅ Logged out");
            Ok(())
        }
        Commands::Whoami => handle_whoami(&ctx.session),
        Commands::Can { token } => handle_can(&ctx.session, &token),
        Commands::Resources => handle_resources(&ctx.session),
        Commands::List {
            resource,
            query,
            json,
        } => {
            let args = ListArgs::from(query);
            with_resource!(resource, R => handle_list::<R>(&ctx, &args, json).await)
        }
        Commands::Show { resource, id } => {
            with_resource!(resource, R => handle_show::<R>(&ctx, id).await)
        }
        Commands::Create { resource, edits } => {
            let (edits, picks) = edits.split();
            with_resource!(resource, R => handle_save::<R>(&ctx, None, &edits, &picks).await)
        }
        Commands::Edit {
            resource,
            id,
            edits,
        } => {
            let (edits, picks) = edits.split();
            if edits.is_empty() && picks.is_empty() {
                anyhow::bail!("Nothing to change. Pass --set, --toggle, --select or --pick.");
            }
            with_resource!(resource, R => handle_save::<R>(&ctx, Some(id), &edits, &picks).await)
        }
        Commands::Delete { resource, id, yes } => {
            with_resource!(resource, R => handle_delete::<R>(&ctx, id, yes).await)
        }
        Commands::Options { resource } => {
            with_resource!(resource, R => handle_options::<R>(&ctx).await)
        }
    }
}

async fn handle_login(
    ctx: &Context,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let identity = AuthService::login(ctx.transport.as_ref(), &ctx.session, &email, &password).await?;

    println!("\n✅ Logged in successfully!");
    println!("   Name: {}", identity.name);
    println!("   Email: {}", identity.email);
    println!("   Role: {}", identity.role);
    Ok(())
}

fn handle_whoami(session: &SessionStore) -> anyhow::Result<()> {
    let Some(identity) = session.current_identity() else {
        println!("Not logged in");
        return Ok(());
    };

    println!("{} <{}>", identity.name, identity.email);
    println!("   Role: {}", identity.role);
    match identity.branch_id {
        Some(branch) => println!("   Branch: {}", branch),
        None => println!("   Branch: all"),
    }
    if session.policy().is_unrestricted(&identity) {
        println!("   Permissions: all");
    } else {
        let tokens = identity.permission_tokens();
        if tokens.is_empty() {
            println!("   Permissions: none");
        } else {
            println!("   Permissions:");
            for token in tokens {
                println!("     - {}", token);
            }
        }
    }
    Ok(())
}

fn handle_can(session: &SessionStore, token: &str) -> anyhow::Result<()> {
    if session.has_permission(token) {
        println!("✅ {}", token.trim());
        Ok(())
    } else {
        anyhow::bail!("Missing permission: {}", token.trim())
    }
}

fn handle_resources(session: &SessionStore) -> anyhow::Result<()> {
    for kind in ResourceKind::ALL {
        let name = with_resource!(kind, R => R::NAME);
        let mark = match kind.route().guard(session) {
            RouteDecision::Render => "✅",
            RouteDecision::Redirect(_) => "❌",
        };
        println!("{} {:<14} {:<16} {}", mark, kind, kind.route().path(), name);
    }
    Ok(())
}

async fn handle_list<R: Resource>(ctx: &Context, args: &ListArgs, json: bool) -> anyhow::Result<()> {
    let output = commands::list::<R>(ctx, args).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output.state.rows)?);
        return Ok(());
    }

    if output.state.rows.is_empty() {
        println!("No {} records found", R::NAME);
    }
    for row in &output.state.rows {
        let option = R::option(row);
        println!("{:>8}  {}", option.value, option.label);
    }

    let pages = output
        .window
        .iter()
        .map(|p| {
            if *p == output.query.page() {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "\nPage {} of {} ({} total)  {}",
        output.query.page(),
        output.state.total_pages.max(1),
        output.state.total_count,
        pages
    );
    println!(
        "Sorted by {} {}",
        output.query.sort_field(),
        output.query.sort_order()
    );
    Ok(())
}

async fn handle_show<R: Resource>(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let record = commands::show::<R>(ctx, id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn handle_options<R: Resource>(ctx: &Context) -> anyhow::Result<()> {
    for option in commands::options::<R>(ctx).await? {
        println!("{:>8}  {}", option.value, option.label);
    }
    Ok(())
}

async fn handle_save<R: Resource>(
    ctx: &Context,
    id: Option<i64>,
    edits: &Edits,
    picks: &[String],
) -> anyhow::Result<()> {
    commands::save::<R>(ctx, id, edits, picks).await?;
    match id {
        Some(id) => println!("✅ Updated {} {}", R::NAME, id),
        None => println!("✅ Created {}", R::NAME),
    }
    Ok(())
}

async fn handle_delete<R: Resource>(ctx: &Context, id: i64, yes: bool) -> anyhow::Result<()> {
    commands::ensure_route(&ctx.session, R::ROUTE)?;

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete {} {}?", R::NAME, id))
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }

    commands::delete::<R>(ctx, id, true).await?;
    println!("✅ Deleted {} {}", R::NAME, id);
    Ok(())
}
