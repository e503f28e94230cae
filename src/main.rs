use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use storefront_auth::{AuthGateway, Session};
use storefront_catalog::ProductGateway;
use storefront_config::{Config, LogConfig};
use storefront_http::{HttpClient, ReqwestBackend, TokenInterceptor};
use storefront_store::FileTokenStore;
use storefront_types::{CreateProductDto, Credentials, UpdateProductDto};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "storefront — product catalog client")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the catalog API base URL.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    /// Token file path (default: ~/.storefront/token.json).
    #[arg(long, global = true, value_name = "PATH")]
    token_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Work with the product catalog.
    #[command(subcommand)]
    Products(ProductCommand),
    /// Log in and store the access token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove the stored access token.
    Logout,
    /// Show whether a token is stored.
    Status,
    /// Show the profile of the logged-in user.
    Profile,
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
    /// List products.
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Print products as returned, without the computed taxes.
        #[arg(long)]
        simple: bool,
    },
    /// Show one product.
    Get { id: String },
    /// Create a product.
    Create(CreateArgs),
    /// Update fields of a product.
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Delete a product.
    Delete { id: String },
    /// List the products of a category.
    Category {
        id: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    description: String,
    #[arg(long)]
    category_id: u64,
    /// Image URL; repeat for several.
    #[arg(long = "image")]
    images: Vec<String>,
}

impl From<CreateArgs> for CreateProductDto {
    fn from(args: CreateArgs) -> Self {
        CreateProductDto::builder()
            .title(args.title)
            .price(args.price)
            .description(args.description)
            .images(args.images)
            .category_id(args.category_id)
            .build()
    }
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category_id: Option<u64>,
    /// Replacement image URL; repeat for several.
    #[arg(long = "image")]
    images: Vec<String>,
}

impl From<UpdateArgs> for UpdateProductDto {
    fn from(args: UpdateArgs) -> Self {
        UpdateProductDto {
            title: args.title,
            price: args.price,
            description: args.description,
            images: (!args.images.is_empty()).then_some(args.images),
            category_id: args.category_id,
        }
    }
}

/// Everything a command needs, wired from the resolved configuration.
struct App {
    client: HttpClient,
    store: Arc<FileTokenStore>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let store = Arc::new(FileTokenStore::new(config.token_path_or_default()));
        let backend = ReqwestBackend::with_timeout(config.timeout())
            .context("failed to build HTTP client")?;
        let client = HttpClient::new(config.api_url.clone(), Arc::new(backend))
            .with_interceptor(Arc::new(TokenInterceptor::new(store.clone())));
        Ok(Self { client, store })
    }

    fn products(&self) -> ProductGateway {
        ProductGateway::new(self.client.clone())
    }

    fn session(&self) -> Session {
        Session::new(AuthGateway::new(self.client.clone()), self.store.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("config error")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(path) = cli.token_file {
        config.token_path = Some(path);
    }
    config.validate()?;
    init_tracing(&config.log);
    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    let app = App::new(&config)?;
    match cli.command {
        Commands::Products(cmd) => cmd_products(&app, cmd).await,
        Commands::Login { email, password } => cmd_login(&app, email, password).await,
        Commands::Logout => cmd_logout(&app).await,
        Commands::Status => cmd_status(&app).await,
        Commands::Profile => print_json(&app.session().gateway().profile().await?),
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `log.level`.
fn init_tracing(log: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

async fn cmd_products(app: &App, cmd: ProductCommand) -> Result<()> {
    let products = app.products();
    match cmd {
        ProductCommand::List {
            limit,
            offset,
            simple: true,
        } => {
            if limit.is_some() || offset.is_some() {
                tracing::warn!("--limit and --offset are ignored with --simple");
            }
            print_json(&products.get_all_simple().await?)
        }
        ProductCommand::List { limit, offset, .. } => {
            print_json(&products.get_all(limit, offset).await?)
        }
        ProductCommand::Get { id } => print_json(&products.get_one(&id).await?),
        ProductCommand::Create(args) => print_json(&products.create(&args.into()).await?),
        ProductCommand::Update { id, fields } => {
            let dto = UpdateProductDto::from(fields);
            anyhow::ensure!(!dto.is_empty(), "nothing to update; pass at least one field");
            print_json(&products.update(&id, &dto).await?)
        }
        ProductCommand::Delete { id } => print_json(&products.delete(&id).await?),
        ProductCommand::Category { id, limit, offset } => {
            print_json(&products.get_by_category(&id, limit, offset).await?)
        }
    }
}

async fn cmd_login(app: &App, email: String, password: String) -> Result<()> {
    let credentials = Credentials::new(email, password);
    app.session()
        .login(&credentials)
        .await
        .context("login failed")?;
    eprintln!("logged in as {}", credentials.email);
    Ok(())
}

async fn cmd_logout(app: &App) -> Result<()> {
    app.session().logout().await.context("logout failed")?;
    eprintln!("logged out");
    Ok(())
}

async fn cmd_status(app: &App) -> Result<()> {
    let status = if app.session().is_authenticated().await? {
        "authenticated"
    } else {
        "not authenticated"
    };
    println!("{status} ({})", app.store.path().display());
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
