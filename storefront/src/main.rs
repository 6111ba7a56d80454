use clap::{Args, Parser, Subcommand};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::CartItem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storefront::Config;
use storefront::admin;
use storefront::checkout::views::CheckoutPage;
use storefront::checkout::{Checkout, FilePaymentSessionStore, InMemoryCart, UserSession};
use storefront::logger::init_logger_with_file;
use tienda_client::{AdminApi, CheckoutApi, StorefrontClient};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Tienda checkout and back-office", long_about = None)]
struct Cli {
    /// Bearer token for authenticated calls
    #[arg(long, env = "TIENDA_TOKEN", global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ShopperArgs {
    #[arg(long, env = "TIENDA_USER_ID")]
    user_id: Option<i64>,

    /// JSON file with the cart lines
    #[arg(long)]
    cart: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the payment methods offered at checkout
    Methods,
    /// Render the checkout page for a cart
    Checkout(ShopperArgs),
    /// Resume a checkout from the payment provider's return URL
    Resume {
        url: String,
        #[command(flatten)]
        shopper: ShopperArgs,
    },
    Categories {
        #[arg(long, default_value = "")]
        search: String,
    },
    Statuses {
        #[arg(long, default_value = "")]
        search: String,
    },
    Products {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<i64>,
    },
    Users {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        role: Option<i64>,
    },
}

fn load_cart(path: Option<&Path>) -> AppResult<Vec<CartItem>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::with_message(ErrorCode::StorageError, format!("No se pudo leer el carrito: {e}"))
            .with_detail("path", path.display().to_string())
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Carrito inválido: {e}"))
            .with_detail("path", path.display().to_string())
    })
}

async fn open_checkout(
    client: Arc<StorefrontClient>,
    config: &Config,
    shopper: &ShopperArgs,
    token: Option<&str>,
) -> AppResult<Checkout> {
    let user = match shopper.user_id {
        Some(id) => UserSession::new(id, token.unwrap_or_default()),
        None => UserSession::anonymous(),
    };
    let cart = Arc::new(InMemoryCart::new(load_cart(shopper.cart.as_deref())?));
    let store = Arc::new(FilePaymentSessionStore::new(config.payment_session_path()));
    let mut checkout = Checkout::new(client, cart, user, config.clone()).with_store(store);
    checkout.initialize().await;
    Ok(checkout)
}

async fn run(cli: Cli, config: Config) -> AppResult<()> {
    let mut client_config = config.client_config();
    if let Some(token) = cli.token.as_deref() {
        client_config = client_config.with_token(token);
    }
    let client = Arc::new(StorefrontClient::new(&client_config)?);
    let token = cli.token.as_deref();

    match cli.command {
        Command::Methods => {
            for method in client.fetch_payment_methods().await? {
                println!("{:>4}  {:<24} {:?}", method.id, method.nombre, method.kind());
            }
        }
        Command::Checkout(shopper) => {
            let checkout = open_checkout(client, &config, &shopper, token).await?;
            print!("{}", CheckoutPage::new(&checkout).render());
        }
        Command::Resume { url, shopper } => {
            let mut checkout = open_checkout(client, &config, &shopper, token).await?;
            let outcome = checkout.handle_payment_return(&url).await;
            tracing::info!(?outcome, "Payment return handled");
            print!("{}", CheckoutPage::new(&checkout).render());
        }
        Command::Categories { search } => {
            let categories = client.list_categories().await?;
            for c in admin::filter_categories(&categories, &search) {
                let state = if c.is_active() { "activa" } else { "inactiva" };
                println!("{:>4}  {:<30} {:>3} productos  {}", c.id, c.nombre, c.product_count(), state);
            }
        }
        Command::Statuses { search } => {
            let statuses = client.list_order_statuses().await?;
            for s in admin::filter_statuses(&statuses, &search) {
                println!("{:>2}. {:<24} {}", s.orden, s.nombre, s.color);
            }
        }
        Command::Products { search, category } => {
            let products = client.list_products().await?;
            for p in admin::filter_products(&products, &search, category) {
                let alert = if admin::is_low_stock(p) { "  stock bajo" } else { "" };
                println!(
                    "{:>4}  {:<30} {:>10}  stock {}{}",
                    p.id,
                    p.nombre,
                    shared::money::format_price(p.precio.to_decimal()),
                    p.stock,
                    alert
                );
            }
        }
        Command::Users { search, role } => {
            if token.is_none() {
                return Err(AppError::new(ErrorCode::NotAuthenticated));
            }
            let users = client.list_users().await?;
            for u in admin::filter_users(&users, &search, role) {
                println!("{:>4}  {:<24} {:<32} {}", u.id, u.nombre, u.email, u.role_label());
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let _guard = init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let cli = Cli::parse();
    tracing::debug!(api_url = %config.api_url, "Storefront starting");

    if let Err(e) = run(cli, config).await {
        tracing::error!(
            code = e.code.code(),
            category = e.code.category().name(),
            details = ?e.details,
            "Command failed: {}",
            e
        );
        return Err(anyhow::Error::new(e).context("storefront command failed"));
    }
    Ok(())
}
