use clap::{Parser, Subcommand};
use cms_admin::{AdminProvider, ApiClient, ListQuery, ResourceKind};
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use url::Url;

#[derive(Parser)]
#[command(name = "cms-admin")]
#[command(about = "Admin data provider for the CMS content API")]
struct Cli {
    /// Base URL of the content API
    #[arg(long, env = "CMS_ADMIN_SERVICE_URL", default_value = "http://localhost:8080")]
    service_url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records of a resource
    List {
        /// Resource name (blog_posts, categories)
        resource: ResourceKind,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
        /// Sort field (createdAt, updatedAt, publishedAt, title)
        #[arg(long)]
        sort: Option<String>,
        /// Sort direction (asc, desc)
        #[arg(long)]
        order: Option<String>,
        /// Filter as key=value, e.g. status=published
        #[arg(short, long, value_parser = parse_pair)]
        filter: Vec<(String, String)>,
    },
    /// Fetch a single record
    Get { resource: ResourceKind, id: String },
    /// Create a record (local echo, nothing is persisted)
    Create {
        resource: ResourceKind,
        /// Field as key=value
        #[arg(short, long, value_parser = parse_pair)]
        field: Vec<(String, String)>,
    },
    /// Update a record (local echo, nothing is persisted)
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(short, long, value_parser = parse_pair)]
        field: Vec<(String, String)>,
    },
    /// Delete a record (local echo, nothing is deleted)
    Delete { resource: ResourceKind, id: String },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn to_fields(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let provider = AdminProvider::new(ApiClient::new(cli.service_url)?);

    match cli.command {
        Commands::List {
            resource,
            page,
            per_page,
            sort,
            order,
            filter,
        } => {
            let query = ListQuery {
                page,
                per_page,
                sort,
                order,
                filters: filter,
            };
            print_json(&provider.list(resource, &query).await?)?;
        }
        Commands::Get { resource, id } => {
            print_json(&provider.get(resource, &id).await?)?;
        }
        Commands::Create { resource, field } => {
            print_json(&provider.create(resource, to_fields(field))?)?;
        }
        Commands::Update {
            resource,
            id,
            field,
        } => {
            print_json(&provider.update(resource, &id, to_fields(field))?)?;
        }
        Commands::Delete { resource, id } => {
            print_json(&provider.delete(resource, &id)?)?;
        }
    }

    Ok(())
}
