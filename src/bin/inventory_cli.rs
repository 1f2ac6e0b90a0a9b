//! 库存命令行客户端
//!
//! 每条命令都先从后端加载完整列表，再执行操作。

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inventory::client::{
    export::DEFAULT_EXPORT_FILE, FormInput, HttpProductApi, InventoryApp, Notice, Tab,
};
use inventory::infrastructure::{config::Config, logger::Logger};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "inventory-cli", about = "Manage the product inventory")]
struct Cli {
    /// API base address, e.g. http://localhost:5000
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show products as a table
    List {
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Show products as cards
    Cards {
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        qty: String,
        #[arg(long)]
        price: String,
    },
    /// Edit a product; omitted fields keep their current value
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        qty: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Delete a product
    Delete { id: Uuid },
    /// Export products to CSV
    Export {
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(base) = cli.api_base {
        config.client.api_base = base;
    }
    config.logging.level = "warn".to_string();
    Logger::init(&config.logging);

    let api = HttpProductApi::new(&config.client)?;
    let mut app = InventoryApp::new(Arc::new(api));
    if let Some(notice) = app.load().await {
        report(&notice);
        anyhow::bail!("could not reach {}", config.client.api_base);
    }

    let notice = match cli.command {
        Command::List { filter } => {
            app.set_filter(filter);
            print!("{}", app.table().await);
            None
        }
        Command::Cards { filter } => {
            app.set_filter(filter);
            print!("{}", app.cards().await);
            None
        }
        Command::Add {
            name,
            category,
            qty,
            price,
        } => {
            app.open_tab(Tab::Add).await;
            app.form()
                .set_input(FormInput::new(name, qty, price, category))
                .await;
            Some(app.submit().await)
        }
        Command::Edit {
            id,
            name,
            category,
            qty,
            price,
        } => {
            let notice = app.edit(id).await;
            if notice.is_error() {
                Some(notice)
            } else {
                let current = app.form().input().await;
                app.form()
                    .set_input(FormInput {
                        name: name.unwrap_or(current.name),
                        qty: qty.unwrap_or(current.qty),
                        price: price.unwrap_or(current.price),
                        category: category.unwrap_or(current.category),
                    })
                    .await;
                Some(app.submit().await)
            }
        }
        Command::Delete { id } => Some(app.delete(id).await),
        Command::Export { output } => {
            let file = File::create(&output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            Some(app.export_csv(file).await?)
        }
    };

    if let Some(notice) = notice {
        report(&notice);
        if notice.is_error() {
            std::process::exit(1);
        }
        if app.active_tab() == Tab::View {
            print!("{}", app.table().await);
        }
    }

    Ok(())
}

fn report(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
}
