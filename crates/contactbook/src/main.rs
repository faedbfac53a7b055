//! `contactbook` - CLI for the contact service
//!
//! This binary runs the contact service and provides a terminal client for
//! a running instance.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};

use contactbook::cli::{Cli, Command, ConfigCommand, ContactArgs, ListCommand};
use contactbook::client::{view, Action, Dialog, Notice};
use contactbook::{
    api, init_logging, seed_if_empty, AppState, Config, ContactBook, ContactField, ContactStore,
    HttpContactApi, SeedOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(api_url) = cli.api_url {
        config.client.api_url = api_url;
        config.validate()?;
    }

    match cli.command {
        Command::Serve => handle_serve(&config).await,
        Command::Seed => handle_seed(&config),
        Command::List(list_cmd) => handle_list(&config, &list_cmd).await,
        Command::Add(fields) => handle_add(&config, &fields).await,
        Command::Edit { id, fields } => handle_edit(&config, id, &fields).await,
        Command::Delete { id } => handle_delete(&config, id).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<ContactStore> {
    let path = config.database_path();
    let store = ContactStore::open(&path)
        .with_context(|| format!("opening contact store at {}", path.display()))?;
    info!(path = %store.path().display(), "Opened contact store");
    Ok(store)
}

async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    if config.seed.enabled {
        seed_if_empty(&store)?;
    }

    let addr = config.bind_addr()?;
    let listener = api::bind(addr).await?;
    let state = AppState::new(store, &config.server);
    api::serve(listener, state).await?;
    Ok(())
}

fn handle_seed(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    match seed_if_empty(&store)? {
        SeedOutcome::Inserted(n) => println!("Inserted {n} sample contacts."),
        SeedOutcome::Skipped { existing } => {
            println!("Store already holds {existing} contacts; nothing inserted.");
        }
    }
    Ok(())
}

async fn connect(
    config: &Config,
    rows_per_page: usize,
) -> anyhow::Result<ContactBook<HttpContactApi>> {
    let api = HttpContactApi::new(&config.client.api_url)?;
    let mut book = ContactBook::new(api, rows_per_page);
    book.load()
        .await
        .with_context(|| format!("fetching contacts from {}", config.client.api_url))?;
    Ok(book)
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let rows = cmd.rows.unwrap_or(config.client.rows_per_page);
    let mut book = connect(config, rows).await?;

    let field = ContactField::from(cmd.sort);
    while book.state().sort.field != field || book.state().sort.direction != cmd.direction() {
        book.dispatch(Action::SortBy(field)).await?;
    }
    book.dispatch(Action::SetPage(cmd.page.saturating_sub(1))).await?;

    if cmd.json {
        let contacts = view::sorted(&book.state().contacts, book.state().sort);
        println!("{}", serde_json::to_string_pretty(&contacts)?);
    } else {
        print!("{}", view::render_table(book.state()));
    }
    Ok(())
}

async fn submit_form(
    book: &mut ContactBook<HttpContactApi>,
    fields: &ContactArgs,
) -> anyhow::Result<()> {
    for (field, value) in fields.values() {
        book.dispatch(Action::SetField(field, value)).await?;
    }
    if let Some(form) = view::render_form(book.state()) {
        debug!("Submitting\n{form}");
    }
    book.dispatch(Action::Submit).await?;

    // The dialog stays open when the service rejected the save.
    if book.state().dialog.is_open() {
        bail!("the contact service rejected the change");
    }
    Ok(())
}

async fn handle_add(config: &Config, fields: &ContactArgs) -> anyhow::Result<()> {
    let mut book = connect(config, config.client.rows_per_page).await?;
    book.dispatch(Action::OpenCreate).await?;
    submit_form(&mut book, fields).await?;
    println!("Contact added.");
    Ok(())
}

async fn handle_edit(config: &Config, id: i64, fields: &ContactArgs) -> anyhow::Result<()> {
    let mut book = connect(config, config.client.rows_per_page).await?;
    book.dispatch(Action::OpenEdit(id)).await?;
    if book.state().dialog != Dialog::Edit(id) {
        bail!("Contact not found: {id}");
    }
    submit_form(&mut book, fields).await?;
    println!("Contact {id} updated.");
    Ok(())
}

async fn handle_delete(config: &Config, id: i64) -> anyhow::Result<()> {
    let mut book = connect(config, config.client.rows_per_page).await?;
    book.dispatch(Action::Delete(id)).await?;
    match &book.state().notice {
        Some(Notice::Info(message)) => {
            println!("{message}");
            Ok(())
        }
        Some(Notice::Alert(message)) => bail!("{message}"),
        None => Ok(()),
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!(
                    "  CORS origins:       {}",
                    config.server.cors_allowed_origins.join(", ")
                );
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Seed]");
                println!("  Enabled:            {}", config.seed.enabled);
                println!();
                println!("[Client]");
                println!("  API URL:            {}", config.client.api_url);
                println!("  Rows per page:      {}", config.client.rows_per_page);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
