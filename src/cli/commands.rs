use std::io::Write;

use anyhow::{bail, Context};
use sp_app::App;
use sp_core::{PostalCode, SearchView, SortOrder};
use tracing::info_span;
use tracing::Instrument;

use super::render;
use super::{Commands, ListCommand};

/// Runs one command against the wired application, writing its output to `out`.
pub async fn run<W: Write>(command: Commands, app: &App, out: &mut W) -> anyhow::Result<()> {
    let span = info_span!("command", name = command_name(&command));
    async move {
        match command {
            Commands::Search {
                term,
                postal_code,
                sort,
            } => search(app, out, term, postal_code, sort.into()).await,
            Commands::Suggest { prefix } => suggest(app, out, &prefix).await,
            Commands::Zipcodes => zipcodes(app, out).await,
            Commands::Stores { code } => stores(app, out, PostalCode::new(code)).await,
            Commands::List { command } => list(app, out, command).await,
        }
    }
    .instrument(span)
    .await
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Search { .. } => "search",
        Commands::Suggest { .. } => "suggest",
        Commands::Zipcodes => "zipcodes",
        Commands::Stores { .. } => "stores",
        Commands::List { .. } => "list",
    }
}

async fn run_search(
    app: &App,
    term: String,
    postal_code: Option<String>,
    sort: SortOrder,
) -> SearchView {
    let session = app.search_session();
    session.start().await;
    session.set_postal_code(postal_code);
    session.set_sort(sort);
    session.set_term(term)
}

async fn search<W: Write>(
    app: &App,
    out: &mut W,
    term: String,
    postal_code: Option<String>,
    sort: SortOrder,
) -> anyhow::Result<()> {
    let view = run_search(app, term, postal_code, sort).await;
    out.write_all(render::search_view(&view).as_bytes())?;
    Ok(())
}

async fn suggest<W: Write>(app: &App, out: &mut W, prefix: &str) -> anyhow::Result<()> {
    let session = app.search_session();
    session.start().await;

    let needle = prefix.to_lowercase();
    for name in session
        .suggestions()
        .into_iter()
        .filter(|name| name.to_lowercase().starts_with(&needle))
    {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

async fn zipcodes<W: Write>(app: &App, out: &mut W) -> anyhow::Result<()> {
    let codes = app.list_postal_codes().execute().await;
    if codes.is_empty() {
        writeln!(out, "No postal codes found.")?;
    }
    for code in codes {
        writeln!(out, "{code}")?;
    }
    Ok(())
}

async fn stores<W: Write>(app: &App, out: &mut W, code: PostalCode) -> anyhow::Result<()> {
    let detail = app.get_postal_code_detail().execute(&code).await;
    out.write_all(render::store_detail(&code, detail.as_ref()).as_bytes())?;
    Ok(())
}

async fn list<W: Write>(app: &App, out: &mut W, command: ListCommand) -> anyhow::Result<()> {
    let shopping_list = app.shopping_list();

    match command {
        ListCommand::Show { flat } => {
            let text = if flat {
                render::flat_list(&shopping_list.entries())
            } else {
                render::grouped_list(&shopping_list.grouped_view())
            };
            out.write_all(text.as_bytes())?;
        }
        ListCommand::Add {
            term,
            postal_code,
            pick,
        } => {
            let items = match run_search(app, term, postal_code, SortOrder::AsLoaded).await {
                SearchView::Results(items) => items,
                SearchView::NoResults { term } => bail!("No items match \"{term}\""),
                SearchView::Fallback { .. } => {
                    bail!("Items could not be loaded; sample products cannot be added")
                }
                SearchView::Loading => bail!("Items are still loading"),
            };
            let Some(item) = items.get(pick) else {
                bail!("No result at position {pick} ({} results)", items.len());
            };
            match shopping_list
                .add_item(item)
                .context("Failed to save shopping list")?
            {
                Some(entry) => writeln!(out, "Added {} from {}.", entry.name, entry.store)?,
                None => bail!("Selected item has no name or price"),
            }
        }
        ListCommand::Remove { index } => {
            match shopping_list
                .remove_at(index)
                .context("Failed to save shopping list")?
            {
                Some(entry) => writeln!(out, "Removed {} from {}.", entry.name, entry.store)?,
                None => bail!("No entry at index {index}"),
            }
        }
        ListCommand::Clear => {
            shopping_list
                .clear()
                .context("Failed to clear shopping list")?;
            writeln!(out, "Shopping list cleared.")?;
        }
    }
    Ok(())
}
