//! Command execution

use crate::cli::{AdminCommand, Command, EditArgs};
use crate::render;
use anyhow::{Context, Result, bail};
use catalog_client::{AdminPanel, CatalogClient, ClientConfig, Route};
use std::io::{BufRead, Write};

const LOGIN_HINT: &str = "Sesión no válida. Ejecuta `catalog admin login --user <usuario> --pass <clave>`.";

pub async fn run(command: Command, config: &ClientConfig, json: bool) -> Result<()> {
    let client = CatalogClient::from_config(config)?;
    tracing::debug!(collection = %config.collection, api = %config.base_url, "client ready");

    match command {
        Command::List { q, filters } => list(&client, q, filters, json).await,
        Command::Show { id, zoom_in } => show(&client, config, &id, zoom_in, json).await,
        Command::Options => options(&client).await,
        Command::Admin { command } => admin(&client, command, json).await,
    }
}

async fn list(client: &CatalogClient, q: Option<String>, filters: Vec<(String, String)>, json: bool) -> Result<()> {
    let mut page = client.catalog_page();
    page.load().await;
    if let Some(q) = q {
        page.set_query(q);
    }
    for (key, value) in filters {
        if !page.filters().iter().any(|(k, _)| k == key) {
            tracing::warn!(key = %key, "unknown filter key");
        }
        page.set_filter(key, value);
    }

    let items = page.filtered();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    print!("{}", render::item_lines(&items, &client.schema, &client.images));
    println!("{}", render::result_summary(items.len(), page.items().len()));
    Ok(())
}

async fn show(client: &CatalogClient, config: &ClientConfig, id: &str, zoom_in: u32, json: bool) -> Result<()> {
    let mut page = client.detail_page(id).await;
    let Some(item) = page.item() else {
        bail!("No encontrado: {}", id);
    };
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
        return Ok(());
    }

    if zoom_in > 0 && page.open_zoom() {
        for _ in 0..zoom_in {
            page.zoom_mut().zoom_in();
        }
    }
    print!("{}", render::detail(&page, &client.schema, &client.images, config));
    Ok(())
}

async fn options(client: &CatalogClient) -> Result<()> {
    let mut page = client.catalog_page();
    page.load().await;
    for (spec, choices) in page.all_options() {
        println!("{}", render::filter_choices(spec, &choices));
    }
    Ok(())
}

/// Surface the panel's last error; auth failures get a login hint
fn check(panel: &AdminPanel, ok: bool) -> Result<()> {
    if ok {
        return Ok(());
    }
    let message = panel.error().unwrap_or("Error").to_string();
    if panel.route() == &Route::Login {
        bail!("{}\n{}", message, LOGIN_HINT);
    }
    bail!("{}", message)
}

/// Ask on the terminal; anything but y/s counts as no
fn prompt(message: &str) -> bool {
    print!("{} [s/N] ", message);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
}

fn apply_edits(panel: &mut AdminPanel, edit: EditArgs) -> Result<()> {
    let schema = panel.schema().clone();
    let form = panel.form_mut();
    for (key, value) in edit.fields {
        form.set_checked(&schema, &key, value)
            .with_context(|| format!("campos válidos: {}", field_keys(&schema)))?;
    }
    for path in &edit.remove_photos {
        form.remove_photo(path);
    }
    form.add_uploaded(edit.photos);
    if let Some(primary) = edit.primary {
        form.set_primary(primary);
    }
    Ok(())
}

fn field_keys(schema: &shared::CatalogSchema) -> String {
    schema
        .fields
        .iter()
        .map(|f| f.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn admin(client: &CatalogClient, command: AdminCommand, json: bool) -> Result<()> {
    let mut panel = client.admin_panel();

    match command {
        AdminCommand::Login { user, pass } => {
            let ok = panel.login(&user, &pass).await;
            check(&panel, ok)?;
            println!("Sesión iniciada ({} elementos)", panel.items().len());
        }
        AdminCommand::Logout => {
            panel.logout();
            if let Some(error) = panel.error() {
                bail!("{}", error);
            }
            println!("Sesión cerrada");
        }
        AdminCommand::List => {
            let ok = panel.load().await;
            check(&panel, ok)?;
            if json {
                println!("{}", serde_json::to_string_pretty(panel.items())?);
            } else {
                let items: Vec<_> = panel.items().iter().collect();
                print!("{}", render::item_lines(&items, &client.schema, &client.images));
            }
        }
        AdminCommand::Delete { id, yes } => {
            let ok = panel.load().await;
            check(&panel, ok)?;
            let mut confirm = |message: &str| yes || prompt(message);
            let deleted = panel.delete(&id, &mut confirm).await;
            if !deleted && panel.error().is_none() {
                println!("Cancelado");
                return Ok(());
            }
            check(&panel, deleted)?;
            println!("Eliminado ({} restantes)", panel.items().len());
        }
        AdminCommand::Create(edit) => {
            panel.new_item();
            apply_edits(&mut panel, edit)?;
            let ok = panel.save().await;
            check(&panel, ok)?;
            println!("Creado ({} elementos)", panel.items().len());
        }
        AdminCommand::Update { id, edit } => {
            let ok = panel.edit(&id).await;
            check(&panel, ok)?;
            apply_edits(&mut panel, edit)?;
            let ok = panel.save().await;
            check(&panel, ok)?;
            println!("Actualizado");
        }
        AdminCommand::Upload { files } => {
            let paths = client
                .admin
                .upload_paths(&files)
                .await
                .map_err(|e| {
                    if e.is_auth_failure() {
                        anyhow::anyhow!("{}\n{}", e.user_message(), LOGIN_HINT)
                    } else {
                        anyhow::anyhow!("{}", e.user_message())
                    }
                })?;
            for path in paths {
                println!("{}", path);
            }
        }
    }
    Ok(())
}
