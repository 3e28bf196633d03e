//! repo command - List repositories

use anyhow::{Context as _, Result};

use crate::client::{LakeFsApi, ListOptions};
use crate::cli::Session;
use crate::core::config::OutputFormat;
use crate::model::RepositoryList;
use crate::ui::output::{self, Output};

/// List one page of repositories.
pub fn list(session: &Session, after: Option<String>, amount: Option<u32>) -> Result<()> {
    let config = session.load_config()?;
    let client = session.client(&config)?;
    let out = session.output(&config);

    let options = ListOptions { after, amount };
    let rt = tokio::runtime::Runtime::new()?;
    let rendered = rt.block_on(list_async(&client, &out, options))?;
    out.result(rendered);
    Ok(())
}

/// Fetch a page and render it for `out`.
pub async fn list_async(api: &dyn LakeFsApi, out: &Output, options: ListOptions) -> Result<String> {
    let page = api
        .list_repositories(options)
        .await
        .context("Failed to list repositories")?;
    render(&page, out)
}

fn render(page: &RepositoryList, out: &Output) -> Result<String> {
    match out.format {
        OutputFormat::Json | OutputFormat::Yaml => return Ok(out.render_model(page)?),
        OutputFormat::Text | OutputFormat::Table => {}
    }

    let repositories = page.repositories();
    if repositories.is_empty() && out.is_text() {
        return Ok("No repositories.".to_string());
    }

    let rows: Vec<Vec<String>> = repositories
        .iter()
        .map(|repo| {
            vec![
                repo.id().unwrap_or_default().to_string(),
                repo.default_branch().unwrap_or_default().to_string(),
                repo.created_at()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
                repo.storage_namespace().unwrap_or_default().to_string(),
            ]
        })
        .collect();
    let mut text = output::format_table(
        &["ID", "DEFAULT BRANCH", "CREATED", "STORAGE NAMESPACE"],
        &rows,
    );

    let cursor = page.pagination.as_ref().and_then(|p| p.next_cursor());
    if let Some(cursor) = cursor.filter(|_| out.is_text()) {
        text.push_str(&format!("\n\nMore results: lctl repo list --after {}", cursor));
    }
    Ok(text)
}
