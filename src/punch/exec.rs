use crate::cli::CommonArgs;
use crate::error::{PunchError, Result};
use crate::git::{CommitSource, GitRepo};
use crate::model::{DateRange, IdentitySource};
use crate::render::{render, save_png};
use anyhow::Context;
use console::style;
use std::path::PathBuf;

use super::{output_json, output_ndjson, output_punchcard, try_aggregate, Aggregation};

/// Runs one aggregation pass over everything `source` yields for `range`.
pub fn build_aggregation<S>(source: &S, range: &DateRange, identity: IdentitySource) -> Result<Aggregation>
where
    S: CommitSource + ?Sized,
{
    try_aggregate(source.commits(range, identity)?)
}

fn open_repo(common: &CommonArgs) -> anyhow::Result<GitRepo> {
    if let Some(path) = &common.repo {
        if !GitRepo::is_valid_repository(path) {
            return Err(PunchError::NotARepository(path.display().to_string()).into());
        }
    }
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    Ok(repo.with_progress(!common.no_progress))
}

fn load(common: &CommonArgs) -> anyhow::Result<(GitRepo, Aggregation)> {
    let repo = open_repo(common)?;

    let range = repo
        .resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let aggregation = build_aggregation(&repo, &range, common.identity)
        .context("Failed to read commit history")?;

    Ok((repo, aggregation))
}

pub fn exec_render(common: CommonArgs, output: PathBuf) -> anyhow::Result<()> {
    let (_repo, aggregation) = load(&common)?;
    let commits = aggregation.total_commits();
    let model = aggregation.into_render_model();

    if model.is_empty() {
        println!("No commits to render");
        return Ok(());
    }

    let image = render(&model).context("Failed to render punch card")?;
    let written = save_png(&image, &output).context("Failed to write PNG")?;

    println!(
        "{} {} ({} authors, {} commits, {}x{})",
        style("Wrote").green().bold(),
        written.display(),
        model.len(),
        commits,
        image.width(),
        image.height()
    );
    Ok(())
}

pub fn exec_stats(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let (repo, aggregation) = load(&common)?;
    let model = aggregation.into_render_model();

    if json {
        output_json(&model, &repo, &common)?;
    } else if ndjson {
        output_ndjson(&model)?;
    } else {
        output_punchcard(&model)?;
    }

    Ok(())
}
