use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{AuthorReport, PunchCardOutput, RenderModel, Slot, SCHEMA_VERSION};
use crate::render::layout::{days, hours};
use crate::util::day_name;
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(model: &RenderModel, repo: &GitRepo, common: &CommonArgs) -> Result<()> {
    let authors: Vec<AuthorReport> = model.sections().iter().map(AuthorReport::from_section).collect();
    let output = PunchCardOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        identity: common.identity,
        max_count: model.max_count(),
        total_commits: authors.iter().map(|a| a.total_commits).sum(),
        authors,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(model: &RenderModel) -> Result<()> {
    for section in model.sections() {
        println!("{}", serde_json::to_string(&AuthorReport::from_section(section))?);
    }
    Ok(())
}

pub fn output_punchcard(model: &RenderModel) -> Result<()> {
    if model.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let max = model.max_count();
    let hour_header: String = hours().map(|h| format!("{h:>3}")).collect();

    for section in model.sections() {
        println!(
            "{} <{}>  {} commits",
            style(&section.identity.name).bold(),
            section.identity.email,
            section.table.total()
        );
        println!("{:<10}{}", "", style(hour_header.as_str()).dim());

        for day in days() {
            let cells: String = hours()
                .map(|hour| {
                    let count = Slot::new(day, hour).map_or(0, |slot| section.table.get(slot));
                    format!("  {}", intensity_char(count, max))
                })
                .collect();
            println!("{:<10}{}", day_name(day), style(cells).green());
        }
        println!("{}", "─".repeat(82));
    }

    println!("{}", style("Legend").bold());
    println!("  {} commits per slot, relative to the busiest slot ({max})", style("▁▃▅▇█").green());

    Ok(())
}

/// Block character for `count` on a five step scale. Non-zero counts never map to blank.
fn intensity_char(count: u32, max: u32) -> &'static str {
    if count == 0 || max == 0 {
        return " ";
    }
    let level = ((count as f64 / max as f64) * 5.0).ceil() as u32;
    match level {
        0 | 1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_scale() {
        assert_eq!(intensity_char(0, 10), " ");
        assert_eq!(intensity_char(3, 0), " ");
        assert_eq!(intensity_char(1, 100), "▁");
        assert_eq!(intensity_char(5, 10), "▅");
        assert_eq!(intensity_char(10, 10), "█");
    }
}
