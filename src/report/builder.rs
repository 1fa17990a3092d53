//! Planning and retro report assembly

use super::classify::resolved_on_or_after;
use super::{classify, generate_markdown_table, TitleRenderer};
use crate::config::Templates;
use crate::error::ReportError;
use crate::tracker::{jql, IssueSource};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashSet;
use tracing::info;

/// UTC midnight at the start of `date`
pub fn cutoff(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Active work: in review, in progress and triaged sections plus a tally
pub async fn planning_report<S>(
    source: &mut S,
    titles: &TitleRenderer,
    templates: &Templates,
) -> Result<String, ReportError>
where
    S: IssueSource + ?Sized,
{
    let result = classify(source, titles, &jql::active_objectives(), None).await?;

    let (n_review, review_md) = generate_markdown_table(&result.in_review);
    let (n_progress, progress_md) = generate_markdown_table(&result.in_progress);
    let (n_triaged, triaged_md) = generate_markdown_table(&result.triaged);
    let total = n_review + n_progress + n_triaged;

    info!(
        "Planning: {} in review, {} in progress, {} triaged",
        n_review, n_progress, n_triaged
    );

    let mut out = String::new();
    push_block(&mut out, &templates.intro);
    for (header, md) in [
        (&templates.in_review, review_md),
        (&templates.in_progress, progress_md),
        (&templates.triaged, triaged_md),
    ] {
        push_block(&mut out, header);
        push_block(&mut out, &md);
    }
    out.push_str(&format!(
        "{} in review + {} in progress + {} triaged = {} issues\n",
        n_review, n_progress, n_triaged, total
    ));

    Ok(out)
}

/// Work completed since `since`: the done bucket from the objective tree, then
/// anything resolved in the project that the tree did not cover
pub async fn retro_report<S>(
    source: &mut S,
    titles: &TitleRenderer,
    project: &str,
    since: NaiveDate,
) -> Result<String, ReportError>
where
    S: IssueSource + ?Sized,
{
    let done_since = Some(cutoff(since));
    let result = classify(source, titles, &jql::active_objectives(), done_since).await?;
    let (n_done, done_md) = generate_markdown_table(&result.done);

    let seen: HashSet<&str> = result.visited.iter().map(|i| i.key.as_str()).collect();
    let resolved = source.search(&jql::resolved_since(project, since)).await?;

    // The tracker compares dates in the user's time zone; the cutoff is UTC
    let mut extras = Vec::new();
    for issue in resolved
        .iter()
        .filter(|i| !seen.contains(i.key.as_str()))
        .filter(|i| resolved_on_or_after(i, done_since))
    {
        extras.push(titles.render(issue)?);
    }

    info!(
        "Retro: {} done under objectives, {} done elsewhere",
        n_done,
        extras.len()
    );

    let mut out = String::new();
    push_block(&mut out, &done_md);
    if !extras.is_empty() {
        out.push_str("Outside of objectives:\n");
        for title in &extras {
            out.push_str(&format!("- {}\n", title));
        }
        out.push('\n');
    }
    out.push_str(&format!("Done: {} issues\n", n_done + extras.len()));

    Ok(out)
}

/// Append a block of text followed by one blank line
fn push_block(out: &mut String, text: &str) {
    out.push_str(text.trim_end());
    out.push_str("\n\n");
}
