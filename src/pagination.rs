use crate::errors::LogError;
use crate::models::page::validate_page;
use crate::models::{LogLine, LogRecord, PageContent, PaginatedResult};
use crate::timestamp::to_epoch_millis;

/// Turn a full, oldest-first log into one page of records or a raw blob.
///
/// Raw output ignores `page`, `limit` and `reverse_order` and always joins the
/// lines in stored order. Structured output reverses first when requested,
/// then slices `[(page - 1) * limit, page * limit)`. `limit == 0` puts the
/// whole log on page 1. `pages` is never less than 1 and is computed from the
/// log length, never from the requested page.
///
/// Fails only when `page` is 0.
pub fn paginate(
    content: &[LogLine],
    page: u32,
    limit: u32,
    reverse_order: bool,
    output_raw: bool,
) -> Result<PaginatedResult, LogError> {
    validate_page(page)?;

    if output_raw {
        let text = content
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        return Ok(PaginatedResult {
            content: PageContent::Raw(text),
            pages: 1,
        });
    }

    let total = content.len();
    let (offset, take) = page_window(total, page, limit);

    let records: Vec<LogRecord> = if reverse_order {
        to_records(content.iter().rev().skip(offset).take(take))
    } else {
        to_records(content.iter().skip(offset).take(take))
    };

    Ok(PaginatedResult {
        content: PageContent::Lines(records),
        pages: total_pages(total, limit),
    })
}

/// Number of pages for `total` lines, at least 1.
pub fn total_pages(total: usize, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(limit as usize).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// `(offset, count)` of the requested page within the ordered content.
fn page_window(total: usize, page: u32, limit: u32) -> (usize, usize) {
    if limit == 0 {
        return if page == 1 { (0, total) } else { (0, 0) };
    }
    let limit = limit as usize;
    match (page as usize - 1).checked_mul(limit) {
        Some(offset) if offset < total => (offset, limit.min(total - offset)),
        _ => (0, 0),
    }
}

fn to_records<'a>(lines: impl Iterator<Item = &'a LogLine>) -> Vec<LogRecord> {
    lines
        .enumerate()
        .map(|(row, line)| LogRecord {
            row,
            line: line.text.clone(),
            timestamp: to_epoch_millis(line.timestamp.as_ref()),
        })
        .collect()
}
