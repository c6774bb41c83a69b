use scraper::{ElementRef, Html, Selector};

use crate::error::PageError;
use crate::models::{Listing, RawRow};

const TABLE: &str = "#list";
const HEADING: &str = "h1";
const HEADER_ROW: &str = "thead tr";
const BODY_ROWS: &str = "tbody tr";
const ROW_LINK: &str = "td a";

const INDEX_PREFIX: &str = "Index of ";
const FILES_PREFIX: &str = "/files/";

fn selector(css: &'static str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|e| PageError::Selector(css, format!("{:?}", e)))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Read a listing page. Fails without partial results when the table, the
/// `Index of /files/...` heading or the table header row is missing.
pub fn parse_listing(html: &str) -> Result<Listing, PageError> {
    let document = Html::parse_document(html);

    let table = document
        .select(&selector(TABLE)?)
        .next()
        .ok_or(PageError::MissingTable)?;

    let base_path = document
        .select(&selector(HEADING)?)
        .map(text_of)
        .find(|text| text.starts_with(&format!("{}{}", INDEX_PREFIX, FILES_PREFIX)))
        .map(|text| text[INDEX_PREFIX.len()..].to_string())
        .ok_or(PageError::MissingHeading)?;

    if table.select(&selector(HEADER_ROW)?).next().is_none() {
        return Err(PageError::MissingHeaderRow);
    }

    let link_selector = selector(ROW_LINK)?;
    let rows: Vec<RawRow> = table
        .select(&selector(BODY_ROWS)?)
        .map(|row| raw_row(row, &link_selector))
        .collect();

    tracing::info!("Read listing {} with {} rows", base_path, rows.len());

    Ok(Listing { base_path, rows })
}

fn is_cell(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "td" | "th")
}

fn raw_row(row: ElementRef<'_>, link_selector: &Selector) -> RawRow {
    let Some(link) = row.select(link_selector).next() else {
        return RawRow::default();
    };

    let cell = link
        .parent()
        .and_then(ElementRef::wrap)
        .filter(is_cell);

    let size_text = cell
        .and_then(|cell| cell.next_siblings().find_map(ElementRef::wrap))
        .filter(is_cell)
        .map(text_of);

    RawRow {
        link_text: Some(text_of(link)),
        link_in_cell: cell.is_some(),
        size_text,
    }
}
