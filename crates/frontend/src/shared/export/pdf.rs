//! Экспорт в PDF.
//!
//! Документ собирается через `pdf-writer`: один встроенный моноширинный
//! шрифт (Courier), колонки выровнены пробелами. Альбомный A4, строка
//! заголовков повторяется на каждой странице.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::ExportJob;

const FONT: &[u8] = b"F1";
const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;
const MARGIN: f32 = 36.0;
const FONT_SIZE: f32 = 8.0;
const TITLE_SIZE: f32 = 12.0;
const LEADING: f32 = 11.0;
/// Ширина символа Courier 600/1000 em.
const CHAR_WIDTH: f32 = FONT_SIZE * 0.6;
const MAX_COLUMN_CHARS: usize = 40;
const MIN_COLUMN_CHARS: usize = 4;

fn line_chars() -> usize {
    ((PAGE_WIDTH - 2.0 * MARGIN) / CHAR_WIDTH) as usize
}

fn lines_per_page() -> usize {
    // одна строка под колонтитул
    ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING) as usize - 1
}

/// Ширина колонок в символах, ужатая до ширины страницы.
fn column_widths(header: &[String], rows: &[Vec<String>], totals: Option<&Vec<String>>) -> Vec<usize> {
    let mut widths: Vec<usize> = header
        .iter()
        .map(|h| h.chars().count().clamp(MIN_COLUMN_CHARS, MAX_COLUMN_CHARS))
        .collect();
    for row in rows.iter().chain(totals) {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count().min(MAX_COLUMN_CHARS));
        }
    }

    let available = line_chars();
    let gaps = widths.len().saturating_sub(1) * 2;
    let total: usize = widths.iter().sum::<usize>() + gaps;
    if total > available && !widths.is_empty() {
        let budget = available.saturating_sub(gaps).max(widths.len() * MIN_COLUMN_CHARS);
        let sum: usize = widths.iter().sum();
        for w in widths.iter_mut() {
            *w = (*w * budget / sum).max(MIN_COLUMN_CHARS);
        }
    }
    widths
}

fn fit(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len <= width {
        format!("{cell:<width$}")
    } else {
        let mut s: String = cell.chars().take(width.saturating_sub(1)).collect();
        s.push('~');
        s
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| fit(c, *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Байты WinAnsi для встроенного шрифта; символы вне Latin-1 заменяются на `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            _ => b'?',
        })
        .collect()
}

enum Line {
    Title(String),
    Text(String),
}

/// Разбивка документа на страницы строк.
fn paginate(job: &ExportJob) -> Vec<Vec<Line>> {
    let header = job.header_row();
    let rows = job.body_rows();
    let totals = job.totals_row();
    let widths = column_widths(&header, &rows, totals.as_ref());

    let header_line = format_line(&header, &widths);
    let rule = "-".repeat(header_line.chars().count().max(1));
    let per_page = lines_per_page();

    let mut pages: Vec<Vec<Line>> = Vec::new();
    let mut page = vec![Line::Title(job.title())];
    page.extend(job.metadata_lines().into_iter().skip(1).map(Line::Text));
    page.push(Line::Text(String::new()));
    page.push(Line::Text(header_line.clone()));
    page.push(Line::Text(rule.clone()));

    let mut body: Vec<String> = rows.iter().map(|r| format_line(r, &widths)).collect();
    if let Some(t) = &totals {
        body.push(rule.clone());
        body.push(format_line(t, &widths));
    }

    for line in body {
        if page.len() >= per_page {
            pages.push(std::mem::take(&mut page));
            page.push(Line::Text(header_line.clone()));
            page.push(Line::Text(rule.clone()));
        }
        page.push(Line::Text(line));
    }
    pages.push(page);
    pages
}

fn content_stream(lines: &[Line], page_no: usize, page_count: usize) -> Vec<u8> {
    let mut content = Content::new();
    content.begin_text();
    content.set_font(Name(FONT), FONT_SIZE);
    content.next_line(MARGIN, PAGE_HEIGHT - MARGIN - FONT_SIZE);
    for line in lines {
        match line {
            Line::Title(t) => {
                content.set_font(Name(FONT), TITLE_SIZE);
                content.show(Str(&win_ansi(t)));
                content.set_font(Name(FONT), FONT_SIZE);
            }
            Line::Text(t) => {
                content.show(Str(&win_ansi(t)));
            }
        }
        content.next_line(0.0, -LEADING);
    }
    content.end_text();

    content.begin_text();
    content.set_font(Name(FONT), FONT_SIZE);
    content.next_line(PAGE_WIDTH - MARGIN - 80.0, MARGIN / 2.0);
    content.show(Str(format!("Page {page_no} / {page_count}").as_bytes()));
    content.end_text();
    content.finish()
}

pub fn render(job: &ExportJob) -> Vec<u8> {
    let pages = paginate(job);

    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    // пары (page, content) идут после общих объектов
    let page_ids: Vec<(Ref, Ref)> = (0..pages.len() as i32)
        .map(|i| (Ref::new(4 + i * 2), Ref::new(5 + i * 2)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(pages.len() as i32);
    pdf.type1_font(font_id)
        .base_font(Name(b"Courier"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (i, (lines, (page_id, content_id))) in pages.iter().zip(&page_ids).enumerate() {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(tree_id);
        page.contents(*content_id);
        page.resources().fonts().pair(Name(FONT), font_id);
        page.finish();

        pdf.stream(*content_id, &content_stream(lines, i + 1, pages.len()));
    }
    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::tests::sample_job;
    use crate::shared::list_view::record::map_rows;
    use crate::shared::list_view::record::tests::{ctx, Item, ITEM_COLUMNS};

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn page_count(out: &str) -> usize {
        out.matches("/Type /Page").count() - out.matches("/Type /Pages").count()
    }

    #[test]
    fn test_pdf_structure() {
        let out = text(&render(&sample_job()));
        assert!(out.starts_with("%PDF-"));
        assert!(out.trim_end().ends_with("%%EOF"));
        assert!(out.contains("/BaseFont /Courier"));
        assert!(out.contains("/Count 1"));
        assert_eq!(page_count(&out), 1);
        assert!(out.contains("(Items - Toko Maju)"));
        assert!(out.contains("(Search: ko)"));
    }

    #[test]
    fn test_large_job_spans_pages_with_repeated_header() {
        let mut job = sample_job();
        let items: Vec<Item> = (1..=200).map(|i| Item::named(i, "row")).collect();
        job.records = map_rows(&items, ITEM_COLUMNS, &ctx(1, 200));
        let out = text(&render(&job));

        let pages = page_count(&out);
        assert!(pages > 1);
        assert!(out.contains(&format!("/Count {pages}")));
        assert_eq!(out.matches("(No ").count(), pages);
        assert!(out.contains(&format!("(Page {pages} / {pages})")));
    }

    #[test]
    fn test_win_ansi_text() {
        assert_eq!(win_ansi("a(b)"), b"a(b)".to_vec());
        assert_eq!(win_ansi("Kopi ×2"), b"Kopi \xD72".to_vec());
        assert_eq!(win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_fit_truncates_long_cells() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd~");
    }
}
