//! Экспорт в Excel: минимальный пакет SpreadsheetML с одним листом.
//!
//! Все XML-части пишутся через `quick_xml::Writer`, экранирование делает он.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ExportError, ExportJob};
use crate::shared::list_view::record::CellValue;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const DOC_REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

fn render_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render(e.to_string())
}

/// Управляющие символы недопустимы в XML 1.0
fn xml_text(s: &str) -> String {
    s.chars()
        .filter(|c| (*c as u32) >= 0x20 || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Одна XML-часть пакета: декларация и дальше события подряд
struct XmlPart(Writer<Vec<u8>>);

impl XmlPart {
    fn new() -> Result<Self, ExportError> {
        let mut part = Self(Writer::new(Vec::new()));
        part.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), ExportError> {
        self.0.write_event(event).map_err(render_err)
    }

    fn open(&mut self, tag: BytesStart<'_>) -> Result<(), ExportError> {
        self.event(Event::Start(tag))
    }

    fn empty(&mut self, tag: BytesStart<'_>) -> Result<(), ExportError> {
        self.event(Event::Empty(tag))
    }

    fn text(&mut self, s: &str) -> Result<(), ExportError> {
        self.event(Event::Text(BytesText::new(&xml_text(s))))
    }

    fn close(&mut self, name: &str) -> Result<(), ExportError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn finish(self) -> Vec<u8> {
        self.0.into_inner()
    }
}

fn content_types() -> Result<Vec<u8>, ExportError> {
    let mut part = XmlPart::new()?;
    part.open(BytesStart::new("Types").with_attributes([("xmlns", CONTENT_TYPES_NS)]))?;
    for (extension, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
    ] {
        part.empty(
            BytesStart::new("Default")
                .with_attributes([("Extension", extension), ("ContentType", content_type)]),
        )?;
    }
    for (name, content_type) in [
        (
            "/xl/workbook.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        ),
        (
            "/xl/worksheets/sheet1.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
        ),
    ] {
        part.empty(
            BytesStart::new("Override")
                .with_attributes([("PartName", name), ("ContentType", content_type)]),
        )?;
    }
    part.close("Types")?;
    Ok(part.finish())
}

/// Файл связей с единственной записью `rId1`
fn relationships(kind: &str, target: &str) -> Result<Vec<u8>, ExportError> {
    let rel_type = format!("{DOC_REL_NS}/{kind}");
    let mut part = XmlPart::new()?;
    part.open(BytesStart::new("Relationships").with_attributes([("xmlns", PACKAGE_REL_NS)]))?;
    part.empty(BytesStart::new("Relationship").with_attributes([
        ("Id", "rId1"),
        ("Type", rel_type.as_str()),
        ("Target", target),
    ]))?;
    part.close("Relationships")?;
    Ok(part.finish())
}

/// Excel ограничивает имя листа 31 символом и запрещает `[]:*?/\`.
fn sheet_name(label: &str) -> String {
    let name: String = xml_text(label)
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if name.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        name
    }
}

fn workbook(label: &str) -> Result<Vec<u8>, ExportError> {
    let name = sheet_name(label);
    let mut part = XmlPart::new()?;
    part.open(
        BytesStart::new("workbook").with_attributes([("xmlns", MAIN_NS), ("xmlns:r", DOC_REL_NS)]),
    )?;
    part.open(BytesStart::new("sheets"))?;
    part.empty(BytesStart::new("sheet").with_attributes([
        ("name", name.as_str()),
        ("sheetId", "1"),
        ("r:id", "rId1"),
    ]))?;
    part.close("sheets")?;
    part.close("workbook")?;
    Ok(part.finish())
}

/// `0 -> A`, `25 -> Z`, `26 -> AA`
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

enum Cell {
    Text(String),
    Number(f64),
}

struct SheetWriter {
    part: XmlPart,
    row: usize,
}

impl SheetWriter {
    fn new() -> Result<Self, ExportError> {
        let mut part = XmlPart::new()?;
        part.open(BytesStart::new("worksheet").with_attributes([("xmlns", MAIN_NS)]))?;
        part.open(BytesStart::new("sheetData"))?;
        Ok(Self { part, row: 0 })
    }

    fn push_row(&mut self, cells: impl IntoIterator<Item = Cell>) -> Result<(), ExportError> {
        self.row += 1;
        let row = self.row.to_string();
        self.part
            .open(BytesStart::new("row").with_attributes([("r", row.as_str())]))?;
        for (i, cell) in cells.into_iter().enumerate() {
            let r = format!("{}{}", column_letter(i), self.row);
            match cell {
                Cell::Number(v) if v.is_finite() => {
                    self.part
                        .open(BytesStart::new("c").with_attributes([("r", r.as_str())]))?;
                    self.part.open(BytesStart::new("v"))?;
                    self.part.text(&v.to_string())?;
                    self.part.close("v")?;
                    self.part.close("c")?;
                }
                Cell::Number(_) => {}
                Cell::Text(s) if s.is_empty() => {}
                Cell::Text(s) => {
                    self.part.open(
                        BytesStart::new("c")
                            .with_attributes([("r", r.as_str()), ("t", "inlineStr")]),
                    )?;
                    self.part.open(BytesStart::new("is"))?;
                    self.part
                        .open(BytesStart::new("t").with_attributes([("xml:space", "preserve")]))?;
                    self.part.text(&s)?;
                    self.part.close("t")?;
                    self.part.close("is")?;
                    self.part.close("c")?;
                }
            }
        }
        self.part.close("row")
    }

    fn skip_row(&mut self) {
        self.row += 1;
    }

    fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        self.part.close("sheetData")?;
        self.part.close("worksheet")?;
        Ok(self.part.finish())
    }
}

fn sheet_xml(job: &ExportJob) -> Result<Vec<u8>, ExportError> {
    let mut sheet = SheetWriter::new()?;
    for line in job.metadata_lines() {
        sheet.push_row([Cell::Text(line)])?;
    }
    sheet.skip_row();

    sheet.push_row(job.header_row().into_iter().map(Cell::Text))?;
    for record in &job.records {
        sheet.push_row(job.columns.iter().map(|c| match record.cell(c.accessor) {
            Some(value @ (CellValue::Number(_) | CellValue::RowNumber(_))) => {
                Cell::Number(value.numeric().unwrap_or_default())
            }
            _ => Cell::Text(record.display(c.accessor)),
        }))?;
    }
    if let Some(totals) = job.totals() {
        let mut labelled = false;
        sheet.push_row(totals.into_iter().map(|t| match t {
            Some(v) => Cell::Number(v),
            None if !labelled => {
                labelled = true;
                Cell::Text("Total".to_string())
            }
            None => Cell::Text(String::new()),
        }))?;
    }
    sheet.finish()
}

pub fn render(job: &ExportJob) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts: [(&str, Vec<u8>); 5] = [
        ("[Content_Types].xml", content_types()?),
        ("_rels/.rels", relationships("officeDocument", "xl/workbook.xml")?),
        ("xl/workbook.xml", workbook(&job.entity_label)?),
        ("xl/_rels/workbook.xml.rels", relationships("worksheet", "worksheets/sheet1.xml")?),
        ("xl/worksheets/sheet1.xml", sheet_xml(job)?),
    ];
    for (name, content) in parts {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name, options).map_err(render_err)?;
        zip.write_all(&content).map_err(render_err)?;
    }
    let cursor = zip.finish().map_err(render_err)?;
    Ok(cursor.into_inner())
}
