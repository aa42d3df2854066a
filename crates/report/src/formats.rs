use super::errors::ReportError;
use super::models::{ReportEntry, ReportFormatter, ReportInfo};
use chrono::SecondsFormat;
use dirsift_config::ReportFormat;
use dirsift_utils::human_size;
use serde::Serialize;

type Result<T> = std::result::Result<T, ReportError>;

pub fn formatter_for(format: ReportFormat) -> Box<dyn ReportFormatter> {
    match format {
        ReportFormat::Plain => Box::new(PlainReport),
        ReportFormat::Json => Box::new(JsonReport),
        ReportFormat::Csv => Box::new(CsvReport),
        ReportFormat::Markdown => Box::new(MarkdownReport),
        ReportFormat::Xml => Box::new(XmlReport),
        ReportFormat::Html => Box::new(HtmlReport),
        ReportFormat::Sql => Box::new(SqlReport),
    }
}

fn timestamp(info: &ReportInfo) -> String {
    info.time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub struct PlainReport;

impl ReportFormatter for PlainReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Plain
    }

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let mut data = format!("# dirsift started {} against {}\n\n", timestamp(info), info.target);

        for entry in entries {
            data.push_str(&format!(
                "{} {:>6} {}",
                entry.status,
                human_size(entry.content_length),
                entry.url
            ));
            if let Some(redirect) = &entry.redirect {
                data.push_str(&format!("  ->  {}", redirect));
            }
            data.push('\n');
        }

        Ok(data)
    }
}

pub struct JsonReport;

#[derive(Serialize)]
struct JsonDocument<'a> {
    info: JsonInfo<'a>,
    results: &'a [ReportEntry],
}

#[derive(Serialize)]
struct JsonInfo<'a> {
    target: &'a str,
    time: String,
}

impl ReportFormatter for JsonReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let document = JsonDocument {
            info: JsonInfo {
                target: &info.target,
                time: timestamp(info),
            },
            results: entries,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

pub struct CsvReport;

impl CsvReport {
    /// Quotes when needed and defuses cells a spreadsheet would evaluate
    fn cell(value: &str) -> String {
        let value = if value.starts_with(['=', '+', '-', '@']) {
            format!("'{}", value)
        } else {
            value.to_string()
        };

        if value.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value
        }
    }
}

impl ReportFormatter for CsvReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(&self, _info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let mut data = String::from("URL,Status,Size,Content Type,Redirection\n");

        for entry in entries {
            let row = [
                Self::cell(&entry.url),
                entry.status.to_string(),
                entry.content_length.to_string(),
                Self::cell(entry.content_type.as_deref().unwrap_or("")),
                Self::cell(entry.redirect.as_deref().unwrap_or("")),
            ];
            data.push_str(&row.join(","));
            data.push('\n');
        }

        Ok(data)
    }
}

pub struct MarkdownReport;

fn markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl ReportFormatter for MarkdownReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let mut data = String::from("### Information\n");
        data.push_str(&format!("Target: {}\n", info.target));
        data.push_str(&format!("Time: {}\n\n", timestamp(info)));
        data.push_str("URL | Status | Size | Content Type | Redirection\n");
        data.push_str("----|--------|------|--------------|------------\n");

        for entry in entries {
            data.push_str(&format!(
                "{} | {} | {} | {} | {}\n",
                markdown_cell(&entry.url),
                entry.status,
                entry.content_length,
                markdown_cell(entry.content_type.as_deref().unwrap_or("")),
                markdown_cell(entry.redirect.as_deref().unwrap_or(""))
            ));
        }

        Ok(data)
    }
}

pub struct XmlReport;

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl ReportFormatter for XmlReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Xml
    }

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let mut data = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        data.push_str(&format!(
            "<dirsift target=\"{}\" time=\"{}\">\n",
            xml_escape(&info.target),
            timestamp(info)
        ));

        for entry in entries {
            data.push_str(&format!("  <target url=\"{}\">\n", xml_escape(&entry.url)));
            data.push_str(&format!("    <status>{}</status>\n", entry.status));
            data.push_str(&format!("    <contentLength>{}</contentLength>\n", entry.content_length));
            data.push_str(&format!(
                "    <contentType>{}</contentType>\n",
                xml_escape(entry.content_type.as_deref().unwrap_or(""))
            ));
            data.push_str(&format!(
                "    <redirect>{}</redirect>\n",
                xml_escape(entry.redirect.as_deref().unwrap_or(""))
            ));
            data.push_str("  </target>\n");
        }

        data.push_str("</dirsift>\n");
        Ok(data)
    }
}

pub struct HtmlReport;

impl HtmlReport {
    fn status_class(status: u16) -> &'static str {
        match status {
            200..=299 => "text-success",
            300..=399 => "text-warning",
            400..=599 => "text-danger",
            _ => "",
        }
    }
}

impl ReportFormatter for HtmlReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let target = xml_escape(&info.target);
        let mut data = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        data.push_str(&format!("<title>dirsift report for {}</title>\n", target));
        data.push_str("<style>\n");
        data.push_str("  table { border-collapse: collapse; }\n");
        data.push_str("  th, td { padding: 4px 12px; text-align: left; }\n");
        data.push_str("  .text-success { color: #198754; }\n");
        data.push_str("  .text-warning { color: #b58100; }\n");
        data.push_str("  .text-danger { color: #dc3545; }\n");
        data.push_str("</style>\n</head>\n<body>\n");
        data.push_str(&format!("<h1>{}</h1>\n", target));
        data.push_str(&format!("<p>Started {}</p>\n", timestamp(info)));
        data.push_str("<table>\n");
        data.push_str("  <tr><th>URL</th><th>Status</th><th>Size</th><th>Content Type</th><th>Redirection</th></tr>\n");

        for entry in entries {
            let url = xml_escape(&entry.url);
            data.push_str(&format!(
                "  <tr><td><a href=\"{url}\">{url}</a></td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                Self::status_class(entry.status),
                entry.status,
                human_size(entry.content_length),
                xml_escape(entry.content_type.as_deref().unwrap_or("")),
                xml_escape(entry.redirect.as_deref().unwrap_or(""))
            ));
        }

        data.push_str("</table>\n</body>\n</html>\n");
        Ok(data)
    }
}

/// Script that recreates a results table and fills it
pub struct SqlReport;

const SQL_TABLE: &str = "dirsift_results";

fn sql_text(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("'{}'", value.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

impl ReportFormatter for SqlReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Sql
    }

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String> {
        let time = sql_text(Some(&info.time.format("%Y-%m-%d %H:%M:%S").to_string()));

        let mut data = format!("-- dirsift started {} against {}\n", timestamp(info), info.target);
        data.push_str(&format!("DROP TABLE IF EXISTS \"{}\";\n", SQL_TABLE));
        data.push_str(&format!(
            "CREATE TABLE \"{}\" (\n    time TIMESTAMP,\n    url TEXT,\n    status_code INTEGER,\n    content_length INTEGER,\n    content_type TEXT,\n    redirect TEXT\n);\n",
            SQL_TABLE
        ));

        for entry in entries {
            data.push_str(&format!(
                "INSERT INTO \"{}\" (time, url, status_code, content_length, content_type, redirect) VALUES ({}, {}, {}, {}, {}, {});\n",
                SQL_TABLE,
                time,
                sql_text(Some(&entry.url)),
                entry.status,
                entry.content_length,
                sql_text(entry.content_type.as_deref()),
                sql_text(entry.redirect.as_deref())
            ));
        }

        Ok(data)
    }
}
