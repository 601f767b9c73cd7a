//! Output formatting for manifest lists.
//!
//! A format source is either a well-known key or a template:
//!
//! | source  | normal                               | quiet             |
//! |---------|--------------------------------------|-------------------|
//! | `table` | `table {{.Repository}}\t{{.Tag}}`    | `{{.Name}}`       |
//! | `raw`   | `repository: ...\ntag: ...\n`        | `name: {{.Name}}` |
//! | `json`  | `{{json .}}`                         | `{{json .}}`      |
//!
//! Anything else is used as a template. Templates starting with `table` get
//! a header row and aligned columns.

mod table;
mod template;

pub use template::Template;
pub use template::TemplateData;

use std::io::Write;

use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::ManifestError;
use crate::Reference;
use crate::Result;

/// Key selecting the default table layout.
pub const TABLE_FORMAT_KEY: &str = "table";

/// Key selecting the `key: value` layout.
pub const RAW_FORMAT_KEY: &str = "raw";

/// Key selecting one JSON object per line.
pub const JSON_FORMAT_KEY: &str = "json";

/// Default table layout.
pub const DEFAULT_TABLE_FORMAT: &str = "table {{.Repository}}\t{{.Tag}}";

/// Layout used for `table` in quiet mode.
pub const DEFAULT_QUIET_FORMAT: &str = "{{.Name}}";

const RAW_FORMAT: &str = "repository: {{.Repository}}\ntag: {{.Tag}}\n";
const RAW_QUIET_FORMAT: &str = "name: {{.Name}}";
const JSON_FORMAT: &str = "{{json .}}";

/// Placeholder for a missing tag or digest.
pub const NONE_VALUE: &str = "<none>";

const FIELD_HEADERS: [(&str, &str); 4] = [
    ("Name", "NAME"),
    ("Repository", "REPOSITORY"),
    ("Tag", "TAG"),
    ("Digest", "DIGEST"),
];

/// A resolved output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format(String);

impl Format {
    /// Maps a format key to its template; any other source is kept as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use manilist_core::Format;
    ///
    /// assert_eq!(Format::new("table", true).as_str(), "{{.Name}}");
    /// assert!(Format::new("table", false).is_table());
    /// assert_eq!(Format::new("{{.Tag}}", true).as_str(), "{{.Tag}}");
    /// ```
    pub fn new(source: &str, quiet: bool) -> Self {
        let format = match (source, quiet) {
            (TABLE_FORMAT_KEY, true) => DEFAULT_QUIET_FORMAT,
            (TABLE_FORMAT_KEY, false) => DEFAULT_TABLE_FORMAT,
            (RAW_FORMAT_KEY, true) => RAW_QUIET_FORMAT,
            (RAW_FORMAT_KEY, false) => RAW_FORMAT,
            (JSON_FORMAT_KEY, _) => JSON_FORMAT,
            (other, _) => other,
        };
        Self(format.to_string())
    }

    /// The template source.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for table formats.
    pub fn is_table(&self) -> bool {
        self.0.starts_with(TABLE_FORMAT_KEY)
    }

    /// The row template with the `table` prefix removed and literal `\t`
    /// and `\n` sequences expanded.
    fn row_template(&self) -> String {
        let source = if self.is_table() {
            let rest = self.0[TABLE_FORMAT_KEY.len()..].trim_matches(' ');
            if rest.is_empty() {
                &DEFAULT_TABLE_FORMAT[TABLE_FORMAT_KEY.len() + 1..]
            } else {
                rest
            }
        } else {
            self.0.as_str()
        };
        source.replace(r"\t", "\t").replace(r"\n", "\n")
    }
}

/// Where and how manifest lists are written.
pub struct Context<'a> {
    /// Destination of the rendered output.
    pub output: &'a mut dyn Write,
    /// Format to render with.
    pub format: Format,
}

impl<'a> Context<'a> {
    /// Creates a context writing to `output`.
    pub fn new(output: &'a mut dyn Write, format: Format) -> Self {
        Self { output, format }
    }
}

/// Template view of one manifest list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestListRow {
    /// Full reference.
    pub name: String,
    /// Repository name.
    pub repository: String,
    /// Tag or `<none>`.
    pub tag: String,
    /// Digest or `<none>`.
    pub digest: String,
}

impl From<&Reference> for ManifestListRow {
    fn from(reference: &Reference) -> Self {
        Self {
            name: reference.to_string(),
            repository: reference.name().to_string(),
            tag: reference.tag().unwrap_or(NONE_VALUE).to_string(),
            digest: reference.digest().unwrap_or(NONE_VALUE).to_string(),
        }
    }
}

impl TemplateData for ManifestListRow {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "Name" => Some(self.name.clone()),
            "Repository" => Some(self.repository.clone()),
            "Tag" => Some(self.tag.clone()),
            "Digest" => Some(self.digest.clone()),
            _ => None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ManifestError::template(e.to_string()))
    }
}

/// Header row of a table: every field renders as its column title.
struct Header;

impl TemplateData for Header {
    fn field(&self, name: &str) -> Option<String> {
        FIELD_HEADERS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, header)| (*header).to_string())
    }

    fn to_json(&self) -> Result<String> {
        let headers: serde_json::Map<String, serde_json::Value> = FIELD_HEADERS
            .iter()
            .map(|(field, header)| ((*field).to_string(), (*header).into()))
            .collect();
        serde_json::to_string(&headers).map_err(|e| ManifestError::template(e.to_string()))
    }
}

/// Renders `references` in order and writes them to the context output.
///
/// Everything is rendered before the first byte is written, so template
/// errors leave the output untouched.
///
/// # Errors
///
/// Returns [`ManifestError::Template`] for template parse or execution
/// failures and [`ManifestError::Write`] if the output cannot be written.
pub fn write_manifest_lists(ctx: Context<'_>, references: &[Reference]) -> Result<()> {
    let is_table = ctx.format.is_table();
    let template = Template::parse(&ctx.format.row_template())?;
    debug!(
        format = ctx.format.as_str(),
        table = is_table,
        rows = references.len(),
        "rendering manifest lists"
    );

    let mut lines = Vec::with_capacity(references.len() + 1);
    if is_table {
        lines.push(template.execute(&Header)?);
    }
    for reference in references {
        trace!(reference = %reference, "rendering row");
        lines.push(template.execute(&ManifestListRow::from(reference))?);
    }

    let rendered = if is_table {
        table::align(&lines)
    } else {
        lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    };

    ctx.output
        .write_all(rendered.as_bytes())
        .map_err(ManifestError::Write)?;
    ctx.output.flush().map_err(ManifestError::Write)
}
