//! Diagnostic hooks for inspecting a form link render.
//!
//! These only run when a caller asks for them with
//! [`FormLink::render_inspected`](crate::FormLink::render_inspected) or
//! [`call_parser_fn_inspected`](crate::call_parser_fn_inspected).

use crate::options::Options;
use serde::Serialize;
use std::io;

/// The state of a form link render after the HTML has been generated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    /// The form name.
    pub form_name: &'a str,
    /// Options left over after the recognised ones were consumed.
    pub arguments: &'a Options,
    /// The article path prefix.
    pub url: &'a str,
    /// The `namespace-min-width` style, which is accepted but not rendered.
    pub namespace_style: Option<&'a str>,
    /// The rendered HTML.
    pub html: &'a str,
}

/// Receives a [`Snapshot`] of a render.
pub trait Inspect {
    /// Inspects the snapshot.
    fn inspect(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}

/// Writes the snapshot as pretty-printed JSON.
pub struct JsonDump<W>(pub W);

impl<W: io::Write> Inspect for JsonDump<W> {
    fn inspect(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.0, snapshot)?;
        writeln!(self.0)
    }
}

/// Writes only the rendered HTML as plain text.
pub struct TextDump<W>(pub W);

impl<W: io::Write> Inspect for TextDump<W> {
    fn inspect(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        writeln!(self.0, "{}", snapshot.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::extract_options;

    fn snapshot(arguments: &Options) -> Snapshot<'_> {
        Snapshot {
            form_name: "Person",
            arguments,
            url: "/w/index.php/",
            namespace_style: None,
            html: "<form></form>",
        }
    }

    #[test]
    fn json_dump() {
        let arguments = extract_options(["slash", "x=dropdown"], '=');
        let mut out = JsonDump(Vec::new());
        out.inspect(&snapshot(&arguments)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out.0).unwrap();
        assert_eq!(value["formName"], "Person");
        assert_eq!(value["arguments"]["slash"], true);
        assert_eq!(value["arguments"]["x"], "dropdown");
        assert_eq!(value["url"], "/w/index.php/");
        assert_eq!(value["namespaceStyle"], serde_json::Value::Null);
        assert_eq!(value["html"], "<form></form>");
    }

    #[test]
    fn text_dump() {
        let arguments = Options::default();
        let mut out = TextDump(Vec::new());
        out.inspect(&snapshot(&arguments)).unwrap();
        assert_eq!(out.0, b"<form></form>\n");
    }
}
