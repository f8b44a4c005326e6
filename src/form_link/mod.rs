//! The `{{#create-form-link}}` parser function.
//!
//! This renders a small HTML form whose inputs are assembled by a client-side
//! script into a `Special:FormEdit/<form>/<title>` URL. Everything the script
//! needs to know is carried by hidden inputs, in document order:
//!
//! 1. The `Special:FormEdit` URL for the form.
//! 2. The category name, if `category-include-in-url` was given.
//! 3. One hidden input per separator.
//!
//! Visible elements are the optional category link, separators, text fields,
//! and the submit button.
//!
//! ```text
//! {{#create-form-link: Person
//!  | category = People=Famous people
//!  | category-include-in-url
//!  | slash
//!  | name = textfield[placeholder=Name][size=20]
//!  | submit-text = Create person
//! }}
//! ```
//!
//! Separator names only need to *start* with a separator keyword, so the same
//! separator can be used more than once (`slash1`, `slash2`).

use crate::{
    Result,
    config::Config,
    inspect::{Inspect, Snapshot},
    options::{OptionValue, Options, extract_options, extract_sub_options},
    parser_fns::{MarkerType, Output},
    php::starts_with,
};
use core::fmt::Write as _;
use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};
use std::borrow::Cow;


/// A visual separator between form elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Separator<'a> {
    /// `/`
    Slash,
    /// `:`
    Colon,
    /// A single space.
    Space,
    /// `, `
    CommaSpace,
    /// `,`
    Comma,
    /// A flag which did not match any separator keyword. The flag text itself
    /// is used as the separator, HTML-encoded for its context. Older
    /// renderers emitted it raw, so markup in an unknown flag is shown as
    /// text here instead of being interpreted.
    Literal(&'a str),
}

impl<'a> Separator<'a> {
    /// Separators in match order. `CommaSpace` must come before `Comma`
    /// because `comma` is a prefix of `commaspace`.
    const KEYWORDS: [(&'static str, Separator<'static>); 5] = [
        ("slash", Separator::Slash),
        ("colon", Separator::Colon),
        ("space", Separator::Space),
        ("commaspace", Separator::CommaSpace),
        ("comma", Separator::Comma),
    ];

    /// Finds the separator for a flag name.
    fn from_key(key: &'a str) -> Self {
        Self::KEYWORDS
            .into_iter()
            .find_map(|(keyword, separator)| starts_with(key, keyword).then_some(separator))
            .unwrap_or_else(|| {
                log::warn!("#create-form-link: unknown separator {key:?}, using it as-is");
                Separator::Literal(key)
            })
    }

    /// The HTML shown to the user.
    fn display(self) -> Cow<'a, str> {
        match self {
            Self::Slash => "/".into(),
            Self::Colon => ":".into(),
            Self::Space => "&nbsp;".into(),
            Self::CommaSpace => ",&nbsp;".into(),
            Self::Comma => ",".into(),
            Self::Literal(text) => encode_text(text),
        }
    }

    /// The text inserted into the URL, encoded for a double-quoted attribute.
    fn value(self) -> Cow<'a, str> {
        match self {
            Self::Slash => "/".into(),
            Self::Colon => ":".into(),
            Self::Space => " ".into(),
            Self::CommaSpace => ", ".into(),
            Self::Comma => ",".into(),
            Self::Literal(text) => encode_double_quoted_attribute(text),
        }
    }
}

/// A category given by the `category` option.
#[derive(Debug, Eq, PartialEq)]
struct Category<'a> {
    /// The category title, without the namespace.
    internal_name: &'a str,
    /// The text of the category link.
    readable_name: &'a str,
}

impl<'a> Category<'a> {
    /// Parses a `name` or `name=readable name` option value.
    fn new(value: &'a str) -> Self {
        let mut parts = value.split('=');
        let internal_name = parts.next().unwrap_or_default();
        let readable_name = parts.next().unwrap_or(internal_name);
        Self {
            internal_name,
            readable_name,
        }
    }
}

/// Inline styles collected from the `*-min-width` options.
#[derive(Debug, Default)]
struct Styles {
    /// The style attribute for the category link.
    category: Option<String>,
    /// The style attribute for the namespace. Nothing renders a namespace, so
    /// this is only ever reported to inspectors.
    namespace: Option<String>,
}

/// Renders `{{#create-form-link}}` forms.
#[derive(Clone, Copy, Debug)]
pub struct FormLink<'c> {
    /// Site settings.
    config: &'c Config,
}

impl<'c> FormLink<'c> {
    /// Creates a new form link renderer using the given settings.
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Renders a form link for the given form name and raw options.
    pub fn render<S: AsRef<str>>(&self, form_name: &str, arguments: &[S]) -> Result<Output> {
        self.build(form_name, arguments).map(|(output, ..)| output)
    }

    /// Renders a form link like [`Self::render`], then passes the state of the
    /// render to `inspector`.
    pub fn render_inspected<S: AsRef<str>>(
        &self,
        form_name: &str,
        arguments: &[S],
        inspector: &mut dyn Inspect,
    ) -> Result<Output> {
        let (output, arguments, styles) = self.build(form_name, arguments)?;
        inspector.inspect(&Snapshot {
            form_name,
            arguments: &arguments,
            url: &self.config.base_url,
            namespace_style: styles.namespace.as_deref(),
            html: &output.html,
        })?;
        Ok(output)
    }

    /// Renders the form, returning the output along with the options which
    /// were not consumed as settings.
    fn build<S: AsRef<str>>(
        &self,
        form_name: &str,
        arguments: &[S],
    ) -> Result<(Output, Options, Styles)> {
        let url = &self.config.base_url;
        let mut options = extract_options(arguments, '=');
        let mut styles = Styles::default();
        let mut out = String::new();

        write!(out, r#"<form class="cfl-form">"#)?;
        write_hidden(
            &mut out,
            &format!(
                "{url}Special:FormEdit/{}/",
                encode_double_quoted_attribute(form_name)
            ),
        )?;

        let category_include_in_url = options.take("category-include-in-url").is_some();

        if let Some(width) = take_value(&mut options, "category-min-width") {
            styles.category = Some(format!(r#" style="min-width: {width}""#));
        }

        if let Some(category) = take_value(&mut options, "category") {
            let Category {
                internal_name,
                readable_name,
            } = Category::new(&category);
            write!(
                out,
                r#"<a href="{url}Category:{internal_name}" class="cfl cfl-category"{}>{readable_name}</a>"#,
                styles.category.as_deref().unwrap_or_default()
            )?;
            if category_include_in_url {
                write_hidden(&mut out, internal_name)?;
            }
        }

        if let Some(width) = take_value(&mut options, "namespace-min-width") {
            styles.namespace = Some(format!(r#" style="min-width: {width}""#));
        }

        let submit_text = take_value(&mut options, "submit-text").map_or_else(
            || encode_double_quoted_attribute(&self.config.submit_text),
            Cow::Owned,
        );

        for (key, value) in &options {
            match value {
                OptionValue::Flag => {
                    let separator = Separator::from_key(key);
                    write!(
                        out,
                        r#"<span class="cfl cfl-separator">{}</span>"#,
                        separator.display()
                    )?;
                    write_hidden(&mut out, &separator.value())?;
                }
                OptionValue::Value(value) if starts_with(value, "textfield") => {
                    // Sub-option values are escaped when they are extracted
                    let value = decode_html_entities(value);
                    write!(
                        out,
                        r#"<input type="text" required class="cfl" name="{}"{}>"#,
                        encode_double_quoted_attribute(key),
                        extract_sub_options(&value)
                    )?;
                }
                OptionValue::Value(value) => {
                    log::debug!("#create-form-link: ignoring {key}={value}");
                }
            }
        }

        write!(
            out,
            r#"<input type="submit" value="{submit_text}" class="cfl-submit">"#
        )?;
        write!(out, "</form>")?;

        log::trace!("#create-form-link: {form_name:?} => {out}");

        let output = Output {
            html: out,
            no_parse: true,
            is_html: true,
            marker_type: MarkerType::Nowiki,
        };
        Ok((output, options, styles))
    }
}

/// Removes an option which requires a value. An option given as a flag has
/// the value `1`.
fn take_value(options: &mut Options, name: &str) -> Option<String> {
    match options.take(name)? {
        OptionValue::Value(value) => Some(value),
        OptionValue::Flag => {
            log::warn!("#create-form-link: option {name:?} needs a value, using 1");
            Some("1".to_string())
        }
    }
}

/// Writes a hidden input for the URL builder script. `value` must already be
/// encoded.
fn write_hidden(out: &mut String, value: &str) -> core::fmt::Result {
    write!(
        out,
        r#"<input class="cfl cfl-hidden" style="display: none;" value="{value}"></input>"#
    )
}
