//! Parser function dispatch.

use crate::{
    Error, Result,
    config::Config,
    form_link::FormLink,
    inspect::Inspect,
    php::{ends_with, starts_with, trim},
};

/// The function signature of a parser function. The inspector, if any, receives
/// the state of the call once it is done.
type ParserFn = fn(&Config, &[&str], Option<&mut dyn Inspect>) -> Result<Output>;

/// How the host should store the output of a parser function until the end of
/// the parse.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MarkerType {
    /// The output is not stripped.
    #[default]
    General,
    /// The output is stripped like `<nowiki>` content, so it is not touched
    /// by any later Wikitext processing.
    Nowiki,
}

/// The result of a parser function call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Output {
    /// The generated text.
    pub html: String,
    /// If true, the text must not be parsed again as Wikitext.
    pub no_parse: bool,
    /// If true, the text is raw HTML.
    pub is_html: bool,
    /// The kind of strip marker to use for the text.
    pub marker_type: MarkerType,
}

/// `{{#create-form-link: form name [| option [= value] ...] }}`
fn create_form_link(
    config: &Config,
    arguments: &[&str],
    inspector: Option<&mut dyn Inspect>,
) -> Result<Output> {
    let [form_name, options @ ..] = arguments else {
        return Err(Error::TooFewArguments {
            callee: "#create-form-link".into(),
            min: 1,
            got: arguments.len(),
        });
    };

    let form_link = FormLink::new(config);
    match inspector {
        Some(inspector) => form_link.render_inspected(form_name, options, inspector),
        None => form_link.render(form_name, options),
    }
}

/// Known parser functions.
static PARSER_FUNCTIONS: phf::Map<&'static str, ParserFn> = phf::phf_map! {
    "#create-form-link" => create_form_link,
    "create-form-link" => create_form_link,
};

/// Calls a parser function.
///
/// Parser functions registered without object arguments receive all of
/// their arguments trimmed, so that happens here before the call.
pub fn call_parser_fn<S: AsRef<str>>(
    config: &Config,
    callee: &str,
    arguments: &[S],
) -> Result<Output> {
    call(config, callee, arguments, None)
}

/// Calls a parser function like [`call_parser_fn`], then passes the state of
/// the call to `inspector`.
pub fn call_parser_fn_inspected<S: AsRef<str>>(
    config: &Config,
    callee: &str,
    arguments: &[S],
    inspector: &mut dyn Inspect,
) -> Result<Output> {
    call(config, callee, arguments, Some(inspector))
}

fn call<S: AsRef<str>>(
    config: &Config,
    callee: &str,
    arguments: &[S],
    inspector: Option<&mut dyn Inspect>,
) -> Result<Output> {
    let callee = trim(callee).to_ascii_lowercase();
    let Some(parser_fn) = PARSER_FUNCTIONS.get(callee.as_str()) else {
        return Err(Error::UnknownFunction(callee));
    };

    let arguments = arguments
        .iter()
        .map(|arg| trim(arg.as_ref()))
        .collect::<Vec<_>>();
    log::trace!("{callee}({arguments:?})");
    parser_fn(config, &arguments, inspector)
}

/// Splits a parser function call like `{{#name: a | b }}` into its callee and
/// raw arguments. The enclosing braces are optional.
///
/// This is a plain split on `:` and `|`, so it does not understand nested
/// templates, links, or tags.
pub fn split_invocation(text: &str) -> (&str, Vec<&str>) {
    let text = trim(text);
    let text = if starts_with(text, "{{") && ends_with(text, "}}") {
        &text[2..text.len() - 2]
    } else {
        text
    };

    match text.split_once(':') {
        Some((callee, arguments)) => (callee, arguments.split('|').collect()),
        None => (text, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{JsonDump, TextDump};

    fn config() -> Config {
        Config::new("/wiki/", "Create")
    }

    #[test]
    fn split() {
        assert_eq!(
            split_invocation("{{#create-form-link:Foo|slash| name = textfield}}"),
            ("#create-form-link", vec!["Foo", "slash", " name = textfield"])
        );
        assert_eq!(
            split_invocation("  #create-form-link: Foo  "),
            ("#create-form-link", vec![" Foo"])
        );
        assert_eq!(
            split_invocation("{{#create-form-link}}"),
            ("#create-form-link", vec![])
        );
        assert_eq!(
            split_invocation("{{#create-form-link:}}"),
            ("#create-form-link", vec![""])
        );
        assert_eq!(split_invocation("{{}}"), ("", vec![]));
    }

    #[test]
    fn dispatch() {
        let output = call_parser_fn(&config(), "#CREATE-FORM-LINK ", &[" Foo ", " commaspace "])
            .unwrap();
        assert!(output.no_parse);
        assert!(output.is_html);
        assert_eq!(output.marker_type, MarkerType::Nowiki);
        assert!(
            output.html.contains(r#"value="/wiki/Special:FormEdit/Foo/""#),
            "form name should be trimmed"
        );
        assert!(
            output
                .html
                .contains(r#"<span class="cfl cfl-separator">,&nbsp;</span>"#),
            "flags should be trimmed before matching separators"
        );
    }

    #[test]
    fn dispatch_inspected() {
        let mut dump = JsonDump(Vec::new());
        let output = call_parser_fn_inspected(
            &config(),
            " #Create-Form-Link",
            &[" Foo ", " slash ", " x = dropdown "],
            &mut dump,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&dump.0).unwrap();
        assert_eq!(value["formName"], "Foo");
        assert_eq!(value["html"], output.html.as_str());
        assert_eq!(
            value["arguments"],
            serde_json::json!({ "slash": true, "x": "dropdown" }),
            "arguments should be trimmed before the inspector sees them"
        );
        let plain =
            call_parser_fn(&config(), "#create-form-link", &["Foo", "slash", "x=dropdown"]);
        assert_eq!(output, plain.unwrap());
    }

    #[test]
    fn inspected_unknown_function() {
        let mut dump = TextDump(Vec::new());
        let err = call_parser_fn_inspected(&config(), "#if", &["a"], &mut dump).unwrap_err();
        assert!(matches!(err, Error::UnknownFunction(_)));
        assert!(dump.0.is_empty());
    }

    #[test]
    fn empty_form_name() {
        let output = call_parser_fn(&config(), "#create-form-link", &[""]).unwrap();
        assert!(output.html.contains(r#"value="/wiki/Special:FormEdit//""#));
    }

    #[test]
    fn too_few_arguments() {
        let err = call_parser_fn::<&str>(&config(), "#create-form-link", &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::TooFewArguments { min: 1, got: 0, .. }
        ));
        assert_eq!(
            err.to_string(),
            "#create-form-link: expected at least 1 argument(s), got 0"
        );
    }

    #[test]
    fn unknown_function() {
        let err = call_parser_fn(&config(), "#if", &["a", "b"]).unwrap_err();
        assert!(matches!(err, Error::UnknownFunction(name) if name == "#if"));
    }
}
