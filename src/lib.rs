//! The `{{#create-form-link}}` parser function for MediaWiki-style wikis.
//!
//! Given a form name and a list of `name=value` or bare flag options, this
//! renders an HTML form which sends the user to the `Special:FormEdit` page
//! for that form, with the new page title assembled from the form inputs.
//!
//! ```
//! use create_form_link::{Config, call_parser_fn, split_invocation};
//!
//! let config = Config::new("/wiki/", "Create");
//! let (callee, arguments) = split_invocation("{{#create-form-link: Person | slash }}");
//! let output = call_parser_fn(&config, callee, &arguments).unwrap();
//! assert!(output.html.starts_with(r#"<form class="cfl-form">"#));
//! ```

pub use config::Config;
pub use form_link::FormLink;
pub use parser_fns::{
    MarkerType, Output, call_parser_fn, call_parser_fn_inspected, split_invocation,
};

pub mod config;
mod form_link;
pub mod inspect;
pub mod options;
mod parser_fns;
pub mod php;

/// A parser function error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A write to a buffer failed.
    #[error("fmt error: {0}")]
    Fmt(#[from] core::fmt::Error),

    /// A diagnostic hook failed to write its output.
    #[error("inspector error: {0}")]
    Inspect(#[from] std::io::Error),

    /// A parser function was called with fewer positional arguments than it
    /// requires.
    #[error("{callee}: expected at least {min} argument(s), got {got}")]
    TooFewArguments {
        /// The name of the parser function.
        callee: String,
        /// The minimum number of arguments.
        min: usize,
        /// The number of arguments given.
        got: usize,
    },

    /// No parser function is registered with the given name.
    #[error("unknown parser function: {0}")]
    UnknownFunction(String),
}

/// The standard result type used by all fallible parser functions.
pub type Result<T = (), E = Error> = core::result::Result<T, E>;
