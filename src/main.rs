use anyhow::Context as _;
use create_form_link::{
    Config, call_parser_fn, call_parser_fn_inspected,
    inspect::{JsonDump, TextDump},
    php::trim,
    split_invocation,
};
use std::io;

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] <form name> [option[=value] ...]");
    println!("   or: {exe} [options] '{{{{#create-form-link: form name | ... }}}}'\n");
    println!("or, use environment variables:");
    println!("    CFL_BASE_URL");
    println!("    CFL_SUBMIT_TEXT\n");
    println!("Options:");
    println!("    --config: JSON configuration file");
    println!("    --base-url: Article path prefix (default: /w/index.php/)");
    println!("    --script-path: MediaWiki script path, instead of --base-url");
    println!("    --submit-text: Default submit button label (default: Create)");
    println!("    --dump: Write render state to stderr as `json` or `text`\n");
    Err(anyhow::Error::msg(err))
}

/// Builds the configuration from a file, then environment variables, then
/// command line flags, each overriding the last.
fn load_config(args: &mut pico_args::Arguments) -> anyhow::Result<Config> {
    let mut config = if let Some(path) = args.opt_value_from_str::<_, String>("--config")? {
        Config::from_file(&path).with_context(|| format!("could not load {path}"))?
    } else {
        Config::default()
    };

    if let Ok(base_url) = std::env::var("CFL_BASE_URL") {
        config.base_url = base_url;
    }
    if let Ok(submit_text) = std::env::var("CFL_SUBMIT_TEXT") {
        config.submit_text = submit_text;
    }

    if let Some(script_path) = args.opt_value_from_str::<_, String>("--script-path")? {
        config.base_url = Config::from_script_path(&script_path, "").base_url;
    }
    if let Some(base_url) = args.opt_value_from_str("--base-url")? {
        config.base_url = base_url;
    }
    if let Some(submit_text) = args.opt_value_from_str("--submit-text")? {
        config.submit_text = submit_text;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return usage("").or(Ok(()));
    }

    let config = load_config(&mut args)?;
    let dump = args.opt_value_from_str::<_, String>("--dump")?;
    let _ = args.contains("--");
    let free = args
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow::anyhow!("argument is not valid UTF-8: {arg:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let (callee, arguments) = match free.as_slice() {
        [] => return usage("Missing form name argument"),
        [invocation] if trim(invocation).starts_with("{{") => split_invocation(invocation),
        free => ("#create-form-link", free.iter().map(String::as_str).collect()),
    };

    let output = match dump.as_deref() {
        None => call_parser_fn(&config, callee, &arguments)?,
        Some("json") => {
            call_parser_fn_inspected(&config, callee, &arguments, &mut JsonDump(io::stderr()))?
        }
        Some("text") => {
            call_parser_fn_inspected(&config, callee, &arguments, &mut TextDump(io::stderr()))?
        }
        Some(_) => return usage("Unknown --dump format"),
    };

    println!("{}", output.html);
    Ok(())
}
