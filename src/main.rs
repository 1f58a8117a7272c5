//! Campus Forms - render application forms from the command line
//!
//! Prints the markup of a built-in form, optionally pre-filled from a
//! submitted-data file, so layouts can be checked without a web server.

use anyhow::{Context, Result};
use campus_forms::config::FormsConfig;
use campus_forms::forms::{parse_urlencoded, BasicAttributes, Form, FormContext, SubmittedData};
use campus_forms::workflows::password::password_form;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "campus-forms", version, about = "Render school administration forms")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, env = "CAMPUS_FORMS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a form's markup
    Render {
        #[command(subcommand)]
        form: RenderTarget,
    },
    /// Print where the config file is read from
    ConfigPath,
}

#[derive(Debug, Subcommand)]
enum RenderTarget {
    /// The change-password form from the preferences page
    Password(PasswordArgs),
}

#[derive(Debug, Args)]
struct PasswordArgs {
    /// Lay the form out as a table
    #[arg(long)]
    table: bool,

    /// Render the forced-reset variant
    #[arg(long)]
    force_reset: bool,

    /// Submitted data to load, as JSON or a url-encoded body
    #[arg(long)]
    data: Option<PathBuf>,

    /// Current step of a multi-part form (1-based)
    #[arg(long, requires = "steps")]
    step: Option<usize>,

    /// Step labels, comma separated
    #[arg(long, value_delimiter = ',', requires = "step")]
    steps: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_forms=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::ConfigPath => {
            match cli.config.or_else(FormsConfig::config_path) {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("no home directory to hold the config file"),
            }
            Ok(())
        }
        Command::Render { form } => {
            let config = load_config(cli.config.as_deref())?;
            let ctx = FormContext::from_config(&config);
            let form = match form {
                RenderTarget::Password(args) => render_password(&ctx, &config, &args)?,
            };
            println!("{}", form.output());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FormsConfig> {
    match path {
        Some(path) => FormsConfig::load_from(path),
        None => FormsConfig::load(),
    }
}

fn render_password(ctx: &FormContext, config: &FormsConfig, args: &PasswordArgs) -> Result<Form> {
    let mut form = password_form(ctx, &config.password_policy(), args.force_reset);

    if args.table {
        form.set_renderer(ctx.table_renderer())
            .set_class(ctx.table_class());
    }
    if let Some(step) = args.step {
        form.set_multi_part_form(args.steps.iter().cloned(), step)?;
    }
    if let Some(path) = &args.data {
        let data = read_submitted_data(path)?;
        tracing::info!(fields = data.len(), "loading submitted data");
        form.load_all_values_from(&data);
    }
    Ok(form)
}

/// `.json` files hold a JSON object; anything else is read as a url-encoded body
fn read_submitted_data(path: &Path) -> Result<SubmittedData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read submitted data {}", path.display()))?;
    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid submitted data {}", path.display()))
    } else {
        Ok(parse_urlencoded(content.trim()))
    }
}
