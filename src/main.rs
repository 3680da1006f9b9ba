//! CLI entry point for `mailpane`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mailpane::config::Config;
use mailpane::error::ViewError;
use mailpane::i18n;
use mailpane::input::{load_attachments, LoadedAttachments};
use mailpane::links::PageLocation;
use mailpane::remote::AjaxRemote;
use mailpane::tui::app::App;
use mailpane::view::attachment::AttachmentSummary;
use mailpane::view::icon::icon_class;
use mailpane::view::two_factor::TwoFactorTestView;
use mailpane::view::{ViewContext, ViewModel};

#[derive(Parser)]
#[command(name = "mailpane", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Attachment JSON file to browse
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG", global = true)]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show derived fields of every attachment in a JSON file
    Inspect {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the icon class of MIME types
    Icon {
        #[arg(required = true)]
        mime_types: Vec<String>,
    },
    /// Print the drag-and-drop payload of an attachment
    Drag {
        path: PathBuf,
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },
    /// Browse attachments in the TUI
    Browse { path: PathBuf },
    /// Test a two-factor code
    TwoFactor {
        /// Code to test; opens the dialog when omitted
        #[arg(long)]
        code: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for (i, arg) in args.iter().enumerate() {
        let code = if arg == "--lang" {
            args.get(i + 1).map(String::as_str)
        } else {
            arg.strip_prefix("--lang=")
        };
        if let Some(lang) = code.and_then(i18n::Lang::from_code) {
            return lang;
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command().about(i18n::app_about());

    let localized: &[(&str, &str)] = &[
        ("inspect", i18n::help_cmd_inspect()),
        ("icon", i18n::help_cmd_icon()),
        ("drag", i18n::help_cmd_drag()),
        ("browse", i18n::help_cmd_browse()),
        ("two-factor", i18n::help_cmd_two_factor()),
        ("completions", i18n::help_cmd_completions()),
        ("manpage", i18n::help_cmd_manpage()),
    ];
    for &(name, about) in localized {
        cmd = cmd.mut_subcommand(name, |sub| sub.about(about));
    }
    cmd
}

fn main() -> anyhow::Result<()> {
    i18n::set_lang(detect_lang_early());

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let config = mailpane::config::load_config();
    mailpane::tui::theme::set_theme(&config.display.theme);

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let interactive = match &cli.command {
        Some(Commands::Browse { .. }) => true,
        Some(Commands::TwoFactor { code }) => code.is_none(),
        None => cli.file.is_some(),
        _ => false,
    };
    setup_logging(log_level, &config, !interactive);

    match cli.command {
        Some(Commands::Inspect { path, json }) => cmd_inspect(&path, json, &config),
        Some(Commands::Icon { mime_types }) => cmd_icon(&mime_types),
        Some(Commands::Drag { path, index }) => cmd_drag(&path, index, &config),
        Some(Commands::Browse { path }) => cmd_browse(&path, &config),
        Some(Commands::TwoFactor { code }) => cmd_two_factor(code.as_deref(), &config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => match cli.file {
            Some(path) => cmd_browse(&path, &config),
            None => {
                build_localized_command().print_help()?;
                Ok(())
            }
        },
    }
}

/// Set up tracing with file logging and, outside the TUI, stderr output.
fn setup_logging(level: &str, config: &Config, to_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer =
        to_stderr.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let log_path = mailpane::config::log_file_path(config);
    let file_layer = match (log_path.parent(), log_path.file_name()) {
        (Some(dir), Some(name)) if std::fs::create_dir_all(dir).is_ok() => {
            let file_appender = tracing_appender::rolling::never(dir, name);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(file_appender),
            )
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Load attachments, failing when the file holds none.
fn load_views(path: &Path, config: &Config) -> anyhow::Result<LoadedAttachments> {
    let loaded =
        load_attachments(path, &ViewContext::from_config(config)).map_err(localize_load_error)?;
    if loaded.skipped > 0 {
        eprintln!("  {} {}", loaded.skipped, i18n::cli_skipped_records());
    }
    if loaded.views.is_empty() {
        anyhow::bail!("{}: {}", i18n::err_no_attachments(), path.display());
    }
    Ok(loaded)
}

/// Report a missing input file with the localized message.
fn localize_load_error(err: ViewError) -> anyhow::Error {
    match err {
        ViewError::FileNotFound(path) => {
            anyhow::anyhow!("{}: {}", i18n::err_file_not_found(), path.display())
        }
        other => other.into(),
    }
}

/// Print derived fields of every attachment.
fn cmd_inspect(path: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    let loaded = load_views(path, config)?;
    let summaries: Vec<AttachmentSummary> = loaded.views.iter().map(|v| v.summary()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "  {:<3} {:<22} {:<32} {:<28} {:>10}  Preview",
        "#", "Icon", "Filename", "Type", "Size"
    );
    for (i, s) in summaries.iter().enumerate() {
        let preview = if s.link_preview_main.is_empty() {
            "-"
        } else {
            s.link_preview_main.as_str()
        };
        println!(
            "  {:<3} {:<22} {:<32} {:<28} {:>10}  {}",
            i + 1,
            s.icon_class.as_str(),
            s.file_name,
            s.mime_type,
            s.friendly_size,
            preview
        );
    }
    Ok(())
}

fn cmd_icon(mime_types: &[String]) -> anyhow::Result<()> {
    for mime in mime_types {
        println!("{mime}\t{}", icon_class(mime));
    }
    Ok(())
}

/// Print the drag-and-drop payload of one attachment.
fn cmd_drag(path: &Path, index: usize, config: &Config) -> anyhow::Result<()> {
    let loaded = load_views(path, config)?;
    let Some(view) = loaded.views.get(index) else {
        anyhow::bail!(
            "{}: {index} (0..{})",
            i18n::err_index_out_of_range(),
            loaded.views.len()
        );
    };
    let page = PageLocation::parse(&config.server.page_url)?;
    println!("{}", view.generate_transfer_download_url(&page));
    Ok(())
}

fn cmd_browse(path: &Path, config: &Config) -> anyhow::Result<()> {
    let loaded = load_views(path, config)?;
    let app = build_app(loaded, config)?;
    mailpane::tui::run_tui(app)
}

fn cmd_two_factor(code: Option<&str>, config: &Config) -> anyhow::Result<()> {
    let remote = AjaxRemote::from_config(&config.server)?;

    let Some(code) = code else {
        let mut app = build_app(
            LoadedAttachments {
                views: Vec::new(),
                skipped: 0,
            },
            config,
        )?;
        app.dialog_only = true;
        app.open_two_factor();
        return mailpane::tui::run_tui(app);
    };

    let mut dialog = TwoFactorTestView::new();
    dialog.on_show();
    dialog.set_code(code);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(i18n::msg_testing());
    pb.enable_steady_tick(Duration::from_millis(100));

    let status = dialog.run_test(&remote);
    pb.finish_and_clear();

    match status {
        Some(true) => {
            println!("{}", i18n::msg_code_ok());
            Ok(())
        }
        _ => anyhow::bail!("{}", i18n::msg_code_failed()),
    }
}

fn build_app(loaded: LoadedAttachments, config: &Config) -> anyhow::Result<App> {
    let page = PageLocation::parse(&config.server.page_url)?;
    let remote = AjaxRemote::from_config(&config.server)?;
    Ok(App::new(loaded.views, page, Arc::new(remote)))
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailpane", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_error_is_localized() {
        i18n::set_lang(i18n::Lang::Es);
        let err = localize_load_error(ViewError::FileNotFound(PathBuf::from("/no/a.json")));
        assert_eq!(err.to_string(), "Fichero no encontrado: /no/a.json");
        i18n::set_lang(i18n::Lang::En);
    }

    #[test]
    fn test_other_load_errors_pass_through() {
        let err = localize_load_error(ViewError::Remote("boom".to_string()));
        assert!(err.downcast_ref::<ViewError>().is_some());
    }
}
