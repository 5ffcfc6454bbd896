use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use folio::app::{Effect, Interpreter, ScheduledEffect};
use folio::config::Config;
use folio::config_io::{ConfigResolver, DirectoryContext};
use folio::model::profile::Profile;
use folio::services::ai::{CompletionBackend, OpenAiClient};
use folio::services::log_dirs;
use folio::services::time_source::RealTimeSource;
use folio::services::tracing_setup;
use folio::view::repl;
use folio::view::theme::Theme;
use folio::view::ScrollbackView;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::BufReader;

/// A portfolio you browse like a shell
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A simulated shell for exploring a portfolio, with an AI /ask command", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON profile to serve instead of the built-in one
    #[arg(long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// Path to log file (default: XDG state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the JSON Schema of the configuration file and exit
    #[arg(long)]
    dump_schema: bool,

    /// Print the directories used by folio and exit
    #[arg(long)]
    show_paths: bool,

    /// Run a command line non-interactively; may be repeated
    #[arg(long = "command", short = 'c', value_name = "LINE")]
    commands: Vec<String>,
}

fn load_profile(args: &Args, config: &Config) -> AnyhowResult<Profile> {
    let path = args.profile.as_ref().or(config.profile_path.as_ref());
    match path {
        Some(path) => Profile::load_from_file(path)
            .with_context(|| format!("Failed to load profile from {}", path.display())),
        None => Ok(Profile::builtin()),
    }
}

fn init_logging(args: &Args) {
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(log_dirs::main_log_path);

    if tracing_setup::init_global(&log_path) {
        tracing::info!("Logging to {}", log_path.display());
    }
    log_dirs::cleanup_stale_logs();
}

#[tokio::main]
async fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    let dir_context = DirectoryContext::from_system();

    // Handle --show-paths early (no config needed)
    if args.show_paths {
        log_dirs::print_all_paths(&dir_context.config_path());
        return Ok(());
    }

    if args.dump_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let config = ConfigResolver::new(dir_context, args.config.clone())
        .resolve()
        .context("Failed to load configuration")?;

    if args.dump_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    init_logging(&args);

    let profile = load_profile(&args, &config)?;
    let backend = OpenAiClient::from_config(&config.ai);
    tracing::info!("Using completion endpoint {}", backend.endpoint());

    let mut interp = Interpreter::new(profile, &config, RealTimeSource::shared());

    if !args.commands.is_empty() {
        return run_batch(&mut interp, &backend, &args.commands).await;
    }

    let colored = io::stdout().is_terminal();
    let theme = if colored {
        Theme::from_config(&config.theme)
    } else {
        Theme::monochrome()
    };
    // The prompt and typed-line erase rely on the terminal echoing input.
    let interactive = colored && io::stdin().is_terminal();
    let view = ScrollbackView::new(theme, interactive);

    run_repl(&mut interp, &backend, view).await
}

/// Run each `--command` line in order and print the whole scrollback.
async fn run_batch(
    interp: &mut Interpreter,
    backend: &dyn CompletionBackend,
    commands: &[String],
) -> AnyhowResult<()> {
    let mut view = ScrollbackView::new(Theme::monochrome(), false);
    let mut stdout = io::stdout();

    for line in commands {
        let effect = interp.execute(line, backend).await;
        view.draw(interp.scrollback(), &mut stdout)
            .context("Failed to write output")?;

        if let Some(ScheduledEffect { effect, .. }) = effect {
            match effect {
                Effect::Navigate(route) => {
                    writeln!(stdout, "[navigate] {}", route)?;
                    break;
                }
                Effect::Reset => {
                    interp.reset();
                    view.draw(interp.scrollback(), &mut stdout)?;
                }
            }
        }
    }
    Ok(())
}

async fn run_repl(
    interp: &mut Interpreter,
    backend: &dyn CompletionBackend,
    mut view: ScrollbackView,
) -> AnyhowResult<()> {
    let mut stdout = io::stdout();
    let stdin = BufReader::new(tokio::io::stdin());
    repl::run(interp, backend, &mut view, stdin, &mut stdout)
        .await
        .context("Terminal session failed")
}
