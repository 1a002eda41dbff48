use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use pupfinder_application::{Notice, PipelineOutcome, PupFinder, ResolvedView};
use pupfinder_core::favorites::FavoriteToggle;
use pupfinder_infrastructure::{ConfigService, PupfinderPaths};

mod command;
mod helper;

use command::Command;
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "pupfinder")]
#[command(about = "PupFinder - search shelter dogs, pick favorites, get a match", long_about = None)]
struct Cli {
    /// Catalog service URL (overrides config.toml and PUPFINDER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory holding config.toml, session.toml and logs/
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

/// Logs go to a daily file so the REPL output stays readable.
fn init_tracing(paths: &PupfinderPaths) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "pupfinder.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(message) => println!("{}", message.bright_green()),
        Notice::Error(message) => println!("{}", message.red()),
    }
}

fn print_help() {
    let lines = [
        ("/login <name> <email>", "start a session"),
        ("/logout", "end the session"),
        ("/search", "re-run the current search from page one"),
        ("/breeds", "list breeds"),
        ("/breed [name]", "toggle a breed filter (no name clears)"),
        ("/age <min|-> <max|->", "set age bounds"),
        ("/zip [zip...]", "set zip codes (none clears)"),
        ("/sort <field>[:dir]", "sort by name, breed or age"),
        ("/reset", "clear all filters"),
        ("/next, /prev", "turn the page"),
        ("/find [text]", "narrow the current page by text"),
        ("/fav <id>", "toggle a favorite"),
        ("/favs", "list favorites"),
        ("/match", "get a match from your favorites"),
        ("/dismiss", "dismiss the current match"),
        ("quit", "exit"),
    ];
    for (usage, text) in lines {
        println!("  {:<24}{}", usage.bright_cyan(), text.bright_black());
    }
}

async fn print_page(app: &PupFinder, view: &ResolvedView) {
    let visible = app.search().visible_records().await;
    let filter = app.search().text_filter().await;

    let mut header = format!(
        "{} of {} dogs (sort {})",
        view.page.len(),
        view.total,
        view.criteria.sort()
    );
    if !filter.is_empty() {
        header.push_str(&format!(", {} match \"{}\"", visible.len(), filter.as_str()));
    }
    println!("{}", header.bright_magenta());

    for dog in &visible {
        let star = if app.favorites().contains(&dog.id).await {
            "*".bright_yellow().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}  {}", star, dog.id.bright_black(), dog.summary());
    }

    let mut nav = Vec::new();
    if view.has_prev() {
        nav.push("/prev");
    }
    if view.has_next() {
        nav.push("/next");
    }
    if !nav.is_empty() {
        println!("{}", nav.join("  ").bright_black());
    }
}

async fn show_outcome(app: &PupFinder, outcome: pupfinder_core::Result<PipelineOutcome>) {
    match outcome {
        Ok(PipelineOutcome::Applied(view)) => print_page(app, &view).await,
        Ok(PipelineOutcome::Superseded) => {}
        Ok(PipelineOutcome::Unavailable) => println!("{}", "No page in that direction".yellow()),
        Err(e) => print_notice(&Notice::from_error(&e)),
    }
}

async fn load_breeds(app: &PupFinder, helper: Option<&mut CliHelper>) -> Option<Vec<String>> {
    match app.search().breeds().await {
        Ok(breeds) => {
            if let Some(helper) = helper {
                helper.set_breeds(breeds.clone());
            }
            Some(breeds)
        }
        Err(e) => {
            print_notice(&Notice::from_error(&e));
            None
        }
    }
}

async fn execute(app: &PupFinder, command: Command, helper: Option<&mut CliHelper>) {
    match command {
        Command::Login { name, email } => match app.login(&name, &email).await {
            Ok(record) => {
                print_notice(&Notice::success(format!("Welcome, {}", record.name)));
                load_breeds(app, helper).await;
                show_outcome(app, app.search().run().await).await;
            }
            Err(e) => print_notice(&Notice::from_error(&e)),
        },
        Command::Logout => {
            let result = app.logout().await;
            print_notice(&Notice::from_result(&result, |_| "Logged out".to_string()));
        }
        Command::Search => show_outcome(app, app.search().refresh().await).await,
        Command::Breeds => {
            if let Some(breeds) = load_breeds(app, helper).await {
                for line in breeds.chunks(4) {
                    println!("  {}", line.join(", "));
                }
            }
        }
        Command::Breed(Some(breed)) => {
            show_outcome(app, app.search().toggle_breed(&breed).await).await
        }
        Command::Breed(None) => {
            show_outcome(app, app.search().set_breeds(Vec::<String>::new()).await).await
        }
        Command::Age { min, max } => {
            show_outcome(app, app.search().set_age_range(min, max).await).await
        }
        Command::Zip(zip_codes) => {
            show_outcome(app, app.search().set_zip_codes(zip_codes).await).await
        }
        Command::Sort(sort) => show_outcome(app, app.search().set_sort(sort).await).await,
        Command::Reset => show_outcome(app, app.search().reset_filters().await).await,
        Command::Next => show_outcome(app, app.search().next_page().await).await,
        Command::Prev => show_outcome(app, app.search().prev_page().await).await,
        Command::Find(text) => {
            app.search().set_text_filter(&text).await;
            match app.search().current_view().await {
                Some(view) => print_page(app, &view).await,
                None => println!("{}", "Nothing to filter yet".yellow()),
            }
        }
        Command::Fav(id) => {
            let result = app.toggle_favorite_by_id(&id).await;
            print_notice(&Notice::from_result(&result, |effect| match effect {
                FavoriteToggle::Added => format!("Added {} to favorites", id),
                FavoriteToggle::Removed => format!("Removed {} from favorites", id),
            }));
        }
        Command::Favs => {
            let favorites = app.favorites().snapshot().await;
            if favorites.is_empty() {
                println!("{}", "No favorites yet".bright_black());
            }
            for dog in favorites {
                println!("{} {}  {}", "*".bright_yellow(), dog.id.bright_black(), dog.summary());
            }
        }
        Command::Match => {
            let result = app.matcher().generate_match().await;
            print_notice(&Notice::from_result(&result, |dog| {
                format!("It's a match: {}", dog.summary())
            }));
            if let Ok(dog) = result {
                println!("  {}", dog.image_url.bright_black());
            }
        }
        Command::Dismiss => {
            app.matcher().dismiss_match().await;
            println!("{}", "Match dismissed".bright_black());
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
}

/// Entry point for the PupFinder REPL.
///
/// Loads configuration, wires the HTTP client and the on-disk session
/// record, then reads slash commands until `quit`. Without a valid session
/// only `/login` and `/help` are accepted.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PupfinderPaths::new(cli.config_dir.as_deref());
    let _log_guard = init_tracing(&paths)?;

    let mut config = ConfigService::new(&paths)?.load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    tracing::info!("[Bootstrap] Catalog service: {}", config.base_url);
    let app = PupFinder::connect(config, &paths)?;

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== PupFinder ===".bright_magenta().bold());
    match app.gate().current_session().await {
        Ok(Some(record)) => {
            println!("{}", format!("Welcome back, {}", record.name).bright_green());
            load_breeds(&app, rl.helper_mut()).await;
            show_outcome(&app, app.search().run().await).await;
        }
        _ => println!(
            "{}",
            "Log in with '/login <name> <email>', '/help' for commands, 'quit' to exit."
                .bright_black()
        ),
    }
    println!();

    // ===== Main REPL Loop =====
    loop {
        let prompt = if app.is_authenticated().await {
            "pupfinder> "
        } else {
            "login> "
        };

        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match command::parse(trimmed) {
                    Ok(command) => command,
                    Err(usage) => {
                        println!("{}", usage.yellow());
                        continue;
                    }
                };

                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if !command.is_public() && !app.is_authenticated().await {
                    print_notice(&Notice::Error(
                        "Please log in first: /login <name> <email>".to_string(),
                    ));
                    continue;
                }

                execute(&app, command, rl.helper_mut()).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
