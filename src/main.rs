use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use footprint::form::FormState;
use footprint::verbose_eprintln;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in the questionnaire in the terminal UI (default if no subcommand)
    Form,
    /// Compute the footprint and print it
    Calc {
        /// Comma-separated answers in question order, e.g. "10,5,100"
        #[arg(short, long)]
        answers: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export a text report from the given answers or the saved form
    Report {
        /// Comma-separated answers in question order
        #[arg(short, long)]
        answers: Option<String>,

        /// Directory to write the report into (defaults to report_dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the report after writing it
        #[arg(long)]
        open: bool,
    },
    /// List the categories, their units and emission factors
    Categories,
    /// Clear the saved form (the theme choice is kept)
    Reset,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "footprint")]
#[command(about = "Daily carbon footprint calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/footprint/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    footprint::stderr_buffer::set_verbose(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Form);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // init runs before loading, so a broken config can be replaced
    if let Commands::Init { force } = command {
        match footprint::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match footprint::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = footprint::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let scoring = config.effective_scoring();
    verbose_eprintln!(
        "Scoring: floor {:?}, top {}, zones {:?}",
        scoring.contribution_floor,
        scoring.top_n(),
        scoring.zone_config()
    );

    let state_path = match footprint::state::get_state_path() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("State error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    };

    match command {
        Commands::Form => {
            let state = load_state_or_exit(&state_path);
            let preference = state.theme.unwrap_or_else(|| config.theme_preference());
            let theme = footprint::tui::resolve_theme(preference);
            verbose_eprintln!("Theme: {} (preference {:?})", theme.name(), preference);

            let app = footprint::tui::App::new(state, state_path, &config, theme);
            if let Err(e) = footprint::tui::run_tui(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Calc { answers, format } => {
            let mut form = match answers {
                Some(list) => parse_answers_or_exit(&list),
                None => {
                    let mut state = load_state_or_exit(&state_path);
                    let mut form = FormState::from_fields(state.form_fields());
                    if let Err(e) = footprint::form::run_questionnaire(&mut form) {
                        eprintln!("Error: {:#}", e);
                        std::process::exit(EXIT_INVALID_INPUT);
                    }

                    state.save_form(form.fields());
                    if let Err(e) = footprint::state::save_state(&state_path, &state) {
                        eprintln!("Failed to save form: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                    verbose_eprintln!("Saved answers to {}", state_path.display());
                    form
                }
            };

            let assessment = match form.submit(&scoring) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_INVALID_INPUT);
                }
            };

            match format {
                OutputFormat::Text => {
                    let use_colors = footprint::output::should_use_colors();
                    println!(
                        "{}",
                        footprint::output::format_assessment(&assessment, use_colors)
                    );
                }
                OutputFormat::Tsv => println!("{}", footprint::output::format_tsv(&assessment)),
                OutputFormat::Json => match footprint::output::format_json(&assessment) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                },
            }
        }
        Commands::Report {
            answers,
            output,
            open,
        } => {
            let mut form = match answers {
                Some(list) => parse_answers_or_exit(&list),
                None => {
                    let state = load_state_or_exit(&state_path);
                    if !state.has_form() {
                        eprintln!("No saved answers. Run `footprint form` or pass --answers.");
                        std::process::exit(EXIT_INVALID_INPUT);
                    }
                    FormState::from_fields(state.form_fields())
                }
            };

            let assessment = match form.submit(&scoring) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_INVALID_INPUT);
                }
            };

            let dir = output.unwrap_or_else(|| config.report_dir());
            let path = match footprint::report::export_report(&assessment, &dir) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Failed to export report: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            };
            println!("Report written to {}", path.display());

            if open {
                if let Err(e) = footprint::browser::open_path(&path) {
                    eprintln!("Failed to open report: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
        Commands::Categories => {
            let use_colors = footprint::output::should_use_colors();
            println!("{}", footprint::output::format_categories(use_colors));
        }
        Commands::Reset => match footprint::state::clear_saved_form(&state_path) {
            Ok(true) => println!("Saved form cleared."),
            Ok(false) => println!("No saved form to clear."),
            Err(e) => {
                eprintln!("Failed to clear saved form: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        },
        Commands::Init { .. } => unreachable!("handled before config loading"),
    }

    verbose_eprintln!("Done in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}

fn load_state_or_exit(path: &std::path::Path) -> footprint::state::SavedState {
    match footprint::state::load_state(path) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("State error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    }
}

fn parse_answers_or_exit(list: &str) -> FormState {
    match FormState::from_answer_list(list) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Invalid --answers: {}", e);
            std::process::exit(EXIT_INVALID_INPUT);
        }
    }
}
