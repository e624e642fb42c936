use anyhow::Result;
use crossterm::style::Stylize;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
    MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline,
    ReedlineEvent, ReedlineMenu, Signal,
};
use std::borrow::Cow;
use std::path::Path;
use tracing::{info, warn};

use opportunity_search::config::config::Config;
use opportunity_search::data::record::{Record, RecordId};
use opportunity_search::data::sort::{SortDirection, SortSpec};
use opportunity_search::services::{
    ApiClient, FetchService, JsonFileSource, Notification, NotificationKind, NotificationSink,
};
use opportunity_search::state::{Collaborators, ListController};
use opportunity_search::ui::table_display::{build_table, export_records_csv};
use opportunity_search::utils::app_paths::AppPaths;
use opportunity_search::utils::logging::{get_log_buffer, init_tracing};

mod completer;

use completer::CommandCompleter;

/// Prints notifications in place of toasts
struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        info!(
            target: "notify",
            "{} {}: {}",
            notification.kind,
            notification.title,
            notification.message
        );
        match notification.kind {
            NotificationKind::Success => println!(
                "{} {}",
                notification.title.green().bold(),
                notification.message.green()
            ),
            NotificationKind::Error => eprintln!(
                "{} {}",
                notification.title.red().bold(),
                notification.message.red()
            ),
        }
    }
}

struct TablePrompt {
    page: usize,
    total_pages: usize,
    selected: usize,
}

impl Prompt for TablePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "opp [{}/{} | {} selected]",
            self.page, self.total_pages, self.selected
        ))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => "> ".into(),
            PromptEditMode::Vi(vi_mode) => match vi_mode {
                reedline::PromptViMode::Normal => "N> ".into(),
                reedline::PromptViMode::Insert => "I> ".into(),
            },
            PromptEditMode::Custom(str) => format!("{str}> ").into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

fn print_help() {
    println!("{}", "Opportunity Search - paged, searchable opportunity table".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  opportunity-search [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {} - Load records from a JSON file", "--file <records.json>".green());
    println!("  {}       - Re-query the service on each search", "--refetch".green());
    println!("  {} - Write a commented config file", "--generate-config".green());
    println!("  {}          - Show this help", "--help".green());
    println!();
    println!("{}", "Commands:".yellow());
    println!("  {}    - Filter by text (case-sensitive)", "search <text>".green());
    println!("  {}            - Remove the filter", "clear".green());
    println!("  {}       - Change page", "next | prev".green());
    println!("  {}   - Check rows on this page (* for all)", "select <id..>".green());
    println!("  {} - Uncheck rows on this page (* for all)", "deselect <id..>".green());
    println!("  {}         - List every selected row", "selected".green());
    println!("  {}      - Run the API action for a row", "action <id>".green());
    println!("  {} - Sort locally (sort off to reset)", "sort <field> [asc|desc]".green());
    println!("  {}           - Fetch records again", "reload".green());
    println!("  {}  - Export the selection to CSV", "export <file.csv>".green());
    println!("  {}  - Show this help", "\\help".green());
    println!("  {}  - Show recent log entries", "\\logs".green());
    println!("  {} - Clear screen", "\\clear".green());
    println!("  {}  - Exit", "quit | Ctrl+D".green());
    println!();
}

fn print_page(controller: &ListController, config: &Config) {
    let state = controller.render_state();

    if let Some(error) = &state.error {
        eprintln!("{}", format!("Error: {}", error).red());
        return;
    }

    if state.visible_page.is_empty() {
        println!("{}", "No results found.".yellow());
    } else {
        println!("{}", build_table(&state, config.display.use_glyphs));
    }

    if config.display.show_range_label {
        let mut summary = format!(
            "{}  page {}/{}  {} selected",
            state.range,
            state.page,
            state.total_pages,
            state.selected_identities.len()
        );
        if !state.query.is_empty() {
            summary.push_str(&format!("  filter: {:?}", state.query));
        }
        if let Some(sort) = controller.sort() {
            summary.push_str(&format!("  sort: {} {}", sort.field, sort.direction));
        }
        println!("{}", summary.cyan());
    }
}

/// Rows of the visible page matching `ids`, or every row for `*`
fn pick_visible(controller: &ListController, ids: &[&str]) -> Vec<Record> {
    if ids.contains(&"*") {
        return controller.visible_page().to_vec();
    }

    let state = controller.render_state();
    let mut picked = Vec::new();
    for id in ids {
        let id = RecordId::from(*id);
        match state.find_visible(&id) {
            Some(record) => picked.push(record.clone()),
            None => eprintln!("{}", format!("{} is not on this page", id).yellow()),
        }
    }
    picked
}

/// What the loop should do after a command
enum Flow {
    Continue,
    Redraw,
    Quit,
}

fn run_command(controller: &mut ListController, line: &str) -> Result<Flow> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match command {
        "search" => controller.search_changed(rest),
        "clear" => controller.search_changed(""),
        "next" | "n" | "prev" | "p" => {
            let forward = matches!(command, "next" | "n");
            let paginator = controller.paginator();
            if (forward && paginator.is_last_page()) || (!forward && paginator.is_first_page()) {
                let edge = if forward { "last" } else { "first" };
                println!("{}", format!("Already on the {} page", edge).yellow());
                return Ok(Flow::Continue);
            }

            let moved = if forward {
                controller.next_page()
            } else {
                controller.previous_page()
            };
            if moved {
                // Re-rendering the table echoes the seeded selection back
                let echoed = controller.render_state().visible_selected();
                controller.selection_reseeded(echoed);
            }
        }
        "select" | "deselect" => {
            if args.is_empty() {
                eprintln!("{}", format!("Usage: {} <id..>", command).red());
                return Ok(Flow::Continue);
            }
            let mut checked = controller.render_state().visible_selected();
            let picked = pick_visible(controller, &args);
            if command == "select" {
                for record in picked {
                    if !checked.iter().any(|r| r.id == record.id) {
                        checked.push(record);
                    }
                }
            } else {
                checked.retain(|r| !picked.iter().any(|p| p.id == r.id));
            }
            controller.selection_changed(checked);
        }
        "selected" => {
            let selection = controller.selection().selected_records();
            if selection.is_empty() {
                println!("{}", "Nothing selected.".yellow());
            }
            for record in selection {
                println!("  {}  {}", record.id.as_str().green(), record.name);
            }
            return Ok(Flow::Continue);
        }
        "action" => {
            let Some(id) = args.first() else {
                eprintln!("{}", "Usage: action <id>".red());
                return Ok(Flow::Continue);
            };
            let _ = controller.invoke_row_action(&RecordId::from(*id));
            return Ok(Flow::Continue);
        }
        "sort" => match args.as_slice() {
            ["off"] => controller.sort_by(None),
            [field] => controller.sort_by(Some(SortSpec::new(*field, SortDirection::Ascending))),
            [field, direction] => match direction.parse::<SortDirection>() {
                Ok(direction) => controller.sort_by(Some(SortSpec::new(*field, direction))),
                Err(e) => {
                    eprintln!("{}", e.red());
                    return Ok(Flow::Continue);
                }
            },
            _ => {
                eprintln!("{}", "Usage: sort <field> [asc|desc] | sort off".red());
                return Ok(Flow::Continue);
            }
        },
        "reload" => {
            let query = controller.query().to_string();
            controller.load(&query);
        }
        "export" => {
            let Some(path) = args.first() else {
                eprintln!("{}", "Usage: export <filename>".red());
                return Ok(Flow::Continue);
            };
            let selection = controller.selection().selected_records();
            if selection.is_empty() {
                eprintln!("{}", "Nothing selected to export.".red());
            } else {
                match export_records_csv(&selection, Path::new(path)) {
                    Ok(count) => println!("{}", format!("{} rows exported to {}", count, path).green()),
                    Err(e) => eprintln!("{}", format!("Export error: {}", e).red()),
                }
            }
            return Ok(Flow::Continue);
        }
        "\\help" => {
            print_help();
            return Ok(Flow::Continue);
        }
        "\\logs" => {
            if let Some(buffer) = get_log_buffer() {
                for entry in buffer.get_recent(20) {
                    println!("{}", entry.format_for_display().dark_grey());
                }
            }
            return Ok(Flow::Continue);
        }
        "\\clear" => {
            print!("{esc}[2J{esc}[1;1H", esc = 27 as char);
            return Ok(Flow::Continue);
        }
        "quit" | "exit" => return Ok(Flow::Quit),
        other => {
            eprintln!("{}", format!("Unknown command: {} (try \\help)", other).red());
            return Ok(Flow::Continue);
        }
    }

    Ok(Flow::Redraw)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        let path = Config::get_config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Config::create_default_with_comments())?;
        println!("Configuration file created at: {:?}", path);
        return Ok(());
    }

    let logging = init_tracing(AppPaths::log_dir().ok().as_deref());
    if let Some(path) = &logging.log_path {
        eprintln!("📝 Debug logs will be written to:");
        eprintln!("   {}", path.display());
        eprintln!();
    }

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(target: "config", "Falling back to defaults: {}", e);
            eprintln!("{}", format!("Config error, using defaults: {}", e).yellow());
            Config::default()
        }
    };
    if args.iter().any(|a| a == "--refetch") {
        config.behavior.refetch_on_search = true;
    }

    let data_file = args
        .iter()
        .position(|arg| arg == "--file")
        .and_then(|pos| args.get(pos + 1))
        .cloned();

    let api_client = ApiClient::from_config(&config.api)?;
    let fetch: Box<dyn FetchService> = match &data_file {
        Some(path) => {
            let source = JsonFileSource::new(path);
            println!(
                "{}",
                format!("Loading records from {}", source.path().display()).cyan()
            );
            Box::new(source)
        }
        None => {
            println!("{}", format!("Connected to API: {}", api_client.base_url()).cyan());
            Box::new(api_client.clone())
        }
    };

    let mut controller = ListController::new(
        &config.behavior,
        Collaborators {
            fetch,
            actions: Box::new(api_client),
            notifier: Box::new(ConsoleNotifier),
        },
    );

    controller.load("");
    print_page(&controller, &config);

    let history_file = AppPaths::history_file()?;
    let history = Box::new(FileBackedHistory::with_file(100, history_file)?);

    let completion_menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_completion")
            .with_columns(1)
            .with_column_width(None)
            .with_column_padding(2),
    );

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Menu("command_completion".to_string()),
    );

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_history(history)
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    loop {
        let state = controller.render_state();
        let prompt = TablePrompt {
            page: state.page,
            total_pages: state.total_pages,
            selected: state.selected_identities.len(),
        };

        match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match run_command(&mut controller, trimmed)? {
                    Flow::Continue => {}
                    Flow::Redraw => print_page(&controller, &config),
                    Flow::Quit => break,
                }
            }
            Signal::CtrlD | Signal::CtrlC => break,
        }
    }

    println!("\nGoodbye!");
    Ok(())
}
