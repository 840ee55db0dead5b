mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::time::Instant;

use crate::board::{BoardEvent, DropEvent, DropOutcome, KanbanBoard};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::project_io::{self, ProjectError};
use crate::io::record_store;
use crate::model::{BoardConfig, DashboardConfig, Id, Project, Record};
use crate::ops::board_ops::locate_item;
use crate::ops::columns::{BuiltColumns, build_columns};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let project_dir = cli.project_dir.as_deref();

    match cli.command {
        None => Err("no subcommand given (try `sb --help`)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, project_dir),

            // Read commands
            Commands::Dashboards => cmd_dashboards(project_dir, json),
            Commands::List(args) => cmd_list(args, project_dir, json),
            Commands::Show(args) => cmd_show(args, project_dir, json),
            Commands::Config(args) => cmd_config(args, project_dir, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, project_dir, json),
            Commands::Mv(args) => cmd_mv(args, project_dir, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start_dir(project_dir: Option<&str>) -> Result<PathBuf, ProjectError> {
    match project_dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => std::env::current_dir().map_err(ProjectError::IoError),
    }
}

fn load_project_cwd(project_dir: Option<&str>) -> Result<Project, ProjectError> {
    let start = start_dir(project_dir)?;
    let root = project_io::discover_project(&start)?;
    project_io::load_project(&root)
}

fn find_dashboard<'a>(
    project: &'a Project,
    id: &str,
) -> Result<&'a DashboardConfig, Box<dyn std::error::Error>> {
    project.config.dashboard(id).ok_or_else(|| {
        let known: Vec<&str> = project
            .config
            .dashboards
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        format!("no dashboard \"{}\" (known: {})", id, known.join(", ")).into()
    })
}

fn load_columns(project: &Project, dashboard: &DashboardConfig) -> Result<BuiltColumns, record_store::StoreError> {
    let records = record_store::load_records(&project.records_path(dashboard))?;
    Ok(build_columns(dashboard, records))
}

fn column_name(dashboard: &DashboardConfig, status: &Id) -> Option<String> {
    dashboard
        .columns
        .iter()
        .find(|c| &c.id == status)
        .map(|c| c.name.clone())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_dashboards(project_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd(project_dir)?;

    let mut built = Vec::new();
    for dashboard in &project.config.dashboards {
        built.push((dashboard, load_columns(&project, dashboard)?));
    }

    if json {
        let infos: Vec<DashboardJson> = built
            .iter()
            .map(|(d, b)| dashboard_to_json(d, b))
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        let id_width = built.iter().map(|(d, _)| d.id.len()).max().unwrap_or(0);
        for (dashboard, columns) in &built {
            println!("{}", format_dashboard_line(dashboard, columns, id_width));
        }
    }
    Ok(())
}

fn cmd_list(args: ListArgs, project_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd(project_dir)?;
    let dashboard = find_dashboard(&project, &args.dashboard)?;
    let built = load_columns(&project, dashboard)?;

    if json {
        let board = BoardJson {
            dashboard: &dashboard.id,
            columns: &built.columns,
            orphans: &built.orphans,
        };
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print_lines(&format_board_listing(dashboard, &built));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, project_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd(project_dir)?;
    let dashboard = find_dashboard(&project, &args.dashboard)?;
    let records = record_store::load_records(&project.records_path(dashboard))?;
    let id = Id::from_input(&args.id);
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| record_store::StoreError::NotFound(id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        let status_name = column_name(dashboard, &record.status);
        print_lines(&format_record_detail(record, status_name.as_deref()));
    }
    Ok(())
}

fn cmd_config(args: ConfigCmd, project_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd(project_dir)?;

    match args.action {
        Some(ConfigAction::Set(set)) => {
            let (_config, mut doc) = config_io::read_config(&project.board_dir)?;
            config_io::set_board_value(&mut doc, set.dashboard.as_deref(), &set.key, &set.value)?;
            config_io::write_config(&project.board_dir, &doc)?;
            match set.dashboard {
                Some(d) => println!("{}.board.{} = {}", d, set.key, set.value),
                None => println!("board.{} = {}", set.key, set.value),
            }
            Ok(())
        }
        None => {
            let effective = match args.dashboard.as_deref() {
                Some(id) => {
                    let dashboard = find_dashboard(&project, id)?;
                    project.config.board_config_for(dashboard)
                }
                None => project.config.board.clone(),
            };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&effective_config_json(&effective))?
                );
            } else {
                print_lines(&format_board_config(&effective));
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, project_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd(project_dir)?;
    let dashboard = find_dashboard(&project, &args.dashboard)?;

    let status = match args.status.as_deref() {
        Some(s) => {
            let id = Id::from_input(s);
            if column_name(dashboard, &id).is_none() {
                return Err(format!("no column \"{}\" on dashboard {}", s, dashboard.id).into());
            }
            id
        }
        None => dashboard
            .columns
            .first()
            .map(|c| c.id.clone())
            .ok_or_else(|| format!("dashboard {} has no columns", dashboard.id))?,
    };

    let record = record_store::add_record(
        &project.board_dir,
        &project.records_path(dashboard),
        &args.title,
        &status,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("#{} {}", record.id, record.title);
    }
    Ok(())
}

/// Move a record through a board with the undo window disabled, so the drop
/// commits on the spot, then persist the committed move.
fn cmd_mv(args: MvArgs, project_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = load_project_cwd(project_dir)?;
    let dashboard = find_dashboard(&project, &args.dashboard)?;
    let built = load_columns(&project, dashboard)?;

    let id = Id::from_input(&args.id);
    let (col, row) = locate_item(&built.columns, &id)
        .ok_or_else(|| record_store::StoreError::NotFound(id.clone()))?;
    let source_column = built.columns[col].id.clone();

    let config = BoardConfig {
        show_undo_toast: Some(false),
        ..project.config.board_config_for(dashboard)
    };
    let mut board = KanbanBoard::new(built.columns, config);
    let drop = DropEvent {
        source_column,
        source_index: row,
        dest_column: Id::from_input(&args.status),
        dest_index: args.index,
    };

    match board.on_drop(drop, Instant::now())? {
        DropOutcome::Ignored => {
            println!("#{} is already in that column", id);
            return Ok(());
        }
        DropOutcome::Reordered { .. } => {
            println!("#{} is already in that column; order is not stored", id);
            return Ok(());
        }
        DropOutcome::Committed | DropOutcome::Pending { .. } => {}
    }

    for event in board.drain_events() {
        if let BoardEvent::ItemMoved(moved) = event {
            persist_move(&project, dashboard, &moved.item, &moved.to_column_id)?;
            let to_name = column_name(dashboard, &moved.to_column_id)
                .unwrap_or_else(|| moved.to_column_id.to_string());
            if json {
                println!("{}", serde_json::to_string_pretty(&moved)?);
            } else {
                println!("{}", format_move(&moved, &to_name));
            }
        }
    }
    Ok(())
}

fn persist_move(
    project: &Project,
    dashboard: &DashboardConfig,
    item: &Record,
    status: &Id,
) -> Result<Record, record_store::StoreError> {
    record_store::update_status(
        &project.board_dir,
        &project.records_path(dashboard),
        &item.id,
        status,
    )
}

