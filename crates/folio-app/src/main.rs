use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use folio_app::telemetry::{init_tracing, LogFormat};
use folio_app::{EditOutcome, FolioApp, FolioConfig, LoadStatus};
use folio_model::normalize;
use folio_render::ProjectGrid;
use folio_store::FileStore;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::warn;

type App = FolioApp<Arc<FileStore>>;

const FORM_FIELDS: [(&str, &str); 11] = [
    ("title", "Project title"),
    ("description", "Short description"),
    ("status", "Status: Complete or In Progress"),
    ("stars", "Star count"),
    ("tags", "Comma-separated tags"),
    ("cover", "Cover image slug or URL"),
    ("alt", "Cover alt text"),
    ("demo", "Demo link"),
    ("code", "Source code link"),
    ("timeline", "Timeline, e.g. 2023-2024"),
    ("role", "Your role"),
];

fn form_args(cmd: Command) -> Command {
    FORM_FIELDS.iter().fold(cmd, |cmd, (name, help)| {
        cmd.arg(Arg::new(*name).long(*name).value_name("TEXT").help(*help))
    })
}

fn project_number() -> Arg {
    Arg::new("number")
        .required(true)
        .value_parser(value_parser!(usize))
        .help("Project number as shown by `folio project list`")
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Do not ask for confirmation")
}

fn cli() -> Command {
    Command::new("folio")
        .version(folio_app::VERSION)
        .about("Portfolio project pipeline: load, render and edit projects")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Data file backing the local store"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("render")
                .about("Load projects and print the rendered grid as HTML")
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .action(ArgAction::SetTrue)
                        .help("Load from the remote source instead of local storage"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write HTML to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("project")
                .about("Manage locally stored projects")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List stored projects"))
                .subcommand(
                    Command::new("show")
                        .about("Print one stored project as JSON")
                        .arg(project_number()),
                )
                .subcommand(form_args(Command::new("add").about("Create a project")))
                .subcommand(form_args(
                    Command::new("update")
                        .about("Update a project; omitted fields keep their value")
                        .arg(project_number()),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a project")
                        .arg(project_number())
                        .arg(yes_flag()),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Remove all stored projects; the seed is loaded again on next render")
                        .arg(yes_flag()),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("Read or change the theme preference")
                .subcommand_required(true)
                .subcommand(Command::new("get").about("Print the stored preference"))
                .subcommand(
                    Command::new("set").about("Store the preference").arg(
                        Arg::new("state")
                            .required(true)
                            .value_parser(["on", "off"]),
                    ),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<FolioConfig> {
    let path = matches.get_one::<PathBuf>("config");
    let mut config = FolioConfig::load(path.map(PathBuf::as_path))
        .with_context(|| "loading configuration")?;
    if let Some(data) = matches.get_one::<PathBuf>("data") {
        config = config.with_data_file(data);
    }
    Ok(config)
}

fn index_of(matches: &ArgMatches) -> Result<usize> {
    let number = matches.get_one::<usize>("number").copied().unwrap_or_default();
    match number.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("project numbers start at 1"),
    }
}

fn confirm(matches: &ArgMatches, prompt: &str) -> bool {
    if matches.get_flag("yes") {
        return true;
    }
    eprint!("{prompt} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

async fn run_render(app: &App, matches: &ArgMatches) -> Result<ExitCode> {
    let loader = app.orchestrator(ProjectGrid::default());
    if let Err(e) = loader.startup().await {
        warn!(error = %e, "startup seeding failed");
    }

    let status = if matches.get_flag("remote") {
        loader.load_remote().await
    } else {
        loader.load_local().await
    };
    eprintln!("{status}");

    if let LoadStatus::Loaded { .. } = status {
        let html = loader.with_container(ProjectGrid::to_html);
        match matches.get_one::<PathBuf>("out") {
            Some(path) => std::fs::write(path, html)
                .with_context(|| format!("writing {}", path.display()))?,
            None => println!("{html}"),
        }
    }
    Ok(if status.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_project(app: &App, matches: &ArgMatches) -> Result<ExitCode> {
    let mut editor = app.editor();
    match matches.subcommand() {
        Some(("list", _)) => {
            let records = editor.store().try_list_all()?;
            if records.is_empty() {
                println!("No stored projects.");
            }
            for (i, record) in records.iter().enumerate() {
                let project = normalize(record);
                println!(
                    "{:>3}  {:<40}  {:<12}  ★ {}",
                    i + 1,
                    project.title,
                    project.status.as_str(),
                    project.stars
                );
            }
        }
        Some(("show", sub)) => {
            let index = index_of(sub)?;
            let Some(record) = editor.store().get(index) else {
                bail!("no project number {}", index + 1);
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Some(("add", sub)) => {
            fill_form(&mut editor, sub);
            if editor.submit() != EditOutcome::Created {
                bail!("project could not be created");
            }
            println!("{}", editor.status_message());
        }
        Some(("update", sub)) => {
            let index = index_of(sub)?;
            editor.select(Some(index));
            if editor.mode() != folio_app::EditMode::EditingAt(index) {
                bail!("no project number {}", index + 1);
            }
            fill_form(&mut editor, sub);
            if !matches!(editor.submit(), EditOutcome::Updated(_)) {
                bail!("project {} could not be updated", index + 1);
            }
            println!("{}", editor.status_message());
        }
        Some(("delete", sub)) => {
            let index = index_of(sub)?;
            editor.select(Some(index));
            if editor.mode() != folio_app::EditMode::EditingAt(index) {
                bail!("no project number {}", index + 1);
            }
            match editor.delete(|prompt| confirm(sub, prompt)) {
                EditOutcome::Deleted(_) => println!("{}", editor.status_message()),
                EditOutcome::Failed => bail!("project {} could not be deleted", index + 1),
                _ => println!("Nothing deleted."),
            }
        }
        Some(("reset", sub)) => {
            if confirm(sub, "Remove all stored projects?") {
                editor.store().clear()?;
                println!("Stored projects removed.");
            } else {
                println!("Nothing removed.");
            }
        }
        _ => unreachable!("subcommand required"),
    }
    Ok(ExitCode::SUCCESS)
}

fn fill_form(editor: &mut folio_app::ProjectEditor<Arc<FileStore>>, matches: &ArgMatches) {
    let form = editor.form_mut();
    for (name, _) in FORM_FIELDS {
        let Some(value) = matches.get_one::<String>(name).cloned() else {
            continue;
        };
        let slot = match name {
            "title" => &mut form.title,
            "description" => &mut form.description,
            "status" => &mut form.status,
            "stars" => &mut form.stars,
            "tags" => &mut form.tags,
            "cover" => &mut form.cover,
            "alt" => &mut form.alt,
            "demo" => &mut form.demo,
            "code" => &mut form.code,
            "timeline" => &mut form.timeline,
            _ => &mut form.role,
        };
        *slot = value;
    }
}

fn run_theme(app: &App, matches: &ArgMatches) -> Result<ExitCode> {
    let preference = app.preference();
    match matches.subcommand() {
        Some(("get", _)) => {
            let state = match preference.read() {
                Some(true) => "on",
                Some(false) => "off",
                None => "unset",
            };
            println!("{state}");
        }
        Some(("set", sub)) => {
            let on = sub.get_one::<String>("state").is_some_and(|s| s == "on");
            preference.write(on);
            if preference.read() != Some(on) {
                bail!("theme preference could not be stored in {}", app.kv().path().display());
            }
            println!("{}", if on { "on" } else { "off" });
        }
        _ => unreachable!("subcommand required"),
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();
    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_tracing(matches.get_count("verbose"), format);

    let config = load_config(&matches)?;
    let app = FolioApp::open(config)?;

    match matches.subcommand() {
        Some(("render", sub)) => run_render(&app, sub).await,
        Some(("project", sub)) => run_project(&app, sub),
        Some(("theme", sub)) => run_theme(&app, sub),
        _ => unreachable!("subcommand required"),
    }
}
