use flexi_logger::Logger;
use log::warn;
use milestone_kpi::{
    Alert, Clock, Evaluator, FixedClock, JsonFileStore, Project, ProjectCategory, ProjectStore,
    Settings, SystemClock, TimelineLayout, filter_by_category, save_project_to_csv,
    settings::ALERT_WINDOW_PRESETS, timeline::TimelineRow,
};
use std::env;
use std::process;

struct Options {
    data_dir: String,
    today: Option<FixedClock>,
    window: Option<u32>,
    category: Option<ProjectCategory>,
    owner: Option<String>,
    export_csv: Option<(String, String)>,
}

fn print_help() {
    println!(
        "Usage: kpi-report <data_dir> [options]\n\nOptions:\n  --today <YYYY-MM-DD>               Evaluate as of this day instead of the system date\n  --window <days>                    Override the stored alert days window\n  --category <name>                  Only list projects of this category\n  --owner <name>                     Only show this owner's tasks on the timeline\n  --export-csv <project_id> <path>   Write the project's milestones to CSV\n  --help                             Show this help"
    );
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut data_dir: Option<String> = None;
    let mut options = Options {
        data_dir: String::new(),
        today: None,
        window: None,
        category: None,
        owner: None,
        export_csv: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--today" => {
                let value = iter.next().ok_or("--today needs a date")?;
                let clock = FixedClock::parse(value)
                    .ok_or_else(|| format!("invalid date '{value}' (YYYY-MM-DD)"))?;
                options.today = Some(clock);
            }
            "--window" => {
                let value = iter.next().ok_or("--window needs a number of days")?;
                let days: u32 = value
                    .parse()
                    .map_err(|_| format!("invalid window '{value}'"))?;
                options.window = Some(days);
            }
            "--category" => {
                let value = iter.next().ok_or("--category needs a name")?;
                options.category = Some(
                    value
                        .parse::<ProjectCategory>()
                        .map_err(|e| e.to_string())?,
                );
            }
            "--owner" => {
                let value = iter.next().ok_or("--owner needs a name")?;
                options.owner = Some(value.clone());
            }
            "--export-csv" => {
                let project_id = iter.next().ok_or("--export-csv needs a project id")?;
                let path = iter.next().ok_or("--export-csv needs an output path")?;
                options.export_csv = Some((project_id.clone(), path.clone()));
            }
            other if other.starts_with("--") => return Err(format!("unknown option '{other}'")),
            other => {
                if data_dir.is_some() {
                    return Err(format!("unexpected argument '{other}'"));
                }
                data_dir = Some(other.to_string());
            }
        }
    }

    options.data_dir = data_dir.ok_or("missing <data_dir>")?;
    Ok(Some(options))
}

fn print_summary<C: Clock>(evaluator: &Evaluator<C>, projects: &[Project]) {
    let summary = evaluator.portfolio_summary(projects);
    let completion = summary
        .completion_pct
        .map(|pct| format!("{pct}%"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Portfolio as of {} (alert window {}d)",
        evaluator.today(),
        evaluator.settings().alert_days_window
    );
    println!("  Active projects : {}", summary.active_projects);
    println!(
        "  Tasks done      : {} / {} ({})",
        summary.done_tasks, summary.total_tasks, completion
    );
    println!("  Overdue         : {}", summary.overdue_count);
    println!("  Due soon        : {}", summary.due_soon_count);
}

fn print_projects<C: Clock>(evaluator: &Evaluator<C>, projects: &[&Project]) {
    println!("\nProjects");
    for project in projects {
        let overview = evaluator.project_overview(project);
        let next = match (overview.next_deadline, overview.days_until_next_deadline) {
            (Some(date), Some(days)) => format!("next {date} ({days}d)"),
            _ => "no upcoming deadline".to_string(),
        };
        println!(
            "  [{:<6}] {:<12} {:<40} {:<12} {}/{} {:>3}%  {}",
            overview.health.as_str(),
            project.id,
            project.name,
            project.category.as_str(),
            overview.progress.done,
            overview.progress.total,
            overview.progress.pct,
            next
        );
    }
}

fn print_alerts(alerts: &[Alert<'_>]) {
    println!("\nAlerts");
    if alerts.is_empty() {
        println!("  none");
        return;
    }
    for alert in alerts {
        println!(
            "  {:<12} {:<12} #{:<3} {} {}",
            alert.alert_type.as_str(),
            alert.project_id,
            alert.task.seq,
            alert.task.name,
            if alert.task.owner.is_empty() {
                String::new()
            } else {
                format!("({})", alert.task.owner)
            }
        );
    }
}

fn print_timeline<C: Clock>(
    evaluator: &Evaluator<C>,
    layout: &TimelineLayout,
    rows: &[TimelineRow],
) {
    println!(
        "\nTimeline {} (today at {:.1}%)",
        layout.year(),
        layout.today_pct(evaluator.today())
    );
    for row in rows {
        println!("  {} {}", row.project_id, row.project_name);
        for task in &row.tasks {
            let mut parts = Vec::new();
            if let Some(bar) = task.bars.forecast {
                let tag = if task.bars.forecast_overdue {
                    "forecast!"
                } else {
                    "forecast"
                };
                parts.push(format!("{tag} {:.1}..{:.1}", bar.left_pct, bar.right_pct()));
            }
            if let Some(bar) = task.bars.actual {
                let tag = if task.bars.actual_done { "done" } else { "actual" };
                parts.push(format!("{tag} {:.1}..{:.1}", bar.left_pct, bar.right_pct()));
            }
            if let Some(bar) = task.bars.change_request {
                parts.push(format!("cr {:.1}..{:.1}", bar.left_pct, bar.right_pct()));
            }
            println!("    #{:<3} {:<30} {}", task.seq, task.name, parts.join("  "));
        }
    }
}

fn report<C: Clock>(options: &Options, settings: Settings, clock: C, projects: &[Project]) {
    let evaluator = Evaluator::with_clock(settings, clock);
    let listed = filter_by_category(projects, options.category);

    print_summary(&evaluator, projects);
    print_projects(&evaluator, &listed);
    print_alerts(&evaluator.alert_list(projects));
    if let Some((layout, rows)) = evaluator.timeline(projects, options.owner.as_deref()) {
        print_timeline(&evaluator, &layout, &rows);
    }
}

fn run(options: Options) -> Result<(), String> {
    let store = JsonFileStore::new(&options.data_dir);
    let snapshot = store.read().map_err(|e| e.to_string())?;

    let mut settings = snapshot.settings;
    if let Some(days) = options.window {
        settings = Settings::new(days).map_err(|e| e.to_string())?;
        if !settings.is_preset_window() {
            warn!(
                "alert window {days}d is not one of the presets {:?}",
                ALERT_WINDOW_PRESETS
            );
        }
    }

    match options.today {
        Some(clock) => report(&options, settings, clock, &snapshot.projects),
        None => report(&options, settings, SystemClock, &snapshot.projects),
    }

    if let Some((project_id, path)) = &options.export_csv {
        let project = snapshot
            .find_project(project_id)
            .ok_or_else(|| format!("no project with id '{project_id}'"))?;
        save_project_to_csv(project, path).map_err(|e| e.to_string())?;
        println!("\nExported {} tasks of '{}' to {}", project.tasks.len(), project_id, path);
    }
    Ok(())
}

fn main() {
    let _logger = match Logger::try_with_env_or_str("warn").and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("failed to start logger: {err}");
            None
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_help();
            return;
        }
        Err(message) => {
            eprintln!("error: {message}");
            print_help();
            process::exit(1);
        }
    };

    if let Err(message) = run(options) {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
