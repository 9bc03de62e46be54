use chrono::NaiveDate;
use milestone_kpi::{
    Evaluator, FixedClock, Health, Progress, Project, ProjectCategory, ProjectStatus, Settings,
    Task, TaskStatus, filter_by_category, next_deadline, portfolio_summary, project_health,
    project_overview, project_progress,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: &str, status: TaskStatus, forecast_deliver: &str) -> Task {
    let mut task = Task::new(id, 0, id).with_status(status);
    task.forecast_deliver = forecast_deliver.into();
    task
}

fn project(id: &str, tasks: Vec<Task>) -> Project {
    Project::new(id, id, ProjectCategory::Report, ProjectStatus::InProgress).with_tasks(tasks)
}

#[test]
fn progress_of_empty_project_is_zero() {
    assert_eq!(
        project_progress(&project("p1", vec![])),
        Progress {
            total: 0,
            done: 0,
            pct: 0
        }
    );
}

#[test]
fn progress_rounds_to_whole_percent() {
    let one_of_three = project(
        "p1",
        vec![
            task("a", TaskStatus::Done, ""),
            task("b", TaskStatus::InProgress, ""),
            task("c", TaskStatus::Cancelled, ""),
        ],
    );
    assert_eq!(project_progress(&one_of_three).pct, 33);

    let two_of_three = project(
        "p2",
        vec![
            task("a", TaskStatus::Done, ""),
            task("b", TaskStatus::Done, ""),
            task("c", TaskStatus::NotStarted, ""),
        ],
    );
    let progress = project_progress(&two_of_three);
    assert_eq!((progress.done, progress.total, progress.pct), (2, 3, 67));
}

#[test]
fn health_is_red_when_any_task_is_overdue() {
    let today = d(2024, 1, 15);
    let p = project(
        "p1",
        vec![
            task("a", TaskStatus::InProgress, "2024-01-18"),
            task("b", TaskStatus::InProgress, "2024-01-10"),
        ],
    );
    assert_eq!(project_health(&p, 7, today), Health::Red);
}

#[test]
fn health_is_yellow_for_due_soon_or_not_started() {
    let today = d(2024, 1, 15);
    let due_soon = project("p1", vec![task("a", TaskStatus::InProgress, "2024-01-18")]);
    assert_eq!(project_health(&due_soon, 7, today), Health::Yellow);

    let mut late_start = task("a", TaskStatus::NotStarted, "2024-03-01");
    late_start.forecast_start = "2024-01-02".into();
    let not_started = project("p2", vec![late_start]);
    assert_eq!(project_health(&not_started, 7, today), Health::Yellow);
}

#[test]
fn health_is_green_when_all_done_or_only_change_requests() {
    let today = d(2024, 1, 15);
    let all_done = project(
        "p1",
        vec![
            task("a", TaskStatus::Done, "2024-01-01"),
            task("b", TaskStatus::Done, "2024-01-10"),
        ],
    );
    assert_eq!(project_health(&all_done, 7, today), Health::Green);

    let mut revised = task("a", TaskStatus::InProgress, "2024-01-10");
    revised.cr_deliver = "2024-02-10".into();
    assert_eq!(project_health(&project("p2", vec![revised]), 7, today), Health::Green);

    assert_eq!(project_health(&project("p3", vec![]), 7, today), Health::Green);
}

#[test]
fn next_deadline_is_earliest_open_baseline_on_or_after_today() {
    let today = d(2024, 1, 15);
    let mut revised = task("c", TaskStatus::InProgress, "2024-01-25");
    revised.cr_deliver = "2024-01-18".into();
    let p = project(
        "p1",
        vec![
            task("a", TaskStatus::InProgress, "2024-01-10"),
            task("b", TaskStatus::InProgress, "2024-01-20"),
            revised,
            task("d", TaskStatus::Done, "2024-01-16"),
            task("e", TaskStatus::Cancelled, "2024-01-16"),
        ],
    );
    assert_eq!(next_deadline(&p, today), Some(d(2024, 1, 18)));

    let due_today = project("p2", vec![task("a", TaskStatus::NotStarted, "2024-01-15")]);
    assert_eq!(next_deadline(&due_today, today), Some(today));

    let nothing_ahead = project("p3", vec![task("a", TaskStatus::InProgress, "2024-01-01")]);
    assert_eq!(next_deadline(&nothing_ahead, today), None);
}

#[test]
fn overview_counts_alerts_and_days_until_next_deadline() {
    let today = d(2024, 1, 15);
    let p = project(
        "p1",
        vec![
            task("a", TaskStatus::InProgress, "2024-01-10"),
            task("b", TaskStatus::InProgress, "2024-01-18"),
            task("c", TaskStatus::Done, "2024-01-05"),
        ],
    );
    let overview = project_overview(&p, 7, today);
    assert_eq!(overview.health, Health::Red);
    assert_eq!(overview.progress.done, 1);
    assert_eq!(overview.next_deadline, Some(d(2024, 1, 18)));
    assert_eq!(overview.days_until_next_deadline, Some(3));
    assert_eq!(overview.overdue_count, 1);
    assert_eq!(overview.due_soon_count, 1);
}

#[test]
fn portfolio_summary_counts_across_projects() {
    let today = d(2024, 1, 15);
    let mut paused = project("p2", vec![task("a", TaskStatus::Done, "2024-01-01")]);
    paused.status = ProjectStatus::OnHold;
    let projects = vec![
        project(
            "p1",
            vec![
                task("a", TaskStatus::InProgress, "2024-01-10"),
                task("b", TaskStatus::InProgress, "2024-01-18"),
                task("c", TaskStatus::Done, "2024-01-05"),
            ],
        ),
        paused,
    ];

    let summary = portfolio_summary(&projects, 7, today);
    assert_eq!(summary.active_projects, 1);
    assert_eq!(summary.total_tasks, 4);
    assert_eq!(summary.done_tasks, 2);
    assert_eq!(summary.completion_pct, Some(50));
    assert_eq!(summary.overdue_count, 1);
    assert_eq!(summary.due_soon_count, 1);

    let empty = portfolio_summary(&[project("p1", vec![])], 7, today);
    assert_eq!(empty.completion_pct, None);
}

#[test]
fn category_filter_keeps_order() {
    let mut award = project("p2", vec![]);
    award.category = ProjectCategory::Award;
    let projects = vec![project("p1", vec![]), award, project("p3", vec![])];

    let reports: Vec<&str> = filter_by_category(&projects, Some(ProjectCategory::Report))
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(reports, vec!["p1", "p3"]);
    assert_eq!(filter_by_category(&projects, None).len(), 3);
}

#[test]
fn evaluator_matches_free_functions() {
    let today = d(2024, 1, 15);
    let p = project("p1", vec![task("a", TaskStatus::InProgress, "2024-01-18")]);
    let evaluator = Evaluator::with_clock(Settings::default(), FixedClock::new(today));

    assert_eq!(evaluator.project_health(&p), project_health(&p, 7, today));
    assert_eq!(evaluator.project_progress(&p), project_progress(&p));
    assert_eq!(evaluator.next_deadline(&p), Some(d(2024, 1, 18)));
    assert_eq!(evaluator.project_overview(&p), project_overview(&p, 7, today));
}
