use chrono::NaiveDate;
use milestone_kpi::{
    AlertType, Project, ProjectCategory, ProjectStatus, Task, TaskStatus, alerts_for_project,
    build_alert_list,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open_task(id: &str, forecast_start: &str, forecast_deliver: &str) -> Task {
    Task::new(id, 0, id)
        .with_status(TaskStatus::InProgress)
        .with_forecast(forecast_start, forecast_deliver, "")
}

fn project(id: &str, name: &str, tasks: Vec<Task>) -> Project {
    Project::new(id, name, ProjectCategory::Verification, ProjectStatus::InProgress)
        .with_tasks(tasks)
}

#[test]
fn alerts_are_ranked_by_severity() {
    let today = d(2024, 1, 15);
    let projects = vec![project(
        "p1",
        "Carbon inventory",
        vec![
            open_task("due-soon", "", "2024-01-18"),
            open_task("overdue", "", "2024-01-10"),
            open_task("not-started", "2024-01-02", "2024-03-01"),
        ],
    )];

    let kinds: Vec<AlertType> = build_alert_list(&projects, 7, today)
        .iter()
        .map(|a| a.alert_type)
        .collect();
    assert_eq!(
        kinds,
        vec![AlertType::Overdue, AlertType::DueSoon, AlertType::NotStarted]
    );
}

#[test]
fn equal_severity_keeps_project_then_task_order() {
    let today = d(2024, 1, 15);
    let mut revised = open_task("p1-cr", "", "2024-01-10");
    revised.cr_start = "2024-01-03".into();
    let projects = vec![
        project(
            "p1",
            "First",
            vec![revised, open_task("p1-late-a", "", "2024-01-11"), open_task("p1-late-b", "", "2024-01-02")],
        ),
        project("p2", "Second", vec![open_task("p2-late", "", "2024-01-12")]),
    ];

    let alerts = build_alert_list(&projects, 7, today);
    let ids: Vec<(&str, &str)> = alerts
        .iter()
        .map(|a| (a.project_id, a.task.id.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("p1", "p1-late-a"),
            ("p1", "p1-late-b"),
            ("p2", "p2-late"),
            ("p1", "p1-cr"),
        ]
    );
    assert_eq!(alerts[2].project_name, "Second");
    assert_eq!(alerts[3].alert_type, AlertType::CrActive);
}

#[test]
fn quiet_and_finished_tasks_are_left_out() {
    let today = d(2024, 1, 15);
    let done = open_task("done", "", "2024-01-10").with_status(TaskStatus::Done);
    let far = open_task("far", "", "2024-06-01");
    let projects = vec![project("p1", "Quiet", vec![done, far])];
    assert!(build_alert_list(&projects, 7, today).is_empty());
    assert!(build_alert_list(&[], 7, today).is_empty());
}

#[test]
fn alerts_can_be_narrowed_to_one_project() {
    let today = d(2024, 1, 15);
    let projects = vec![
        project("p1", "First", vec![open_task("a", "", "2024-01-10")]),
        project("p2", "Second", vec![open_task("b", "", "2024-01-16"), open_task("c", "", "2024-01-01")]),
    ];
    let alerts = build_alert_list(&projects, 7, today);
    let second = alerts_for_project(&alerts, "p2");
    let ids: Vec<&str> = second.iter().map(|a| a.task.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b"]);
    assert!(alerts_for_project(&alerts, "missing").is_empty());
}
