pub mod aggregate;
pub mod alert_list;
pub mod calculations;
pub mod dates;
pub mod evaluator;
pub mod persistence;
pub mod project;
pub mod settings;
pub mod task;
pub mod timeline;

pub use aggregate::{
    Health, PortfolioSummary, Progress, ProjectOverview, next_deadline, portfolio_summary,
    project_health, project_overview, project_progress,
};
pub use alert_list::{Alert, alerts_for_project, build_alert_list};
pub use calculations::{
    AlertType, DeliveryTimeliness, EffortEfficiency, delivery_timeliness, effort_efficiency,
    task_alert,
};
pub use dates::{Clock, FixedClock, SystemClock, days_between, parse_date};
pub use evaluator::Evaluator;
pub use persistence::{
    JsonFileStore, MemoryStore, ProjectStore, Snapshot, StoreError, StoreResult,
    save_project_to_csv, validate_snapshot, write_project_csv,
};
pub use project::{Project, ProjectCategory, ProjectStatus, filter_by_category};
pub use settings::{Settings, SettingsError};
pub use task::{ParseEnumError, Task, TaskStatus};
pub use timeline::{Bar, MIN_VISIBLE_WIDTH_PCT, MonthColumn, TaskBars, TimelineLayout, owners};
