pub mod alert;
pub mod efficiency;
pub mod timeliness;

pub use alert::{AlertType, task_alert};
pub use efficiency::{EffortEfficiency, effort_efficiency};
pub use timeliness::{DeliveryTimeliness, delivery_timeliness};
