//! Background jobs driven by `tokio-cron-scheduler`.

pub mod recommendation_refresh;
