use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC instant with the sub-second part dropped
pub fn now_to_second() -> DateTime<Utc> {
    truncate_to_second(Utc::now())
}

pub fn truncate_to_second(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(0)
}
