use app::database::Database;

use crate::rate_limit::RateLimit;

pub struct RocketState {
    pub db: Database,
    pub rate_limit: RateLimit,
}
