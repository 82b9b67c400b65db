use std::time::Duration;

use app::database::{self, run_migrations};
use rocket::{launch, Build, Rocket};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct Config {
    database_url: Url,
    rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize)]
struct RateLimitConfig {
    limit: usize,
    span: Duration,
}

impl RateLimitConfig {
    fn into_rate_limit(self) -> api::RateLimit {
        api::RateLimit::new(self.limit, self.span)
    }
}

#[launch]
async fn rocket() -> _ {
    start_server().await
}

async fn start_server() -> Rocket<Build> {
    env_logger::init();

    let rocket = Rocket::build();
    let config: Config = rocket.figment().extract().unwrap();

    let db = database::connect(&config.database_url).await;

    run_migrations(&db).await;
    #[cfg(debug_assertions)]
    database::seed_development_data(&db).await;

    api::register(rocket, db, config.rate_limit.into_rate_limit())
}
