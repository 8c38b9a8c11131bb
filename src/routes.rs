use crate::{
    api::{calculation, city, salary},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/cities")
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(city::list_cities)),
                    )
                    .service(
                        web::resource("/import")
                            .wrap(build_limiter(config.rate_import_per_min))
                            .route(web::post().to(city::import_cities)),
                    ),
            )
            .service(
                web::scope("/salaries")
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(salary::list_salaries)),
                    )
                    .service(
                        web::resource("/import")
                            .wrap(build_limiter(config.rate_import_per_min))
                            .route(web::post().to(salary::import_salaries)),
                    ),
            )
            .service(
                web::scope("/calculations").service(
                    web::resource("")
                        .wrap(build_limiter(config.rate_calc_per_min))
                        .route(web::post().to(calculation::run_calculation)),
                ),
            )
            .service(
                web::scope("/results")
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(calculation::list_results)),
                    )
                    .service(
                        web::resource("/report")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(calculation::results_report)),
                    ),
            ),
    );
}
