//! HTTP Integration Tests for the image proxy endpoint
//!
//! Only request validation is covered here; fetching needs a live host.

#[cfg(test)]
mod http_integration_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::AppState;
    use crate::config::Config;
    use crate::handlers::configure_image_proxy_routes;
    use crate::services::stats::test_support::FakeGitHub;
    use crate::services::{ImageProxyService, RatingMatcher, RatingTable, StatsService};

    fn create_test_app_state() -> web::Data<AppState> {
        web::Data::new(AppState {
            config: Config::default(),
            stats: StatsService::new(
                Arc::new(FakeGitHub::default()),
                RatingMatcher::with_seed(Arc::new(RatingTable::empty()), 1),
            ),
            image_proxy: ImageProxyService::new(Duration::from_secs(5))
                .expect("Failed to build image proxy"),
        })
    }

    #[actix_rt::test]
    async fn http_missing_url_returns_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .configure(configure_image_proxy_routes),
        )
        .await;

        for uri in ["/api/image-proxy", "/api/image-proxy?url="] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[actix_rt::test]
    async fn http_non_http_url_returns_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .configure(configure_image_proxy_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/image-proxy?url=file%3A%2F%2F%2Fetc%2Fpasswd")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
