//! HTTP Integration Tests for the search endpoint

#[cfg(test)]
mod http_integration_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::AppState;
    use crate::config::Config;
    use crate::handlers::configure_search_routes;
    use crate::models::UserSuggestion;
    use crate::services::stats::test_support::FakeGitHub;
    use crate::services::{ImageProxyService, RatingMatcher, RatingTable, StatsService};

    fn create_test_app_state(github: FakeGitHub) -> web::Data<AppState> {
        web::Data::new(AppState {
            config: Config::default(),
            stats: StatsService::new(
                Arc::new(github),
                RatingMatcher::with_seed(Arc::new(RatingTable::empty()), 1),
            ),
            image_proxy: ImageProxyService::new(Duration::from_secs(5))
                .expect("Failed to build image proxy"),
        })
    }

    #[actix_rt::test]
    async fn http_search_returns_suggestions() {
        let github = FakeGitHub {
            suggestions: vec![
                UserSuggestion {
                    login: "octocat".to_string(),
                    avatar_url: Some("https://avatars.example.com/octocat".to_string()),
                },
                UserSuggestion {
                    login: "octokit".to_string(),
                    avatar_url: None,
                },
            ],
            ..FakeGitHub::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state(github))
                .configure(configure_search_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/search/octo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let items = body.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["login"], "octocat");
        assert_eq!(items[0]["avatar_url"], "https://avatars.example.com/octocat");
        assert!(items[1]["avatar_url"].is_null());
    }

    #[actix_rt::test]
    async fn http_blank_search_returns_empty_list() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state(FakeGitHub::default()))
                .configure(configure_search_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/search/%20%20").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, Value::Array(vec![]));
    }
}
