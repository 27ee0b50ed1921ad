//! HTTP Integration Tests for the stats endpoint
//!
//! Exercise GET /api/stats/{username} against an in-memory GitHub double.

#[cfg(test)]
mod http_integration_tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::Utc;
    use serde_json::{Value, json};

    use crate::AppState;
    use crate::config::Config;
    use crate::handlers::configure_stats_routes;
    use crate::models::ReferenceEntity;
    use crate::services::stats::test_support::{FakeAccount, FakeGitHub, veteran};
    use crate::services::{ImageProxyService, RatingMatcher, RatingTable, StatsService};

    /// Create test app state around a GitHub double and rating table
    fn create_test_app_state(github: FakeGitHub, table: RatingTable) -> web::Data<AppState> {
        let matcher = RatingMatcher::with_seed(Arc::new(table), 5);
        web::Data::new(AppState {
            config: Config::default(),
            stats: StatsService::new(Arc::new(github), matcher),
            image_proxy: ImageProxyService::new(Duration::from_secs(5))
                .expect("Failed to build image proxy"),
        })
    }

    fn rating_table(key: &str, name: &str) -> RatingTable {
        let mut buckets = HashMap::new();
        buckets.insert(
            key.to_string(),
            vec![ReferenceEntity::new(json!({ "name": name, "rating": key }))],
        );
        RatingTable::new(buckets)
    }

    #[actix_rt::test]
    async fn http_stats_returns_scored_profile() {
        let state = create_test_app_state(
            FakeGitHub::default().with_account(veteran("octocat")),
            RatingTable::empty(),
        );
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(configure_stats_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/stats/OctoCat")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "octocat");
        assert_eq!(body["followers"], 999);
        assert_eq!(body["public_repos"], 99);
        assert_eq!(body["totalStars"], 9_999);
        assert_eq!(body["totalCommits"], 9_999);
        assert_eq!(body["activeDays"], 200);
        assert!(body["sofascoreMatch"].is_null());

        let final_score = body["finalScore"].as_str().expect("finalScore is a string");
        let (whole, fraction) = final_score.split_once('.').expect("one decimal");
        assert_eq!(fraction.len(), 1);
        assert!(whole.parse::<u8>().unwrap() <= 10);

        for key in ["popularity", "impact", "activity", "tenure", "volume", "consistency"] {
            let sub = body["breakdown"][key].as_f64().expect("sub-score present");
            assert!((0.0..=10.0).contains(&sub), "{key} = {sub}");
        }
    }

    #[actix_rt::test]
    async fn http_stats_includes_rating_match() {
        let account = FakeAccount::new("fresh", Utc::now() - chrono::Duration::minutes(5));
        let state = create_test_app_state(
            FakeGitHub::default().with_account(account),
            rating_table("0.0", "Benchwarmer"),
        );
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(configure_stats_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats/fresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["finalScore"], "0.0");
        assert_eq!(body["yearsOnGitHub"], "0.0");
        assert_eq!(body["sofascoreMatch"]["name"], "Benchwarmer");
    }

    #[actix_rt::test]
    async fn http_unknown_user_returns_not_found() {
        let state = create_test_app_state(FakeGitHub::default(), RatingTable::empty());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(configure_stats_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/stats/no-such-user")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[actix_rt::test]
    async fn http_upstream_failure_returns_bad_gateway() {
        let github = FakeGitHub {
            fail_commits: true,
            ..FakeGitHub::default()
        }
        .with_account(veteran("octocat"));
        let state = create_test_app_state(github, RatingTable::empty());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(configure_stats_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats/octocat").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[actix_rt::test]
    async fn http_override_profile_served_without_github() {
        let state = create_test_app_state(FakeGitHub::default(), rating_table("10.0", "Legend"));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(configure_stats_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/stats/Cristiano%20Ronaldo")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "cristiano");
        assert_eq!(body["finalScore"], "10.0");
        assert_eq!(body["yearsOnGitHub"], "22.0");
        assert_eq!(body["sofascoreMatch"]["name"], "Legend");
        assert!(body.get("breakdown").is_none());
    }
}
