use crate::api::problem::Problem;
use crate::api::{create_router, resolve_number, ApiError, AppState};
use crate::facts::{FactFetcher, FALLBACK_FUN_FACT};
use crate::{ClassificationResult, ClassifyError, ClassifyResult, NumberProperty};

mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use mockall::mock;
    use mockall::predicate::*;
    use std::sync::Arc;
    use tower::ServiceExt;

    mock! {
        pub FactFetcherMock {}
        #[async_trait::async_trait]
        impl FactFetcher for FactFetcherMock {
            async fn fetch(&self, number: u32) -> ClassifyResult<String>;
        }
    }

    fn state_with_fact(number: u32, fact: &'static str) -> AppState {
        let mut fetcher = MockFactFetcherMock::new();
        fetcher
            .expect_fetch()
            .with(eq(number))
            .times(1)
            .returning(move |_| Ok(fact.to_string()));
        AppState::new(Some(Arc::new(fetcher)))
    }

    fn state_without_lookup() -> AppState {
        let mut fetcher = MockFactFetcherMock::new();
        fetcher.expect_fetch().never();
        AppState::new(Some(Arc::new(fetcher)))
    }

    async fn get(state: AppState, uri: &str) -> Response {
        let app = create_router(state);
        let request = Request::get(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn response_to_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn classification(response: Response) -> ClassificationResult {
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = response_to_bytes(response).await;
        serde_json::from_slice(&body).unwrap()
    }

    async fn problem(response: Response) -> Problem {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
        let body = response_to_bytes(response).await;
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get(AppState::new(None), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_classify_perfect_number() {
        let state = state_with_fact(28, "28 is the second perfect number.");
        let result = classification(get(state, "/api/numbers/classify/28").await).await;

        assert_eq!(result.number, 28);
        assert!(!result.is_prime);
        assert!(result.is_perfect);
        assert!(!result.is_armstrong);
        assert_eq!(result.properties, vec![NumberProperty::Even]);
        assert_eq!(result.digit_sum, 10);
        assert_eq!(
            result.fun_fact.as_deref(),
            Some("28 is the second perfect number.")
        );
    }

    #[tokio::test]
    async fn test_classify_armstrong_number() {
        let state = state_with_fact(153, "153 is a narcissistic number.");
        let result = classification(get(state, "/api/numbers/classify/153").await).await;

        assert!(!result.is_prime);
        assert!(!result.is_perfect);
        assert!(result.is_armstrong);
        assert_eq!(
            result.properties,
            vec![NumberProperty::Armstrong, NumberProperty::Odd]
        );
    }

    #[tokio::test]
    async fn test_classify_prime_number() {
        let state = state_with_fact(7, "7 is prime.");
        let result = classification(get(state, "/api/numbers/classify/7").await).await;

        assert!(result.is_prime);
        assert!(!result.is_perfect);
        assert!(result.properties.contains(&NumberProperty::Odd));
    }

    #[tokio::test]
    async fn test_classify_negative_number_looks_up_magnitude() {
        let state = state_with_fact(153, "153 is a narcissistic number.");
        let result = classification(get(state, "/api/numbers/classify/-153").await).await;

        assert_eq!(result.number, -153);
        assert!(result.is_armstrong);
        assert_eq!(result.digit_sum, 9);
    }

    #[tokio::test]
    async fn test_query_parameter_fallback() {
        let state = state_with_fact(6, "6 is perfect.");
        let result = classification(get(state, "/api/numbers/classify?number=6").await).await;

        assert_eq!(result.number, 6);
        assert!(result.is_perfect);
    }

    #[tokio::test]
    async fn test_path_takes_precedence_over_query() {
        let state = state_with_fact(7, "7 is prime.");
        let result =
            classification(get(state, "/api/numbers/classify/7?number=28").await).await;

        assert_eq!(result.number, 7);
    }

    #[tokio::test]
    async fn test_invalid_path_is_not_rescued_by_query() {
        let problem = problem(
            get(state_without_lookup(), "/api/numbers/classify/abc?number=28").await,
        )
        .await;

        assert_eq!(problem.errors["number"], vec!["The value 'abc' is not valid."]);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_not_rescued_by_query() {
        let problem = problem(
            get(state_without_lookup(), "/api/numbers/classify/%FF?number=28").await,
        )
        .await;

        assert_eq!(problem.errors["number"], vec!["The value '%FF' is not valid."]);
    }

    #[tokio::test]
    async fn test_trailing_slash_falls_back_to_query() {
        let state = state_with_fact(28, "28 is perfect.");
        let result = classification(get(state, "/api/numbers/classify/?number=28").await).await;

        assert_eq!(result.number, 28);
        assert!(result.is_perfect);
    }

    #[tokio::test]
    async fn test_non_numeric_input_is_rejected() {
        let problem = problem(get(state_without_lookup(), "/api/numbers/classify/abc").await).await;

        assert_eq!(
            problem.type_url,
            "https://tools.ietf.org/html/rfc9110#section-15.5.1"
        );
        assert_eq!(problem.title, "One or more validation errors occurred.");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.errors.len(), 1);
        assert_eq!(problem.errors["number"], vec!["The value 'abc' is not valid."]);
    }

    #[tokio::test]
    async fn test_missing_number_is_rejected() {
        for uri in [
            "/api/numbers/classify",
            "/api/numbers/classify/",
            "/api/numbers/classify/?number=",
            "/api/numbers/classify?number=",
            "/api/numbers/classify?other=5",
        ] {
            let problem = problem(get(state_without_lookup(), uri).await).await;
            assert_eq!(
                problem.errors["number"],
                vec!["The number field is required."],
                "uri {}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_non_integer_input_is_rejected() {
        for uri in [
            "/api/numbers/classify/3.5",
            "/api/numbers/classify/2147483648",
            "/api/numbers/classify?number=1e3",
        ] {
            let response = get(state_without_lookup(), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        }
    }

    #[tokio::test]
    async fn test_fact_service_failure_falls_back() {
        let mut fetcher = MockFactFetcherMock::new();
        fetcher
            .expect_fetch()
            .with(eq(5))
            .times(1)
            .returning(|_| Err(ClassifyError::HttpError("connection refused".to_string())));

        let state = AppState::new(Some(Arc::new(fetcher)));
        let result = classification(get(state, "/api/numbers/classify/5").await).await;

        assert!(result.is_prime);
        assert_eq!(result.fun_fact.as_deref(), Some(FALLBACK_FUN_FACT));
    }

    #[tokio::test]
    async fn test_disabled_lookup_omits_fun_fact() {
        let response = get(AppState::new(None), "/api/numbers/classify/28").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_to_bytes(response).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["number"], 28);
        assert_eq!(json["is_perfect"], true);
        assert!(json.get("fun_fact").is_none());
    }

    #[tokio::test]
    async fn test_response_is_pretty_printed() {
        let response = get(AppState::new(None), "/api/numbers/classify/7").await;
        let body = String::from_utf8(response_to_bytes(response).await).unwrap();

        assert!(body.starts_with("{\n  \"number\": 7,"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = create_router(AppState::new(None));
        let request = Request::get("/api/numbers/classify/7")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[test]
    fn test_resolve_number() {
        assert_eq!(resolve_number(Some("42".to_string()), None).unwrap(), 42);
        assert_eq!(resolve_number(Some(" -7 ".to_string()), None).unwrap(), -7);
        assert_eq!(resolve_number(None, Some("a=1&number=13")).unwrap(), 13);
        assert_eq!(resolve_number(None, Some("number=%2D3")).unwrap(), -3);
        assert_eq!(
            resolve_number(Some("1".to_string()), Some("number=2")).unwrap(),
            1
        );

        assert!(matches!(
            resolve_number(None, None),
            Err(ApiError::Validation(message)) if message == "The number field is required."
        ));
        assert!(matches!(
            resolve_number(Some("seven".to_string()), None),
            Err(ApiError::Validation(message)) if message == "The value 'seven' is not valid."
        ));
    }
}
