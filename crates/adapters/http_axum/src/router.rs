//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use foodhub_app::ports::{PasswordHasher, Repository, TokenIssuer, UserRepository};
use foodhub_domain::comment::Comment;
use foodhub_domain::food::Food;
use foodhub_domain::food_type::FoodType;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` next to a plain `/health` check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<FTR, FR, CR, UR, PH, TI>(state: AppState<FTR, FR, CR, UR, PH, TI>) -> Router
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use foodhub_app::ports::TokenPair;
    use foodhub_app::services::{AuthService, ResourceService};
    use foodhub_domain::error::{AuthError, FoodHubError};
    use foodhub_domain::id::UserId;
    use foodhub_domain::permission::{AllowAny, IsAdminUser, IsCreator};
    use foodhub_domain::resource::Resource;
    use foodhub_domain::user::User;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct StubRepo;
    struct StubUserRepo;
    struct StubHasher;
    struct StubTokens;

    impl<T: Resource> Repository<T> for StubRepo {
        async fn create(&self, item: T) -> Result<T, FoodHubError> {
            Ok(item)
        }
        async fn get_by_id(&self, _id: T::Id) -> Result<Option<T>, FoodHubError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<T>, FoodHubError> {
            Ok(vec![])
        }
        async fn update(&self, item: T) -> Result<T, FoodHubError> {
            Ok(item)
        }
        async fn delete(&self, _id: T::Id) -> Result<(), FoodHubError> {
            Ok(())
        }
    }

    impl UserRepository for StubUserRepo {
        async fn create(&self, user: User) -> Result<User, FoodHubError> {
            Ok(user)
        }
        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, FoodHubError> {
            Ok(None)
        }
        async fn get_by_username(&self, _username: &str) -> Result<Option<User>, FoodHubError> {
            Ok(None)
        }
    }

    impl PasswordHasher for StubHasher {
        async fn hash(&self, password: String) -> Result<String, FoodHubError> {
            Ok(password)
        }
        async fn verify(&self, password: String, hash: String) -> Result<bool, FoodHubError> {
            Ok(password == hash)
        }
    }

    impl TokenIssuer for StubTokens {
        fn issue_pair(&self, _user: &User) -> Result<TokenPair, FoodHubError> {
            Ok(TokenPair {
                access: "access".to_string(),
                refresh: "refresh".to_string(),
            })
        }
        fn refresh_access(&self, _refresh_token: &str) -> Result<String, FoodHubError> {
            Err(AuthError::InvalidToken.into())
        }
        fn verify_access(&self, _access_token: &str) -> Result<UserId, FoodHubError> {
            Err(AuthError::InvalidToken.into())
        }
    }

    fn app() -> Router {
        build(AppState::new(
            ResourceService::new(StubRepo, AllowAny),
            ResourceService::new(StubRepo, IsAdminUser),
            ResourceService::new(StubRepo, IsCreator),
            AuthService::new(StubUserRepo, StubHasher, StubTokens),
        ))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn should_list_food_types_when_anonymous() {
        let response = app().oneshot(get("/api/food-types")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_challenge_anonymous_food_listing() {
        let response = app().oneshot(get("/api/foods")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            r#"Bearer realm="api""#
        );
    }

    #[tokio::test]
    async fn should_return_not_found_when_path_id_malformed() {
        let response = app()
            .oneshot(get("/api/food-types/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_check_permission_before_malformed_path_id() {
        let response = app().oneshot(get("/api/foods/not-a-uuid")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_malformed_json_body() {
        let response = app()
            .oneshot(post_json("/api/food-types", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["fields"]["non_field_errors"].is_array());
    }

    #[tokio::test]
    async fn should_refuse_anonymous_writes_before_reading_body() {
        for (uri, body) in [
            ("/api/foods", "{}"),
            ("/api/foods", "{not json"),
            ("/api/comments", "{}"),
            ("/api/comments", r#"{"body": 42}"#),
        ] {
            let response = app().oneshot(post_json(uri, body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri} {body}");
        }
    }

    #[tokio::test]
    async fn should_name_missing_field_when_body_empty() {
        let response = app()
            .oneshot(post_json("/api/food-types", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["fields"]["name"], serde_json::json!(["this field is required"]));
    }

    #[tokio::test]
    async fn should_name_field_with_wrong_type() {
        let response = app()
            .oneshot(post_json("/api/food-types", r#"{"name": 42}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["fields"]["name"], serde_json::json!(["enter a valid value"]));
    }

    #[tokio::test]
    async fn should_list_every_missing_registration_field() {
        let response = app().oneshot(post_json("/api/register", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        for field in ["username", "password", "password2"] {
            assert_eq!(
                body["fields"][field],
                serde_json::json!(["this field is required"]),
                "{field}"
            );
        }
    }

    #[tokio::test]
    async fn should_require_refresh_token() {
        let response = app()
            .oneshot(post_json("/api/token/refresh", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["fields"]["refresh"].is_array());
    }

    #[tokio::test]
    async fn should_reject_request_when_bearer_token_invalid() {
        let request = Request::builder()
            .uri("/api/food-types")
            .header(header::AUTHORIZATION, "Bearer forged")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_return_tokens_when_registration_valid() {
        let response = app()
            .oneshot(post_json(
                "/api/register",
                r#"{"username":"alice","password":"s3cret-pass","password2":"s3cret-pass"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["access_token"], "access");
        assert_eq!(body["refresh_token"], "refresh");
    }

    #[tokio::test]
    async fn should_return_created_when_food_type_posted() {
        let response = app()
            .oneshot(post_json("/api/food-types", r#"{"name":"Soup"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["name"], "Soup");
    }
}
