#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use db::models::{unit::Model as UnitModel, unit_counselor::Model as UnitCounselorModel,
        user::{Model as UserModel, Role}};

    use crate::helpers::app::{json_request, make_test_app, read_json};

    #[tokio::test]
    async fn test_login_issues_usable_token() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        UserModel::create(db, "director", "director@club.test", "secret-pass", Role::Admin)
            .await
            .unwrap();

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "director", "password": "secret-pass" })),
        );
        let resp = app.clone().oneshot(req).await.unwrap();
        let body = read_json(resp, StatusCode::OK).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["role"], "admin");

        let token = body["data"]["token"].as_str().unwrap().to_owned();

        // The issued token resolves the current actor.
        let req = json_request("GET", "/api/auth/me", Some(&token), None);
        let resp = app.oneshot(req).await.unwrap();
        let body = read_json(resp, StatusCode::OK).await;
        assert_eq!(body["data"]["username"], "director");
        assert_eq!(body["data"]["unit"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        UserModel::create(db, "director", "director@club.test", "secret-pass", Role::Admin)
            .await
            .unwrap();

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "director", "password": "wrong" })),
        );
        let resp = app.oneshot(req).await.unwrap();
        let body = read_json(resp, StatusCode::UNAUTHORIZED).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_me_resolves_counselor_unit_linkage() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let counselor = UserModel::create(db, "counselor1", "c1@club.test", "pw", Role::Counselor)
            .await
            .unwrap();
        let unit = UnitModel::create(db, "Falcão", Some("azul")).await.unwrap();
        UnitCounselorModel::assign(db, counselor.id, unit.id, true)
            .await
            .unwrap();

        let (token, _) = api::auth::generate_jwt(counselor.id, counselor.role);
        let req = json_request("GET", "/api/auth/me", Some(&token), None);
        let resp = app.oneshot(req).await.unwrap();
        let body = read_json(resp, StatusCode::OK).await;

        assert_eq!(body["data"]["role"], "counselor");
        assert_eq!(body["data"]["unit"]["unit_id"], unit.id);
        assert_eq!(body["data"]["unit"]["unit_name"], "Falcão");
        assert_eq!(body["data"]["unit"]["principal"], true);
    }

    #[tokio::test]
    async fn test_me_requires_authentication() {
        let (app, _state) = make_test_app().await;

        let req = json_request("GET", "/api/auth/me", None, None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
