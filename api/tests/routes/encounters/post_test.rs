#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use api::auth::generate_jwt;
    use db::models::user::{Model as UserModel, Role};

    use crate::helpers::app::{json_request, make_test_app, read_json};

    struct TestCtx {
        admin_token: String,
        secretariat_token: String,
        treasurer_token: String,
        counselor_token: String,
    }

    async fn setup(db: &sea_orm::DatabaseConnection) -> TestCtx {
        let admin = UserModel::create(db, "director", "d@club.test", "pw", Role::Admin)
            .await
            .unwrap();
        let secretariat = UserModel::create(db, "secretary", "s@club.test", "pw", Role::Secretariat)
            .await
            .unwrap();
        let treasurer = UserModel::create(db, "treasurer", "t@club.test", "pw", Role::Treasurer)
            .await
            .unwrap();
        let counselor = UserModel::create(db, "counselor", "c@club.test", "pw", Role::Counselor)
            .await
            .unwrap();

        TestCtx {
            admin_token: generate_jwt(admin.id, admin.role).0,
            secretariat_token: generate_jwt(secretariat.id, secretariat.role).0,
            treasurer_token: generate_jwt(treasurer.id, treasurer.role).0,
            counselor_token: generate_jwt(counselor.id, counselor.role).0,
        }
    }

    #[tokio::test]
    async fn test_create_encounter_ok_then_duplicate_date_conflict() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        let body = json!({ "event_date": "2025-06-01", "description": "Opening" });
        let req = json_request(
            "POST",
            "/api/encounters",
            Some(&ctx.admin_token),
            Some(body.clone()),
        );
        let resp = app.clone().oneshot(req).await.unwrap();
        let created = read_json(resp, StatusCode::CREATED).await;
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["status"], "scheduled");
        assert_eq!(created["data"]["event_date"], "2025-06-01");

        // Same date again, even from another authorized actor: refused.
        let req = json_request(
            "POST",
            "/api/encounters",
            Some(&ctx.secretariat_token),
            Some(json!({ "event_date": "2025-06-01" })),
        );
        let resp = app.oneshot(req).await.unwrap();
        let dup = read_json(resp, StatusCode::CONFLICT).await;
        assert_eq!(dup["success"], false);
        assert!(dup["message"].as_str().unwrap().contains("2025-06-01"));
    }

    #[tokio::test]
    async fn test_create_encounter_forbidden_for_treasurer_and_counselor() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        for token in [&ctx.treasurer_token, &ctx.counselor_token] {
            let req = json_request(
                "POST",
                "/api/encounters",
                Some(token),
                Some(json!({ "event_date": "2025-06-01" })),
            );
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn test_create_encounter_requires_authentication() {
        let (app, _state) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/encounters",
            None,
            Some(json!({ "event_date": "2025-06-01" })),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_start_twice_reports_conflict_and_keeps_in_progress() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/encounters",
            Some(&ctx.admin_token),
            Some(json!({ "event_date": "2025-06-01" })),
        );
        let resp = app.clone().oneshot(req).await.unwrap();
        let created = read_json(resp, StatusCode::CREATED).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let uri = format!("/api/encounters/{id}/start");
        let resp = app
            .clone()
            .oneshot(json_request("POST", &uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        let started = read_json(resp, StatusCode::OK).await;
        assert_eq!(started["data"]["status"], "in_progress");

        // A second start (e.g. a concurrent actor refreshing late) fails.
        let resp = app
            .clone()
            .oneshot(json_request("POST", &uri, Some(&ctx.secretariat_token), None))
            .await
            .unwrap();
        read_json(resp, StatusCode::CONFLICT).await;

        let detail_uri = format!("/api/encounters/{id}");
        let resp = app
            .oneshot(json_request("GET", &detail_uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        let detail = read_json(resp, StatusCode::OK).await;
        assert_eq!(detail["data"]["status"], "in_progress");
    }

    #[tokio::test]
    async fn test_finish_requires_in_progress() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/encounters",
                Some(&ctx.admin_token),
                Some(json!({ "event_date": "2025-06-01" })),
            ))
            .await
            .unwrap();
        let created = read_json(resp, StatusCode::CREATED).await;
        let id = created["data"]["id"].as_i64().unwrap();

        // Finishing a scheduled encounter skips in_progress: refused.
        let finish_uri = format!("/api/encounters/{id}/finish");
        let resp = app
            .clone()
            .oneshot(json_request("POST", &finish_uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        read_json(resp, StatusCode::CONFLICT).await;

        let start_uri = format!("/api/encounters/{id}/start");
        let resp = app
            .clone()
            .oneshot(json_request("POST", &start_uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        read_json(resp, StatusCode::OK).await;

        let resp = app
            .clone()
            .oneshot(json_request("POST", &finish_uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        let finished = read_json(resp, StatusCode::OK).await;
        assert_eq!(finished["data"]["status"], "finalized");

        // No transition out of finalized.
        let resp = app
            .oneshot(json_request("POST", &start_uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        read_json(resp, StatusCode::CONFLICT).await;
    }

    #[tokio::test]
    async fn test_start_missing_encounter_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        let resp = app
            .oneshot(json_request(
                "POST",
                "/api/encounters/999/start",
                Some(&ctx.admin_token),
                None,
            ))
            .await
            .unwrap();
        read_json(resp, StatusCode::NOT_FOUND).await;
    }
}
