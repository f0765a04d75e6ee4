#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use api::auth::generate_jwt;
    use db::models::encounter::Model as EncounterModel;
    use db::models::user::{Model as UserModel, Role};

    use crate::helpers::app::{json_request, make_test_app, read_json};

    struct TestCtx {
        admin: UserModel,
        admin_token: String,
        counselor_token: String,
    }

    async fn setup(db: &sea_orm::DatabaseConnection) -> TestCtx {
        let admin = UserModel::create(db, "director", "d@club.test", "pw", Role::Admin)
            .await
            .unwrap();
        let counselor = UserModel::create(db, "counselor", "c@club.test", "pw", Role::Counselor)
            .await
            .unwrap();

        let admin_token = generate_jwt(admin.id, admin.role).0;
        let counselor_token = generate_jwt(counselor.id, counselor.role).0;
        TestCtx {
            admin,
            admin_token,
            counselor_token,
        }
    }

    #[tokio::test]
    async fn test_edit_encounter_updates_date_and_description() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;
        let enc = EncounterModel::create(
            app_state.db(),
            "2025-06-01".parse().unwrap(),
            Some("Opening"),
            ctx.admin.id,
        )
        .await
        .unwrap();

        let uri = format!("/api/encounters/{}", enc.id);
        let body = json!({ "event_date": "2025-06-02", "description": "Moved to Sunday" });
        let resp = app
            .oneshot(json_request("PUT", &uri, Some(&ctx.admin_token), Some(body)))
            .await
            .unwrap();
        let updated = read_json(resp, StatusCode::OK).await;
        assert_eq!(updated["data"]["event_date"], "2025-06-02");
        assert_eq!(updated["data"]["description"], "Moved to Sunday");

        let row = EncounterModel::get(app_state.db(), enc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.event_date.to_string(), "2025-06-02");
    }

    #[tokio::test]
    async fn test_edit_encounter_duplicate_date_conflict() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;
        let db = app_state.db();

        EncounterModel::create(db, "2025-06-01".parse().unwrap(), None, ctx.admin.id)
            .await
            .unwrap();
        let b = EncounterModel::create(db, "2025-06-08".parse().unwrap(), None, ctx.admin.id)
            .await
            .unwrap();

        let uri = format!("/api/encounters/{}", b.id);
        let resp = app
            .oneshot(json_request(
                "PUT",
                &uri,
                Some(&ctx.admin_token),
                Some(json!({ "event_date": "2025-06-01" })),
            ))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::CONFLICT).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_edit_finalized_encounter_is_refused() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;
        let db = app_state.db();

        let enc = EncounterModel::create(db, "2025-06-01".parse().unwrap(), None, ctx.admin.id)
            .await
            .unwrap();
        assert!(EncounterModel::start(db, enc.id).await.unwrap());
        assert!(EncounterModel::finish(db, enc.id).await.unwrap());

        let uri = format!("/api/encounters/{}", enc.id);
        let resp = app
            .oneshot(json_request(
                "PUT",
                &uri,
                Some(&ctx.admin_token),
                Some(json!({ "description": "too late" })),
            ))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::CONFLICT).await;
        assert!(body["message"].as_str().unwrap().contains("finalized"));
    }

    #[tokio::test]
    async fn test_edit_encounter_not_found_and_forbidden() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/encounters/999",
                Some(&ctx.admin_token),
                Some(json!({ "description": "X" })),
            ))
            .await
            .unwrap();
        read_json(resp, StatusCode::NOT_FOUND).await;

        let resp = app
            .oneshot(json_request(
                "PUT",
                "/api/encounters/999",
                Some(&ctx.counselor_token),
                Some(json!({ "description": "X" })),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
