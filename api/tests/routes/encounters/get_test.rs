#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use api::auth::generate_jwt;
    use db::models::encounter::Model as EncounterModel;
    use db::models::user::{Model as UserModel, Role};

    use crate::helpers::app::{json_request, make_test_app, read_json};

    async fn setup(db: &sea_orm::DatabaseConnection) -> (UserModel, String) {
        let admin = UserModel::create(db, "director", "d@club.test", "pw", Role::Admin)
            .await
            .unwrap();
        let token = generate_jwt(admin.id, admin.role).0;
        (admin, token)
    }

    #[tokio::test]
    async fn test_list_encounters_newest_first_with_filters() {
        let (app, app_state) = make_test_app().await;
        let (admin, token) = setup(app_state.db()).await;
        let db = app_state.db();

        let a = EncounterModel::create(db, "2025-05-04".parse().unwrap(), None, admin.id)
            .await
            .unwrap();
        let b = EncounterModel::create(db, "2025-05-11".parse().unwrap(), None, admin.id)
            .await
            .unwrap();
        let c = EncounterModel::create(db, "2025-05-18".parse().unwrap(), None, admin.id)
            .await
            .unwrap();
        assert!(EncounterModel::start(db, b.id).await.unwrap());

        let resp = app
            .clone()
            .oneshot(json_request("GET", "/api/encounters", Some(&token), None))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::OK).await;
        assert_eq!(body["data"]["total"], 3);
        let ids: Vec<i64> = body["data"]["encounters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![c.id, b.id, a.id], "newest first");

        // Status filter.
        let resp = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/encounters?status=in_progress",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::OK).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["encounters"][0]["id"], b.id);

        // Inclusive date range.
        let resp = app
            .oneshot(json_request(
                "GET",
                "/api/encounters?from=2025-05-11&to=2025-05-18",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::OK).await;
        assert_eq!(body["data"]["total"], 2);
    }

    #[tokio::test]
    async fn test_get_encounter_detail_and_not_found() {
        let (app, app_state) = make_test_app().await;
        let (admin, token) = setup(app_state.db()).await;

        let enc = EncounterModel::create(
            app_state.db(),
            "2025-06-01".parse().unwrap(),
            Some("Opening"),
            admin.id,
        )
        .await
        .unwrap();

        let uri = format!("/api/encounters/{}", enc.id);
        let resp = app
            .clone()
            .oneshot(json_request("GET", &uri, Some(&token), None))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::OK).await;
        assert_eq!(body["data"]["description"], "Opening");
        assert_eq!(body["data"]["created_by"], admin.id);

        let resp = app
            .oneshot(json_request("GET", "/api/encounters/999", Some(&token), None))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::NOT_FOUND).await;
        assert_eq!(body["message"], "Encounter not found");
    }

    #[tokio::test]
    async fn test_list_requires_authentication() {
        let (app, _state) = make_test_app().await;

        let resp = app
            .oneshot(json_request("GET", "/api/encounters", None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
