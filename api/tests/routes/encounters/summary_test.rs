#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use api::auth::generate_jwt;
    use db::models::encounter::Model as EncounterModel;
    use db::models::member::Model as MemberModel;
    use db::models::unit::Model as UnitModel;
    use db::models::user::{Model as UserModel, Role};

    use crate::helpers::app::{json_request, make_test_app, read_json};

    #[tokio::test]
    async fn test_summary_percentages_and_roll_call_flags() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let admin = UserModel::create(db, "director", "d@club.test", "pw", Role::Admin)
            .await
            .unwrap();
        let admin_token = generate_jwt(admin.id, admin.role).0;

        let eagles = UnitModel::create(db, "Falcão", Some("azul")).await.unwrap();
        let empty = UnitModel::create(db, "Tucano", None).await.unwrap();

        let a = MemberModel::create(db, "Ana Souza", Some(eagles.id), None, false)
            .await
            .unwrap();
        let b = MemberModel::create(db, "Bruno Lima", Some(eagles.id), None, false)
            .await
            .unwrap();
        MemberModel::create(db, "Clara Dias", Some(eagles.id), None, false)
            .await
            .unwrap();
        MemberModel::create(db, "Davi Rocha", None, None, true)
            .await
            .unwrap();

        let enc = EncounterModel::create(db, "2025-06-01".parse().unwrap(), None, admin.id)
            .await
            .unwrap();
        assert!(EncounterModel::start(db, enc.id).await.unwrap());

        // Two of three unit members arrive (one of them late).
        let uri = format!("/api/encounters/{}/attendance", enc.id);
        let body = json!({ "items": [
            { "member_id": a.id, "status": "on_time",
              "has_material": true, "has_uniform": true, "note": null },
            { "member_id": b.id, "status": "late",
              "has_material": false, "has_uniform": true, "note": null }
        ]});
        let resp = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&admin_token), Some(body)))
            .await
            .unwrap();
        read_json(resp, StatusCode::OK).await;

        let uri = format!("/api/encounters/{}/summary", enc.id);
        let resp = app
            .clone()
            .oneshot(json_request("GET", &uri, Some(&admin_token), None))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::OK).await;

        let units = body["data"]["units"].as_array().unwrap();
        assert_eq!(units.len(), 2);
        // Ordered by unit name: Falcão before Tucano.
        assert_eq!(units[0]["unit_name"], "Falcão");
        assert_eq!(units[0]["total_members"], 3);
        assert_eq!(units[0]["present"], 2);
        assert_eq!(units[0]["absent"], 1);
        assert_eq!(units[0]["percentage"], 67, "2 of 3 rounds half up to 67");
        assert_eq!(units[0]["roll_call_performed"], true);

        assert_eq!(units[1]["unit_name"], "Tucano");
        assert_eq!(units[1]["unit_id"], empty.id);
        assert_eq!(units[1]["total_members"], 0);
        assert_eq!(units[1]["percentage"], 0, "empty unit reports 0, not NaN");
        assert_eq!(units[1]["roll_call_performed"], false);

        // Staff member has no row yet: leadership roll call not performed.
        let leadership = &body["data"]["leadership"];
        assert_eq!(leadership["total_members"], 1);
        assert_eq!(leadership["present"], 0);
        assert_eq!(leadership["roll_call_performed"], false);
    }

    #[tokio::test]
    async fn test_summary_for_missing_encounter_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let admin = UserModel::create(db, "director", "d@club.test", "pw", Role::Admin)
            .await
            .unwrap();
        let token = generate_jwt(admin.id, admin.role).0;

        let resp = app
            .oneshot(json_request(
                "GET",
                "/api/encounters/999/summary",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        read_json(resp, StatusCode::NOT_FOUND).await;
    }
}
