#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use api::auth::generate_jwt;
    use db::models::encounter::Model as EncounterModel;
    use db::models::member::Model as MemberModel;
    use db::models::presence::{Model as PresenceModel, PresenceItem, Status};
    use db::models::user::{Model as UserModel, Role};

    use crate::helpers::app::{json_request, make_test_app, read_json};

    struct TestCtx {
        admin: UserModel,
        admin_token: String,
        secretariat_token: String,
    }

    async fn setup(db: &sea_orm::DatabaseConnection) -> TestCtx {
        let admin = UserModel::create(db, "director", "d@club.test", "pw", Role::Admin)
            .await
            .unwrap();
        let secretariat = UserModel::create(db, "secretary", "s@club.test", "pw", Role::Secretariat)
            .await
            .unwrap();

        let admin_token = generate_jwt(admin.id, admin.role).0;
        let secretariat_token = generate_jwt(secretariat.id, secretariat.role).0;
        TestCtx {
            admin,
            admin_token,
            secretariat_token,
        }
    }

    #[tokio::test]
    async fn test_delete_encounter_ok_for_admin() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;
        let enc = EncounterModel::create(
            app_state.db(),
            "2025-06-01".parse().unwrap(),
            None,
            ctx.admin.id,
        )
        .await
        .unwrap();

        let uri = format!("/api/encounters/{}", enc.id);
        let resp = app
            .oneshot(json_request("DELETE", &uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        read_json(resp, StatusCode::OK).await;

        assert!(
            EncounterModel::get(app_state.db(), enc.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_encounter_forbidden_below_admin() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;
        let enc = EncounterModel::create(
            app_state.db(),
            "2025-06-01".parse().unwrap(),
            None,
            ctx.admin.id,
        )
        .await
        .unwrap();

        let uri = format!("/api/encounters/{}", enc.id);
        let resp = app
            .oneshot(json_request("DELETE", &uri, Some(&ctx.secretariat_token), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_encounter_with_presence_is_refused() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;
        let db = app_state.db();

        let enc = EncounterModel::create(db, "2025-06-01".parse().unwrap(), None, ctx.admin.id)
            .await
            .unwrap();
        let member = MemberModel::create(db, "Ana Souza", None, None, false)
            .await
            .unwrap();
        PresenceModel::upsert_batch(
            db,
            enc.id,
            &[PresenceItem {
                member_id: member.id,
                status: Status::OnTime,
                has_material: false,
                has_uniform: false,
                note: None,
            }],
            ctx.admin.id,
        )
        .await
        .unwrap();

        let uri = format!("/api/encounters/{}", enc.id);
        let resp = app
            .oneshot(json_request("DELETE", &uri, Some(&ctx.admin_token), None))
            .await
            .unwrap();
        let body = read_json(resp, StatusCode::CONFLICT).await;
        assert!(body["message"].as_str().unwrap().contains("attendance"));

        // The encounter survives.
        assert!(
            EncounterModel::get(db, enc.id).await.unwrap().is_some()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_encounter_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let ctx = setup(app_state.db()).await;

        let resp = app
            .oneshot(json_request(
                "DELETE",
                "/api/encounters/999",
                Some(&ctx.admin_token),
                None,
            ))
            .await
            .unwrap();
        read_json(resp, StatusCode::NOT_FOUND).await;
    }
}
