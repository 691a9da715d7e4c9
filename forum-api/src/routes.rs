use crate::session::current_member;
use crate::views;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use forum_app::domain::FavouriteToggle;
use forum_app::AppContext;
use forum_errors::AppError;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct FavouritePostRequest {
    pub post_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePollRequest {
    pub poll_id: Uuid,
    pub answer_id: Uuid,
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/favourites", get(list_favourites))
        .route("/favourites/post", post(favourite_post))
        .route("/polls/vote", post(update_poll))
        .with_state(ctx)
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

fn unauthorized(ctx: &AppContext) -> AppError {
    AppError::Unauthorized(ctx.localizer.get("Errors.Unauthorised"))
}

/// Anonymous and non-AJAX callers get an empty body and nothing is written.
async fn favourite_post(
    State(ctx): State<AppContext>,
    session: Session,
    headers: HeaderMap,
    payload: Result<Json<FavouritePostRequest>, JsonRejection>,
) -> Response {
    if !is_ajax(&headers) {
        return Json(FavouriteToggle::default()).into_response();
    }

    let member = match current_member(&session, &ctx).await {
        Ok(Some(member)) => member,
        Ok(None) => return Json(FavouriteToggle::default()).into_response(),
        Err(e) => return e.into_response(),
    };

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };

    match ctx.toggle_favourite.execute(member.id, request.post_id).await {
        Ok(toggle) => Json(toggle).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn update_poll(
    State(ctx): State<AppContext>,
    session: Session,
    payload: Result<Json<UpdatePollRequest>, JsonRejection>,
) -> Response {
    let member = match current_member(&session, &ctx).await {
        Ok(Some(member)) => member,
        Ok(None) => return unauthorized(&ctx).into_response(),
        Err(e) => return e.into_response(),
    };

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };

    match ctx
        .record_poll_vote
        .execute(request.poll_id, request.answer_id, member.id)
        .await
    {
        Ok(result) => Html(views::poll_partial(&result, &ctx.localizer)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_favourites(State(ctx): State<AppContext>, session: Session) -> Response {
    let member = match current_member(&session, &ctx).await {
        Ok(Some(member)) => member,
        Ok(None) => return error_page(unauthorized(&ctx)),
        Err(e) => return error_page(e),
    };

    match ctx.list_favourites.execute(&member).await {
        Ok(posts) => Html(views::favourites_page(&member, &posts, &ctx.localizer)).into_response(),
        Err(e) => error_page(e),
    }
}

fn error_page(err: AppError) -> Response {
    (err.status(), Html(views::error_page(err.user_message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{self, MEMBER_ID_KEY};
    use axum::body::Body;
    use axum::extract::Path;
    use axum::http::{header, Request, StatusCode};
    use forum_app::fixtures;
    use forum_app::infrastructure::db::entities::{Favourite, PollVote};
    use forum_app::infrastructure::localization::Localizer;
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
    use tower::ServiceExt;

    async fn log_on(session: Session, Path(id): Path<Uuid>) -> StatusCode {
        session.insert(MEMBER_ID_KEY, id).await.expect("session insert");
        StatusCode::NO_CONTENT
    }

    async fn app() -> (Router, DatabaseConnection) {
        let db = fixtures::memory_db().await;
        let ctx = AppContext::new(db.clone(), Localizer::english());
        let app = router(ctx)
            .route("/test/log-on/{id}", post(log_on))
            .layer(session::layer(false));
        (app, db)
    }

    async fn cookie_for(app: &Router, member_id: Uuid) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::post(format!("/test/log-on/{member_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn json_post(uri: &str, body: serde_json::Value, cookie: Option<&str>, ajax: bool) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if ajax {
            builder = builder.header("X-Requested-With", "XMLHttpRequest");
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn anonymous_favourite_returns_empty_body() {
        let (app, db) = app().await;
        let author = fixtures::member(&db, "author", &[]).await;
        let thread = fixtures::thread(&db, &author).await;

        let response = app
            .oneshot(json_post(
                "/favourites/post",
                serde_json::json!({ "post_id": thread.post.id }),
                None,
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "{}");
        assert_eq!(Favourite::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_ajax_favourite_returns_empty_body() {
        let (app, db) = app().await;
        let member = fixtures::member(&db, "seven", &[]).await;
        let thread = fixtures::thread(&db, &member).await;
        let cookie = cookie_for(&app, member.id).await;

        let response = app
            .oneshot(json_post(
                "/favourites/post",
                serde_json::json!({ "post_id": thread.post.id }),
                Some(&cookie),
                false,
            ))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "{}");
        assert_eq!(Favourite::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn favourite_toggles_on_then_off() {
        let (app, db) = app().await;
        let member = fixtures::member(&db, "seven", &[]).await;
        let thread = fixtures::thread(&db, &member).await;
        let cookie = cookie_for(&app, member.id).await;
        let body = serde_json::json!({ "post_id": thread.post.id });

        let first = app
            .clone()
            .oneshot(json_post("/favourites/post", body.clone(), Some(&cookie), true))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let added: serde_json::Value = serde_json::from_str(&body_text(first).await).unwrap();
        assert_eq!(added["message"], "Favourited");
        assert!(added["id"].is_string());
        assert_eq!(Favourite::find().count(&db).await.unwrap(), 1);

        let second = app
            .oneshot(json_post("/favourites/post", body, Some(&cookie), true))
            .await
            .unwrap();
        assert_eq!(body_text(second).await, r#"{"message":"Favourite"}"#);
        assert_eq!(Favourite::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn favourite_on_missing_post_is_not_found() {
        let (app, db) = app().await;
        let member = fixtures::member(&db, "seven", &[]).await;
        let cookie = cookie_for(&app, member.id).await;

        let response = app
            .oneshot(json_post(
                "/favourites/post",
                serde_json::json!({ "post_id": Uuid::new_v4() }),
                Some(&cookie),
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn anonymous_poll_vote_is_unauthorized() {
        let (app, db) = app().await;

        let response = app
            .oneshot(json_post(
                "/polls/vote",
                serde_json::json!({ "poll_id": Uuid::new_v4(), "answer_id": Uuid::new_v4() }),
                None,
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(PollVote::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn poll_vote_renders_updated_partial() {
        let (app, db) = app().await;
        let voter = fixtures::member(&db, "three", &[]).await;
        let thread = fixtures::thread(&db, &voter).await;
        let (poll, answers) = fixtures::poll(&db, &thread.topic, &["Yes", "No"]).await;
        fixtures::votes(&db, &answers[1], 4).await;
        let cookie = cookie_for(&app, voter.id).await;

        let response = app
            .oneshot(json_post(
                "/polls/vote",
                serde_json::json!({ "poll_id": poll.id, "answer_id": answers[0].id }),
                Some(&cookie),
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Total votes: <strong>5</strong>"));
        assert!(html.contains("You have voted in this poll"));
        assert_eq!(PollVote::find().count(&db).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn favourites_page_lists_escaped_posts() {
        let (app, db) = app().await;
        let member = fixtures::member(&db, "seven", &[]).await;
        let thread = fixtures::thread(&db, &member).await;
        let cookie = cookie_for(&app, member.id).await;

        app.clone()
            .oneshot(json_post(
                "/favourites/post",
                serde_json::json!({ "post_id": thread.post.id }),
                Some(&cookie),
                true,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::get("/favourites")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Welcome &lt;everyone&gt;"));
        assert!(html.contains("First post"));
        assert!(html.contains("1 favourites"));
    }

    #[tokio::test]
    async fn anonymous_favourites_page_is_unauthorized() {
        let (app, _db) = app().await;

        let response = app
            .oneshot(Request::get("/favourites").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Please log on"));
    }
}
