use crate::codec::JsonBody;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookIdParam, BookTransformer, CreateBookRequest, DeleteBookRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, CreatedBookPresenter};
use crate::route::method_not_allowed;
use application::service::{
    CreateBookService, DeleteBookService, GetAllBookService, UpdateBookService,
};
use axum::extract::State;
use axum::routing::{get, put};
use axum::Router;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D> BookRouter for Router<AppModule<D>>
where
    D: DependOnBookQuery + DependOnBookModifier,
{
    fn route_book(self) -> Self {
        self.route(
            "/v1/book",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 JsonBody(req): JsonBody<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, CreatedBookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .fallback(method_not_allowed),
        )
        .route(
            "/v1/book/:id",
            put(
                |State(module): State<AppModule<D>>,
                 id: BookIdParam,
                 JsonBody(req): JsonBody<UpdateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, BookIdParam(id): BookIdParam| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .fallback(method_not_allowed),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::header::{CONTENT_TYPE, LOCATION};
    use axum::http::{Method, Request, StatusCode};
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::{BookAuthor, BookName};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handler::AppModule;
    use crate::route::router;

    struct Answer {
        status: StatusCode,
        location: Option<String>,
        body: Value,
    }

    async fn send(db: &InMemoryDatabase, method: Method, uri: &str, body: Option<&str>) -> Answer {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.map(|body| Body::from(body.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = router(AppModule::with_database(db.clone()))
            .oneshot(request)
            .await
            .unwrap();

        let status = response.status();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.ends_with(b"}\n"));
        let body = serde_json::from_slice(&bytes).unwrap();
        Answer {
            status,
            location,
            body,
        }
    }

    fn seeded() -> InMemoryDatabase {
        InMemoryDatabase::with_books([
            (BookName::new("Foo"), BookAuthor::new("Bar")),
            (BookName::new("Lorem"), BookAuthor::new("Ipsum")),
        ])
    }

    #[tokio::test]
    async fn create_book() {
        let db = InMemoryDatabase::new();
        let answer = send(
            &db,
            Method::POST,
            "/v1/book",
            Some(r#"{"name":"TestName","author":"TestAuthor"}"#),
        )
        .await;
        assert_eq!(answer.status, StatusCode::CREATED);
        assert_eq!(answer.location.as_deref(), Some("/v1/book/1"));
        assert_eq!(
            answer.body,
            json!({ "book": { "id": 1, "name": "TestName", "author": "TestAuthor" } })
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let db = InMemoryDatabase::new();
        let long = "a".repeat(41);
        let cases = [
            (
                json!({ "name": "", "author": "" }),
                json!({ "name": "must be provided", "author": "must be provided" }),
            ),
            (
                json!({ "name": long, "author": "TestAuthor" }),
                json!({ "name": "must not be more than 40 bytes long" }),
            ),
            (
                json!({ "name": "TestName", "author": long }),
                json!({ "author": "must not be more than 40 bytes long" }),
            ),
            (json!({}), json!({ "name": "must be provided", "author": "must be provided" })),
            (json!(null), json!({ "name": "must be provided", "author": "must be provided" })),
            (
                json!({ "name": null, "author": "TestAuthor" }),
                json!({ "name": "must be provided" }),
            ),
        ];
        for (request, errors) in cases {
            let answer = send(&db, Method::POST, "/v1/book", Some(&request.to_string())).await;
            assert_eq!(answer.status, StatusCode::UNPROCESSABLE_ENTITY, "{request}");
            assert_eq!(answer.body, json!({ "error": errors }), "{request}");
        }
        let answer = send(&db, Method::GET, "/v1/book", None).await;
        assert_eq!(answer.body, json!({ "books": [] }));
    }

    #[tokio::test]
    async fn create_rejects_malformed_bodies() {
        let db = InMemoryDatabase::new();
        let cases = [
            (
                r#"{"name":"x","author":"y","isbn":"z"}"#,
                "body contains unknown key \"isbn\"",
            ),
            ("", "body must not be empty"),
            (
                r#"{"name":"x","author":"y"}{}"#,
                "body must only contain a single JSON value",
            ),
            (
                r#"{"name":1,"author":"x"}"#,
                "body contains incorrect JSON type for field \"name\"",
            ),
            (
                r#"["x","y"]"#,
                "body contains incorrect JSON type (at character 1)",
            ),
        ];
        for (body, message) in cases {
            let answer = send(&db, Method::POST, "/v1/book", Some(body)).await;
            assert_eq!(answer.status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(answer.body, json!({ "error": message }), "{body}");
        }

        let answer = send(&db, Method::POST, "/v1/book", Some(r#"{"name" "x"}"#)).await;
        assert_eq!(answer.status, StatusCode::BAD_REQUEST);
        assert!(answer.body["error"]
            .as_str()
            .unwrap()
            .starts_with("body contains badly-formed JSON"));
    }

    #[tokio::test]
    async fn list_books() {
        let answer = send(&seeded(), Method::GET, "/v1/book", None).await;
        assert_eq!(answer.status, StatusCode::OK);
        assert_eq!(
            answer.body,
            json!({ "books": [
                { "id": 1, "name": "Foo", "author": "Bar" },
                { "id": 2, "name": "Lorem", "author": "Ipsum" },
            ] })
        );
    }

    #[tokio::test]
    async fn list_empty_store_is_ok() {
        let answer = send(&InMemoryDatabase::new(), Method::GET, "/v1/book", None).await;
        assert_eq!(answer.status, StatusCode::OK);
        assert_eq!(answer.body, json!({ "books": [] }));
    }

    #[tokio::test]
    async fn delete_book() {
        let db = seeded();
        let cases = [
            ("-1", StatusCode::BAD_REQUEST, json!({ "error": "invalid id parameter" })),
            ("1.2", StatusCode::BAD_REQUEST, json!({ "error": "invalid id parameter" })),
            (
                "2000",
                StatusCode::NOT_FOUND,
                json!({ "error": "the requested resource could not be found" }),
            ),
            ("1", StatusCode::OK, json!({ "message": "book successfully deleted" })),
            (
                "1",
                StatusCode::NOT_FOUND,
                json!({ "error": "the requested resource could not be found" }),
            ),
        ];
        for (id, status, body) in cases {
            let answer = send(&db, Method::DELETE, &format!("/v1/book/{id}"), None).await;
            assert_eq!(answer.status, status, "{id}");
            assert_eq!(answer.body, body, "{id}");
        }

        let answer = send(&db, Method::GET, "/v1/book", None).await;
        assert_eq!(
            answer.body,
            json!({ "books": [{ "id": 2, "name": "Lorem", "author": "Ipsum" }] })
        );
    }

    #[tokio::test]
    async fn update_book() {
        let db = seeded();
        let body = r#"{"name":"Dolor","author":"Sit"}"#;

        let answer = send(&db, Method::PUT, "/v1/book/2", Some(body)).await;
        assert_eq!(answer.status, StatusCode::OK);
        assert_eq!(
            answer.body,
            json!({ "book": { "id": 2, "name": "Dolor", "author": "Sit" } })
        );

        let answer = send(&db, Method::PUT, "/v1/book/2000", Some(body)).await;
        assert_eq!(answer.status, StatusCode::NOT_FOUND);

        let answer = send(&db, Method::PUT, "/v1/book/2", Some(r#"{"name":""}"#)).await;
        assert_eq!(answer.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            answer.body,
            json!({ "error": { "name": "must be provided", "author": "must be provided" } })
        );

        let answer = send(&db, Method::GET, "/v1/book", None).await;
        assert_eq!(answer.body["books"][1], json!({ "id": 2, "name": "Dolor", "author": "Sit" }));
    }

    #[tokio::test]
    async fn update_checks_id_before_body() {
        let answer = send(&seeded(), Method::PUT, "/v1/book/0", Some("not json")).await;
        assert_eq!(answer.status, StatusCode::BAD_REQUEST);
        assert_eq!(answer.body, json!({ "error": "invalid id parameter" }));
    }

    #[tokio::test]
    async fn fallbacks() {
        let db = seeded();

        let answer = send(&db, Method::GET, "/v1/unknown", None).await;
        assert_eq!(answer.status, StatusCode::NOT_FOUND);
        assert_eq!(
            answer.body,
            json!({ "error": "the requested resource could not be found" })
        );

        let answer = send(&db, Method::PATCH, "/v1/book/1", None).await;
        assert_eq!(answer.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            answer.body,
            json!({ "error": "the PATCH method is not supported for this resource" })
        );

        let answer = send(&db, Method::DELETE, "/v1/book", None).await;
        assert_eq!(answer.status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
