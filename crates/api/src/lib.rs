pub mod error;
pub mod page;
pub mod quiz;

mod category;
mod question;

use db::{
    model::{NewQuestion, QuizTurn, Search},
    Store,
};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{Body, Bytes},
    header::{
        HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        CONTENT_TYPE,
    },
    Method, Request, Response, StatusCode,
};
use serde_json::{json, Value};

pub const APPLICATION_JSON: &str = "application/json";

/// Known resources, independent of the request method.
enum Route {
    Categories,
    CategoryQuestions(i32),
    Questions,
    /// `None` when the segment is an integer too large to name any stored question.
    Question(Option<i32>),
    Search,
    Quizzes,
}

impl Route {
    fn parse(path: &str) -> Option<Self> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let route = match (segments.next()?, segments.next(), segments.next()) {
            ("categories", None, None) => Self::Categories,
            ("categories", Some(id), Some("questions")) => Self::CategoryQuestions(id.parse().ok()?),
            ("questions", None, None) => Self::Questions,
            ("questions", Some("search"), None) => Self::Search,
            ("questions", Some(id), None) => Self::Question(parse_id(id)?),
            ("quizzes", None, None) => Self::Quizzes,
            _ => return None,
        };
        segments.next().is_none().then_some(route)
    }
}

/// Rejects non-numeric segments. Numeric segments outside the `i32` range yield `Some(None)`.
fn parse_id(segment: &str) -> Option<Option<i32>> {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some(segment.parse().ok())
}

/// Attaches the permissive CORS headers expected by the browser client.
fn with_cors(mut res: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = res.headers_mut();
    assert!(headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")).is_none());
    assert!(headers
        .insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type,Authorization,true"))
        .is_none());
    assert!(headers
        .insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET,PUT,POST,DELETE,OPTIONS"))
        .is_none());
    res
}

fn json_response(status: StatusCode, value: &Value) -> Response<Full<Bytes>> {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    let mut res = Response::new(Full::new(Bytes::from(bytes)));
    *res.status_mut() = status;
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)).is_none());
    with_cors(res)
}

async fn parse_json<B, T>(body: B) -> error::Result<T>
where
    B: Body,
    T: serde::de::DeserializeOwned,
{
    let payload = body.collect().await.map_err(|_| error::Error::BadRequest)?.to_bytes();
    serde_json::from_slice(&payload).map_err(|err| {
        log::debug!("rejected request body: {err}");
        error::Error::BadRequest
    })
}

pub struct App<S> {
    store: S,
}

impl<S: Store> From<S> for App<S> {
    fn from(store: S) -> Self {
        Self { store }
    }
}

impl<S: Store> App<S> {
    /// Responds to a request. Failures are rendered as `{ success, error, message }` bodies.
    pub async fn try_respond<B: Body>(&self, req: Request<B>) -> Response<Full<Bytes>> {
        log::debug!("{} {}", req.method(), req.uri());
        if req.method() == Method::OPTIONS {
            let mut res = Response::new(Full::new(Bytes::new()));
            *res.status_mut() = StatusCode::NO_CONTENT;
            return with_cors(res);
        }

        match self.on_request(req).await {
            Ok(value) => json_response(StatusCode::OK, &value),
            Err(err) => {
                let status = err.status();
                json_response(
                    status,
                    &json!({ "success": false, "error": status.as_u16(), "message": err.message() }),
                )
            }
        }
    }

    async fn on_request<B: Body>(&self, req: Request<B>) -> error::Result<Value> {
        let (parts, body) = req.into_parts();
        let route = Route::parse(parts.uri.path()).ok_or(error::Error::NotFound)?;
        let page = page::parse_page(parts.uri.query());
        let store = &self.store;

        match (parts.method, route) {
            (Method::GET, Route::Categories) => category::list(store).await,
            (Method::GET, Route::CategoryQuestions(id)) => question::list_by_category(store, id, page).await,
            (Method::GET, Route::Questions) => question::list(store, page).await,
            (Method::POST, Route::Questions) => {
                // Anything that is not a well-formed question is unprocessable rather than a bad request.
                let new: NewQuestion = parse_json(body).await.map_err(|_| error::Error::Unprocessable)?;
                question::create(store, &new).await
            }
            (Method::DELETE, Route::Question(Some(id))) => question::delete(store, id).await,
            (Method::DELETE, Route::Question(None)) => Err(error::Error::Unprocessable),
            (Method::POST, Route::Search) => {
                let search: Search = parse_json(body).await.map_err(|_| error::Error::NotFound)?;
                question::search(store, &search, page).await
            }
            (Method::POST, Route::Quizzes) => {
                let QuizTurn { previous_questions, quiz_category } = parse_json(body).await?;
                let question = match quiz::draw(store, &previous_questions, quiz_category.id).await? {
                    quiz::Draw::Question(question) => question,
                    quiz::Draw::Exhausted => return Ok(json!({ "success": true })),
                };
                Ok(json!({ "success": true, "question": question }))
            }
            _ => Err(error::Error::MethodNotAllowed),
        }
    }
}
