use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as HeaderError, Header},
    typed_header::TypedHeaderRejection,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{ServerError, auth, dashboard, entries, goals, health};
use engine::{Engine, EngineError};

static USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// `TypedHeader` for the identity token.
///
/// Protected requests must carry the user id in the "x-user-id" header.
#[derive(Debug)]
struct UserIdHeader(String);

impl Header for UserIdHeader {
    fn name() -> &'static HeaderName {
        &USER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, HeaderError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(HeaderError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(HeaderError::invalid());
        };

        Ok(UserIdHeader(value.trim().to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-id header"),
        }
    }
}

async fn auth(
    user_id: Result<TypedHeader<UserIdHeader>, TypedHeaderRejection>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = match user_id {
        Ok(TypedHeader(header)) => header.0,
        Err(rejection) if rejection.is_missing() => String::new(),
        Err(rejection) => {
            tracing::debug!("undecodable identity header: {rejection}");
            return Err(EngineError::Unauthenticated("Invalid user".to_string()).into());
        }
    };
    let user = state.engine.resolve_identity(&token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid allowed origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn router(state: ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .route("/income", get(entries::list_income).post(entries::income_new))
        .route("/expenses", get(entries::list_expenses))
        .route("/expense", post(entries::expense_new))
        .route("/goals", get(goals::list).post(goals::goal_new))
        .route("/goals/{id}/fund", patch(goals::fund))
        .route("/dashboard", get(dashboard::get))
        .route("/advice", post(dashboard::advice))
        .route_layer(middleware::from_fn_with_state(state, auth));

    Router::new()
        .route("/health", get(health::get))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .merge(protected)
}

/// Build the full application router.
///
/// An empty `allowed_origins` list allows any origin.
pub fn app(engine: Arc<Engine>, allowed_origins: &[String]) -> Router {
    let state = ServerState { engine };

    Router::new()
        .nest("/api", router(state.clone()))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(
    engine: Engine,
    addr: &str,
    allowed_origins: &[String],
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_with_listener(engine, listener, allowed_origins).await
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    allowed_origins: &[String],
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(Arc::new(engine), allowed_origins)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    allowed_origins: Vec<String>,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener, &allowed_origins).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
