use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use application::{
    AuthenticateUserRequest, CreateDocumentRequest, DocumentCreatedDto, DocumentDto,
    EditMessageDto, EditRequest, RegisterUserRequest, UpdateDocumentRequest, UserDto,
};
use domain::DocId;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentPayload {
    title: Option<String>,
    owner_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateDocumentPayload {
    title: Option<String>,
    content: Option<String>,
}

pub fn router(state: AppState) -> Router {
    // 跨域来源可配置；未配置时放开给开发用
    let cors = match &state.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        .route("/health", get(health))
        .route("/ws", get(websocket_upgrade))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_user))
        .route("/auth/login", post(login_user))
        .route("/documents", post(create_document))
        .route(
            "/documents/{doc_id}",
            get(get_document).put(update_document),
        )
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            username: payload.username,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Json(UserDto::from(&user)))
}

async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .user_service
        .authenticate(AuthenticateUserRequest {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Json(UserDto::from(&user)))
}

async fn create_document(
    State(state): State<AppState>,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<Json<DocumentCreatedDto>, ApiError> {
    let document = state
        .document_service
        .create(CreateDocumentRequest {
            title: payload.title,
            owner_id: payload.owner_id,
        })
        .await?;

    Ok(Json(DocumentCreatedDto::from(&document)))
}

async fn get_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<DocumentDto>, ApiError> {
    let document = state.document_service.get(parse_doc_id(&doc_id)?).await?;
    Ok(Json(DocumentDto::from(&document)))
}

async fn update_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    Json(payload): Json<UpdateDocumentPayload>,
) -> Result<Json<DocumentDto>, ApiError> {
    let document = state
        .document_service
        .update(
            parse_doc_id(&doc_id)?,
            UpdateDocumentRequest {
                title: payload.title,
                content: payload.content,
            },
        )
        .await?;

    Ok(Json(DocumentDto::from(&document)))
}

// 形状不合法的标识不可能存在于存储里，对外统一按不存在处理
fn parse_doc_id(raw: &str) -> Result<DocId, ApiError> {
    DocId::parse(raw).map_err(|_| ApiError::not_found("document not found"))
}

#[derive(Debug, Deserialize)]
struct WsQuery {
    doc_id: String,
}

/// 客户端经文本帧发来的一条编辑，`docId` 仅作回显字段，
/// 路由以连接时声明的文档频道为准。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditFrame {
    #[allow(dead_code)]
    doc_id: Option<String>,
    content: String,
    sender: String,
}

async fn websocket_upgrade(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let doc_id = DocId::parse(query.doc_id)
        .map_err(|err| ApiError::bad_request(err.to_string()))?;
    Ok(ws.on_upgrade(move |socket| websocket_session(socket, state, doc_id)))
}

/// 一条 WebSocket 会话：订阅文档的广播频道，同时把收到的编辑
/// 帧交给中继盖章转发。发送者也在订阅者之列，会收到自己的回显。
async fn websocket_session(socket: WebSocket, state: AppState, doc_id: DocId) {
    let mut stream = state.broadcaster.subscribe(doc_id.clone());
    let (mut sender, mut incoming) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(broadcast) = stream.recv().await {
            let payload = match serde_json::to_string(&EditMessageDto::from(&broadcast.message)) {
                Ok(json) => json,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to serialize websocket payload");
                    continue;
                }
            };
            if sender.send(WsMessage::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let relay = state.relay.clone();
    let session_doc = doc_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = incoming.next().await {
            match message {
                WsMessage::Text(text) => {
                    let frame: EditFrame = match serde_json::from_str(&text) {
                        Ok(frame) => frame,
                        Err(err) => {
                            // 传输层不校验输入，坏帧记日志后跳过
                            tracing::warn!(error = %err, "skipping malformed edit frame");
                            continue;
                        }
                    };
                    let request = EditRequest {
                        doc_id: session_doc.clone(),
                        content: frame.content,
                        sender: frame.sender,
                    };
                    if let Err(err) = relay.handle_edit(request).await {
                        tracing::warn!(doc_id = %session_doc, error = %err, "edit relay failed");
                    }
                }
                WsMessage::Close(_) => break,
                _ => {}
            }
        }
    });

    // 任意一侧结束就收掉整条会话
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!(doc_id = %doc_id, "websocket session closed");
}
