//! Action channel tests against an in-process lobby endpoint.
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：人数の問い合わせ、開始コマンドの送信
//! - 異常系：500 が続く場合はリトライ後にエラー、応答がない場合はタイムアウト
//! - エッジケース：JSON 以外のレスポンスは無視、1回だけ失敗した場合はリトライで回復、
//!   開始コマンドは再試行しない

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use influence_client::{
    domain::{ActionChannelError, LobbyApi, LobbyCode},
    infrastructure::HttpLobbyApi,
    usecase::{StartGameUseCase, StartOutcome},
};

#[derive(Clone, Default)]
struct LobbyServer {
    players: i64,
    plain_text: bool,
    delay: Option<Duration>,
    failures: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl LobbyServer {
    fn with_players(players: i64) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn lobby(State(server): State<LobbyServer>, Json(request): Json<Value>) -> Response {
    server.requests.lock().unwrap().push(request.clone());

    if let Some(delay) = server.delay {
        tokio::time::sleep(delay).await;
    }

    if server.failures.load(Ordering::SeqCst) > 0 {
        server.failures.fetch_sub(1, Ordering::SeqCst);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if server.plain_text {
        return "ok".into_response();
    }

    match request["type"].as_str() {
        Some("numPlayers") => Json(json!({ "content": server.players })).into_response(),
        _ => Json(json!({ "content": null })).into_response(),
    }
}

async fn spawn_lobby_server(server: LobbyServer) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/lobby", post(lobby))
        .with_state(server);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}/lobby")).unwrap()
}

fn api(url: Url, retries: u32) -> HttpLobbyApi {
    HttpLobbyApi::new(url, retries, Duration::from_secs(5))
}

#[tokio::test]
async fn test_player_count_posts_num_players_request() {
    // テスト項目: 人数の問い合わせは numPlayers リクエストを送り、content の整数を返す
    // given (前提条件):
    let server = LobbyServer::with_players(3);
    let url = spawn_lobby_server(server.clone()).await;
    let api = api(url, 0);

    // when (操作):
    let count = api.player_count(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(count, Ok(Some(3)));
    assert_eq!(
        server.requests(),
        vec![json!({ "type": "numPlayers", "code": "ABCD" })]
    );
}

#[tokio::test]
async fn test_non_json_response_is_ignored() {
    // テスト項目: Content-Type が JSON でないレスポンスは無視される
    // given (前提条件):
    let server = LobbyServer {
        plain_text: true,
        ..LobbyServer::default()
    };
    let url = spawn_lobby_server(server).await;
    let api = api(url, 0);

    // when (操作):
    let count = api.player_count(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(count, Ok(None));
}

#[tokio::test]
async fn test_failed_request_is_retried() {
    // テスト項目: 1回失敗したリクエストは再試行で回復する
    // given (前提条件):
    let server = LobbyServer::with_players(2);
    server.failures.store(1, Ordering::SeqCst);
    let url = spawn_lobby_server(server.clone()).await;
    let api = api(url, 1);

    // when (操作):
    let count = api.player_count(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(count, Ok(Some(2)));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_persistent_failure_is_surfaced_after_retries() {
    // テスト項目: 再試行しても失敗する場合はステータスエラーが返る
    // given (前提条件):
    let server = LobbyServer::with_players(2);
    server.failures.store(10, Ordering::SeqCst);
    let url = spawn_lobby_server(server.clone()).await;
    let api = api(url, 1);

    // when (操作):
    let result = api.player_count(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(result, Err(ActionChannelError::UnexpectedStatus(500)));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_unanswered_request_times_out_after_retries() {
    // テスト項目: 応答のないリクエストはタイムアウトし、再試行後に Timeout が返る
    // given (前提条件):
    let server = LobbyServer {
        players: 2,
        delay: Some(Duration::from_secs(2)),
        ..LobbyServer::default()
    };
    let url = spawn_lobby_server(server.clone()).await;
    let api = HttpLobbyApi::new(url, 1, Duration::from_millis(100));

    // when (操作):
    let result = api.player_count(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(result, Err(ActionChannelError::Timeout));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_failed_start_is_not_resent() {
    // テスト項目: 開始コマンドは失敗しても再送されない
    // given (前提条件):
    let server = LobbyServer::with_players(2);
    server.failures.store(1, Ordering::SeqCst);
    let url = spawn_lobby_server(server.clone()).await;
    let api = api(url, 1);

    // when (操作):
    let result = api.start(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(result, Err(ActionChannelError::UnexpectedStatus(500)));
    assert_eq!(
        server.requests(),
        vec![json!({ "type": "start", "code": "ABCD" })]
    );
}

#[tokio::test]
async fn test_start_game_with_one_player_sends_no_start() {
    // テスト項目: 1人のロビーでは開始コマンドが一度も送られない
    // given (前提条件):
    let server = LobbyServer::with_players(1);
    let url = spawn_lobby_server(server.clone()).await;
    let use_case = StartGameUseCase::new(Arc::new(api(url, 1)));

    // when (操作):
    let outcome = use_case.execute(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(outcome, Ok(StartOutcome::NotEnoughPlayers { players: 1 }));
    assert_eq!(
        server.requests(),
        vec![json!({ "type": "numPlayers", "code": "ABCD" })]
    );
}

#[tokio::test]
async fn test_start_game_with_two_players_sends_start_once() {
    // テスト項目: 2人のロビーでは人数確認の後に開始コマンドが1回だけ送られる
    // given (前提条件):
    let server = LobbyServer::with_players(2);
    let url = spawn_lobby_server(server.clone()).await;
    let use_case = StartGameUseCase::new(Arc::new(api(url, 1)));

    // when (操作):
    let outcome = use_case.execute(&LobbyCode::new("ABCD")).await;

    // then (期待する結果):
    assert_eq!(outcome, Ok(StartOutcome::Requested { players: 2 }));
    assert_eq!(
        server.requests(),
        vec![
            json!({ "type": "numPlayers", "code": "ABCD" }),
            json!({ "type": "start", "code": "ABCD" }),
        ]
    );
}
