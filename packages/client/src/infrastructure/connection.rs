//! Duplex connection management.
//!
//! ## 責務
//!
//! - ページの URL から WebSocket の接続先を導出する
//! - セッションごとにちょうど1本の接続を開く（`ConnectionManager::open` は self を消費する）
//! - 受信フレームを `TransportEvent` に変換する
//!
//! 再接続は行いません。切断はセッションにとって致命的です。

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};
use url::Url;

use crate::{
    domain::{CloseInfo, FrameTransport, LobbyCode, TransportError, TransportEvent},
    error::ClientError,
};

/// Port the game service listens on.
pub const DEFAULT_SERVICE_PORT: u16 = 8080;

/// Port of the development web server serving the page.
pub const DEFAULT_DEV_PORT: u16 = 3000;

/// Path of the lobby action channel, relative to the page origin.
pub const LOBBY_PATH: &str = "/lobby";

/// Resolved duplex stream endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Derive the WebSocket endpoint from the page location.
    ///
    /// - `https` pages use `wss`, everything else `ws`
    /// - the page host is reused
    /// - a page on `dev_port`, or on no explicit port, is pointed at `service_port`;
    ///   any other explicit port is kept
    /// - the path is `/ws/join/{code}/{name}`
    ///
    /// # Arguments
    ///
    /// * `page` - URL of the page the player is on
    /// * `service_port` - Well-known port of the game service
    /// * `dev_port` - Port of the development server to substitute
    /// * `code` - Lobby code
    /// * `name` - Player display name
    pub fn derive(
        page: &Url,
        service_port: u16,
        dev_port: u16,
        code: &LobbyCode,
        name: &str,
    ) -> Result<Self, ClientError> {
        if page.host_str().is_none() {
            return Err(ClientError::invalid_location(page, "page URL has no host"));
        }

        let mut url = page.clone();
        let scheme = if page.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| ClientError::invalid_location(page, "cannot switch to a ws scheme"))?;

        let port = match page.port() {
            Some(port) if port != dev_port => port,
            _ => service_port,
        };
        url.set_port(Some(port))
            .map_err(|_| ClientError::invalid_location(page, "cannot set port"))?;

        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ClientError::invalid_location(page, "page URL cannot have a path"))?
            .clear()
            .extend(["ws", "join", code.as_str(), name]);

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// URL of the lobby action channel for this page.
pub fn lobby_url(page: &Url) -> Result<Url, ClientError> {
    if page.host_str().is_none() {
        return Err(ClientError::invalid_location(page, "page URL has no host"));
    }
    page.join(LOBBY_PATH)
        .map_err(|e| ClientError::invalid_location(page, e.to_string()))
}

type OpenHook = Box<dyn Fn(&Endpoint) + Send + Sync>;
type CloseHook = Box<dyn Fn(&CloseInfo) + Send + Sync>;

/// Caller-supplied lifecycle hooks.
///
/// Inbound frames are handed to the session runner, so there is no message hook here.
#[derive(Default)]
pub struct ConnectionHooks {
    on_open: Option<OpenHook>,
    on_close: Option<CloseHook>,
}

impl ConnectionHooks {
    pub fn on_open(mut self, hook: impl Fn(&Endpoint) + Send + Sync + 'static) -> Self {
        self.on_open = Some(Box::new(hook));
        self
    }

    /// Replace the default disconnect behavior (notify, return to entry).
    pub fn on_close(mut self, hook: impl Fn(&CloseInfo) + Send + Sync + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    pub(crate) fn opened(&self, endpoint: &Endpoint) {
        match &self.on_open {
            Some(hook) => hook(endpoint),
            None => tracing::info!("Opened connection to {}", endpoint.url()),
        }
    }

    /// Run the caller's close hook. Returns `false` when none was supplied.
    pub(crate) fn closed(&self, info: &CloseInfo) -> bool {
        match &self.on_close {
            Some(hook) => {
                hook(info);
                true
            }
            None => false,
        }
    }
}

/// Opens the one duplex connection of a session.
pub struct ConnectionManager {
    endpoint: Endpoint,
    hooks: ConnectionHooks,
}

impl ConnectionManager {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            hooks: ConnectionHooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: ConnectionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Open the connection. Consumes the manager so a session cannot open twice.
    pub async fn open(self) -> Result<(WsConnection, ConnectionHooks), TransportError> {
        let url = self.endpoint.url().as_str();
        tracing::info!("Connecting to {}", url);

        let (ws_stream, response) =
            connect_async(url)
                .await
                .map_err(|e| TransportError::ConnectFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
        tracing::debug!("Handshake completed with status {}", response.status());

        self.hooks.opened(&self.endpoint);
        let (write, read) = ws_stream.split();
        Ok((
            WsConnection {
                write,
                read,
                closed: false,
            },
            self.hooks,
        ))
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket implementation of [`FrameTransport`].
pub struct WsConnection {
    write: SplitSink<WsStream, Message>,
    read: SplitStream<WsStream>,
    closed: bool,
}

#[async_trait::async_trait]
impl FrameTransport for WsConnection {
    async fn next_event(&mut self) -> TransportEvent {
        if self.closed {
            return TransportEvent::Closed(CloseInfo::default());
        }

        loop {
            match self.read.next().await {
                Some(Ok(Message::Text(text))) => {
                    return TransportEvent::Text(text.as_str().to_owned());
                }
                Some(Ok(Message::Binary(data))) => return TransportEvent::Binary(data.to_vec()),
                Some(Ok(Message::Close(frame))) => {
                    self.closed = true;
                    let reason = frame
                        .map(|frame| frame.reason.as_str().to_owned())
                        .filter(|reason| !reason.is_empty());
                    tracing::info!("Server closed the connection");
                    return TransportEvent::Closed(CloseInfo { reason });
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    self.closed = true;
                    tracing::warn!("WebSocket read error: {}", e);
                    return TransportEvent::Closed(CloseInfo::with_reason(e.to_string()));
                }
                None => {
                    self.closed = true;
                    return TransportEvent::Closed(CloseInfo::default());
                }
            }
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.write
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.write
            .close()
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }
}
