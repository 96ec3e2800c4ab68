//! Session execution: lobby phase, then game phase, on one connection.
//!
//! One task owns the [`Dispatcher`] and is the only writer of the session.
//! It waits on inbound transport events and local commands with `select!`,
//! so every mutation happens in arrival order.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    ClientConfig, ClientError,
    domain::{
        ActionChannelError, CloseInfo, DecodeError, FrameTransport, LobbyCode, LobbyEvent, Session,
        TransportEvent,
    },
    infrastructure::{
        ConnectionHooks, ConnectionManager, Endpoint, HttpLobbyApi,
        dto::conversion::{decode_game_frame, decode_lobby_frame, encode_choice},
        lobby_url,
    },
    ui::{Presenter, SessionFormatter, UserCommand},
    usecase::{Dispatched, Dispatcher, MIN_PLAYERS_TO_START, StartGameUseCase, StartOutcome},
};

/// Typing this in the lobby asks the server to start the game.
pub const START_COMMAND: &str = "start";

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The local player left.
    Left,
    /// The connection dropped; the player goes back to the entry screen.
    ReturnToEntry { reason: Option<String> },
}

enum LobbyExit {
    GameStarted,
    Left,
    Closed(CloseInfo),
}

enum Inbound {
    Frame(String),
    Undecodable(DecodeError),
    Closed(CloseInfo),
}

impl From<TransportEvent> for Inbound {
    fn from(event: TransportEvent) -> Self {
        match event {
            TransportEvent::Text(text) => Self::Frame(text),
            TransportEvent::Binary(data) => match String::from_utf8(data) {
                Ok(text) => Self::Frame(text),
                Err(_) => Self::Undecodable(DecodeError::NotUtf8),
            },
            TransportEvent::Closed(info) => Self::Closed(info),
        }
    }
}

/// Drives one session over an open transport.
pub struct SessionRunner<'a, T, P: ?Sized> {
    transport: T,
    hooks: ConnectionHooks,
    presenter: &'a P,
    commands: &'a mut mpsc::UnboundedReceiver<UserCommand>,
    start_game: Arc<StartGameUseCase>,
    dispatcher: Dispatcher,
}

impl<'a, T, P> SessionRunner<'a, T, P>
where
    T: FrameTransport,
    P: Presenter + ?Sized,
{
    pub fn new(
        transport: T,
        hooks: ConnectionHooks,
        presenter: &'a P,
        commands: &'a mut mpsc::UnboundedReceiver<UserCommand>,
        start_game: Arc<StartGameUseCase>,
        session: Session,
    ) -> Self {
        Self {
            transport,
            hooks,
            presenter,
            commands,
            start_game,
            dispatcher: Dispatcher::new(session),
        }
    }

    /// Run until the player leaves or the connection drops.
    ///
    /// With `rejoin`, the lobby is skipped and the game screen opens at once.
    pub async fn run(mut self, rejoin: bool) -> SessionOutcome {
        if !rejoin {
            match self.run_lobby().await {
                LobbyExit::GameStarted => {}
                LobbyExit::Left => return self.leave().await,
                LobbyExit::Closed(info) => return self.disconnected(info),
            }
        }
        self.run_game().await
    }

    async fn run_lobby(&mut self) -> LobbyExit {
        let code = self.dispatcher.session().code().clone();
        let (start_tx, mut start_rx) = mpsc::unbounded_channel();
        self.presenter.render_lobby(&code, &[]);

        loop {
            tokio::select! {
                event = self.transport.next_event() => match Inbound::from(event) {
                    Inbound::Frame(text) => match decode_lobby_frame(&text) {
                        Ok(LobbyEvent::GameStarted) => {
                            tracing::info!("Game in lobby '{}' started", code);
                            return LobbyExit::GameStarted;
                        }
                        Ok(LobbyEvent::RosterUpdate { members }) => {
                            tracing::debug!("Lobby members: {:?}", members);
                            self.presenter.render_lobby(&code, &members);
                        }
                        Err(e) => tracing::warn!("Dropping lobby frame: {}", e),
                    },
                    Inbound::Undecodable(e) => tracing::warn!("Dropping lobby frame: {}", e),
                    Inbound::Closed(info) => return LobbyExit::Closed(info),
                },
                command = self.commands.recv() => match command {
                    Some(UserCommand::Line(line)) if line.eq_ignore_ascii_case(START_COMMAND) => {
                        let start_game = Arc::clone(&self.start_game);
                        let code = code.clone();
                        let start_tx = start_tx.clone();
                        // The reply only says the request went out; the game
                        // itself starts when the lobby receives "Start".
                        tokio::spawn(async move {
                            start_tx.send(start_game.execute(&code).await).ok();
                        });
                    }
                    Some(UserCommand::Line(_)) => self.presenter.notify(&format!(
                        "Type '{}' to begin once at least {} players have joined.",
                        START_COMMAND, MIN_PLAYERS_TO_START
                    )),
                    Some(UserCommand::Leave) | None => return LobbyExit::Left,
                },
                Some(result) = start_rx.recv() => self.report_start(result),
            }
        }
    }

    fn report_start(&self, result: Result<StartOutcome, ActionChannelError>) {
        let notice = match result {
            Ok(StartOutcome::Requested { players }) => format!(
                "Start requested with {} players. Waiting for the server...",
                players
            ),
            Ok(StartOutcome::NotEnoughPlayers { players }) => format!(
                "Need at least {} players to start (currently {}).",
                MIN_PLAYERS_TO_START, players
            ),
            Ok(StartOutcome::NoAnswer) => {
                "The server did not answer the player count request.".to_string()
            }
            Err(ActionChannelError::Timeout) => {
                tracing::warn!("Start request timed out");
                "The start request timed out; the game may still begin.".to_string()
            }
            Err(e) => {
                tracing::warn!("Start request failed: {}", e);
                format!("Could not start the game: {}", e)
            }
        };
        self.presenter.notify(&notice);
    }

    async fn run_game(&mut self) -> SessionOutcome {
        self.dispatcher.enter_game();
        self.presenter.render_game(self.dispatcher.session());

        loop {
            tokio::select! {
                event = self.transport.next_event() => match Inbound::from(event) {
                    Inbound::Frame(text) => self.handle_game_frame(&text),
                    Inbound::Undecodable(e) => tracing::warn!("Dropping frame: {}", e),
                    Inbound::Closed(info) => return self.disconnected(info),
                },
                command = self.commands.recv() => match command {
                    Some(UserCommand::Line(selection)) => self.submit(&selection).await,
                    Some(UserCommand::Leave) => {
                        if self.presenter.confirm_leave() {
                            return self.leave().await;
                        }
                    }
                    None => return self.leave().await,
                },
            }
        }
    }

    fn handle_game_frame(&mut self, text: &str) {
        tracing::debug!("Received frame: {}", text);
        let message = match decode_game_frame(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Dropping frame: {}", e);
                return;
            }
        };

        match self.dispatcher.apply(message) {
            Dispatched::Applied => self.presenter.render_game(self.dispatcher.session()),
            Dispatched::Notice(notice) => self.presenter.notify(&notice),
            Dispatched::Ignored { .. } => {}
        }
    }

    async fn submit(&mut self, selection: &str) {
        let choice = match self.dispatcher.submit_choice(selection) {
            Ok(choice) => choice,
            Err(e) => {
                self.presenter.notify(&e.to_string());
                return;
            }
        };

        // Prompt is already gone; show that before the frame goes out.
        self.presenter.render_game(self.dispatcher.session());
        if let Err(e) = self.transport.send_text(encode_choice(&choice)).await {
            tracing::warn!("Failed to send choice '{}': {}", choice, e);
        }
    }

    async fn leave(&mut self) -> SessionOutcome {
        tracing::info!("Leaving lobby '{}'", self.dispatcher.session().code());
        if let Err(e) = self.transport.close().await {
            tracing::warn!("Failed to close connection: {}", e);
        }
        SessionOutcome::Left
    }

    fn disconnected(&self, info: CloseInfo) -> SessionOutcome {
        tracing::error!("Connection lost: {}", info.reason_or_empty());
        if !self.hooks.closed(&info) {
            self.presenter
                .notify(&SessionFormatter::format_disconnect(info.reason_or_empty()));
        }
        SessionOutcome::ReturnToEntry {
            reason: info.reason,
        }
    }
}

/// Connect, then run the lobby and game phases until the session ends.
///
/// # Errors
///
/// Returns an error if the page location is unusable or the connection
/// cannot be opened. Once connected, failures end the session instead.
pub async fn run_client<P: Presenter + ?Sized>(
    config: &ClientConfig,
    presenter: &P,
    commands: &mut mpsc::UnboundedReceiver<UserCommand>,
    hooks: ConnectionHooks,
) -> Result<SessionOutcome, ClientError> {
    let code = LobbyCode::new(config.code.clone());
    let endpoint = Endpoint::derive(
        &config.location,
        config.service_port,
        config.dev_port,
        &code,
        &config.name,
    )?;
    let lobby_api = HttpLobbyApi::new(
        lobby_url(&config.location)?,
        config.action_retries,
        config.action_timeout,
    );
    let start_game = Arc::new(StartGameUseCase::new(Arc::new(lobby_api)));

    tracing::info!(
        "Joining lobby '{}' as '{}' (rejoin: {})",
        code,
        config.name,
        config.rejoin
    );
    let (connection, hooks) = ConnectionManager::new(endpoint)
        .with_hooks(hooks)
        .open()
        .await?;

    let session = Session::new(config.name.clone(), code);
    let outcome = SessionRunner::new(connection, hooks, presenter, commands, start_game, session)
        .run(config.rejoin)
        .await;
    tracing::info!("Session ended: {:?}", outcome);
    Ok(outcome)
}
