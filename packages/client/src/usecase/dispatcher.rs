//! UseCase: 受信メッセージのディスパッチ
//!
//! ## 状態遷移
//!
//! - `AwaitingFirstRoster` → 最初の `update` で `Synced` へ
//! - `Synced` はセッション終了まで維持される
//!
//! 色の割り当ては `AwaitingFirstRoster` で受け取った最初のロスターに対して
//! 一度だけ行われます。それ以降の `update` で既存の色は変わりません。
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：各タグの適用、選択肢の送信
//! - 異常系：未知のタグ、選択肢がない状態での送信
//! - エッジケース：`stopChoice` の重複、並び替えられたロスター、途中参加者

use crate::domain::{
    ChoiceError, ServerMessage, Session, WAITING_FOR_OTHERS, assign_colors,
};

/// Narration line shown when the game screen opens.
pub const STARTED_GAME: &str = "Started game!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    AwaitingFirstRoster,
    Synced,
}

impl SyncState {
    /// Next state after `message` has been applied.
    pub fn next(self, message: &ServerMessage) -> Self {
        match message {
            ServerMessage::Update(_) => Self::Synced,
            _ => self,
        }
    }
}

/// Result of applying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Session state was updated.
    Applied,
    /// Nothing changed; show this notice to the user.
    Notice(String),
    /// Unknown tag; nothing changed.
    Ignored { tag: String },
}

/// The only writer of [`Session`].
#[derive(Debug)]
pub struct Dispatcher {
    state: SyncState,
    session: Session,
}

impl Dispatcher {
    pub fn new(session: Session) -> Self {
        Self {
            state: SyncState::AwaitingFirstRoster,
            session,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Open the game screen.
    pub fn enter_game(&mut self) {
        self.session.push_log(STARTED_GAME);
    }

    /// Apply one inbound message.
    pub fn apply(&mut self, message: ServerMessage) -> Dispatched {
        let next = self.state.next(&message);
        tracing::debug!("Dispatching '{}' message in {:?}", message.tag(), self.state);

        let dispatched = match message {
            ServerMessage::Update(roster) => {
                match self.session.colors_mut() {
                    None => {
                        let colors = assign_colors(roster.players());
                        tracing::info!("Assigned colors to {} players", colors.len());
                        self.session.set_colors(colors);
                    }
                    Some(colors) => {
                        let added = colors.extend_late_joiners(roster.players());
                        if !added.is_empty() {
                            tracing::info!("Assigned colors to late joiners: {:?}", added);
                        }
                    }
                }
                self.session.replace_roster(roster);
                Dispatched::Applied
            }
            ServerMessage::Info(notice) => Dispatched::Notice(notice),
            ServerMessage::Choice(prompt) => {
                self.session.set_prompt(prompt);
                Dispatched::Applied
            }
            ServerMessage::StopChoice => {
                if self.session.clear_prompt(WAITING_FOR_OTHERS).is_none() {
                    tracing::debug!("stopChoice received with no active prompt");
                }
                Dispatched::Applied
            }
            ServerMessage::Log(line) => {
                self.session.push_log(line);
                Dispatched::Applied
            }
            ServerMessage::Unrecognized { tag } => {
                tracing::warn!("Unrecognized message type '{}', ignoring", tag);
                Dispatched::Ignored { tag }
            }
        };

        self.state = next;
        dispatched
    }

    /// Pick one of the offered options.
    ///
    /// The prompt is cleared before anything is sent; the returned option is
    /// the payload to transmit. A later `stopChoice` from the server is a no-op.
    pub fn submit_choice(&mut self, selection: &str) -> Result<String, ChoiceError> {
        let prompt = self.session.prompt().ok_or(ChoiceError::NoActivePrompt)?;
        let choice = prompt.resolve(selection)?.to_string();
        self.session.clear_prompt(WAITING_FOR_OTHERS);
        tracing::debug!("Submitting choice '{}'", choice);
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChoicePrompt, LobbyCode, PALETTE, Player, Roster};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Session::new("Al", LobbyCode::new("ABCD")))
    }

    fn roster(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|name| Player::new(*name, 2, vec![]))
                .collect(),
        )
        .unwrap()
    }

    fn choice(options: &[&str]) -> ServerMessage {
        ServerMessage::Choice(ChoicePrompt::new(
            options.iter().map(|o| o.to_string()).collect(),
            "Choose an action",
        ))
    }

    fn log_lines(dispatcher: &Dispatcher) -> Vec<String> {
        dispatcher
            .session()
            .log()
            .entries()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_first_update_assigns_colors_and_syncs() {
        // テスト項目: 最初の update で色が割り当てられ Synced に遷移する
        // given (前提条件):
        let mut dispatcher = dispatcher();
        assert_eq!(dispatcher.state(), SyncState::AwaitingFirstRoster);

        // when (操作):
        let result = dispatcher.apply(ServerMessage::Update(roster(&["Al", "Bo"])));

        // then (期待する結果):
        assert_eq!(result, Dispatched::Applied);
        assert_eq!(dispatcher.state(), SyncState::Synced);
        let colors = dispatcher.session().colors().unwrap();
        assert_eq!(colors.get("Al"), Some(PALETTE[0]));
        assert_eq!(colors.get("Bo"), Some(PALETTE[1]));
    }

    #[test]
    fn test_reordered_update_keeps_colors() {
        // テスト項目: 並び替えられたロスターを受け取っても色は変わらない
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.apply(ServerMessage::Update(roster(&["Al", "Bo"])));
        let before = dispatcher.session().colors().cloned();

        // when (操作):
        dispatcher.apply(ServerMessage::Update(roster(&["Bo", "Al"])));
        dispatcher.apply(ServerMessage::Update(roster(&["Bo", "Al"])));

        // then (期待する結果):
        assert_eq!(dispatcher.session().colors().cloned(), before);
        assert_eq!(dispatcher.session().roster().players()[0].name, "Bo");
        assert_eq!(dispatcher.state(), SyncState::Synced);
    }

    #[test]
    fn test_late_joiner_gets_next_palette_color() {
        // テスト項目: 途中参加者には次のパレット色が割り当てられる
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.apply(ServerMessage::Update(roster(&["Al", "Bo"])));

        // when (操作):
        dispatcher.apply(ServerMessage::Update(roster(&["Cy", "Bo", "Al"])));

        // then (期待する結果):
        let colors = dispatcher.session().colors().unwrap();
        assert_eq!(colors.get("Al"), Some(PALETTE[0]));
        assert_eq!(colors.get("Bo"), Some(PALETTE[1]));
        assert_eq!(colors.get("Cy"), Some(PALETTE[2]));
    }

    #[test]
    fn test_info_is_notice_without_mutation() {
        // テスト項目: info は通知として返され、状態は変わらない
        // given (前提条件):
        let mut dispatcher = dispatcher();
        let before = dispatcher.session().clone();

        // when (操作):
        let result = dispatcher.apply(ServerMessage::Info("Bo wins!".to_string()));

        // then (期待する結果):
        assert_eq!(result, Dispatched::Notice("Bo wins!".to_string()));
        assert_eq!(dispatcher.session(), &before);
        assert_eq!(dispatcher.state(), SyncState::AwaitingFirstRoster);
    }

    #[test]
    fn test_choice_overwrites_previous_prompt() {
        // テスト項目: 新しい choice は以前の選択肢を上書きする
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.apply(choice(&["Tax", "Coup"]));

        // when (操作):
        dispatcher.apply(choice(&["Challenge", "Pass"]));

        // then (期待する結果):
        let prompt = dispatcher.session().prompt().unwrap();
        assert_eq!(prompt.options, vec!["Challenge", "Pass"]);
        assert_eq!(dispatcher.session().status(), "Choose an action");
    }

    #[test]
    fn test_stop_choice_is_idempotent() {
        // テスト項目: stopChoice は2回連続でも、choice が無くても問題なく動く
        // given (前提条件):
        let mut dispatcher = dispatcher();

        // when (操作):
        let first = dispatcher.apply(ServerMessage::StopChoice);
        dispatcher.apply(choice(&["Tax"]));
        let second = dispatcher.apply(ServerMessage::StopChoice);
        let third = dispatcher.apply(ServerMessage::StopChoice);

        // then (期待する結果):
        assert_eq!(first, Dispatched::Applied);
        assert_eq!(second, Dispatched::Applied);
        assert_eq!(third, Dispatched::Applied);
        assert!(dispatcher.session().prompt().is_none());
        assert_eq!(dispatcher.session().status(), WAITING_FOR_OTHERS);
    }

    #[test]
    fn test_log_frames_evict_oldest() {
        // テスト項目: log を6件受け取ると最も古い1件が追い出される
        // given (前提条件):
        let mut dispatcher = dispatcher();
        for line in ["a", "b", "c", "d", "e"] {
            dispatcher.apply(ServerMessage::Log(line.to_string()));
        }

        // when (操作):
        dispatcher.apply(ServerMessage::Log("f".to_string()));

        // then (期待する結果):
        assert_eq!(log_lines(&dispatcher), vec!["b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_enter_game_seeds_log_and_is_evicted_later() {
        // テスト項目: ゲーム開始時のログは通常の上限ルールに従って追い出される
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.enter_game();
        assert_eq!(log_lines(&dispatcher), vec![STARTED_GAME]);

        // when (操作):
        for line in ["a", "b", "c", "d", "e"] {
            dispatcher.apply(ServerMessage::Log(line.to_string()));
        }

        // then (期待する結果):
        assert_eq!(log_lines(&dispatcher), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_unrecognized_tag_leaves_state_unchanged() {
        // テスト項目: 未知のタグは状態を一切変更しない
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.apply(ServerMessage::Update(roster(&["Al", "Bo"])));
        dispatcher.apply(choice(&["Tax", "Coup"]));
        dispatcher.apply(ServerMessage::Log("a".to_string()));
        let before = dispatcher.session().clone();

        // when (操作):
        let result = dispatcher.apply(ServerMessage::Unrecognized {
            tag: "chat".to_string(),
        });

        // then (期待する結果):
        assert_eq!(
            result,
            Dispatched::Ignored {
                tag: "chat".to_string()
            }
        );
        assert_eq!(dispatcher.session(), &before);
        assert_eq!(dispatcher.state(), SyncState::Synced);
    }

    #[test]
    fn test_submit_choice_clears_prompt_then_stop_choice_is_noop() {
        // テスト項目: 選択肢を送信すると即座にクリアされ、後続の stopChoice は何もしない
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.apply(choice(&["Tax", "Coup"]));

        // when (操作):
        let submitted = dispatcher.submit_choice("Tax");

        // then (期待する結果):
        assert_eq!(submitted, Ok("Tax".to_string()));
        assert!(dispatcher.session().prompt().is_none());
        assert_eq!(dispatcher.session().status(), WAITING_FOR_OTHERS);

        let after_submit = dispatcher.session().clone();
        let result = dispatcher.apply(ServerMessage::StopChoice);
        assert_eq!(result, Dispatched::Applied);
        assert_eq!(dispatcher.session(), &after_submit);
    }

    #[test]
    fn test_submit_choice_without_prompt_is_error() {
        // テスト項目: 選択肢がない状態で送信するとエラーになる
        // given (前提条件):
        let mut dispatcher = dispatcher();

        // when (操作):
        let result = dispatcher.submit_choice("Tax");

        // then (期待する結果):
        assert_eq!(result, Err(ChoiceError::NoActivePrompt));
    }

    #[test]
    fn test_submit_unknown_option_keeps_prompt() {
        // テスト項目: 提示されていない選択肢は拒否され、選択肢は残る
        // given (前提条件):
        let mut dispatcher = dispatcher();
        dispatcher.apply(choice(&["Tax", "Coup"]));

        // when (操作):
        let result = dispatcher.submit_choice("Steal");

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChoiceError::UnknownOption("Steal".to_string()))
        );
        assert!(dispatcher.session().prompt().is_some());
    }

    #[test]
    fn test_sync_state_transition_is_pure() {
        // テスト項目: update 以外のメッセージでは状態が遷移しない
        // given (前提条件):
        let state = SyncState::AwaitingFirstRoster;

        // when (操作):
        let after_log = state.next(&ServerMessage::Log("a".to_string()));
        let after_update = state.next(&ServerMessage::Update(Roster::default()));

        // then (期待する結果):
        assert_eq!(after_log, SyncState::AwaitingFirstRoster);
        assert_eq!(after_update, SyncState::Synced);
        assert_eq!(
            SyncState::Synced.next(&ServerMessage::StopChoice),
            SyncState::Synced
        );
    }
}
