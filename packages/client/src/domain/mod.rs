//! Domain layer
//!
//! セッション状態（ロスター、色割り当て、選択肢、イベントログ）と、
//! 外部との境界になる trait（`FrameTransport`, `LobbyApi`）を定義します。
//! このレイヤーは I/O を一切行いません。

pub mod choice;
pub mod color;
pub mod error;
pub mod event_log;
pub mod lobby;
pub mod lobby_api;
pub mod message;
pub mod player;
pub mod session;
pub mod transport;

pub use choice::{ChoicePrompt, WAITING_FOR_OTHERS};
pub use color::{Color, ColorMap, PALETTE, assign_colors};
pub use error::{ActionChannelError, ChoiceError, DecodeError, TransportError};
pub use event_log::{EVENT_LOG_CAPACITY, EventLog};
pub use lobby::{LobbyCode, LobbyEvent};
pub use lobby_api::LobbyApi;
pub use message::{MessageTag, ServerMessage};
pub use player::{CardId, Player, Roster};
pub use session::Session;
pub use transport::{CloseInfo, FrameTransport, TransportEvent};
