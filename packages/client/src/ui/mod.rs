//! UI layer
//!
//! - `presenter`: セッションが呼び出す表示・通知・確認の抽象（`Presenter` trait）
//! - `formatter`: 端末表示用の文字列整形
//! - `terminal`: `Presenter` の端末実装
//! - `input`: rustyline による入力スレッドとユーザーコマンド

pub mod formatter;
pub mod input;
pub mod presenter;
pub mod terminal;

pub use formatter::SessionFormatter;
pub use input::{UserCommand, spawn_input_thread};
pub use presenter::Presenter;
pub use terminal::TerminalPresenter;
