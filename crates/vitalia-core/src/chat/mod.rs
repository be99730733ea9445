//! Chat panel core: transcript, stream session, and the exchange loop.

pub mod exchange;
pub mod panel;
pub mod stream_session;
pub mod transcript;

pub use exchange::run_exchange;
pub use panel::ChatPanel;
pub use stream_session::StreamSession;
pub use transcript::Transcript;
