pub mod session;
pub mod transcript;
pub mod transport;

pub use session::{ChatSession, SessionSettings, ERROR_TURN_TEXT};
pub use transcript::{Transcript, Turn, TurnKind};
pub use transport::{HttpTransport, RelayTransport, TransportError};
