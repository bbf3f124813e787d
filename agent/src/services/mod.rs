pub mod a2a_client;
pub mod greeting;
pub mod reply;

pub use a2a_client::A2aClient;
pub use reply::{EchoReply, ReplyGenerator};
