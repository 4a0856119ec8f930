mod access_request;
mod gatekeeper_response;
mod key_ack;
mod key_request;

pub use access_request::AccessRequest;
pub use gatekeeper_response::GatekeeperResponse;
pub use key_ack::KeyAck;
pub use key_request::KeyRequest;
