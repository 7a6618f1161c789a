//! Mock authentication backend.

mod mock;
mod user_id;

pub use mock::{MockAuthBackend, ACCEPTED_EMAIL, ACCEPTED_PASSWORD, MOCK_SESSION_TOKEN};
pub use user_id::next_user_id;
