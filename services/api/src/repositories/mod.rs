//! Repositories for database operations
//!
//! One repository per collection, each owning a handle to the shared pool.
//! Every write is a single atomic statement; there are no cross-document
//! transactions.

pub mod group;
pub mod message;
pub mod session;
pub mod user;
pub mod wellness;

pub use group::GroupRepository;
pub use message::MessageRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
pub use wellness::WellnessRepository;
