//! Domain models and request/response types

pub mod group;
pub mod message;
pub mod session;
pub mod user;
pub mod wellness;

pub use group::{CreateGroupRequest, SupportGroup};
pub use message::{ConversationSummary, Message, MessageTarget};
pub use session::{
    CounsellingSession, CreateSessionRequest, SessionStatus, SessionType,
    UpdateSessionStatusRequest,
};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse, UserRole};
pub use wellness::{MoodEntry, Quiz, QuizQuestion, Resource};
