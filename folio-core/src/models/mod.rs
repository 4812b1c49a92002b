mod health;
mod message;
mod resume;

pub use health::HealthStatus;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role};
pub use resume::{Contact, Education, Experience, Project, ResumeData, SkillGroups};
