pub mod catalog;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod markdown;
pub mod models;
pub mod resume;
pub mod session;

pub use catalog::{category_meta, skill_icon, Accent, CategoryMeta, DEFAULT_SKILL_ICON};
pub use client::{
    ApiClient, ChatTransport, CONNECTIVITY_FALLBACK, GENERIC_FAILURE_FALLBACK,
};
pub use config::{
    get_config_dir, ApiConfig, ConfigLoadError, DisplayConfig, FolioConfig,
    LoggingConfig, ResumeConfig, ResumeSourceKind, DEFAULT_API_URL,
};
pub use contact::{mailto_link, validate, ContactErrors, ContactField, ContactForm};
pub use error::{CliErrorDisplay, FolioError, FolioResult};
pub use markdown::{split_blocks, Block};
pub use models::{
    ChatMessage, ChatRequest, ChatResponse, Contact, Education, Experience, HealthStatus, Project,
    ResumeData, Role, SkillGroups,
};
pub use resume::{provider_from_config, BundledResume, FileResume, RemoteResume, ResumeProvider};
pub use session::{
    ChatSession, CompletionOutcome, PendingRequest, SessionState, Suggestion, SUGGESTIONS,
};
