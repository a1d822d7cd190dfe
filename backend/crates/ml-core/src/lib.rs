pub mod error;
pub mod models;
pub mod source;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::account::Account;
pub use models::activity_event::ActivityEvent;
pub use models::activity_record::ActivityRecord;
pub use models::oauth_token::OAuthToken;
pub use models::provider::Provider;
pub use models::user::User;
pub use source::source_error::{Result as SourceResult, SourceError};
pub use source::ActivitySource;

pub use error_location::ErrorLocation;
