pub mod account;
pub mod activity_event;
pub mod activity_record;
pub mod oauth_token;
pub mod provider;
pub mod user;
