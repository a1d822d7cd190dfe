mod account;
mod oauth_token;
mod provider;
