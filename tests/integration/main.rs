//! Integration tests driving the HTTP router against a real PostgreSQL.
//!
//! Set `VIDHUB_TEST_DATABASE_URL` to run them; otherwise each test returns
//! early.

mod helpers;

mod auth_test;
mod social_test;
mod tweet_test;
mod video_test;
