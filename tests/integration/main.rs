//! Integration tests for steplog.

mod helpers;

mod concurrency_test;
mod failure_test;
