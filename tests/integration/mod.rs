//! Integration tests for the agent registry service

mod http_api;
