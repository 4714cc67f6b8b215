mod common;
mod documents_test;
mod health_test;
