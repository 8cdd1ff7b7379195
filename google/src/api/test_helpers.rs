//! Test helpers for the Compute API

#[cfg(test)]
pub fn create_test_client(url: &str) -> super::Client {
    super::Client::new(url, "test-access-token").unwrap()
}
