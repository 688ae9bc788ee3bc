use rand::{Rng, distr::Alphanumeric};

// Helper function to generate consistent test data
#[allow(dead_code)]
pub fn generate_test_items(prefix: &str, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("{prefix}{i:06}").into_bytes())
        .collect()
}

// Helper function to generate random string data
#[allow(dead_code)]
pub fn generate_random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
