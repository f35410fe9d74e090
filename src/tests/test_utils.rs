use crate::midware::jwt::JWT;

pub const TEST_SECRET: &str = "test_secret";

pub fn test_jwt() -> JWT {
	JWT::new(TEST_SECRET, 30)
}

pub fn generate_test_token(email: &str) -> String {
	test_jwt().create_token(email).expect("failed to create test token")
}
