use serde::Serialize;

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /register`; `email` is serialized as `null` when absent
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_without_email_sends_null() {
        let body = RegisterRequest {
            username: "bob",
            email: None,
            password: "Secret12",
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "username": "bob", "email": null, "password": "Secret12" })
        );
    }
}
