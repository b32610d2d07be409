/// Client identity attached to a request once its API key is accepted
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Last characters of the key, safe to log
    pub key_hint: String,
}

impl ApiClient {
    pub fn from_key(key: &str) -> Self {
        let hint: String = key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        Self {
            key_hint: format!("...{}", hint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_hint_keeps_last_four_chars() {
        assert_eq!(ApiClient::from_key("secret-key-1234").key_hint, "...1234");
        assert_eq!(ApiClient::from_key("ab").key_hint, "...ab");
    }
}
