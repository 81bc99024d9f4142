use crate::error::DashboardError;

/// Bearer-token session handed to the list synchronizer and submission pipeline
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// The token to authorize with, or `Unauthenticated`
    pub fn token(&self) -> Result<&str, DashboardError> {
        self.token.as_deref().ok_or(DashboardError::Unauthenticated)
    }

    pub fn set_token(&mut self, token: String) {
        let token = token.trim().to_string();
        self.token = if token.is_empty() { None } else { Some(token) };
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token for display in the header, never the full value
    pub fn masked_display(&self) -> Option<String> {
        self.token.as_deref().map(mask_token)
    }
}

pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 15 {
        return "●".repeat(chars.len());
    }

    let first: String = chars[..7].iter().collect();
    let last: String = chars[chars.len() - 6..].iter().collect();
    format!("{first}...{last}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_unauthenticated() {
        let session = Session::default();
        assert_eq!(session.token(), Err(DashboardError::Unauthenticated));
        assert!(!session.is_authenticated());

        let blank = Session::new(Some("   ".to_string()));
        assert!(!blank.is_authenticated());
    }

    #[test]
    fn test_set_token_and_logout() {
        let mut session = Session::default();
        session.set_token("  abc123  ".to_string());
        assert_eq!(session.token(), Ok("abc123"));

        session.logout();
        assert!(session.token().is_err());
    }

    #[test]
    fn test_mask_short_token() {
        assert_eq!(mask_token("secret"), "●●●●●●");
    }

    #[test]
    fn test_mask_long_token() {
        let masked = mask_token("eyJhbGciOiJIUzI1NiJ9.payload.signature");
        assert_eq!(masked, "eyJhbGc...nature");
    }
}
