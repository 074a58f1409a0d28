use std::fmt;
use std::hash::{Hash, Hasher};

/// Token kind stored in the high byte of user type tokens
pub const TOKEN_TYPE: u8 = 0x02;
/// Token kind stored in the high byte of field tokens
pub const TOKEN_FIELD: u8 = 0x04;
/// Token kind stored in the high byte of method and constructor tokens
pub const TOKEN_METHOD: u8 = 0x06;
/// Token kind stored in the high byte of built-in platform types
pub const TOKEN_PLATFORM: u8 = 0xF0;
/// Token kind stored in the high byte of array types created on demand
pub const TOKEN_ARRAY: u8 = 0xF1;

/// An identity token for a type or a member.
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the kind of entity
/// - The low 24 bits (bits 0-23) indicate the sequence number within that kind
///
/// Two descriptors of the same type always carry the same token, so the token is the
/// identity used for equality, hashing and cache keys.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a kind byte and a sequence number
    #[must_use]
    pub fn from_parts(kind: u8, row: u32) -> Self {
        Token((u32::from(kind) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the kind from the token (high byte)
    #[must_use]
    pub fn kind(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the sequence number from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the token names a type (user, platform or array)
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(self.kind(), TOKEN_TYPE | TOKEN_PLATFORM | TOKEN_ARRAY)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, kind: 0x{:02x}, row: {})",
            self.0,
            self.kind(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_token_parts() {
        let token = Token::from_parts(TOKEN_METHOD, 1);
        assert_eq!(token.value(), 0x06000001);
        assert_eq!(token.kind(), TOKEN_METHOD);
        assert_eq!(token.row(), 1);

        let token = Token::from_parts(TOKEN_TYPE, 0x01FF_FFFF);
        assert_eq!(token.row(), 0x00FF_FFFF);
    }

    #[test]
    fn test_token_is_type() {
        assert!(Token::from_parts(TOKEN_TYPE, 3).is_type());
        assert!(Token::from_parts(TOKEN_PLATFORM, 3).is_type());
        assert!(Token::from_parts(TOKEN_ARRAY, 3).is_type());
        assert!(!Token::from_parts(TOKEN_FIELD, 3).is_type());
        assert!(!Token::from_parts(TOKEN_METHOD, 3).is_type());
    }

    #[test]
    fn test_token_is_null() {
        assert!(Token(0).is_null());
        assert!(!Token(0x02000001).is_null());
    }

    #[test]
    fn test_token_from_conversion() {
        let value = 0x04000007u32;
        let token: Token = value.into();
        assert_eq!(token.value(), value);

        let back_to_u32: u32 = token.into();
        assert_eq!(back_to_u32, value);
    }

    #[test]
    fn test_token_formatting() {
        let token = Token(0x02000005);
        assert_eq!(format!("{token}"), "0x02000005");
        assert_eq!(
            format!("{token:?}"),
            "Token(0x02000005, kind: 0x02, row: 5)"
        );
    }

    #[test]
    fn test_token_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Token(0x02000001), "Section");
        map.insert(Token(0x02000002), "Child");

        assert_eq!(map.get(&Token(0x02000001)), Some(&"Section"));
        assert_eq!(map.get(&Token(0x02000003)), None);
    }
}
