//! Member access and modifier flags.
//!
//! # Key Types
//! - [`MemberAccessFlags`]: Visibility of a method, constructor or field
//! - [`MethodModifiers`]: Modifiers of a method declaration

use bitflags::bitflags;

/// Bitmask for `ACCESS` state extraction
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Member access flags, a value inside [`MEMBER_ACCESS_MASK`] rather than independent bits
    pub struct MemberAccessFlags: u32 {
        /// Accessible only by the declaring type
        const PRIVATE = 0x0001;
        /// Accessible inside the declaring namespace
        const PACKAGE = 0x0002;
        /// Accessible by the namespace and by sub-types
        const PROTECTED = 0x0003;
        /// Accessible by anyone
        const PUBLIC = 0x0004;
    }
}

impl MemberAccessFlags {
    /// Extract access flags from raw member attributes
    #[must_use]
    pub fn from_member_flags(flags: u32) -> Self {
        let access = flags & MEMBER_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }

    /// Returns `true` if the member can be used without suppressing access checks
    #[must_use]
    pub fn is_public(&self) -> bool {
        *self == MemberAccessFlags::PUBLIC
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method modifier flags
    pub struct MethodModifiers: u32 {
        /// Method belongs to the type, not to instances
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method has no implementation
        const ABSTRACT = 0x0040;
        /// Method was generated, not declared
        const SYNTHETIC = 0x0100;
        /// Compiler generated forwarder that adapts an override to an erased signature
        const BRIDGE = 0x0200;
    }
}

impl MethodModifiers {
    /// Extract modifier flags from raw member attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_flags_extraction() {
        let raw = MemberAccessFlags::PROTECTED.bits() | MethodModifiers::STATIC.bits();

        assert_eq!(
            MemberAccessFlags::from_member_flags(raw),
            MemberAccessFlags::PROTECTED
        );
        assert_eq!(
            MethodModifiers::from_method_flags(raw),
            MethodModifiers::STATIC
        );
    }

    #[test]
    fn test_is_public() {
        assert!(MemberAccessFlags::PUBLIC.is_public());
        assert!(!MemberAccessFlags::PROTECTED.is_public());
        assert!(!MemberAccessFlags::PRIVATE.is_public());
    }
}
