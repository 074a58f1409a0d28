//! Property accessors.
//!
//! A resolved property is read through a [`ReadAccessor`] and written through a
//! [`WriteAccessor`]. Both are either method backed (a getter or setter) or field backed.
//! Reading through a write accessor cannot be expressed, the two directions are different
//! types.
//!
//! # Access checks
//!
//! Public members are always invoked. Non-public members are only invoked if the index was
//! built with [`crate::reflection::ReflectorConfig::suppress_access_checks`], otherwise the
//! call fails with [`Error::AccessDenied`].

use crate::{
    metadata::{
        field::FieldRc,
        method::{MemberAccessFlags, MethodRc},
        typesystem::TypeRc,
        value::{Instance, Value},
    },
    Error, Result,
};

fn check_access(
    access: &MemberAccessFlags,
    suppress_access_checks: bool,
    member: &str,
    type_name: &str,
) -> Result<()> {
    if access.is_public() || suppress_access_checks {
        return Ok(());
    }

    Err(Error::AccessDenied {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Invokes a getter or setter method
#[derive(Debug, Clone)]
pub struct MethodInvoker {
    method: MethodRc,
    type_name: String,
    property_type: TypeRc,
    suppress_access_checks: bool,
}

impl MethodInvoker {
    pub(crate) fn new(
        method: MethodRc,
        type_name: String,
        property_type: TypeRc,
        suppress_access_checks: bool,
    ) -> Self {
        MethodInvoker {
            method,
            type_name,
            property_type,
            suppress_access_checks,
        }
    }

    /// The invoked method
    #[must_use]
    pub fn method(&self) -> &MethodRc {
        &self.method
    }

    /// The resolved property type, the return type of a getter or the parameter of a setter
    #[must_use]
    pub fn property_type(&self) -> &TypeRc {
        &self.property_type
    }

    /// Invoke the method on `target`
    ///
    /// # Errors
    /// Returns [`Error::AccessDenied`] for a forbidden non-public method,
    /// [`Error::InvalidArgument`] on an arity mismatch, or whatever the body reports.
    pub fn invoke(&self, target: &Instance, args: &[Value]) -> Result<Value> {
        check_access(
            &self.method.access,
            self.suppress_access_checks,
            &self.method.name,
            &self.type_name,
        )?;
        self.method.invoke(target, args)
    }
}

/// Reads or writes a field directly
#[derive(Debug, Clone)]
pub struct FieldInvoker {
    field: FieldRc,
    type_name: String,
    property_type: TypeRc,
    suppress_access_checks: bool,
}

impl FieldInvoker {
    pub(crate) fn new(
        field: FieldRc,
        type_name: String,
        property_type: TypeRc,
        suppress_access_checks: bool,
    ) -> Self {
        FieldInvoker {
            field,
            type_name,
            property_type,
            suppress_access_checks,
        }
    }

    /// The accessed field
    #[must_use]
    pub fn field(&self) -> &FieldRc {
        &self.field
    }

    /// The resolved field type
    #[must_use]
    pub fn property_type(&self) -> &TypeRc {
        &self.property_type
    }

    fn check(&self) -> Result<()> {
        check_access(
            &self.field.access,
            self.suppress_access_checks,
            &self.field.name,
            &self.type_name,
        )
    }

    /// Read the field of `target`
    ///
    /// # Errors
    /// Returns [`Error::AccessDenied`] for a forbidden non-public field.
    pub fn get(&self, target: &Instance) -> Result<Value> {
        self.check()?;
        self.field.get(target)
    }

    /// Write the field of `target`
    ///
    /// # Errors
    /// Returns [`Error::AccessDenied`] for a forbidden non-public field.
    pub fn set(&self, target: &Instance, value: Value) -> Result<()> {
        self.check()?;
        self.field.set(target, value)
    }
}

/// Reads a property
#[derive(Debug, Clone)]
pub enum ReadAccessor {
    /// Through a zero-argument getter
    Method(MethodInvoker),
    /// Directly from a field
    Field(FieldInvoker),
}

impl ReadAccessor {
    /// Read the property from `target`
    ///
    /// # Errors
    /// See [`MethodInvoker::invoke`] and [`FieldInvoker::get`].
    pub fn read(&self, target: &Instance) -> Result<Value> {
        match self {
            ReadAccessor::Method(invoker) => invoker.invoke(target, &[]),
            ReadAccessor::Field(invoker) => invoker.get(target),
        }
    }

    /// Name of the backing method or field
    #[must_use]
    pub fn member_name(&self) -> &str {
        match self {
            ReadAccessor::Method(invoker) => &invoker.method.name,
            ReadAccessor::Field(invoker) => &invoker.field.name,
        }
    }

    /// Returns `true` if a getter method backs this accessor
    #[must_use]
    pub fn is_method(&self) -> bool {
        matches!(self, ReadAccessor::Method(_))
    }

    /// The resolved property type
    #[must_use]
    pub fn property_type(&self) -> &TypeRc {
        match self {
            ReadAccessor::Method(invoker) => invoker.property_type(),
            ReadAccessor::Field(invoker) => invoker.property_type(),
        }
    }
}

/// Writes a property
#[derive(Debug, Clone)]
pub enum WriteAccessor {
    /// Through a one-argument setter
    Method(MethodInvoker),
    /// Directly into a field
    Field(FieldInvoker),
}

impl WriteAccessor {
    /// Write `value` to the property of `target`
    ///
    /// # Errors
    /// See [`MethodInvoker::invoke`] and [`FieldInvoker::set`].
    pub fn write(&self, target: &Instance, value: Value) -> Result<()> {
        match self {
            WriteAccessor::Method(invoker) => invoker.invoke(target, &[value]).map(|_| ()),
            WriteAccessor::Field(invoker) => invoker.set(target, value),
        }
    }

    /// Name of the backing method or field
    #[must_use]
    pub fn member_name(&self) -> &str {
        match self {
            WriteAccessor::Method(invoker) => &invoker.method.name,
            WriteAccessor::Field(invoker) => &invoker.field.name,
        }
    }

    /// Returns `true` if a setter method backs this accessor
    #[must_use]
    pub fn is_method(&self) -> bool {
        matches!(self, WriteAccessor::Method(_))
    }

    /// The resolved property type
    #[must_use]
    pub fn property_type(&self) -> &TypeRc {
        match self {
            WriteAccessor::Method(invoker) => invoker.property_type(),
            WriteAccessor::Field(invoker) => invoker.property_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::{
        field::{Field, FieldModifiers},
        method::{Method, MethodModifiers},
        token::Token,
        typesystem::{CoreType, TypeRegistry, TypeSignature},
    };

    fn create_field(access: MemberAccessFlags) -> FieldRc {
        Arc::new(Field::new(
            Token::new(0x04000001),
            "secret".to_string(),
            Token::new(0x02000001),
            TypeSignature::core(CoreType::String),
            access,
            FieldModifiers::empty(),
            None,
        ))
    }

    fn create_setter(access: MemberAccessFlags, field: &FieldRc) -> MethodRc {
        Arc::new(Method {
            token: Token::new(0x06000001),
            name: "setSecret".to_string(),
            declaring: Token::new(0x02000001),
            params: vec![TypeSignature::core(CoreType::String)],
            return_type: TypeSignature::void(),
            access,
            modifiers: MethodModifiers::empty(),
            body: Some(Field::writer(field)),
        })
    }

    #[test]
    fn test_field_accessors() {
        let registry = TypeRegistry::new();
        let string = registry.get_core(CoreType::String).unwrap();
        let field = create_field(MemberAccessFlags::PRIVATE);
        let target = Instance::new(Token::new(0x02000001));

        let reader = ReadAccessor::Field(FieldInvoker::new(
            field.clone(),
            "app.Bean".to_string(),
            string.clone(),
            true,
        ));
        let writer = WriteAccessor::Field(FieldInvoker::new(
            field,
            "app.Bean".to_string(),
            string,
            true,
        ));

        writer.write(&target, Value::from("x")).unwrap();
        assert_eq!(reader.read(&target).unwrap(), Value::from("x"));
        assert_eq!(reader.member_name(), "secret");
        assert!(!reader.is_method());
        assert_eq!(reader.property_type().token, CoreType::String.token());
    }

    #[test]
    fn test_access_denied_without_suppression() {
        let registry = TypeRegistry::new();
        let string = registry.get_core(CoreType::String).unwrap();
        let field = create_field(MemberAccessFlags::PRIVATE);
        let target = Instance::new(Token::new(0x02000001));

        let reader = ReadAccessor::Field(FieldInvoker::new(
            field.clone(),
            "app.Bean".to_string(),
            string.clone(),
            false,
        ));
        match reader.read(&target) {
            Err(Error::AccessDenied { member, type_name }) => {
                assert_eq!(member, "secret");
                assert_eq!(type_name, "app.Bean");
            }
            other => panic!("Expected AccessDenied, got {other:?}"),
        }

        let writer = WriteAccessor::Method(MethodInvoker::new(
            create_setter(MemberAccessFlags::PROTECTED, &field),
            "app.Bean".to_string(),
            string,
            false,
        ));
        assert!(matches!(
            writer.write(&target, Value::from("x")),
            Err(Error::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_public_method_always_invokes() {
        let registry = TypeRegistry::new();
        let string = registry.get_core(CoreType::String).unwrap();
        let field = create_field(MemberAccessFlags::PRIVATE);
        let target = Instance::new(Token::new(0x02000001));

        let writer = WriteAccessor::Method(MethodInvoker::new(
            create_setter(MemberAccessFlags::PUBLIC, &field),
            "app.Bean".to_string(),
            string,
            false,
        ));

        writer.write(&target, Value::from("y")).unwrap();
        assert!(writer.is_method());
        assert_eq!(writer.member_name(), "setSecret");
        assert_eq!(field.get(&target).unwrap(), Value::from("y"));
    }
}
