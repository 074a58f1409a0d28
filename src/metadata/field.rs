//! Field descriptors.
//!
//! A [`Field`] stores its value either in the slots of an [`Instance`] or, for static fields,
//! in a slot owned by the descriptor itself. Unset slots read as the field's initial value,
//! which defaults to the zero value of primitive types and to [`Value::Null`] otherwise.

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use bitflags::bitflags;

use crate::{
    metadata::{
        method::{MemberAccessFlags, MethodBody},
        token::Token,
        typesystem::{PrimitiveKind, TypeSignature},
        value::{Instance, Value},
    },
    Error, Result,
};

/// Reference to a `Field`
pub type FieldRc = Arc<Field>;
/// A vector that holds a list of `Field`
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Field modifier flags
    pub struct FieldModifiers: u32 {
        /// Field belongs to the type, not to instances
        const STATIC = 0x0010;
        /// Field is assigned once
        const FINAL = 0x0020;
        /// Field is skipped by serialization
        const TRANSIENT = 0x0080;
    }
}

/// A field declared by a type
pub struct Field {
    /// Token
    pub token: Token,
    /// Name of the field
    pub name: String,
    /// The type that declares this field
    pub declaring: Token,
    /// Declared type
    pub signature: TypeSignature,
    /// Access flags
    pub access: MemberAccessFlags,
    /// Modifier flags
    pub modifiers: FieldModifiers,
    /// Value of a slot that was never written
    pub initial: Value,
    /// Slot of a static field
    static_slot: RwLock<Value>,
}

impl Field {
    /// Create a new field.
    ///
    /// Without an explicit `initial` value, primitive fields start at their zero value and
    /// everything else at [`Value::Null`].
    #[must_use]
    pub fn new(
        token: Token,
        name: String,
        declaring: Token,
        signature: TypeSignature,
        access: MemberAccessFlags,
        modifiers: FieldModifiers,
        initial: Option<Value>,
    ) -> Self {
        let initial = initial.unwrap_or_else(|| {
            signature
                .raw_token()
                .and_then(PrimitiveKind::from_token)
                .map_or(Value::Null, |kind| kind.default_value())
        });

        Field {
            token,
            name,
            declaring,
            signature,
            access,
            modifiers,
            static_slot: RwLock::new(initial.clone()),
            initial,
        }
    }

    /// Returns `true` for static fields
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(FieldModifiers::STATIC)
    }

    /// Returns `true` for final fields
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.contains(FieldModifiers::FINAL)
    }

    /// Read the value of this field from `target` (ignored for static fields)
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the static slot is poisoned.
    pub fn get(&self, target: &Instance) -> Result<Value> {
        if self.is_static() {
            let slot = self.static_slot.read().map_err(|_| Error::LockError)?;
            return Ok(slot.clone());
        }

        Ok(target
            .slot(self.token)
            .unwrap_or_else(|| self.initial.clone()))
    }

    /// Write the value of this field on `target` (ignored for static fields)
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the static slot is poisoned.
    pub fn set(&self, target: &Instance, value: Value) -> Result<()> {
        if self.is_static() {
            let mut slot = self.static_slot.write().map_err(|_| Error::LockError)?;
            *slot = value;
            return Ok(());
        }

        target.set_slot(self.token, value);
        Ok(())
    }

    /// A method body that returns the value of `field`
    #[must_use]
    pub fn reader(field: &FieldRc) -> MethodBody {
        let field = field.clone();
        Arc::new(move |target: &Instance, _: &[Value]| field.get(target))
    }

    /// A method body that stores its single argument into `field`
    #[must_use]
    pub fn writer(field: &FieldRc) -> MethodBody {
        let field = field.clone();
        Arc::new(move |target: &Instance, args: &[Value]| {
            let value = args.first().cloned().unwrap_or_default();
            field.set(target, value)?;
            Ok(Value::Null)
        })
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("declaring", &self.declaring)
            .field("signature", &self.signature)
            .field("access", &self.access)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}
