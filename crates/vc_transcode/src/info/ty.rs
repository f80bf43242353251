use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`], display path and generic definition.
///
/// The generic definition is the path without generic arguments
/// (`alloc::vec::Vec` for `Vec<i32>`). The metadata cache matches its
/// not-supported definition list against it.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    definition: &'static str,
}

impl Type {
    /// Create the identity of `T`, using [`type_name`](core::any::type_name) for the path.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        let path = core::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            path,
            definition: strip_generics(path),
        }
    }

    /// Override the generic-definition path.
    ///
    /// Built-in implementations use this to pin stable definition names
    /// that do not depend on the standard library's internal module layout.
    #[inline]
    pub const fn with_definition(mut self, definition: &'static str) -> Self {
        self.definition = definition;
        self
    }

    /// Override the display path.
    #[inline]
    pub const fn with_path(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub const fn definition(&self) -> &'static str {
        self.definition
    }

    /// Returns the last segment of the generic definition, e.g. `Vec` for `Vec<i32>`.
    pub fn ident(&self) -> &'static str {
        match self.definition.rfind("::") {
            Some(index) => &self.definition[index + 2..],
            None => self.definition,
        }
    }

    /// Check if this is the type `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

fn strip_generics(path: &'static str) -> &'static str {
    match path.find('<') {
        Some(index) => &path[..index],
        None => path,
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Type;
    use alloc::vec::Vec;

    #[test]
    fn definition_drops_generics() {
        let ty = Type::of::<Vec<i32>>();
        assert!(ty.is::<Vec<i32>>());
        assert!(!ty.is::<Vec<u32>>());
        assert!(ty.path().ends_with("Vec<i32>"));
        assert!(ty.definition().ends_with("Vec"));
        assert_eq!(ty.ident(), "Vec");

        let pinned = Type::of::<Vec<i32>>().with_definition("alloc::vec::Vec");
        assert_eq!(pinned.definition(), "alloc::vec::Vec");
        assert_eq!(pinned, ty);
    }
}
