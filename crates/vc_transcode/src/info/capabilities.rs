use bitflags::bitflags;

bitflags! {
    /// The capabilities a type reports through its [`TypeInfo`](crate::info::TypeInfo).
    ///
    /// A type may satisfy several classifier predicates at once (a map is
    /// both `ITERABLE` and `ASSOCIATIVE`). [`classify`](crate::info::classify)
    /// resolves them with a fixed precedence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Atomic value: primitives, strings, date/time values, GUIDs, enums.
        const SIMPLE = 1 << 0;
        /// `Option<T>`.
        const NULLABLE = 1 << 1;
        /// Homogeneous iteration over elements.
        const ITERABLE = 1 << 2;
        /// Index-based access, insertion and removal.
        const INDEXABLE = 1 << 3;
        /// Iteration order is the reverse of insertion order.
        const LIFO = 1 << 4;
        /// Key/value association.
        const ASSOCIATIVE = 1 << 5;
        /// No mutation after construction.
        const READ_ONLY = 1 << 6;
        /// Elements (or keys and values) are not statically typed.
        const UNTYPED = 1 << 7;
        /// Generic two-slot key/value structure.
        const PAIR = 1 << 8;
        /// Untyped dictionary entry.
        const ENTRY = 1 << 9;
        /// Event-handler shape, never transcoded unless force-included.
        const EVENT = 1 << 10;
        /// The concrete type is only known at runtime.
        const ABSTRACT = 1 << 11;
    }
}
