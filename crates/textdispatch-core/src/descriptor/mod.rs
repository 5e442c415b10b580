//! Method descriptors: the compile-time description of a handler method.
//!
//! A [`MethodDescriptor`] records everything the compiler reads about one
//! method declared on a handler type: its name, its [`Signature`], an
//! optional alias token, the exclusion marker, and (for methods the compiler
//! can invoke) a [`Binding`] to the method body. Markers are attached with
//! builder calls at registration time rather than discovered by reflection.
//!
//! # Example
//!
//! ```
//! use textdispatch_core::MethodDescriptor;
//!
//! struct Counter(u32);
//!
//! let plus = MethodDescriptor::<Counter>::action("plus", |c| c.0 += 1).alias("+");
//! assert_eq!(plus.name(), "plus");
//! assert_eq!(plus.declared_alias(), Some("+"));
//! ```

use std::fmt;

use crate::classify::{PARSE_INT, PARSE_STRING};

/// Invocation of a nullary, no-return action.
pub type ActionFn<H> = fn(&mut H);

/// Invocation of an integer sink with the parsed literal.
pub type IntegerSinkFn<H> = fn(&mut H, i64);

/// Invocation of a string sink with the raw token.
pub type StringSinkFn<H> = fn(&mut H, &str);

/// Callable body attached to a method descriptor.
pub enum Binding<H> {
    /// A nullary action.
    Action(ActionFn<H>),
    /// A sink receiving a parsed integer.
    Integer(IntegerSinkFn<H>),
    /// A sink receiving the raw token text.
    Text(StringSinkFn<H>),
}

impl<H> Binding<H> {
    /// Returns a short name for the binding shape.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
        }
    }
}

impl<H> Clone for Binding<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Binding<H> {}

impl<H> fmt::Debug for Binding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding::{}", self.shape())
    }
}

/// Parameter arity and return kind of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    parameter_count: usize,
    returns_void: bool,
}

impl Signature {
    /// Creates a signature from its parts.
    #[must_use]
    pub const fn new(parameter_count: usize, returns_void: bool) -> Self {
        Self {
            parameter_count,
            returns_void,
        }
    }

    /// The signature of a dispatchable action: no parameters, no return.
    #[must_use]
    pub const fn nullary() -> Self {
        Self::new(0, true)
    }

    /// Returns the number of declared parameters.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Returns `true` when the method returns no value.
    #[must_use]
    pub const fn returns_void(&self) -> bool {
        self.returns_void
    }
}

/// Description of one method declared on a handler type.
pub struct MethodDescriptor<H> {
    name: String,
    signature: Signature,
    alias: Option<String>,
    excluded: bool,
    binding: Option<Binding<H>>,
}

impl<H> MethodDescriptor<H> {
    /// Creates an unbound descriptor from a name and signature.
    ///
    /// Unbound descriptors describe helper methods the compiler must know
    /// about but never invokes.
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
            alias: None,
            excluded: false,
            binding: None,
        }
    }

    /// Creates a nullary action bound to `action`.
    pub fn action(name: impl Into<String>, action: ActionFn<H>) -> Self {
        Self::new(name, Signature::nullary()).bind(Binding::Action(action))
    }

    /// Creates the reserved `ParseInt` sink bound to `sink`.
    #[must_use]
    pub fn integer_sink(sink: IntegerSinkFn<H>) -> Self {
        Self::new(PARSE_INT, Signature::new(1, true)).bind(Binding::Integer(sink))
    }

    /// Creates the reserved `ParseString` sink bound to `sink`.
    #[must_use]
    pub fn string_sink(sink: StringSinkFn<H>) -> Self {
        Self::new(PARSE_STRING, Signature::new(1, true)).bind(Binding::Text(sink))
    }

    /// Creates an unbound helper descriptor.
    pub fn helper(name: impl Into<String>, parameter_count: usize, returns_void: bool) -> Self {
        Self::new(name, Signature::new(parameter_count, returns_void))
    }

    /// Attaches a binding, replacing any previous one.
    #[must_use]
    pub const fn bind(mut self, binding: Binding<H>) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Declares the token the method answers to in place of its name.
    #[must_use]
    pub fn alias(mut self, token: impl Into<String>) -> Self {
        self.alias = Some(token.into());
        self
    }

    /// Marks the method as excluded from dispatch.
    #[must_use]
    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Returns the declared method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared signature.
    #[must_use]
    pub const fn signature(&self) -> Signature {
        self.signature
    }

    /// Returns the declared alias, if any.
    #[must_use]
    pub fn declared_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns `true` when the exclusion marker is present.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Returns the attached binding, if any.
    #[must_use]
    pub const fn binding(&self) -> Option<Binding<H>> {
        self.binding
    }
}

impl<H> Clone for MethodDescriptor<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            signature: self.signature,
            alias: self.alias.clone(),
            excluded: self.excluded,
            binding: self.binding,
        }
    }
}

impl<H> fmt::Debug for MethodDescriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("alias", &self.alias)
            .field("excluded", &self.excluded)
            .field("binding", &self.binding)
            .finish()
    }
}
