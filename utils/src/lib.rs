use std::fmt::Debug;

pub mod text;

/// Defines a simple error type with a fixed message.
///
/// The type implements [`Debug`], [`Display`](std::fmt::Display) and [`std::error::Error`].
///
/// # Examples
///
/// ```
/// utils::define_simple_error!(
///     /// The input was not understood.
///     InputError(()):
///     "the input is invalid"
/// );
///
/// assert_eq!(InputError(()).to_string(), "the input is invalid");
/// ```
///
/// Unit structs work too:
/// ```
/// utils::define_simple_error!(EmptyError: "nothing here");
/// assert_eq!(EmptyError.to_string(), "nothing here");
/// ```
///
/// Or, to only implement the traits for an existing type, prefix with `@main`:
/// ```
/// #[derive(Debug)]
/// struct Code(u8);
///
/// utils::define_simple_error!(@main Code: e => "failed with code {}", e.0);
/// assert_eq!(Code(4).to_string(), "failed with code 4");
/// ```
#[macro_export]
macro_rules! define_simple_error {
    (@main $Name:ident: $e:ident => $($message:tt)*) => {
        impl ::std::error::Error for $Name {}

        impl ::std::fmt::Display for $Name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let $e = self;
                write!(f, $($message)*)
            }
        }
    };
    ($(#[$attr:meta])* $Name:ident(()): $message:literal) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $Name(pub ());

        $crate::define_simple_error!(@main $Name: _e => $message);
    };
    ($(#[$attr:meta])* $Name:ident: $message:literal) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $Name;

        $crate::define_simple_error!(@main $Name: _e => $message);
    };
}

/// Trait that allows discarding values.
pub trait Discard {
    /// Consumes and discards the value.
    /// May panic if debug assertions are enabled.
    fn discard(self);
}

impl<T, E: Debug> Discard for Result<T, E> {
    /// Consumes and discards the value.
    /// If debug assertions are enabled, panics if it holds an error.
    fn discard(self) {
        #[cfg(debug_assertions)]
        drop(self.unwrap());

        #[cfg(not(debug_assertions))]
        drop(self);
    }
}
