use std::{
    error::Error,
    fmt::{self, Debug, Display},
    ops::Deref,
};

use crate::{ErrorCollector, Tidy};

/// A flat, ordered list of errors, usually from a sequence of steps which should all be attempted
/// even if some fail.
///
/// An `ErrorList` never contains another `ErrorList`. Adding one splices its errors in at the end,
/// so a step which collects its own errors can be folded into its caller's list without any
/// nesting.
///
/// `ErrorList::default()` is a usable empty list, so there's no separate setup step before the
/// first error is added:
///
/// ```
/// # use tidyerr::ErrorList;
/// fn step(n: u32) -> Result<(), String> {
///     if n % 2 == 0 { Ok(()) } else { Err(format!("step {n} failed")) }
/// }
///
/// let mut errs: ErrorList<String> = ErrorList::default();
/// for n in 0..4 {
///     errs = errs.add(step(n));
/// }
///
/// assert_eq!(errs.to_string(), "step 1 failed, step 3 failed");
/// ```
///
/// # Rendering
///
/// The [`Display`] form is each error's own `Display` form, in the order they were added,
/// separated by `", "`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ErrorList<E> {
    errors: Vec<E>,
}

impl<E> ErrorList<E> {
    /// Constructs an empty `ErrorList`.
    #[must_use]
    pub fn new() -> Self {
        ErrorList { errors: vec![] }
    }

    /// Adds an error to the end of this list, and returns the list.
    ///
    /// What is added depends on the [`Incoming`] value the argument converts into:
    ///
    /// - Nothing, for `None` or `Ok(())`.
    /// - Each of its errors in turn, for another `ErrorList` (or a [`Tidy::Many`]).
    /// - The error itself, otherwise.
    ///
    /// ```
    /// # use tidyerr::ErrorList;
    /// let inner = ErrorList::new().add("x").add("y");
    ///
    /// let errs = ErrorList::new()
    ///     .add("a")
    ///     .add(None)
    ///     .add(inner)
    ///     .add("b");
    ///
    /// assert_eq!(&errs[..], &["a", "x", "y", "b"]);
    /// ```
    #[must_use = "`add` returns the updated list; use `push` to add in place"]
    pub fn add(mut self, error: impl Into<Incoming<E>>) -> Self {
        self.push(error);
        self
    }

    /// Adds an error to the end of this list in place. Behaves the same as [`add`].
    ///
    /// [`add`]: ErrorList::add
    pub fn push(&mut self, error: impl Into<Incoming<E>>) {
        match error.into() {
            Incoming::Absent => {}
            Incoming::Single(error) => self.errors.push(error),
            Incoming::Collection(list) => self.errors.extend(list.errors),
        }
    }

    /// Consumes this list, returning its errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.errors
    }

    /// Collapses this list into the simplest equivalent result:
    ///
    /// - `Ok(())` if there are no errors.
    /// - [`Tidy::One`] with the error itself if there is exactly one.
    /// - [`Tidy::Many`] with the whole list otherwise.
    ///
    /// ```
    /// # use tidyerr::{ErrorList, Tidy};
    /// let errs: ErrorList<&str> = ErrorList::new();
    /// assert_eq!(errs.tidy(), Ok(()));
    ///
    /// let errs = ErrorList::new().add("only");
    /// assert_eq!(errs.tidy(), Err(Tidy::One("only")));
    ///
    /// let errs = ErrorList::new().add("a").add("b");
    /// assert_eq!(errs.clone().tidy(), Err(Tidy::Many(errs)));
    /// ```
    pub fn tidy(mut self) -> Result<(), Tidy<E>> {
        if self.errors.len() > 1 {
            log::trace!("tidied error list: {} errors", self.errors.len());
            return Err(Tidy::Many(self));
        }

        match self.errors.pop() {
            Some(error) => {
                log::trace!("tidied error list: single error");
                Err(Tidy::One(error))
            }
            None => {
                log::trace!("tidied error list: none");
                Ok(())
            }
        }
    }
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        ErrorList::new()
    }
}

impl<E> Deref for ErrorList<E> {
    type Target = [E];

    fn deref(&self) -> &Self::Target {
        &self.errors
    }
}

impl<E: Display> Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<E: Debug + Display> Error for ErrorList<E> {}

impl<E> ErrorCollector<E> for ErrorList<E> {
    fn push_error(&mut self, error: E) {
        self.errors.push(error);
    }

    fn propagate(self, other: &mut impl ErrorCollector<E>) {
        for error in self.errors {
            other.push_error(error);
        }
    }
}

impl<E, I: Into<Incoming<E>>> FromIterator<I> for ErrorList<E> {
    /// Collects errors into a list, following the same rules as [`ErrorList::add`]. This is handy
    /// for running every step and keeping only the failures.
    ///
    /// ```
    /// # use tidyerr::ErrorList;
    /// let results: Vec<Result<(), &str>> = vec![Ok(()), Err("disk full"), Ok(()), Err("timeout")];
    /// let errs: ErrorList<&str> = results.into_iter().collect();
    ///
    /// assert_eq!(errs.to_string(), "disk full, timeout");
    /// ```
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut errs = ErrorList::new();
        errs.extend(iter);
        errs
    }
}

impl<E, I: Into<Incoming<E>>> Extend<I> for ErrorList<E> {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        for error in iter {
            self.push(error);
        }
    }
}

impl<E> IntoIterator for ErrorList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a ErrorList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// A value being added to an [`ErrorList`], sorted by how it should be added.
///
/// This is rarely named directly. [`ErrorList::add`] and [`ErrorList::push`] accept anything which
/// converts into it:
///
/// | Argument                  | Becomes                                 |
/// |---------------------------|-----------------------------------------|
/// | `E`                       | `Single`                                |
/// | `Option<E>`               | `Absent` or `Single`                    |
/// | `Result<(), E>`           | `Absent` or `Single`                    |
/// | `ErrorList<E>`            | `Collection`                            |
/// | `Tidy<E>`                 | `Single` or `Collection`                |
/// | `Result<(), Tidy<E>>`     | `Absent`, `Single` or `Collection`      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming<E> {
    /// No error; nothing is added.
    Absent,

    /// One error, added as a single element.
    Single(E),

    /// Another list, whose errors are each added in order.
    Collection(ErrorList<E>),
}

impl<E> From<E> for Incoming<E> {
    fn from(error: E) -> Self {
        Incoming::Single(error)
    }
}

impl<E> From<Option<E>> for Incoming<E> {
    fn from(error: Option<E>) -> Self {
        match error {
            Some(error) => Incoming::Single(error),
            None => Incoming::Absent,
        }
    }
}

impl<E> From<Result<(), E>> for Incoming<E> {
    fn from(result: Result<(), E>) -> Self {
        result.err().into()
    }
}

impl<E> From<ErrorList<E>> for Incoming<E> {
    fn from(list: ErrorList<E>) -> Self {
        Incoming::Collection(list)
    }
}

impl<E> From<Tidy<E>> for Incoming<E> {
    fn from(tidy: Tidy<E>) -> Self {
        match tidy {
            Tidy::One(error) => Incoming::Single(error),
            Tidy::Many(list) => Incoming::Collection(list),
        }
    }
}

impl<E> From<Result<(), Tidy<E>>> for Incoming<E> {
    fn from(result: Result<(), Tidy<E>>) -> Self {
        match result {
            Ok(()) => Incoming::Absent,
            Err(tidy) => tidy.into(),
        }
    }
}
