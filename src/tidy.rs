use std::{
    error::Error,
    fmt::{self, Debug, Display},
};

use crate::{ErrorCollector, ErrorList};

/// The error side of [`ErrorList::tidy`]: either the one error which occurred, or all of them.
///
/// `Tidy` displays as its contents do, so a `Tidy::One` prints exactly like the error it wraps.
/// Adding a `Tidy` back into an [`ErrorList`] splices it in flat, which means a step can tidy its
/// own errors before returning and its caller can still gather them up without nesting:
///
/// ```
/// # use tidyerr::{ErrorList, Tidy};
/// fn load(paths: &[&'static str]) -> Result<(), Tidy<String>> {
///     let mut errs: ErrorList<String> = ErrorList::new();
///     for path in paths {
///         errs.push(Some(format!("{path} not found")));
///     }
///     errs.tidy()
/// }
///
/// let mut errs: ErrorList<String> = ErrorList::new();
/// errs.push(load(&["a.toml"]));
/// errs.push(load(&["b.toml", "c.toml"]));
/// errs.push(load(&[]));
///
/// assert_eq!(errs.to_string(), "a.toml not found, b.toml not found, c.toml not found");
/// ```
///
/// Boxing a `Tidy` directly keeps the wrapper, so downcasting it to the inner type fails. Use
/// [`into_boxed`] to box the bare error instead.
///
/// [`into_boxed`]: Tidy::into_boxed
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Tidy<E> {
    /// Exactly one error.
    One(E),

    /// Two or more errors, in the order they were added.
    Many(ErrorList<E>),
}

impl<E> Tidy<E> {
    /// The number of errors. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Tidy::One(_) => 1,
            Tidy::Many(list) => list.len(),
        }
    }

    /// The errors, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        match self {
            Tidy::One(error) => std::slice::from_ref(error),
            Tidy::Many(list) => list,
        }
    }

    /// Converts back into an [`ErrorList`], for example to keep accumulating.
    ///
    /// ```
    /// # use tidyerr::{ErrorList, Tidy};
    /// let list = Tidy::One("first").into_list().add("second");
    /// assert_eq!(list.to_string(), "first, second");
    /// ```
    #[must_use]
    pub fn into_list(self) -> ErrorList<E> {
        match self {
            Tidy::One(error) => {
                let mut list = ErrorList::new();
                list.push_error(error);
                list
            }
            Tidy::Many(list) => list,
        }
    }

    /// Boxes the error for returning through `Box<dyn Error>`. A single error is boxed on its
    /// own, so it can be downcast back to its concrete type and keeps its own `source()`. Two or
    /// more are boxed as an [`ErrorList`].
    ///
    /// ```
    /// # use tidyerr::ErrorList;
    /// #[derive(Debug)]
    /// struct Boom;
    ///
    /// impl std::fmt::Display for Boom {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         f.write_str("boom")
    ///     }
    /// }
    ///
    /// impl std::error::Error for Boom {}
    ///
    /// let boxed = ErrorList::new().add(Boom).tidy().unwrap_err().into_boxed();
    /// assert!(boxed.downcast_ref::<Boom>().is_some());
    /// ```
    #[must_use]
    pub fn into_boxed(self) -> Box<dyn Error + Send + Sync>
    where
        E: Into<Box<dyn Error + Send + Sync>> + Debug + Display + Send + Sync + 'static,
    {
        match self {
            Tidy::One(error) => error.into(),
            Tidy::Many(list) => Box::new(list),
        }
    }
}

impl<E: Display> Display for Tidy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tidy::One(error) => error.fmt(f),
            Tidy::Many(list) => list.fmt(f),
        }
    }
}

impl<E: Debug + Display> Error for Tidy<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum StepError {
        #[error("could not read config")]
        Read(#[source] std::io::Error),
        #[error("step {0} timed out")]
        Timeout(u32),
    }

    #[test]
    fn one_displays_as_inner() {
        let tidy = ErrorList::new().add(StepError::Timeout(3)).tidy().unwrap_err();
        assert_eq!(tidy.to_string(), "step 3 timed out");
        assert_eq!(tidy.len(), 1);
    }

    #[test]
    fn boxed_one_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let boxed = ErrorList::new()
            .add(StepError::Read(io))
            .tidy()
            .unwrap_err()
            .into_boxed();
        let source = boxed.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("missing"));
    }

    #[test]
    fn boxed_one_downcasts_to_inner() {
        let boxed = ErrorList::new()
            .add(StepError::Timeout(4))
            .tidy()
            .unwrap_err()
            .into_boxed();
        assert!(matches!(
            boxed.downcast_ref::<StepError>(),
            Some(StepError::Timeout(4))
        ));
    }

    #[test]
    fn boxed_many_downcasts_to_list() {
        let boxed = ErrorList::new()
            .add(StepError::Timeout(1))
            .add(StepError::Timeout(2))
            .tidy()
            .unwrap_err()
            .into_boxed();
        let list = boxed.downcast_ref::<ErrorList<StepError>>();
        assert_eq!(list.map(|list| list.len()), Some(2));
        assert_eq!(boxed.to_string(), "step 1 timed out, step 2 timed out");
    }

    #[test]
    fn boxed_elements_propagate_with_question_mark() {
        fn run(
            steps: Vec<Result<(), Box<dyn Error + Send + Sync>>>,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            let errs: ErrorList<Box<dyn Error + Send + Sync>> = steps.into_iter().collect();
            errs.tidy()?;
            Ok(())
        }

        assert!(run(vec![Ok(())]).is_ok());
        let err = run(vec![Err("a".into()), Ok(()), Err("b".into())]).unwrap_err();
        assert_eq!(err.to_string(), "a, b");
        let err = run(vec![Err("only".into())]).unwrap_err();
        assert_eq!(err.to_string(), "only");
    }

    #[test]
    fn many_displays_joined() {
        let tidy = ErrorList::new()
            .add(StepError::Timeout(1))
            .add(StepError::Timeout(2))
            .tidy()
            .unwrap_err();
        assert_eq!(tidy.to_string(), "step 1 timed out, step 2 timed out");
        assert!(tidy.source().is_none());
        assert_eq!(tidy.as_slice().len(), 2);
    }

    #[test]
    fn into_list_round_trips_many() {
        let list = ErrorList::new().add(1).add(2).add(3);
        let tidy = list.clone().tidy().unwrap_err();
        assert_eq!(tidy.into_list(), list);
    }

    #[test]
    fn as_slice_of_one() {
        assert_eq!(Tidy::One('x').as_slice(), &['x']);
    }
}
