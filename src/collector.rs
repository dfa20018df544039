/// Something which tracks a collection of errors.
///
/// Both [`FieldErrors`] and [`ErrorList`] implement this, so that a helper which only reports
/// problems can be written once and pointed at whichever collection the caller is building.
///
/// ```
/// # use tidyerr::{ErrorCollector, ErrorList};
/// fn check_port(port: u32, errs: &mut impl ErrorCollector<String>) {
///     if port > 65535 {
///         errs.push_error(format!("port {port} is out of range"));
///     }
/// }
///
/// let mut errs = ErrorList::new();
/// check_port(80, &mut errs);
/// check_port(70000, &mut errs);
/// assert_eq!(errs.len(), 1);
/// ```
///
/// [`FieldErrors`]: crate::FieldErrors
/// [`ErrorList`]: crate::ErrorList
pub trait ErrorCollector<E> {
    /// Add a new error to the collection of errors.
    fn push_error(&mut self, error: E);

    /// Consumes this collector and pushes all of its errors into a different collector, in the
    /// order they are held.
    fn propagate(self, other: &mut impl ErrorCollector<E>);
}
