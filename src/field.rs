use std::{
    collections::{btree_map, BTreeMap},
    error::Error,
    fmt::{self, Debug, Display},
};

use crate::ErrorCollector;

/// Errors keyed by the name of the field which produced them.
///
/// Each field holds one or more payloads, in the order they were inserted. A payload can be any
/// value with a textual form: a message, an error, a `Box<dyn Display>`, and so on. A field is
/// only ever present if it has at least one payload.
///
/// This is meant for validation passes which should report every bad field at once, rather than
/// stopping on the first:
///
/// ```
/// # use tidyerr::FieldErrors;
/// fn validate(name: &str, age: i32) -> Result<(), FieldErrors<&'static str>> {
///     let mut errs = FieldErrors::new();
///     if name.is_empty() {
///         errs.insert("name", "required");
///     }
///     if age <= 0 {
///         errs.insert("age", "must be positive");
///     }
///     errs.tidy()
/// }
///
/// assert!(validate("Ada", 36).is_ok());
///
/// let err = validate("", -1).unwrap_err();
/// assert_eq!(err.to_string(), "age is [must be positive], name is [required]");
/// ```
///
/// # Rendering
///
/// The [`Display`] form lists fields in ascending order of their names, each as
/// `<field> is [<payload>, <payload>, ...]`, separated by `", "`. The output does not depend on
/// the order in which fields were inserted, so it is stable enough to diff in logs.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct FieldErrors<P> {
    fields: BTreeMap<String, Vec<P>>,
}

impl<P> FieldErrors<P> {
    /// Constructs an empty `FieldErrors`.
    ///
    /// ```
    /// # use tidyerr::FieldErrors;
    /// let errs: FieldErrors<String> = FieldErrors::new();
    /// assert!(errs.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        FieldErrors { fields: BTreeMap::new() }
    }

    /// Appends a payload to the ones already recorded against `field`.
    ///
    /// ```
    /// # use tidyerr::FieldErrors;
    /// let mut errs = FieldErrors::new();
    /// errs.insert("email", "required");
    /// errs.insert("email", "must contain @");
    ///
    /// assert_eq!(errs.get("email"), Some(&["required", "must contain @"][..]));
    /// ```
    pub fn insert(&mut self, field: impl Into<String>, payload: P) {
        self.fields.entry(field.into()).or_default().push(payload);
    }

    /// The payloads recorded against `field`, if there are any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[P]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Returns `true` if `field` has at least one payload.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The number of fields with errors. This is not the total number of payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field has any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over each field and its payloads, in ascending order of field name.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter { inner: self.fields.iter() }
    }

    /// Iterates over the names of the fields with errors, in ascending order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Copies every payload from `other` into this collection, after any payloads already
    /// recorded against the same field. `other` is left as it was.
    ///
    /// ```
    /// # use tidyerr::FieldErrors;
    /// let mut errs = FieldErrors::new();
    /// errs.insert("name", "required");
    ///
    /// let mut address = FieldErrors::new();
    /// address.insert("name", "too long");
    /// address.insert("postcode", "unknown");
    ///
    /// errs.merge(&address);
    /// assert_eq!(errs.to_string(), "name is [required, too long], postcode is [unknown]");
    /// assert_eq!(address.len(), 2);
    /// ```
    pub fn merge(&mut self, other: &FieldErrors<P>)
    where
        P: Clone,
    {
        for (field, payloads) in &other.fields {
            self.fields
                .entry(field.clone())
                .or_default()
                .extend(payloads.iter().cloned());
        }
    }

    /// Collapses this collection into the result of a validation: `Ok(())` if there are no
    /// errors, or `Err` with the whole collection otherwise.
    ///
    /// A collection with a single field and a single payload is still returned whole, so callers
    /// can always tell which field was at fault.
    ///
    /// ```
    /// # use tidyerr::FieldErrors;
    /// let errs: FieldErrors<&str> = FieldErrors::new();
    /// assert_eq!(errs.tidy(), Ok(()));
    ///
    /// let mut errs = FieldErrors::new();
    /// errs.insert("name", "required");
    /// assert_eq!(errs.clone().tidy(), Err(errs));
    /// ```
    pub fn tidy(self) -> Result<(), Self> {
        if self.is_empty() {
            log::trace!("tidied field errors: none");
            Ok(())
        } else {
            log::trace!("tidied field errors: {} field(s)", self.len());
            Err(self)
        }
    }
}

impl<P> Default for FieldErrors<P> {
    fn default() -> Self {
        FieldErrors::new()
    }
}

impl<P: Display> Display for FieldErrors<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, payloads)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field} is [")?;
            for (j, payload) in payloads.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{payload}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl<P: Debug + Display> Error for FieldErrors<P> {}

impl<P> ErrorCollector<(String, P)> for FieldErrors<P> {
    fn push_error(&mut self, (field, payload): (String, P)) {
        self.insert(field, payload);
    }

    fn propagate(self, other: &mut impl ErrorCollector<(String, P)>) {
        for (field, payloads) in self.fields {
            for payload in payloads {
                other.push_error((field.clone(), payload));
            }
        }
    }
}

impl<K: Into<String>, P> FromIterator<(K, P)> for FieldErrors<P> {
    /// Builds a collection from `(field, payload)` pairs. Payloads for the same field keep the
    /// order they appear in.
    ///
    /// ```
    /// # use tidyerr::FieldErrors;
    /// let errs: FieldErrors<_> = [("b", 1), ("a", 2), ("b", 3)].into_iter().collect();
    /// assert_eq!(errs.to_string(), "a is [2], b is [1, 3]");
    /// ```
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut errs = FieldErrors::new();
        errs.extend(iter);
        errs
    }
}

impl<K: Into<String>, P> Extend<(K, P)> for FieldErrors<P> {
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (field, payload) in iter {
            self.insert(field, payload);
        }
    }
}

impl<P> IntoIterator for FieldErrors<P> {
    type Item = (String, Vec<P>);
    type IntoIter = btree_map::IntoIter<String, Vec<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a FieldErrors<P> {
    type Item = (&'a str, &'a [P]);
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the fields of a [`FieldErrors`] and their payloads. Created with
/// [`FieldErrors::iter`].
pub struct Iter<'a, P> {
    inner: btree_map::Iter<'a, String, Vec<P>>,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = (&'a str, &'a [P]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(field, payloads)| (field.as_str(), payloads.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<P> ExactSizeIterator for Iter<'_, P> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
