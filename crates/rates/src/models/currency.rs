use std::fmt;

use super::types::CurrencyCode;

/// Anything that knows its alphabetic currency code.
///
/// Implement this for richer currency objects (with names, symbols, minor
/// units, ...) so they can be passed to exchangers directly.
pub trait CurrencyIdentity: Send + Sync {
    /// The ISO 4217 alphabetic code, e.g. `"EUR"`.
    fn alphabetical_code(&self) -> &str;
}

impl CurrencyIdentity for CurrencyCode {
    fn alphabetical_code(&self) -> &str {
        self.as_str()
    }
}

/// Currency argument accepted by exchanger queries.
///
/// Either a raw code or a currency identity object; both are normalized to
/// a [`CurrencyCode`] once at the exchanger boundary.
#[derive(Clone, Copy)]
pub enum CurrencyRef<'a> {
    Code(&'a str),
    Identity(&'a dyn CurrencyIdentity),
}

impl CurrencyRef<'_> {
    /// The code as supplied by the caller, before normalization.
    pub fn raw_code(&self) -> &str {
        match self {
            CurrencyRef::Code(code) => code,
            CurrencyRef::Identity(identity) => identity.alphabetical_code(),
        }
    }

    /// Normalizes the argument into a [`CurrencyCode`].
    ///
    /// Returns `None` when the supplied value is not a well-formed code.
    pub fn to_code(&self) -> Option<CurrencyCode> {
        CurrencyCode::parse(self.raw_code()).ok()
    }
}

impl fmt::Debug for CurrencyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyRef::Code(code) => f.debug_tuple("Code").field(code).finish(),
            CurrencyRef::Identity(identity) => f
                .debug_tuple("Identity")
                .field(&identity.alphabetical_code())
                .finish(),
        }
    }
}

impl<'a> From<&'a str> for CurrencyRef<'a> {
    fn from(code: &'a str) -> Self {
        CurrencyRef::Code(code)
    }
}

impl<'a> From<&'a String> for CurrencyRef<'a> {
    fn from(code: &'a String) -> Self {
        CurrencyRef::Code(code.as_str())
    }
}

impl<'a> From<&'a CurrencyCode> for CurrencyRef<'a> {
    fn from(code: &'a CurrencyCode) -> Self {
        CurrencyRef::Code(code.as_str())
    }
}

impl<'a> From<&'a dyn CurrencyIdentity> for CurrencyRef<'a> {
    fn from(identity: &'a dyn CurrencyIdentity) -> Self {
        CurrencyRef::Identity(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Euro;

    impl CurrencyIdentity for Euro {
        fn alphabetical_code(&self) -> &str {
            "EUR"
        }
    }

    #[test]
    fn test_code_and_identity_normalize_to_same_code() {
        let euro = Euro;
        let from_identity = CurrencyRef::from(&euro as &dyn CurrencyIdentity);
        let from_code = CurrencyRef::from("eur");

        assert_eq!(from_identity.to_code(), Some(CurrencyCode::EUR));
        assert_eq!(from_code.to_code(), Some(CurrencyCode::EUR));
    }

    #[test]
    fn test_malformed_code_does_not_normalize() {
        assert_eq!(CurrencyRef::from("EURO").to_code(), None);
        assert_eq!(CurrencyRef::from("EURO").raw_code(), "EURO");
    }

    #[test]
    fn test_debug_shows_code() {
        let euro = Euro;
        assert_eq!(
            format!("{:?}", CurrencyRef::Identity(&euro)),
            "Identity(\"EUR\")"
        );
        assert_eq!(format!("{:?}", CurrencyRef::Code("USD")), "Code(\"USD\")");
    }
}
