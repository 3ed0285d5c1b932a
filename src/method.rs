//! HTTP method as a typed enum.
//!
//! The RFC 9110 methods get their own variants. Any other syntactically
//! valid token (WebDAV's `PROPFIND`, cache `PURGE`, a private `SYNC`) is
//! carried verbatim in [`Method::Extension`], so routes that accept every
//! method still answer it and unknown paths still report `404`. Only a
//! missing, empty or non-token method makes an event malformed.

use std::fmt;
use std::str::FromStr;

/// An HTTP method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    /// Any other method token, exactly as received.
    Extension(String),
}

impl Method {
    /// Returns the wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect        => "CONNECT",
            Self::Delete         => "DELETE",
            Self::Get            => "GET",
            Self::Head           => "HEAD",
            Self::Options        => "OPTIONS",
            Self::Patch          => "PATCH",
            Self::Post           => "POST",
            Self::Put            => "PUT",
            Self::Trace          => "TRACE",
            Self::Extension(tok) => tok,
        }
    }
}

/// Returned by [`Method::from_str`] for a string that is not an RFC 9110 token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid HTTP method `{0}`")]
pub struct InvalidMethod(pub String);

/// `tchar` from RFC 9110 §5.6.2.
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Parses a method token. Case-sensitive per RFC 9110 §9.1: `get` is an
/// extension method, not `GET`.
impl FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CONNECT" => Self::Connect,
            "DELETE"  => Self::Delete,
            "GET"     => Self::Get,
            "HEAD"    => Self::Head,
            "OPTIONS" => Self::Options,
            "PATCH"   => Self::Patch,
            "POST"    => Self::Post,
            "PUT"     => Self::Put,
            "TRACE"   => Self::Trace,
            other if !other.is_empty() && other.bytes().all(is_tchar) => {
                Self::Extension(other.to_owned())
            }
            other => return Err(InvalidMethod(other.to_owned())),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tokens_get_their_own_variant() {
        assert_eq!("PATCH".parse::<Method>(), Ok(Method::Patch));
        assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
    }

    #[test]
    fn other_tokens_are_extensions() {
        for tok in ["PURGE", "PROPFIND", "REPORT", "get", "M-SEARCH"] {
            assert_eq!(tok.parse::<Method>(), Ok(Method::Extension(tok.to_owned())));
        }
        assert_eq!(Method::Extension("PURGE".to_owned()).as_str(), "PURGE");
    }

    #[test]
    fn non_tokens_are_rejected() {
        assert_eq!("".parse::<Method>(), Err(InvalidMethod(String::new())));
        assert!("GE T".parse::<Method>().is_err());
        assert!("GET\r\n".parse::<Method>().is_err());
        assert!("(GET)".parse::<Method>().is_err());
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Extension("SYNC".to_owned()).to_string(), "SYNC");
    }
}
