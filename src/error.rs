use std::{error, fmt};

type Source = Box<dyn error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The underlying format serializer rejected the record.
    Encoding,
    /// The content-type argument is not a syntactically valid media type.
    InvalidContentType,
    /// A valid media type that has no encoder.
    UnsupportedContentType,
    Other,
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Source>,
}

impl Error {
    pub fn new(message: &str) -> Self {
        Self {
            kind: ErrorKind::Other,
            message: message.into(),
            source: None,
        }
    }

    pub fn encoding<E>(message: &str, err: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Self {
            kind: ErrorKind::Encoding,
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }

    pub fn invalid_content_type(message: String) -> Self {
        Self {
            kind: ErrorKind::InvalidContentType,
            message,
            source: None,
        }
    }

    pub fn unsupported_content_type(message: String) -> Self {
        Self {
            kind: ErrorKind::UnsupportedContentType,
            message,
            source: None,
        }
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unexpected error: {}", self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self {
            kind: ErrorKind::Other,
            message,
            source: None,
        }
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(String, E)> for Error {
    fn from((message, err): (String, E)) -> Self {
        Self {
            kind: ErrorKind::Other,
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(&str, E)> for Error {
    fn from((message, err): (&str, E)) -> Self {
        Self {
            kind: ErrorKind::Other,
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
