use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkforgeError {
    CacheConnection(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    Conflict(String),
    NotFound(String),
    Gone(String),
    Serialization(String),
    DateParse(String),
}

impl LinkforgeError {
    pub fn code(&self) -> &'static str {
        match self {
            LinkforgeError::CacheConnection(_) => "E001",
            LinkforgeError::DatabaseConfig(_) => "E002",
            LinkforgeError::DatabaseConnection(_) => "E003",
            LinkforgeError::DatabaseOperation(_) => "E004",
            LinkforgeError::Validation(_) => "E005",
            LinkforgeError::Conflict(_) => "E006",
            LinkforgeError::NotFound(_) => "E007",
            LinkforgeError::Gone(_) => "E008",
            LinkforgeError::Serialization(_) => "E009",
            LinkforgeError::DateParse(_) => "E010",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LinkforgeError::CacheConnection(_) => "Cache Connection Error",
            LinkforgeError::DatabaseConfig(_) => "Database Configuration Error",
            LinkforgeError::DatabaseConnection(_) => "Database Connection Error",
            LinkforgeError::DatabaseOperation(_) => "Database Operation Error",
            LinkforgeError::Validation(_) => "Validation Error",
            LinkforgeError::Conflict(_) => "Short Code Conflict",
            LinkforgeError::NotFound(_) => "Resource Not Found",
            LinkforgeError::Gone(_) => "Link Expired",
            LinkforgeError::Serialization(_) => "Serialization Error",
            LinkforgeError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LinkforgeError::CacheConnection(msg)
            | LinkforgeError::DatabaseConfig(msg)
            | LinkforgeError::DatabaseConnection(msg)
            | LinkforgeError::DatabaseOperation(msg)
            | LinkforgeError::Validation(msg)
            | LinkforgeError::Conflict(msg)
            | LinkforgeError::NotFound(msg)
            | LinkforgeError::Gone(msg)
            | LinkforgeError::Serialization(msg)
            | LinkforgeError::DateParse(msg) => msg,
        }
    }
}

impl fmt::Display for LinkforgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LinkforgeError {}

impl LinkforgeError {
    pub fn cache_connection<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::CacheConnection(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::NotFound(msg.into())
    }

    pub fn gone<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::Gone(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        LinkforgeError::DateParse(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkforgeError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkforgeError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkforgeError {
    fn from(err: std::io::Error) -> Self {
        LinkforgeError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for LinkforgeError {
    fn from(err: serde_json::Error) -> Self {
        LinkforgeError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LinkforgeError {
    fn from(err: chrono::ParseError) -> Self {
        LinkforgeError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkforgeError>;
