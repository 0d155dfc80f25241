use std::env;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        self.code == 100
    }

    pub fn is_malformed_record(&self) -> bool {
        self.code == 101
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        storage_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 100,
        message: "not found".into(),
    }
}

pub fn malformed_record_error<T: Debug>(_: T) -> Error {
    Error {
        code: 101,
        message: "malformed record".into(),
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 102,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 103,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn storage_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "storage error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn geocode_error() -> Error {
    Error {
        code: 4,
        message: "geocode failure".into(),
    }
}
