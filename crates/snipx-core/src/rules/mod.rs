pub mod validation;

pub use validation::{
    validate_author, validate_content, validate_title, CreatePolicy, MAX_AUTHOR_CHARS,
    MAX_TITLE_CHARS,
};
