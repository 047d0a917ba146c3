//! Short code generation
//!
//! Short codes are the human-shareable handles of snippets. They are drawn
//! uniformly from a fixed 60-glyph alphabet; uniqueness is not checked here
//! but by the store's unique index, with bounded retry in
//! [`create_snippet`](crate::ops::snippet_ops::create_snippet).

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;

/// Alphanumerics without `l` and `I`, which read alike in most fonts.
pub const SHORT_CODE_ALPHABET: &[u8] =
    b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_SHORT_CODE_LENGTH: usize = 4;

/// Source of candidate short codes
pub trait ShortCodeSource {
    /// Produce one candidate of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Uniform random codes from [`SHORT_CODE_ALPHABET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShortCodes;

impl ShortCodeSource for RandomShortCodes {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| SHORT_CODE_ALPHABET[rng.gen_range(0..SHORT_CODE_ALPHABET.len())] as char)
            .collect()
    }
}

/// Replays a fixed list of codes, then repeats the last one
///
/// Lets tests force collisions deterministically.
#[derive(Debug)]
pub struct ScriptedShortCodes {
    queue: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedShortCodes {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(codes.into_iter().map(Into::into).collect()),
            last: Mutex::new(String::new()),
        }
    }
}

impl ShortCodeSource for ScriptedShortCodes {
    fn generate(&self, length: usize) -> String {
        let next = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(code) = next {
            *last = code;
        }
        last.chars().take(length).collect()
    }
}

/// Whether every character of `code` belongs to [`SHORT_CODE_ALPHABET`]
pub fn is_alphabet_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| SHORT_CODE_ALPHABET.contains(&b))
}
