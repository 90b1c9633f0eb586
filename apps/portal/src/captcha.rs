use rand::seq::SliceRandom;
use rand::Rng;

pub const CAPTCHA_LEN: usize = 4;

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Four distinct digits the user has to copy back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    code: String,
}

impl Captcha {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = DIGITS.choose_multiple(rng, CAPTCHA_LEN).collect();
        Self { code }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Surrounding whitespace in the answer is ignored.
    pub fn verify(&self, answer: &str) -> bool {
        answer.trim() == self.code
    }
}
