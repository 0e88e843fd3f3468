#![cfg_attr(not(test), no_std)]
extern crate alloc;

mod de;

pub mod category;
pub mod question;
pub mod quiz;

pub use category::Category;
pub use question::{NewQuestion, Question, Search};
pub use quiz::{CategorySelector, QuizCategory, QuizTurn};
