//! Small standalone helpers: greetings, control flow, arithmetic, collections,
//! file reading and a JSON fetch.

pub mod basics;
pub mod control;
pub mod discount;
pub mod library;
pub mod posts;
pub mod words;

pub use control::{Sign, check_sign, first_n_primes, sum_1_to_n};
pub use discount::{DiscountError, calculate_discount};
pub use posts::{FetchError, PostClient, fetch_post};
pub use words::{WordCountError, count_words_in_file};
