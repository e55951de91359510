use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    pub title: &'static str,
    pub author: &'static str,
}

pub const FAVORITE_BOOKS: &[Book] = &[
    Book {
        title: "The Gunslinger",
        author: "Stephen King",
    },
    Book {
        title: "Farewell to Arms",
        author: "Ernest Hemingway",
    },
    Book {
        title: "Dinosaurs Before Dark",
        author: "Mary Pope Osborne",
    },
];

pub fn first_three_books() -> &'static [Book] {
    &FAVORITE_BOOKS[..FAVORITE_BOOKS.len().min(3)]
}

/// Student name to student id.
pub fn student_db() -> HashMap<&'static str, &'static str> {
    HashMap::from([("Ricky", "S001"), ("Bobby", "S002"), ("Slick", "S003")])
}
