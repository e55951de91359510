use std::io::{self, Write};

pub const GREETING: &str = "Hello World";

pub fn hello_world() -> &'static str {
    GREETING
}

/// Writes the greeting followed by a newline.
pub fn print_hello(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{GREETING}")
}

pub fn get_integer() -> i64 {
    42
}

#[allow(clippy::approx_constant)]
pub fn get_float() -> f64 {
    3.14
}

pub fn get_string() -> String {
    "hello world".to_string()
}

pub fn get_boolean() -> bool {
    true
}
