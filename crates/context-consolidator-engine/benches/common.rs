// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_source_file(functions: usize) -> String {
    let mut content = String::from("use std::collections::HashMap;\n\n");
    for i in 0..functions {
        content.push_str(&format!(
            "fn handler_{i}(input: &str) -> usize {{\n    let mut seen = HashMap::new();\n    for word in input.split_whitespace() {{\n        *seen.entry(word).or_insert(0) += {i};\n    }}\n    seen.len()\n}}\n\n"
        ));
    }
    content
}

/// Lines `first..=last` of `content`, joined back with newlines.
#[allow(dead_code)]
pub fn lines_of(content: &str, first: usize, last: usize) -> String {
    content
        .lines()
        .skip(first)
        .take(last + 1 - first)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `content` with a comment line inserted before every function.
#[allow(dead_code)]
pub fn with_comments_inserted(content: &str) -> String {
    content.replace("fn handler_", "// reviewed\nfn handler_")
}
